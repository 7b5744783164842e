use crate::common::command::{commit_count, init_repository_dir, lit_add, lit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_with_nothing_staged_is_refused(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    lit_commit(init_repository_dir.path(), "nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    assert_eq!(commit_count(init_repository_dir.path()), 1);

    Ok(())
}

#[rstest]
fn commit_with_empty_message_is_refused(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    lit_add(dir, "a.txt");

    lit_commit(dir, "")
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");

    assert_eq!(commit_count(dir), 1);

    Ok(())
}
