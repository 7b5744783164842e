use crate::common::command::{head_commit_id, init_repository_dir, run_lit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_twice_is_refused(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let root_id = head_commit_id(init_repository_dir.path());

    run_lit_command(init_repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("A Gitlet version-control system already exists in the current directory.\n");

    assert_eq!(head_commit_id(init_repository_dir.path()), root_id);

    Ok(())
}
