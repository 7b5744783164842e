use crate::common::command::{
    commit_file, committed_repository_dir, head_commit_id, lit_add, run_lit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reset_to_an_earlier_commit(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let first_id = head_commit_id(dir);
    commit_file(dir, "a.txt", "a2", "edit a");
    commit_file(dir, "c.txt", "c", "add c");
    write_file(FileSpec::new(dir.join("d.txt"), "staged".to_string()));
    lit_add(dir, "d.txt");

    run_lit_command(dir, &["reset", &first_id[..8]])
        .assert()
        .success()
        .stdout("");

    assert_eq!(head_commit_id(dir), first_id);
    assert_eq!(read_file(&dir.join("a.txt")), "a");
    committed_repository_dir
        .child("c.txt")
        .assert(predicate::path::missing());
    committed_repository_dir.child("d.txt").assert("staged");
    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn reset_to_an_unknown_commit(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let head_id = head_commit_id(dir);

    run_lit_command(dir, &["reset", "0000000000000"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");

    assert_eq!(head_commit_id(dir), head_id);

    Ok(())
}
