use crate::common::command::{
    commit_file, committed_repository_dir, lit_checkout, lit_commit, run_lit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_branch_successfully(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_lit_command(dir, &["branch", "other"]).assert().success();
    lit_checkout(dir, "other");
    commit_file(dir, "a.txt", "a on other", "edit a");
    commit_file(dir, "c.txt", "c", "add c");
    run_lit_command(dir, &["rm", "b.txt"]).assert().success();
    lit_commit(dir, "drop b").assert().success();

    lit_checkout(dir, "master");

    assert_eq!(read_file(&dir.join("a.txt")), "a");
    assert_eq!(read_file(&dir.join("b.txt")), "b");
    committed_repository_dir
        .child("c.txt")
        .assert(predicate::path::missing());
    committed_repository_dir
        .child(".lit")
        .child("HEAD")
        .assert("ref: refs/heads/master");

    lit_checkout(dir, "other");

    assert_eq!(read_file(&dir.join("a.txt")), "a on other");
    assert_eq!(read_file(&dir.join("c.txt")), "c");
    committed_repository_dir
        .child("b.txt")
        .assert(predicate::path::missing());

    Ok(())
}
