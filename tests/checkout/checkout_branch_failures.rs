use crate::common::command::{commit_file, committed_repository_dir, lit_checkout, run_lit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_unknown_or_current_branch(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_lit_command(dir, &["checkout", "nope"])
        .assert()
        .success()
        .stdout("No such branch exists.\n");

    run_lit_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");

    Ok(())
}

#[rstest]
fn checkout_with_untracked_file_in_the_way(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_lit_command(dir, &["branch", "other"]).assert().success();
    lit_checkout(dir, "other");
    commit_file(dir, "c.txt", "tracked on other", "add c");
    lit_checkout(dir, "master");
    write_file(FileSpec::new(dir.join("c.txt"), "precious".to_string()));

    run_lit_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    committed_repository_dir.child("c.txt").assert("precious");
    committed_repository_dir
        .child(".lit")
        .child("HEAD")
        .assert("ref: refs/heads/master");

    Ok(())
}
