use crate::common::command::{committed_repository_dir, head_commit_id, run_lit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_branch_at_head(committed_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let head_id = head_commit_id(dir);

    run_lit_command(dir, &["branch", "feature/x"])
        .assert()
        .success()
        .stdout("");

    committed_repository_dir
        .child(".lit/refs/heads/feature/x")
        .assert(head_id.clone());
    committed_repository_dir
        .child(".lit/HEAD")
        .assert("ref: refs/heads/master");

    run_lit_command(dir, &["branch", "feature/x"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");

    Ok(())
}

#[rstest]
#[case::double_dot("bad..name")]
#[case::leading_dot(".hidden")]
#[case::lock_suffix("topic.lock")]
fn create_branch_with_invalid_name(
    committed_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_lit_command(committed_repository_dir.path(), &["branch", name])
        .assert()
        .success()
        .stdout(format!("Invalid branch name: {name}.\n"));

    Ok(())
}

#[rstest]
fn remove_branch(committed_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_lit_command(dir, &["branch", "other"]).assert().success();

    run_lit_command(dir, &["rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");

    run_lit_command(dir, &["rm-branch", "other"])
        .assert()
        .success()
        .stdout("");
    committed_repository_dir
        .child(".lit/refs/heads/other")
        .assert(predicate::path::missing());

    run_lit_command(dir, &["rm-branch", "other"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");

    Ok(())
}
