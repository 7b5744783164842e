use crate::common::command::{repository_dir, run_lit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::status(&["status"])]
#[case::log(&["log"])]
#[case::commit(&["commit", "message"])]
#[case::branch(&["branch", "other"])]
#[case::merge(&["merge", "other"])]
fn commands_need_a_repository(
    repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_lit_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Not in an initialized Gitlet directory.\n");

    repository_dir
        .child(".lit")
        .assert(predicate::path::missing());

    Ok(())
}
