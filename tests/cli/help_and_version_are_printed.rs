use crate::common::command::{repository_dir, run_lit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn help_and_version_are_printed(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();

    run_lit_command(dir, &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:").and(predicate::str::contains("merge")));

    run_lit_command(dir, &["--version"])
        .assert()
        .success()
        .stdout("lit 0.1.0\n");

    Ok(())
}
