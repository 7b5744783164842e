use crate::common::command::{committed_repository_dir, lit_commit, run_lit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn rm_tracked_file_deletes_and_untracks_it(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    run_lit_command(dir, &["rm", "a.txt"])
        .assert()
        .success()
        .stdout("");

    committed_repository_dir
        .child("a.txt")
        .assert(predicate::path::missing());
    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\na.txt\n\n"));

    lit_commit(dir, "drop a").assert().success().stdout("");

    run_lit_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");

    Ok(())
}
