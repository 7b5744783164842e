use crate::common::command::{
    commit_file, committed_repository_dir, lit_checkout, lit_commit, run_lit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

/// History:
///       first (a.txt, b.txt)
///      / \
///     M   F
///     |   |
///  master feature
///
/// master adds mine.txt; feature adds theirs.txt, edits a.txt and removes b.txt.
/// The merge takes every change from both sides without conflicts.
#[rstest]
fn merge_simple_divergence(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_lit_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "mine.txt", "mine", "master work");
    lit_checkout(dir, "feature");
    commit_file(dir, "theirs.txt", "theirs", "feature work");
    commit_file(dir, "a.txt", "a from feature", "feature edit");
    run_lit_command(dir, &["rm", "b.txt"]).assert().success();
    lit_commit(dir, "feature drop").assert().success();
    lit_checkout(dir, "master");

    run_lit_command(dir, &["merge", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("mine.txt")), "mine");
    assert_eq!(read_file(&dir.join("theirs.txt")), "theirs");
    assert_eq!(read_file(&dir.join("a.txt")), "a from feature");
    committed_repository_dir
        .child("b.txt")
        .assert(predicate::path::missing());

    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ));
    run_lit_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nMerged feature into master.\n"));

    Ok(())
}
