use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, lit_checkout, run_lit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

/// History:
///       S (f.txt = "base")
///      / \
///     H   G
///     |   |
///  master other
#[rstest]
fn merge_conflict_is_committed_with_markers(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "f.txt", "base", "split");
    run_lit_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "f.txt", "head-version", "head edit");
    let head_id = head_commit_id(dir);
    lit_checkout(dir, "other");
    commit_file(dir, "f.txt", "given-version", "given edit");
    let given_id = head_commit_id(dir);
    lit_checkout(dir, "master");

    run_lit_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")),
        "<<<<<<< HEAD\nhead-version=======\ngiven-version>>>>>>>\n"
    );
    run_lit_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "===\ncommit {}\nMerge: {} {}\n",
            head_commit_id(dir),
            &head_id[..7],
            &given_id[..7]
        )))
        .stdout(predicate::str::contains("\nMerged other into master.\n"));

    Ok(())
}
