use crate::common::CLEAN_STATUS;
use crate::common::command::{repository_dir, run_lit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_lit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("");

    repository_dir
        .child(".lit")
        .child("HEAD")
        .assert("ref: refs/heads/master");
    repository_dir
        .child(".lit")
        .child("refs")
        .child("heads")
        .child("master")
        .assert(predicate::str::is_match(r"^[0-9a-f]{40}$")?);
    repository_dir
        .child(".lit")
        .child("commits")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".lit")
        .child("blobs")
        .assert(predicate::path::is_dir());

    run_lit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(CLEAN_STATUS);

    Ok(())
}
