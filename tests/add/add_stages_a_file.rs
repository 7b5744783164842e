use crate::common::command::{init_repository_dir, lit_add, run_lit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_stages_a_file(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("hello.txt"), "hi".to_string()));

    lit_add(dir, "hello.txt");

    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\nhello.txt\n\n",
        ));

    Ok(())
}
