use crate::common::command::{repository_dir, run_lit_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn no_command_asks_for_one(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_lit_command(repository_dir.path(), &[])
        .assert()
        .success()
        .stdout("Please enter a command.\n");

    Ok(())
}
