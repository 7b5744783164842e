use crate::common::CLEAN_STATUS;
use crate::common::command::{init_repository_dir, run_lit_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn add_missing_file_is_refused(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_lit_command(dir, &["add", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");

    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(CLEAN_STATUS);

    Ok(())
}
