use crate::common::command::{init_repository_dir, run_lit_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case::add_without_file(&["add"])]
#[case::add_with_two_files(&["add", "a.txt", "b.txt"])]
#[case::commit_without_message(&["commit"])]
#[case::log_with_operand(&["log", "master"])]
#[case::checkout_without_target(&["checkout"])]
#[case::checkout_with_two_targets(&["checkout", "a", "b"])]
#[case::merge_without_branch(&["merge"])]
fn wrong_operands_are_reported(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_lit_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Incorrect operands.\n");

    Ok(())
}
