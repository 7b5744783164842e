use crate::common::command::{
    commit_count, head_commit_id, init_repository_dir, lit_add, lit_commit, run_lit_command,
};
use crate::common::file::write_generated_files;
use crate::common::CLEAN_STATUS;
use assert_fs::TempDir;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

#[rstest]
fn commit_staged_files_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let root_id = head_commit_id(dir);
    for file in write_generated_files(dir, 3) {
        let name = file.path.file_name().unwrap().to_string_lossy().to_string();
        lit_add(dir, &name);
    }

    lit_commit(dir, "three files").assert().success().stdout("");

    assert_ne!(head_commit_id(dir), root_id);
    assert_eq!(commit_count(dir), 2);
    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(CLEAN_STATUS);

    Ok(())
}
