use crate::common::command::{committed_repository_dir, lit_add, run_lit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn status_lists_branches_and_staging_area(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    run_lit_command(dir, &["branch", "other-branch"]).assert().success();
    run_lit_command(dir, &["branch", "feature/x"]).assert().success();
    write_file(FileSpec::new(dir.join("wug.txt"), "wug".to_string()));
    write_file(FileSpec::new(dir.join("wug2.txt"), "wug2".to_string()));
    lit_add(dir, "wug2.txt");
    lit_add(dir, "wug.txt");
    run_lit_command(dir, &["rm", "b.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("random.stuff"), "junk".to_string()));

    run_lit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n\
             *master\n\
             feature/x\n\
             other-branch\n\
             \n\
             === Staged Files ===\n\
             wug.txt\n\
             wug2.txt\n\
             \n\
             === Removed Files ===\n\
             b.txt\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             \n\
             === Untracked Files ===\n\
             \n",
        );

    Ok(())
}
