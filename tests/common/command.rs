use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Commit date used by every commit made through [`lit_commit`]
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// How [`COMMIT_DATE`] is shown by `log`
pub const LOG_DATE: &str = "Sun Jan 1 12:00:00 2023 -0800";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_lit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `a.txt` ("a") and `b.txt` ("b") committed on master as "first"
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "b".to_string()));
    lit_add(dir, "a.txt");
    lit_add(dir, "b.txt");
    lit_commit(dir, "first").assert().success();

    init_repository_dir
}

pub fn run_lit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lit").expect("Failed to find lit binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("LIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn lit_commit(dir: &Path, message: &str) -> Command {
    lit_commit_at(dir, message, COMMIT_DATE)
}

pub fn lit_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_lit_command(dir, &["commit", message]);
    cmd.env("LIT_COMMIT_DATE", date);
    cmd
}

pub fn lit_add(dir: &Path, file: &str) {
    run_lit_command(dir, &["add", file])
        .assert()
        .success()
        .stdout("");
}

/// Write `content` to `file`, stage it and commit it
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    lit_add(dir, file);
    lit_commit(dir, message).assert().success().stdout("");
}

pub fn lit_checkout(dir: &Path, branch: &str) {
    run_lit_command(dir, &["checkout", branch])
        .assert()
        .success()
        .stdout("");
}

/// Id of the commit the current branch points to
pub fn head_commit_id(dir: &Path) -> String {
    let lit_dir = dir.join(".lit");
    let head = std::fs::read_to_string(lit_dir.join("HEAD")).expect("Failed to read HEAD");
    let ref_path = head
        .trim()
        .strip_prefix("ref: ")
        .expect("HEAD should name a branch");

    std::fs::read_to_string(lit_dir.join(ref_path))
        .expect("Failed to read the current branch")
        .trim()
        .to_string()
}

/// Number of commits in the object store
pub fn commit_count(dir: &Path) -> usize {
    walkdir::WalkDir::new(dir.join(".lit").join("commits"))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count()
}
