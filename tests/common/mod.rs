#![allow(dead_code)]

pub mod command;
pub mod file;

/// Log entry of the root commit every repository starts with
pub const ROOT_LOG_ENTRY_SUFFIX: &str = "Date: Thu Jan 1 00:00:00 1970 -0800\ninitial commit\n\n";

/// Status of a repository with nothing staged, only `master`
pub const CLEAN_STATUS: &str = "=== Branches ===\n*master\n\n\
=== Staged Files ===\n\n\
=== Removed Files ===\n\n\
=== Modifications Not Staged For Commit ===\n\n\
=== Untracked Files ===\n\n";
