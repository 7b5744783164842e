//! lit - a small, local version-control engine
//!
//! The crate is organised the same way the command line tool thinks about a repository:
//!
//! - `areas`: the storage areas of a repository (object database, refs, staging area,
//!   working tree) and the `Repository` facade tying them together
//! - `artifacts`: the data types and algorithms operating on those areas
//!   (objects, branch names, checkout planning, merge resolution)
//! - `commands`: the user-facing operations, implemented as methods on `Repository`
//! - `errors`: the user-facing error kinds

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the directory holding all repository state
pub const REPOSITORY_DIR: &str = ".lit";
