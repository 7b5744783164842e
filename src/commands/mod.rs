//! Command implementations
//!
//! Every user-facing operation is a method on [`crate::areas::repository::Repository`],
//! one file per command under `porcelain`. Commands print on the repository writer and
//! report user-facing failures as [`crate::errors::RepositoryError`] values.

pub mod porcelain;
