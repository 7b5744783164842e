//! Storage areas of a repository
//!
//! - `store`: partitioned key-value store everything else is persisted in
//! - `database`: object database for storing blobs and commits
//! - `index`: staging area for the next commit
//! - `refs`: branch pointers and HEAD
//! - `workspace`: the user's working tree
//! - `repository`: facade tying the areas together

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod store;
pub mod workspace;
