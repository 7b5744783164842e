//! Three-way merge
//!
//! - `split_point`: finds the common ancestor both sides are compared against
//! - `resolution`: decides, file by file, what the merge does
//! - `conflict`: builds the content of conflicted files

pub mod conflict;
pub mod resolution;
pub mod split_point;
