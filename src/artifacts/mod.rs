//! Data types and algorithms operating on the repository areas
//!
//! - `branch`: branch names and commit-id resolution
//! - `checkout`: planning and applying working tree migrations
//! - `core`: shared output utilities (pager wrapper, terminal detection)
//! - `index`: staging area file format
//! - `merge`: split point search, per-file classification and conflict content
//! - `objects`: object types (blob, commit)

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod merge;
pub mod objects;
