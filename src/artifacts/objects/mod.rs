//! Repository object types
//!
//! All content is stored as immutable objects identified by the SHA-1 digest of their
//! serialized form. There are two types:
//!
//! - **Blob**: one version of one tracked file (its name and raw bytes)
//! - **Commit**: a snapshot (file name to blob map) with parents, timestamp and message
//!
//! All objects share the framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
