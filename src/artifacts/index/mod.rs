//! Staging area file format
//!
//! The staging area records the blobs staged for the next commit and the names marked
//! for removal. It is persisted in the repository state partition under `index`.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "LIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Staged entry count (4 bytes)
//!   - Removed entry count (4 bytes)
//!
//! Staged entries:
//!   - Blob ID (20 bytes), name length (2 bytes), name
//!
//! Removed entries:
//!   - Name length (2 bytes), name
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 16; // 4 bytes for marker, 4 for version, 4 + 4 for counts

/// Magic signature identifying index files
pub const SIGNATURE: &str = "LIDX";

/// Index file format version
pub const VERSION: u32 = 1;
