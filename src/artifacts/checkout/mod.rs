//! Checkout planning
//!
//! Moving the working tree from one commit's snapshot to another's is planned in full
//! (including the untracked file check and loading every blob) before the working tree
//! is touched.

pub mod migration;
