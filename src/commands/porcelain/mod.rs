//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: create a repository with its root commit and `master` branch
//! - `add`, `rm`: stage a file, or stage its removal
//! - `commit`: snapshot the staging area on top of the head commit
//! - `log`, `global-log`, `find`: inspect history
//! - `status`: show branches and the staging area
//! - `checkout`: restore a file, or switch branches
//! - `branch`, `rm-branch`: create or delete a branch pointer
//! - `reset`: move the current branch and the working tree to any commit
//! - `merge`: three-way merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
