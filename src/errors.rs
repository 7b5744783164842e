//! User-facing error kinds
//!
//! Every precondition violation a command can hit is one of these variants. They are
//! returned wrapped in `anyhow::Error` and recovered at the command boundary with
//! `downcast_ref`, which prints the message and ends the invocation. Anything that is not
//! a `RepositoryError` (I/O failures, undecodable objects, dangling ids) is an internal
//! error and reported as fatal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("File does not exist.")]
    FileNotFound,

    /// Line breaks cannot be recorded in a commit's file list
    #[error("Invalid file name: {0:?}.")]
    InvalidFileName(String),

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    /// Same condition as `NoSuchBranch`, worded the way `checkout` reports it
    #[error("No such branch exists.")]
    NoSuchCheckoutBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("Found no commit with that message.")]
    NoSuchCommitMessage,

    #[error("Invalid branch name: {0}.")]
    InvalidBranchName(String),
}

/// Extract the user-facing error kind from an error chain, if there is one
pub fn user_error(error: &anyhow::Error) -> Option<&RepositoryError> {
    error.chain().find_map(|cause| cause.downcast_ref::<RepositoryError>())
}
