//! Error types for tidytree operations

use thiserror::Error;

/// Core error type for tidytree operations
#[derive(Error, Debug)]
pub enum TidytreeError {
    /// git binary not found on PATH
    #[error("git is not installed or not found on PATH")]
    GitNotInstalled,

    /// git invocation failed
    #[error("git {command} failed: {reason}")]
    GitCommandFailed { command: String, reason: String },

    /// gh binary not found on PATH
    #[error("gh is not installed or not found on PATH")]
    GhNotInstalled,

    /// Remote request failed (transport, auth, or unexpected payload)
    #[error("remote request failed: {reason}")]
    Remote { reason: String },

    /// A worktree already exists for the branch
    #[error("worktree for branch '{branch}' already exists at: {path}")]
    WorktreeExists { branch: String, path: String },

    /// Target directory already exists on disk
    #[error("directory already exists at: {path}\nRemove it or choose a different path")]
    DirectoryExists { path: String },

    /// Branch could not be resolved
    #[error("branch '{branch}' not found\nMake sure the branch exists or the PR has been fetched")]
    BranchNotFound { branch: String },
}

impl TidytreeError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            TidytreeError::GitCommandFailed { .. } | TidytreeError::Remote { .. } => 1,

            TidytreeError::WorktreeExists { .. } => 3,

            TidytreeError::DirectoryExists { .. } => 4,

            TidytreeError::GitNotInstalled | TidytreeError::GhNotInstalled => 5,

            TidytreeError::BranchNotFound { .. } => 6,
        }
    }
}
