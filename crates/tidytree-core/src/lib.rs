//! tidytree-core: worktree enumeration, PR heuristics, and the clean policy
//!
//! This crate provides the foundational types and logic for the tidytree
//! system: parsing `git worktree list --porcelain` into records, inferring
//! PR numbers from branch and directory names, resolving PR state through
//! the GitHub CLI, and classifying worktrees for removal.

/// Core error types for tidytree operations
pub mod error;

/// Core data types (WorktreeRecord, PrStatus, PolicyDecision)
pub mod types;

/// Git subprocess wrapper and porcelain parsing
pub mod git;

/// PR-number inference from branch and directory names
pub mod pr_number;

/// PR status resolution through the GitHub CLI
pub mod github;

/// Clean policy: classification and planning
pub mod clean;

/// Worktree creation with pre-flight checks
pub mod add;

// Re-exports for convenience
pub use add::{AddOptions, add_worktree};
pub use clean::{
    CleanOptions, CleanPlan, RemovalOutcome, analyze, classify, days_since_commit, execute_removals,
    is_primary, parse_selection,
};
pub use error::TidytreeError;
pub use git::{GitCli, parse_worktree_porcelain};
pub use github::{GhCli, PrStatusSource, RepoId};
pub use pr_number::extract_pr_number;
pub use types::{PolicyDecision, PrStatus, WorktreeRecord};
