//! Core data types for worktree analysis

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// State of the pull request associated with a worktree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Open,
    Merged,
    Closed,
}

impl PrStatus {
    /// Merged and closed PRs are finished; their worktrees are removal candidates
    pub fn is_terminal(self) -> bool {
        matches!(self, PrStatus::Merged | PrStatus::Closed)
    }
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrStatus::Open => "open",
            PrStatus::Merged => "merged",
            PrStatus::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// One worktree as reported by `git worktree list --porcelain`
///
/// Built fresh per invocation from parsed command output; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct WorktreeRecord {
    /// Path of the worktree checkout
    pub path: PathBuf,
    /// Branch checked out in the worktree, empty for bare or detached entries
    pub branch: String,
    /// PR number inferred from the branch or directory name
    pub pr_number: Option<u64>,
    /// Timestamp of the most recent commit in the worktree
    pub last_commit: Option<DateTime<Utc>>,
    /// Resolved PR state, set during analysis
    pub pr_status: Option<PrStatus>,
}

impl WorktreeRecord {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            branch: String::new(),
            pr_number: None,
            last_commit: None,
            pr_status: None,
        }
    }

    /// Final path segment, used for display and PR-number inference
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }
}

/// Classification assigned to a worktree by the clean policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// PR merged or closed; removed without asking
    Remove,
    /// No commits within the stale threshold; offered for manual removal
    Stale,
    /// Still in use
    Active,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_status_terminal() {
        assert!(PrStatus::Merged.is_terminal());
        assert!(PrStatus::Closed.is_terminal());
        assert!(!PrStatus::Open.is_terminal());
    }

    #[test]
    fn test_pr_status_display() {
        assert_eq!(PrStatus::Open.to_string(), "open");
        assert_eq!(PrStatus::Merged.to_string(), "merged");
        assert_eq!(PrStatus::Closed.to_string(), "closed");
    }

    #[test]
    fn test_record_name() {
        let record = WorktreeRecord::new(PathBuf::from("/repos/work/pr-123"));
        assert_eq!(record.name(), "pr-123");

        let record = WorktreeRecord::new(PathBuf::from("/"));
        assert_eq!(record.name(), "");
    }

    #[test]
    fn test_record_serializes_for_json_output() {
        let record = WorktreeRecord::new(PathBuf::from("/repos/work/pr-123"));
        let json = serde_json::to_string(&record).expect("serialization should succeed");
        assert!(json.contains("pr_number"));
        assert!(json.contains("last_commit"));
    }
}
