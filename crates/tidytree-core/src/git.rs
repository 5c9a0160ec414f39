//! Git subprocess wrapper and worktree enumeration
//!
//! Parses `git worktree list --porcelain` output into [`WorktreeRecord`]s
//! and provides the add/remove operations the clean policy acts through.
//! Every call spawns one `git` subprocess and blocks until it finishes.

use crate::error::TidytreeError;
use crate::pr_number::extract_pr_number;
use crate::types::WorktreeRecord;
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git CLI wrapper rooted at a repository directory
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Run git in the repo root, returning stdout on success
    fn run(&self, args: &[&str]) -> Result<String, TidytreeError> {
        run_in(&self.repo_root, args)
    }

    /// Enumerate worktrees with branch, PR number, and last-commit time
    ///
    /// One record per worktree path, in enumeration order. A failed
    /// commit-date lookup leaves `last_commit` unset rather than failing
    /// the enumeration; only the list command itself is fatal.
    pub fn list_worktrees(&self) -> Result<Vec<WorktreeRecord>, TidytreeError> {
        let raw = self.run(&["worktree", "list", "--porcelain"])?;
        let mut records = parse_worktree_porcelain(&raw);

        for record in &mut records {
            if !record.branch.is_empty() {
                record.last_commit = self.last_commit_time(&record.path).ok();
            }
        }

        Ok(records)
    }

    /// Timestamp of the most recent commit in a worktree
    pub fn last_commit_time(&self, worktree: &Path) -> Result<DateTime<Utc>, TidytreeError> {
        let out = run_in(worktree, &["log", "-1", "--format=%at"])?;
        let epoch = out.trim();
        let secs: i64 = epoch.parse().map_err(|_| TidytreeError::GitCommandFailed {
            command: "log -1 --format=%at".to_string(),
            reason: format!("unexpected timestamp output: {:?}", epoch),
        })?;

        Utc.timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| TidytreeError::GitCommandFailed {
                command: "log -1 --format=%at".to_string(),
                reason: format!("timestamp out of range: {}", secs),
            })
    }

    /// Remove a worktree, discarding local changes
    pub fn remove_worktree(&self, path: &Path) -> Result<(), TidytreeError> {
        let path_str = utf8_path(path)?;
        self.run(&["worktree", "remove", path_str, "--force"])?;
        Ok(())
    }

    /// Create a worktree for an existing branch
    pub fn add_worktree(&self, path: &Path, branch: &str) -> Result<(), TidytreeError> {
        let path_str = utf8_path(path)?;
        match self.run(&["worktree", "add", path_str, branch]) {
            Ok(_) => Ok(()),
            Err(TidytreeError::GitCommandFailed { command, reason }) => {
                if reason.contains("already exists") {
                    Err(TidytreeError::WorktreeExists {
                        branch: branch.to_string(),
                        path: path.display().to_string(),
                    })
                } else if reason.contains("invalid reference") {
                    Err(TidytreeError::BranchNotFound {
                        branch: branch.to_string(),
                    })
                } else {
                    Err(TidytreeError::GitCommandFailed { command, reason })
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Directory holding the primary checkout, parent of the common git dir
    pub fn common_dir_parent(&self) -> Result<PathBuf, TidytreeError> {
        let out = self.run(&["rev-parse", "--git-common-dir"])?;
        let git_dir = PathBuf::from(out.trim());
        let git_dir = if git_dir.is_absolute() {
            git_dir
        } else {
            self.repo_root.join(git_dir)
        };
        Ok(git_dir.join(".."))
    }

    /// Path of the worktree that has `branch` checked out, if any
    ///
    /// Also matches a worktree whose directory is named after the branch,
    /// the common convention when the checkout is detached.
    pub fn worktree_path_for_branch(
        &self,
        branch: &str,
    ) -> Result<Option<PathBuf>, TidytreeError> {
        let raw = self.run(&["worktree", "list", "--porcelain"])?;
        for record in parse_worktree_porcelain(&raw) {
            if record.branch == branch || record.name() == branch {
                return Ok(Some(record.path));
            }
        }
        Ok(None)
    }
}

fn run_in(dir: &Path, args: &[&str]) -> Result<String, TidytreeError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TidytreeError::GitNotInstalled
            } else {
                TidytreeError::GitCommandFailed {
                    command: args.join(" "),
                    reason: e.to_string(),
                }
            }
        })?;

    if !output.status.success() {
        return Err(TidytreeError::GitCommandFailed {
            command: args.join(" "),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn utf8_path(path: &Path) -> Result<&str, TidytreeError> {
    path.to_str().ok_or_else(|| TidytreeError::GitCommandFailed {
        command: "worktree".to_string(),
        reason: format!("path is not valid UTF-8: {}", path.display()),
    })
}

/// Parse `git worktree list --porcelain` output
///
/// Each block starts with `worktree <path>`, optionally carries a
/// `branch refs/heads/<name>` line, and is closed by a blank line or end of
/// input. Other porcelain attributes (`HEAD`, `bare`, `detached`, ...) are
/// ignored. The PR number is inferred from the branch name first, then
/// from the directory name.
pub fn parse_worktree_porcelain(output: &str) -> Vec<WorktreeRecord> {
    let mut records = Vec::new();
    let mut current: Option<WorktreeRecord> = None;

    for line in output.lines() {
        if let Some(path) = line.strip_prefix("worktree ") {
            if let Some(record) = current.take() {
                records.push(finish_record(record));
            }
            current = Some(WorktreeRecord::new(PathBuf::from(path)));
        } else if let Some(branch) = line.strip_prefix("branch refs/heads/") {
            if let Some(record) = current.as_mut() {
                record.branch = branch.to_string();
            }
        } else if line.is_empty() {
            if let Some(record) = current.take() {
                records.push(finish_record(record));
            }
        }
    }

    if let Some(record) = current.take() {
        records.push(finish_record(record));
    }

    records
}

fn finish_record(mut record: WorktreeRecord) -> WorktreeRecord {
    record.pr_number =
        extract_pr_number(&record.branch).or_else(|| extract_pr_number(record.name()));
    record
}
