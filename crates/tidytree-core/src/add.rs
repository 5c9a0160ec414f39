//! Worktree creation with pre-flight checks
//!
//! The target directory defaults to a sibling of the primary checkout named
//! after the branch. Creation refuses to proceed when the branch already
//! has a worktree or when the target directory already exists on disk;
//! both produce clearer errors than git's own stderr would.

use crate::error::TidytreeError;
use crate::git::GitCli;
use std::path::PathBuf;

/// Options for worktree creation
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Explicit target path; defaults next to the primary checkout
    pub path: Option<PathBuf>,
    /// Treat `path` as a parent directory and append the branch name
    pub append_branch: bool,
}

/// Create a worktree for `branch`, returning the path it was created at
pub fn add_worktree(
    git: &GitCli,
    branch: &str,
    opts: &AddOptions,
) -> Result<PathBuf, TidytreeError> {
    let target = match &opts.path {
        Some(path) if opts.append_branch => path.join(branch),
        Some(path) => path.clone(),
        None => git.common_dir_parent()?.join(branch),
    };

    if let Some(existing) = git.worktree_path_for_branch(branch)? {
        return Err(TidytreeError::WorktreeExists {
            branch: branch.to_string(),
            path: existing.display().to_string(),
        });
    }

    if target.exists() {
        return Err(TidytreeError::DirectoryExists {
            path: target.display().to_string(),
        });
    }

    git.add_worktree(&target, branch)?;
    Ok(target)
}
