//! CLI argument parsing with clap derive

use clap::{Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// tidytree - Manage git worktrees tied to pull-request workflows
#[derive(Parser)]
#[command(name = "tidytree")]
#[command(version = VERSION)]
#[command(about = "Manage git worktrees tied to pull-request workflows")]
#[command(
    long_about = "tidytree keeps PR-driven worktrees under control.\n\n`add` creates a worktree for a branch next to the primary checkout.\n`clean` removes worktrees whose pull request has merged or closed and\nflags worktrees with no recent commits for interactive removal."
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a worktree for a branch
    ///
    /// Refuses to act when the branch already has a worktree or the target
    /// directory exists.
    #[command(
        long_about = "Create a worktree for a branch.\n\nWithout PATH the worktree lands next to the primary checkout, named\nafter the branch. Creation refuses to proceed when the branch already\nhas a worktree or when the target directory exists."
    )]
    Add {
        /// Branch to check out in the new worktree
        branch: String,

        /// Target path (default: next to the primary checkout)
        path: Option<String>,

        /// Treat PATH as a parent directory and append the branch name
        #[arg(long)]
        append_branch: bool,
    },

    /// Clean up worktrees for merged/closed PRs and identify stale ones
    ///
    /// Removes worktrees whose PR has finished; lists stale worktrees for
    /// manual review.
    #[command(
        long_about = "Clean up worktrees for merged/closed PRs and identify stale ones.\n\nInfers a PR number from each worktree's branch or directory name and\nchecks its state through the GitHub CLI. Worktrees for merged or closed\nPRs are removed; worktrees with no commits inside the stale threshold\nare listed and offered for interactive removal."
    )]
    Clean {
        /// Show what would be cleaned without actually removing
        #[arg(long)]
        dry_run: bool,

        /// Number of days without commits to consider a worktree stale
        #[arg(long, default_value_t = 30)]
        stale_days: i64,
    },
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
