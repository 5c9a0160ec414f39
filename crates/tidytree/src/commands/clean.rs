//! Worktree clean command
//!
//! Enumerates worktrees, resolves PR status for records with an inferred
//! PR number, removes worktrees whose PR has merged or closed, and offers
//! stale worktrees for interactive removal. Removal failures are reported
//! per item and never abort the rest of the run. JSON mode performs the
//! same removals as text mode and reports each outcome in the payload;
//! only the interactive stale review is skipped.

use crate::colors::COLORS;
use chrono::Utc;
use dialoguer::Input;
use owo_colors::OwoColorize;
use serde::Serialize;
use tidytree_core::clean::{
    CleanOptions, RemovalOutcome, analyze, days_since_commit, execute_removals, is_primary,
    parse_selection,
};
use tidytree_core::git::GitCli;
use tidytree_core::github::GhCli;
use tidytree_core::types::WorktreeRecord;

/// JSON output for the clean command
#[derive(Serialize)]
pub struct CleanData {
    pub remove: Vec<RemovalOutcome>,
    pub stale: Vec<WorktreeRecord>,
    pub dry_run: bool,
}

/// Run the clean command
pub fn run_clean(
    dry_run: bool,
    stale_days: i64,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let repo_root = std::env::current_dir().map_err(|e| e.to_string())?;
    let git = GitCli::new(repo_root);

    if !json_output && !quiet {
        println!("{}", "Analyzing worktrees...".style(COLORS.active));
    }

    let records = git
        .list_worktrees()
        .map_err(|e| format!("failed to enumerate worktrees: {}", e))?;

    if records.iter().all(is_primary) {
        if json_output {
            let data = CleanData {
                remove: vec![],
                stale: vec![],
                dry_run,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?
            );
        } else if !quiet {
            println!("No worktrees found besides the primary checkout.");
        }
        return Ok(0);
    }

    // A missing repository identity degrades the run, it does not fail it.
    let repo = match GhCli::current_repository() {
        Ok(repo) => Some(repo),
        Err(_) => {
            if !json_output && !quiet {
                println!(
                    "{}",
                    "Could not determine current repository - skipping PR status checks"
                        .style(COLORS.warning)
                );
            }
            None
        }
    };

    let opts = CleanOptions {
        dry_run,
        stale_days,
    };
    let now = Utc::now();
    let plan = analyze(records, repo.as_ref(), &GhCli, &opts, now);
    let removals = execute_removals(&git, plan.remove, dry_run);

    if json_output {
        let data = CleanData {
            remove: removals,
            stale: plan.stale,
            dry_run,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?
        );
        return Ok(0);
    }

    if removals.is_empty() && plan.stale.is_empty() {
        if !quiet {
            println!(
                "{}",
                "All worktrees are active and up to date".style(COLORS.success)
            );
        }
        return Ok(0);
    }

    if !removals.is_empty() {
        if !quiet {
            println!(
                "\nFound {} worktree(s) for merged/closed PRs:\n",
                removals.len()
            );
            for outcome in &removals {
                let record = &outcome.record;
                let status = record
                    .pr_status
                    .map(|status| status.to_string())
                    .unwrap_or_default();
                println!(
                    "  - {} (PR #{} - {})",
                    record.name(),
                    record.pr_number.unwrap_or(0),
                    status
                );
                if !dry_run {
                    if outcome.removed {
                        println!("    {} Removed", "✓".style(COLORS.success));
                    } else if let Some(error) = &outcome.error {
                        println!("    {} Failed to remove: {}", "✗".style(COLORS.fail), error);
                    }
                }
            }
            if dry_run {
                println!("\n(Dry run - no worktrees were removed)");
            }
        }
    }

    if !plan.stale.is_empty() {
        if !quiet {
            println!(
                "\nFound {} stale worktree(s) (no commits in {}+ days):\n",
                plan.stale.len(),
                stale_days
            );
            for (i, record) in plan.stale.iter().enumerate() {
                let days = days_since_commit(record, now).unwrap_or(0);
                println!("  {}. {} ({})", i + 1, record.name(), record.branch);
                println!("     Last commit: {} days ago", days);
                if let (Some(number), Some(status)) = (record.pr_number, record.pr_status) {
                    println!("     PR #{} ({})", number, status);
                }
            }
        }

        // Interactive review is skipped entirely in dry-run mode.
        if !dry_run {
            prompt_stale_removal(&git, &plan.stale, quiet);
        }
    }

    Ok(0)
}

/// Offer the stale list for removal; invalid input is ignored, not surfaced
fn prompt_stale_removal(git: &GitCli, stale: &[WorktreeRecord], quiet: bool) {
    let response: String = match Input::new()
        .with_prompt("Remove any of these? Enter numbers separated by spaces, 'all' for all, empty to skip")
        .allow_empty(true)
        .interact_text()
    {
        Ok(response) => response,
        // No usable terminal, skip the interactive step.
        Err(_) => return,
    };

    for index in parse_selection(&response, stale.len()) {
        let record = &stale[index];
        match git.remove_worktree(&record.path) {
            Ok(()) => {
                if !quiet {
                    println!("{} Removed {}", "✓".style(COLORS.success), record.name());
                }
            }
            Err(e) => {
                if !quiet {
                    println!(
                        "{} Failed to remove {}: {}",
                        "✗".style(COLORS.fail),
                        record.name(),
                        e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_clean_data_serialization() {
        let data = CleanData {
            remove: vec![RemovalOutcome {
                record: WorktreeRecord::new(PathBuf::from("/repos/work/pr-12")),
                removed: true,
                error: None,
            }],
            stale: vec![],
            dry_run: false,
        };

        let json = serde_json::to_string(&data).expect("serialization should succeed");
        assert!(json.contains("remove"));
        assert!(json.contains("stale"));
        assert!(json.contains("dry_run"));
        assert!(json.contains("\"removed\":true"));
        assert!(!json.contains("error"), "clean outcomes omit a null error");
    }
}
