//! PR-number inference from branch and directory names
//!
//! Branch and worktree names commonly embed the PR number they belong to
//! (`pr-123`, `pull/123`, `123-feature`, `web-frontend-pr-1018`). The rules
//! below are tried in priority order and the first numeric capture wins.
//! The order is contract: a crafted name can match several rules, and which
//! one applies must stay stable across releases.

use regex::Regex;
use std::sync::LazyLock;

static RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"[-_]pr[-_/](\d+)",  // -pr-123, _pr_123, -pr/123
        r"^pr[-_/](\d+)",     // pr-123, pr_123, pr/123 at start
        r"[-_]pull[-_/](\d+)", // -pull-123, _pull_123
        r"^pull[-_/](\d+)",   // pull-123, pull_123, pull/123 at start
        r"^(\d+)[-_]",        // 123-feature at start
        r"[-_](\d{4,})$",     // feature-1234 at end; 4+ digits to avoid false positives
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("pattern is valid"))
    .collect()
});

/// Infer a PR number from a branch or directory name
///
/// Returns the first capture in rule-priority order, or `None` when no rule
/// matches. A capture too large for `u64` falls through to the next rule.
pub fn extract_pr_number(text: &str) -> Option<u64> {
    for rule in RULES.iter() {
        if let Some(captures) = rule.captures(text) {
            if let Ok(number) = captures[1].parse::<u64>() {
                return Some(number);
            }
        }
    }
    None
}
