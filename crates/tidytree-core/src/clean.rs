//! Clean policy: classify worktrees and plan removals
//!
//! Analysis is side-effect free: it resolves PR status where possible and
//! sorts worktrees into a [`CleanPlan`]. Removal happens afterwards in the
//! caller, so dry-run shares the exact same analysis path.

use crate::git::GitCli;
use crate::github::{PrStatusSource, RepoId};
use crate::types::{PolicyDecision, WorktreeRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Knobs for the clean policy
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Report without removing anything
    pub dry_run: bool,
    /// Days without commits before a worktree counts as stale
    pub stale_days: i64,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            stale_days: 30,
        }
    }
}

/// Outcome of analyzing every non-primary worktree
#[derive(Debug, Default)]
pub struct CleanPlan {
    /// Worktrees whose PR is merged or closed
    pub remove: Vec<WorktreeRecord>,
    /// Worktrees with no commits inside the stale threshold
    pub stale: Vec<WorktreeRecord>,
}

/// The primary checkout is never a cleanup candidate
pub fn is_primary(record: &WorktreeRecord) -> bool {
    record.path.to_string_lossy().contains("/.git")
        || record.branch == "main"
        || record.branch == "master"
}

/// Whole days since the last commit, floor of hours / 24
pub fn days_since_commit(record: &WorktreeRecord, now: DateTime<Utc>) -> Option<i64> {
    record
        .last_commit
        .map(|commit| (now - commit).num_hours() / 24)
}

/// Classify one record; a finished PR takes precedence over staleness
///
/// The stale boundary is strictly greater-than: at exactly `stale_days`
/// days the worktree is still Active. A record with no known commit time
/// is never Stale.
pub fn classify(record: &WorktreeRecord, stale_days: i64, now: DateTime<Utc>) -> PolicyDecision {
    if record.pr_status.is_some_and(|status| status.is_terminal()) {
        return PolicyDecision::Remove;
    }

    match days_since_commit(record, now) {
        Some(days) if days > stale_days => PolicyDecision::Stale,
        _ => PolicyDecision::Active,
    }
}

/// Analyze records: resolve PR status where possible, then classify
///
/// Status resolution is skipped when the repository identity is unknown.
/// A failed lookup leaves the record's status unset and lets it fall
/// through to the staleness check instead of failing the run.
pub fn analyze(
    records: Vec<WorktreeRecord>,
    repo: Option<&RepoId>,
    source: &dyn PrStatusSource,
    opts: &CleanOptions,
    now: DateTime<Utc>,
) -> CleanPlan {
    let mut plan = CleanPlan::default();

    for mut record in records {
        if is_primary(&record) {
            continue;
        }

        if let (Some(number), Some(repo)) = (record.pr_number, repo) {
            if let Ok(status) = source.pr_status(repo, number) {
                record.pr_status = Some(status);
            }
        }

        match classify(&record, opts.stale_days, now) {
            PolicyDecision::Remove => plan.remove.push(record),
            PolicyDecision::Stale => plan.stale.push(record),
            PolicyDecision::Active => {}
        }
    }

    plan
}

/// Result of one forced worktree removal
#[derive(Debug, Serialize)]
pub struct RemovalOutcome {
    pub record: WorktreeRecord,
    /// Whether the worktree was actually removed
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Remove every planned worktree, reporting each outcome independently
///
/// In dry-run mode nothing is invoked and every outcome reports
/// `removed: false`. A failed removal is recorded on its outcome and does
/// not abort the remaining removals.
pub fn execute_removals(
    git: &GitCli,
    records: Vec<WorktreeRecord>,
    dry_run: bool,
) -> Vec<RemovalOutcome> {
    records
        .into_iter()
        .map(|record| {
            if dry_run {
                return RemovalOutcome {
                    record,
                    removed: false,
                    error: None,
                };
            }
            match git.remove_worktree(&record.path) {
                Ok(()) => RemovalOutcome {
                    record,
                    removed: true,
                    error: None,
                },
                Err(e) => RemovalOutcome {
                    record,
                    removed: false,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}

/// Parse the interactive stale-selection reply into 0-based indices
///
/// `all` selects everything, a space-separated list selects by 1-based
/// index. Unparseable or out-of-range tokens are silently dropped; an
/// empty reply selects nothing.
pub fn parse_selection(input: &str, len: usize) -> Vec<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Vec::new();
    }
    if input == "all" {
        return (0..len).collect();
    }

    input
        .split_whitespace()
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|&index| index >= 1 && index <= len)
        .map(|index| index - 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TidytreeError;
    use crate::types::PrStatus;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Canned PR statuses; unknown numbers fail like a 404 would
    struct FixedStatus(HashMap<u64, PrStatus>);

    impl PrStatusSource for FixedStatus {
        fn pr_status(&self, _repo: &RepoId, number: u64) -> Result<PrStatus, TidytreeError> {
            self.0
                .get(&number)
                .copied()
                .ok_or_else(|| TidytreeError::Remote {
                    reason: "HTTP 404".to_string(),
                })
        }
    }

    fn repo() -> RepoId {
        RepoId {
            owner: "octocat".to_string(),
            name: "hello-world".to_string(),
        }
    }

    fn record(branch: &str, days_ago: Option<i64>, now: DateTime<Utc>) -> WorktreeRecord {
        let mut record = WorktreeRecord::new(PathBuf::from(format!("/repos/work/{}", branch)));
        record.branch = branch.to_string();
        record.pr_number = crate::pr_number::extract_pr_number(branch);
        record.last_commit = days_ago.map(|days| now - Duration::days(days));
        record
    }

    #[test]
    fn test_merged_is_removed_even_when_old() {
        let now = Utc::now();
        let source = FixedStatus(HashMap::from([(12, PrStatus::Merged)]));
        let records = vec![record("pr-12", Some(100), now)];

        let plan = analyze(
            records,
            Some(&repo()),
            &source,
            &CleanOptions::default(),
            now,
        );

        assert_eq!(plan.remove.len(), 1);
        assert!(plan.stale.is_empty());
        assert_eq!(plan.remove[0].pr_status, Some(PrStatus::Merged));
    }

    #[test]
    fn test_closed_is_removed() {
        let now = Utc::now();
        let source = FixedStatus(HashMap::from([(7, PrStatus::Closed)]));
        let plan = analyze(
            vec![record("pr-7", Some(1), now)],
            Some(&repo()),
            &source,
            &CleanOptions::default(),
            now,
        );

        assert_eq!(plan.remove.len(), 1);
    }

    #[test]
    fn test_open_pr_falls_through_to_staleness() {
        let now = Utc::now();
        let source = FixedStatus(HashMap::from([(7, PrStatus::Open)]));

        let plan = analyze(
            vec![record("pr-7", Some(45), now)],
            Some(&repo()),
            &source,
            &CleanOptions::default(),
            now,
        );

        assert!(plan.remove.is_empty());
        assert_eq!(plan.stale.len(), 1);
        assert_eq!(plan.stale[0].pr_status, Some(PrStatus::Open));
    }

    #[test]
    fn test_failed_lookup_degrades_to_staleness_check() {
        let now = Utc::now();
        let source = FixedStatus(HashMap::new());

        let plan = analyze(
            vec![record("pr-99", Some(45), now), record("pr-98", Some(1), now)],
            Some(&repo()),
            &source,
            &CleanOptions::default(),
            now,
        );

        assert!(plan.remove.is_empty());
        assert_eq!(plan.stale.len(), 1);
        assert_eq!(plan.stale[0].pr_status, None);
    }

    #[test]
    fn test_no_repo_identity_skips_status_checks() {
        let now = Utc::now();
        let source = FixedStatus(HashMap::from([(12, PrStatus::Merged)]));

        let plan = analyze(
            vec![record("pr-12", Some(1), now)],
            None,
            &source,
            &CleanOptions::default(),
            now,
        );

        assert!(plan.remove.is_empty());
        assert!(plan.stale.is_empty());
    }

    #[test]
    fn test_stale_boundary_is_strictly_greater_than() {
        let now = Utc::now();

        let stale = record("feature/a", Some(31), now);
        assert_eq!(classify(&stale, 30, now), PolicyDecision::Stale);

        let boundary = record("feature/b", Some(30), now);
        assert_eq!(classify(&boundary, 30, now), PolicyDecision::Active);
    }

    #[test]
    fn test_partial_day_floors_to_active() {
        let now = Utc::now();
        let mut record = record("feature/c", None, now);
        record.last_commit = Some(now - Duration::hours(30 * 24 + 23));

        assert_eq!(classify(&record, 30, now), PolicyDecision::Active);
    }

    #[test]
    fn test_unknown_commit_time_is_never_stale() {
        let now = Utc::now();
        let record = record("feature/d", None, now);
        assert_eq!(classify(&record, 30, now), PolicyDecision::Active);
    }

    #[test]
    fn test_primary_worktrees_are_excluded() {
        let now = Utc::now();
        let source = FixedStatus(HashMap::new());

        let mut main = record("main", Some(400), now);
        main.pr_number = None;
        let mut master = record("master", Some(400), now);
        master.pr_number = None;
        let mut under_git = record("anything", Some(400), now);
        under_git.path = PathBuf::from("/repos/main/.git/worktrees/anything");

        let plan = analyze(
            vec![main, master, under_git],
            Some(&repo()),
            &source,
            &CleanOptions::default(),
            now,
        );

        assert!(plan.remove.is_empty());
        assert!(plan.stale.is_empty());
    }

    #[test]
    fn test_parse_selection_all() {
        assert_eq!(parse_selection("all", 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_selection_subset() {
        assert_eq!(parse_selection("2", 3), vec![1]);
        assert_eq!(parse_selection("1 3", 3), vec![0, 2]);
        assert_eq!(parse_selection("  2  ", 3), vec![1]);
    }

    #[test]
    fn test_parse_selection_ignores_invalid() {
        assert_eq!(parse_selection("99", 3), Vec::<usize>::new());
        assert_eq!(parse_selection("0", 3), Vec::<usize>::new());
        assert_eq!(parse_selection("1 bogus 3", 3), vec![0, 2]);
        assert_eq!(parse_selection("", 3), Vec::<usize>::new());
    }
}
