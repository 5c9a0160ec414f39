//! PR status resolution through the GitHub CLI
//!
//! Spawns `gh` so authentication stays with the ambient gh login. One
//! `gh api` read per PR returns both the raw state and the merged flag;
//! merged implies closed, so the merged flag is checked first.

use crate::error::TidytreeError;
use crate::types::PrStatus;
use serde::Deserialize;
use std::fmt;
use std::process::Command;

/// Repository identity on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Parse an `owner/name` pair
    pub fn parse(name_with_owner: &str) -> Option<Self> {
        let (owner, name) = name_with_owner.split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Source of PR state; the seam the clean policy is tested against
pub trait PrStatusSource {
    fn pr_status(&self, repo: &RepoId, number: u64) -> Result<PrStatus, TidytreeError>;
}

/// GitHub CLI wrapper
pub struct GhCli;

#[derive(Deserialize)]
struct RepoView {
    #[serde(rename = "nameWithOwner")]
    name_with_owner: String,
}

#[derive(Deserialize)]
struct PullRequest {
    state: String,
    #[serde(default)]
    merged: bool,
}

impl GhCli {
    fn run(args: &[&str]) -> Result<String, TidytreeError> {
        let output = Command::new("gh").args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TidytreeError::GhNotInstalled
            } else {
                TidytreeError::Remote {
                    reason: e.to_string(),
                }
            }
        })?;

        if !output.status.success() {
            return Err(TidytreeError::Remote {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Repository the working directory belongs to, per gh's own resolution
    pub fn current_repository() -> Result<RepoId, TidytreeError> {
        let raw = Self::run(&["repo", "view", "--json", "nameWithOwner"])?;
        let view: RepoView = serde_json::from_str(&raw).map_err(|e| TidytreeError::Remote {
            reason: format!("unexpected gh repo view output: {}", e),
        })?;
        RepoId::parse(&view.name_with_owner).ok_or_else(|| TidytreeError::Remote {
            reason: format!("unexpected repository name: {}", view.name_with_owner),
        })
    }
}

impl PrStatusSource for GhCli {
    /// Single read of `repos/{owner}/{name}/pulls/{number}`
    fn pr_status(&self, repo: &RepoId, number: u64) -> Result<PrStatus, TidytreeError> {
        let endpoint = format!("repos/{}/{}/pulls/{}", repo.owner, repo.name, number);
        let raw = Self::run(&["api", &endpoint])?;
        parse_pr_payload(&raw)
    }
}

/// Map a pull-request payload to a status; the merged flag wins
fn parse_pr_payload(raw: &str) -> Result<PrStatus, TidytreeError> {
    let pr: PullRequest = serde_json::from_str(raw).map_err(|e| TidytreeError::Remote {
        reason: format!("unexpected pull request payload: {}", e),
    })?;

    if pr.merged {
        return Ok(PrStatus::Merged);
    }
    match pr.state.as_str() {
        "open" => Ok(PrStatus::Open),
        "closed" => Ok(PrStatus::Closed),
        other => Err(TidytreeError::Remote {
            reason: format!("unexpected pull request state: {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_parse() {
        let repo = RepoId::parse("octocat/hello-world").expect("should parse");
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.to_string(), "octocat/hello-world");

        assert!(RepoId::parse("no-slash").is_none());
        assert!(RepoId::parse("/name").is_none());
        assert!(RepoId::parse("owner/").is_none());
    }

    #[test]
    fn test_merged_flag_wins_over_state() {
        let status = parse_pr_payload(r#"{"state": "closed", "merged": true}"#)
            .expect("payload should parse");
        assert_eq!(status, PrStatus::Merged);
    }

    #[test]
    fn test_state_passed_through_when_not_merged() {
        let status = parse_pr_payload(r#"{"state": "open", "merged": false}"#)
            .expect("payload should parse");
        assert_eq!(status, PrStatus::Open);

        let status = parse_pr_payload(r#"{"state": "closed", "merged": false}"#)
            .expect("payload should parse");
        assert_eq!(status, PrStatus::Closed);
    }

    #[test]
    fn test_missing_merged_defaults_to_false() {
        let status = parse_pr_payload(r#"{"state": "open"}"#).expect("payload should parse");
        assert_eq!(status, PrStatus::Open);
    }

    #[test]
    fn test_unexpected_payload_is_remote_error() {
        assert!(parse_pr_payload("not json").is_err());
        assert!(parse_pr_payload(r#"{"state": "draft"}"#).is_err());
    }
}
