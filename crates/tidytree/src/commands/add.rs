//! Worktree add command

use crate::colors::COLORS;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;
use tidytree_core::add::{AddOptions, add_worktree};
use tidytree_core::git::GitCli;

/// JSON output for the add command
#[derive(Serialize)]
pub struct AddData {
    pub branch: String,
    pub worktree_path: String,
}

/// Run the add command
pub fn run_add(
    branch: String,
    path: Option<String>,
    append_branch: bool,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let repo_root = std::env::current_dir().map_err(|e| e.to_string())?;
    let git = GitCli::new(repo_root);

    let opts = AddOptions {
        path: path.map(PathBuf::from),
        append_branch,
    };

    match add_worktree(&git, &branch, &opts) {
        Ok(target) => {
            if json_output {
                let data = AddData {
                    branch,
                    worktree_path: target.display().to_string(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?
                );
            } else if !quiet {
                println!(
                    "{} Created worktree for '{}' at {}",
                    "✓".style(COLORS.success),
                    branch,
                    target.display()
                );
            }
            Ok(0)
        }
        Err(e) => {
            if json_output {
                eprintln!(r#"{{"error": "{}"}}"#, e);
            } else if !quiet {
                eprintln!("error: {}", e);
            }
            Ok(e.exit_code())
        }
    }
}
