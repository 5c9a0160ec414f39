//! tidytree CLI - Manage git worktrees tied to pull-request workflows

mod cli;
mod colors;
mod commands;

use std::process::ExitCode;

use cli::Commands;

fn main() -> ExitCode {
    let cli = cli::parse();

    let result = match cli.command {
        Some(Commands::Add {
            branch,
            path,
            append_branch,
        }) => commands::run_add(branch, path, append_branch, cli.json, cli.quiet),
        Some(Commands::Clean {
            dry_run,
            stale_days,
        }) => commands::run_clean(dry_run, stale_days, cli.json, cli.quiet),
        None => {
            // No subcommand - print version info
            if !cli.quiet {
                println!("tidytree v{}", env!("CARGO_PKG_VERSION"));
                println!("Use --help for usage information");
            }
            Ok(0)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
