//! Watchtower CLI - polls GitHub repositories for new releases and tags
//!
//! A single-shot batch job meant to run from cron or CI: it loads a
//! watch-list of repository URLs, resolves the latest release (or tag) for
//! each one, and reports the repositories that changed since the previous
//! run.
//!
//! ## Architecture
//!
//! ```text
//! watch-list -> URL parser -> GitHub API -> diff vs state.yaml -> process.yaml
//! ```

mod cli;
mod config;
mod error;
mod github;
mod repo_url;
mod resolver;
mod run;
mod state;
mod watchlist;

use clap::Parser;
use console::style;

use cli::Cli;
use error::WatchtowerError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        if let Some(fatal) = err.downcast_ref::<WatchtowerError>() {
            fatal.display_with_hints();
        } else {
            eprintln!("\n{} {:#}", style("ERROR:").red().bold(), err);
        }
        std::process::exit(1);
    }
}
