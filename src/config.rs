//! Runtime configuration, resolved once at startup
//!
//! Every component takes the configuration as an explicit value; nothing
//! reads the environment after this point.

use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::WatchtowerError;

/// Resolved configuration for a single run
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub API bearer token
    pub token: String,

    /// Watch-list file or directory
    pub watch_path: PathBuf,

    /// Persisted state document
    pub state_path: PathBuf,

    /// Changed-entries output document
    pub process_path: PathBuf,

    /// Whether prereleases qualify as the latest version
    pub include_prerelease: bool,
}

impl Config {
    /// Build the configuration from parsed CLI arguments and the environment.
    ///
    /// The token is the only hard requirement: without it the GitHub API
    /// would reject every request, so its absence is fatal up front.
    pub fn from_cli(cli: &Cli) -> Result<Self, WatchtowerError> {
        let token = resolve_token().ok_or(WatchtowerError::MissingToken)?;

        Ok(Self {
            token,
            watch_path: cli.watch_file.clone(),
            state_path: cli.state_file.clone(),
            process_path: cli.process_file.clone(),
            include_prerelease: cli.include_prerelease || env_include_prerelease(),
        })
    }
}

/// GITHUB_TOKEN is preferred; GH_TOKEN matches the GitHub CLI convention.
fn resolve_token() -> Option<String> {
    env::var("GITHUB_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .or_else(|| env::var("GH_TOKEN").ok().filter(|t| !t.is_empty()))
}

/// Only the literal "true" (any case) enables prereleases.
fn env_include_prerelease() -> bool {
    env::var("INCLUDE_PRERELEASE")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
