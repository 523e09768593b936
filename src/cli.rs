//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::run;

/// Watchtower - GitHub release change detector
///
/// Resolves the latest release or tag for every repository on the
/// watch-list and reports the ones that changed since the previous run.
#[derive(Parser, Debug)]
#[command(name = "watchtower")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Watch-list file, or directory of watch-list files
    #[arg(long, env = "WATCH_FILE", default_value = "watch")]
    pub watch_file: PathBuf,

    /// Persisted state document (repository URL -> last seen version)
    #[arg(long, env = "STATE_FILE", default_value = "state.yaml")]
    pub state_file: PathBuf,

    /// Output document listing this run's changed entries
    #[arg(long, env = "PROCESS_FILE", default_value = "process.yaml")]
    pub process_file: PathBuf,

    /// Accept prereleases when resolving the latest release
    ///
    /// The INCLUDE_PRERELEASE environment variable set to "true"
    /// (case-insensitive) has the same effect.
    #[arg(long)]
    pub include_prerelease: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Execute a single polling run
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let config = Config::from_cli(&self)?;
        run::execute(&config, self.verbose)
    }
}
