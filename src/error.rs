//! Error types and helpers for user-friendly error messages
//!
//! Only fatal configuration problems get typed errors: they terminate the
//! run with a hint for the user. Everything that goes wrong for a single
//! repository (bad URL, API failure, nothing published) is recoverable and
//! handled where it happens.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration errors that terminate the whole run
#[derive(Error, Debug)]
pub enum WatchtowerError {
    /// No API credential in the environment
    #[error("GITHUB_TOKEN (or GH_TOKEN) env var not set")]
    MissingToken,

    /// The configured watch-list path does not exist
    #[error("Watch path does not exist: {}", .path.display())]
    WatchPathMissing { path: PathBuf },

    /// The watch-list file has the wrong top-level shape
    #[error("{} must contain a top-level 'repositories' list", .path.display())]
    MalformedWatchList {
        path: PathBuf,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The watch-list resolved to zero entries
    #[error("No repositories found in {}", .path.display())]
    EmptyWatchList { path: PathBuf },
}

impl WatchtowerError {
    /// Actionable hint for resolving this error
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingToken => hints::github_token(),
            Self::WatchPathMissing { .. } | Self::EmptyWatchList { .. } => hints::watch_list(),
            Self::MalformedWatchList { .. } => hints::watch_list_shape(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let Self::MalformedWatchList {
            source: Some(source),
            ..
        } = self
        {
            eprintln!("  caused by: {:#}", source);
        }

        eprintln!("\n{} {}", style("HINT:").yellow().bold(), self.hint());
        eprintln!();
    }
}

/// Common error hints for configuration problems
pub mod hints {
    /// Get hint for a missing API token
    pub fn github_token() -> &'static str {
        "Create a token at https://github.com/settings/tokens (read access to\n\
         public repositories is enough) and export it:\n\
         • export GITHUB_TOKEN=ghp_xxxx\n\
         • or GH_TOKEN, which the GitHub CLI also uses"
    }

    /// Get hint for a missing or empty watch-list
    pub fn watch_list() -> &'static str {
        "Watchtower reads its watch-list from the WATCH_FILE path (default:\n\
         the 'watch' directory). Create a YAML file with at least one entry:\n\
         \n\
         repositories:\n\
           - https://github.com/owner/repo"
    }

    /// Get hint for a malformed watch-list document
    pub fn watch_list_shape() -> &'static str {
        "The watch-list must be a YAML mapping with a 'repositories' list:\n\
         \n\
         repositories:\n\
           - https://github.com/owner/repo\n\
           - git@github.com:owner/other.git"
    }
}
