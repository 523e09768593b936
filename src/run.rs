//! The single-shot polling pipeline
//!
//! Load watch-list, resolve the latest version per repository, diff
//! against prior state, write the changed-entries and state documents.
//! Strictly sequential; a per-repository failure skips that entry and the
//! run carries on.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::error::WatchtowerError;
use crate::github::{GithubClient, RepoHost};
use crate::resolver;
use crate::state::{self, RepoMap};
use crate::watchlist;

/// Execute one polling run end to end against the real GitHub API.
pub fn execute(config: &Config, verbose: bool) -> Result<()> {
    let client = GithubClient::new(&config.token)?;
    run_pipeline(config, &client, verbose)
}

/// Pipeline body, generic over the API client so tests can substitute a
/// deterministic host.
pub fn run_pipeline(config: &Config, host: &dyn RepoHost, verbose: bool) -> Result<()> {
    let watch_repos = watchlist::load_watch_repositories(&config.watch_path)?;
    if watch_repos.is_empty() {
        return Err(WatchtowerError::EmptyWatchList {
            path: config.watch_path.clone(),
        }
        .into());
    }

    let mut state_map = state::load_state(&config.state_path)?;
    let mut process_map = RepoMap::new();

    println!(
        "Loaded {} repositories from {}",
        watch_repos.len(),
        config.watch_path.display()
    );
    println!(
        "Current state has {} entries in {}",
        state_map.len(),
        config.state_path.display()
    );
    if verbose {
        println!("Process file: {}", config.process_path.display());
        println!("Include prereleases: {}", config.include_prerelease);
    }

    for repo_url in &watch_repos {
        let repo_url = repo_url.trim();
        if repo_url.is_empty() {
            continue;
        }

        println!("\nChecking {} ...", repo_url);
        let Some(latest) = resolver::latest_version(host, repo_url, config.include_prerelease)
        else {
            println!("  - No version/release/tag found; skipping.");
            continue;
        };

        let current = state_map.get(repo_url).cloned();
        match current {
            Some(ref version) if *version == latest => {
                println!("  - Up to date at {}", latest);
            }
            current => {
                println!(
                    "  - {} {} -> {}",
                    style("CHANGE detected:").green().bold(),
                    current.as_deref().unwrap_or("(none)"),
                    latest
                );
                process_map.insert(repo_url.to_string(), latest.clone());
                state_map.insert(repo_url.to_string(), latest);
            }
        }
    }

    // Both documents are written unconditionally, changes or not
    state::save_document(&config.process_path, &process_map)?;
    state::save_document(&config.state_path, &state_map)?;

    println!(
        "\nWrote {} with {} change(s).",
        config.process_path.display(),
        process_map.len()
    );
    println!(
        "Updated {} with {} total repo(s).",
        config.state_path.display(),
        state_map.len()
    );

    Ok(())
}
