//! Latest-version resolution: releases first, tags as fallback

use crate::github::RepoHost;
use crate::repo_url::RepoRef;

/// Determine the latest version string for a repository.
///
/// Priority:
///   1. Newest non-draft release (prereleases only when `include_prerelease`),
///      identified by its tag label or, failing that, its display title
///   2. The most recent tag, by API list order
///
/// Every failure here is per-repository and non-fatal: it is reported and
/// the caller skips the repository, leaving its prior state untouched.
pub fn latest_version(host: &dyn RepoHost, repo_url: &str, include_prerelease: bool) -> Option<String> {
    let repo = match RepoRef::parse(repo_url) {
        Ok(repo) => repo,
        Err(err) => {
            println!("  - {}: {}", repo_url, err);
            return None;
        }
    };

    if let Err(err) = host.fetch_repo(&repo) {
        println!("  - {}: cannot access repo ({})", repo_url, err);
        return None;
    }

    // Try releases first
    match host.list_releases(&repo) {
        Ok(releases) => {
            for release in releases {
                if release.draft {
                    continue;
                }
                if release.prerelease && !include_prerelease {
                    continue;
                }
                if let Some(tag) = release.tag_name.filter(|t| !t.is_empty()) {
                    return Some(tag);
                }
                // Releases occasionally lack a tag label; use the title
                if let Some(title) = release.name.filter(|n| !n.is_empty()) {
                    return Some(title);
                }
            }
        }
        Err(err) => println!("  - {}: failed to list releases ({})", repo_url, err),
    }

    // Fall back to tags, most recent first
    match host.list_tags(&repo) {
        Ok(tags) => {
            if let Some(tag) = tags.into_iter().next() {
                return Some(tag.name);
            }
        }
        Err(err) => println!("  - {}: failed to list tags ({})", repo_url, err),
    }

    None
}
