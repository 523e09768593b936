//! GitHub REST API client
//!
//! The API is consumed as an opaque collaborator: its pagination, rate
//! limiting and error taxonomy are not modeled here. Any transport error or
//! non-success status surfaces as a plain "lookup failed" for the caller to
//! log and skip.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::repo_url::RepoRef;

const API_BASE: &str = "https://api.github.com";

/// A published release, possibly flagged as draft or prerelease
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Tag the release points at
    pub tag_name: Option<String>,

    /// Display title; fallback when the tag label is absent
    pub name: Option<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub prerelease: bool,
}

/// A lightweight tag
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// The three repository-hosting operations the pipeline consumes.
///
/// Release and tag lists are trusted to arrive newest-first, as the GitHub
/// API returns them; no re-sorting happens anywhere downstream.
pub trait RepoHost {
    /// Probe repository metadata; an error means the repo is inaccessible
    fn fetch_repo(&self, repo: &RepoRef) -> Result<()>;

    /// List releases, newest first
    fn list_releases(&self, repo: &RepoRef) -> Result<Vec<Release>>;

    /// List tags, newest first
    fn list_tags(&self, repo: &RepoRef) -> Result<Vec<Tag>>;
}

/// Authenticated client against api.github.com
pub struct GithubClient {
    client: reqwest::blocking::Client,
    token: String,
}

impl GithubClient {
    /// Create a client with the bearer token used for every request
    pub fn new(token: &str) -> Result<Self> {
        // Build HTTP client with timeout
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("watchtower/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            token: token.to_string(),
        })
    }

    fn get(&self, path: &str) -> Result<reqwest::blocking::Response> {
        let url = format!("{}{}", API_BASE, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("GitHub returned HTTP {} for {}", status.as_u16(), url);
        }

        Ok(response)
    }
}

impl RepoHost for GithubClient {
    fn fetch_repo(&self, repo: &RepoRef) -> Result<()> {
        self.get(&format!("/repos/{}/{}", repo.owner, repo.name))?;
        Ok(())
    }

    fn list_releases(&self, repo: &RepoRef) -> Result<Vec<Release>> {
        let releases = self
            .get(&format!("/repos/{}/{}/releases", repo.owner, repo.name))?
            .json()
            .context("Failed to parse release list")?;
        Ok(releases)
    }

    fn list_tags(&self, repo: &RepoRef) -> Result<Vec<Tag>> {
        let tags = self
            .get(&format!("/repos/{}/{}/tags", repo.owner, repo.name))?
            .json()
            .context("Failed to parse tag list")?;
        Ok(tags)
    }
}

/// Scripted in-memory host so the pipeline can be tested without a network.
#[cfg(test)]
pub struct FakeHost {
    /// None simulates a failed release listing
    pub releases: Option<Vec<Release>>,
    /// None simulates a failed tag listing
    pub tags: Option<Vec<Tag>>,
    pub accessible: bool,
}

#[cfg(test)]
impl FakeHost {
    pub fn new() -> Self {
        Self {
            releases: Some(Vec::new()),
            tags: Some(Vec::new()),
            accessible: true,
        }
    }

    pub fn release(tag_name: Option<&str>, name: Option<&str>, draft: bool, prerelease: bool) -> Release {
        Release {
            tag_name: tag_name.map(str::to_string),
            name: name.map(str::to_string),
            draft,
            prerelease,
        }
    }

    pub fn tag(name: &str) -> Tag {
        Tag {
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
impl RepoHost for FakeHost {
    fn fetch_repo(&self, repo: &RepoRef) -> Result<()> {
        if self.accessible {
            Ok(())
        } else {
            bail!("GitHub returned HTTP 404 for {}", repo)
        }
    }

    fn list_releases(&self, _repo: &RepoRef) -> Result<Vec<Release>> {
        match &self.releases {
            Some(releases) => Ok(releases.clone()),
            None => bail!("release listing failed"),
        }
    }

    fn list_tags(&self, _repo: &RepoRef) -> Result<Vec<Tag>> {
        match &self.tags {
            Some(tags) => Ok(tags.clone()),
            None => bail!("tag listing failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_deserialization() {
        let json = r#"[
            {"tag_name": "v2.0.0", "name": "Widget 2.0", "draft": false, "prerelease": false},
            {"tag_name": "v2.0.0-rc.1", "name": null, "draft": false, "prerelease": true}
        ]"#;

        let releases: Vec<Release> = serde_json::from_str(json).unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].tag_name.as_deref(), Some("v2.0.0"));
        assert!(!releases[0].prerelease);
        assert!(releases[1].prerelease);
        assert!(releases[1].name.is_none());
    }

    #[test]
    fn test_release_flags_default_to_false() {
        // Extra fields from the real API payload are ignored
        let json = r#"{"tag_name": "v1.0.0", "name": "v1", "html_url": "https://example.invalid"}"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert!(!release.draft);
        assert!(!release.prerelease);
    }

    #[test]
    fn test_tag_deserialization() {
        let json = r#"[{"name": "v1.0.0", "commit": {"sha": "abc123"}}, {"name": "v0.9.0"}]"#;
        let tags: Vec<Tag> = serde_json::from_str(json).unwrap();
        assert_eq!(tags[0].name, "v1.0.0");
        assert_eq!(tags[1].name, "v0.9.0");
    }
}
