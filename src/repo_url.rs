//! GitHub repository URL parsing

use std::fmt;

use anyhow::{bail, Result};

/// Owner/name pair parsed from a repository URL
///
/// Ephemeral: exists only for the duration of a single version lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse a GitHub repository URL in HTTPS or SSH form.
    ///
    /// Accepts formats like:
    ///   https://github.com/owner/repo
    ///   https://github.com/owner/repo.git
    ///   git@github.com:owner/repo.git
    ///
    /// Case is preserved; fragments, queries, boundary slashes and a
    /// trailing `.git` are stripped before splitting.
    pub fn parse(url: &str) -> Result<Self> {
        let mut u = url.trim();

        // SSH format, else anything after the first "github.com/"
        if let Some(rest) = u.strip_prefix("git@github.com:") {
            u = rest;
        } else if let Some(pos) = u.find("github.com/") {
            u = &u[pos + "github.com/".len()..];
        }

        u = u.split('#').next().unwrap_or_default();
        u = u.split('?').next().unwrap_or_default();
        u = u.trim_matches('/');
        u = u.strip_suffix(".git").unwrap_or(u);

        let mut segments = u.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(owner), Some(name)) => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => bail!("Could not parse GitHub repo from URL: {}", url),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> RepoRef {
        RepoRef::parse(url).unwrap()
    }

    #[test]
    fn test_https_url() {
        let r = parse("https://github.com/acme/widget");
        assert_eq!(r.owner, "acme");
        assert_eq!(r.name, "widget");
    }

    #[test]
    fn test_https_url_with_git_suffix() {
        let r = parse("https://github.com/acme/widget.git");
        assert_eq!((r.owner.as_str(), r.name.as_str()), ("acme", "widget"));
    }

    #[test]
    fn test_ssh_url() {
        let r = parse("git@github.com:acme/widget.git");
        assert_eq!((r.owner.as_str(), r.name.as_str()), ("acme", "widget"));
    }

    #[test]
    fn test_equivalent_forms_agree() {
        let canonical = parse("acme/widget");
        for url in [
            "https://github.com/acme/widget",
            "https://github.com/acme/widget/",
            "https://github.com/acme/widget.git",
            "git@github.com:acme/widget.git",
            "  https://github.com/acme/widget  ",
            "https://github.com/acme/widget?tab=readme",
            "https://github.com/acme/widget#readme",
        ] {
            assert_eq!(parse(url), canonical, "mismatch for {}", url);
        }
    }

    #[test]
    fn test_extra_path_segments_are_ignored() {
        let r = parse("https://github.com/acme/widget/releases/tag/v1.0.0");
        assert_eq!((r.owner.as_str(), r.name.as_str()), ("acme", "widget"));
    }

    #[test]
    fn test_case_is_preserved() {
        let r = parse("https://github.com/AcMe/WiDgEt");
        assert_eq!((r.owner.as_str(), r.name.as_str()), ("AcMe", "WiDgEt"));
    }

    #[test]
    fn test_too_few_segments_fails() {
        assert!(RepoRef::parse("https://github.com/acme").is_err());
        assert!(RepoRef::parse("https://github.com/").is_err());
        assert!(RepoRef::parse("").is_err());
        assert!(RepoRef::parse("not a url at all").is_err());
    }

    #[test]
    fn test_display_is_full_name() {
        assert_eq!(parse("https://github.com/acme/widget").to_string(), "acme/widget");
    }
}
