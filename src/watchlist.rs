//! Watch-list loading: a single YAML file or a directory of them
//!
//! Directory mode is the default deployment shape (one file per team or
//! concern, all merged); single-file mode is kept for small setups. File
//! iteration is sorted by name so the merged list is stable across runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use console::style;
use serde_yaml::Value;

use crate::error::WatchtowerError;

/// Extensions recognized as watch-list documents
const WATCH_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Load the watch-list from a file or a directory of files.
///
/// Per-file problems in directory mode are warnings; a malformed single
/// file or a nonexistent path is fatal. Zero total entries is left for the
/// caller to treat as fatal.
pub fn load_watch_repositories(path: &Path) -> Result<Vec<String>> {
    if path.is_dir() {
        load_from_dir(path)
    } else if path.is_file() {
        println!("Loading from file: {}", path.display());
        read_repositories(path).map_err(|source| {
            WatchtowerError::MalformedWatchList {
                path: path.to_path_buf(),
                source: Some(source),
            }
            .into()
        })
    } else {
        Err(WatchtowerError::WatchPathMissing {
            path: path.to_path_buf(),
        }
        .into())
    }
}

fn load_from_dir(dir: &Path) -> Result<Vec<String>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| WATCH_EXTENSIONS.contains(&e))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        eprintln!(
            "{} No watch-list files found in {}",
            style("WARNING:").yellow().bold(),
            dir.display()
        );
        return Ok(Vec::new());
    }

    println!("Loading from directory: {}", dir.display());

    let mut repositories = Vec::new();
    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  - Reading {}", name);

        match read_repositories(file) {
            Ok(repos) => repositories.extend(repos),
            Err(err) => {
                eprintln!(
                    "    {} {}: {:#}",
                    style("WARNING:").yellow().bold(),
                    name,
                    err
                );
            }
        }
    }

    Ok(repositories)
}

/// Read the `repositories` list from a single document.
///
/// A missing or null field is an empty list; any other shape, or a file
/// that does not parse, is an error for the caller to classify.
fn read_repositories(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if doc.is_null() {
        return Ok(Vec::new());
    }
    if !doc.is_mapping() {
        bail!("top-level document is not a mapping");
    }

    match doc.get("repositories") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(entries)) => entries.iter().map(entry_to_string).collect(),
        Some(_) => bail!("'repositories' is not a list"),
    }
}

/// Watch entries are used verbatim as map keys, so scalars only.
fn entry_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => bail!("watch entry is not a scalar"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch.yaml");
        fs::write(
            &path,
            "repositories:\n  - https://github.com/acme/widget\n  - git@github.com:acme/gadget.git\n",
        )
        .unwrap();

        let repos = load_watch_repositories(&path).unwrap();
        assert_eq!(
            repos,
            vec![
                "https://github.com/acme/widget".to_string(),
                "git@github.com:acme/gadget.git".to_string(),
            ]
        );
    }

    #[test]
    fn test_directory_merges_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-team.yaml"), "repositories:\n  - b/second\n").unwrap();
        fs::write(dir.path().join("a-team.yaml"), "repositories:\n  - a/first\n").unwrap();
        fs::write(dir.path().join("c-team.yml"), "repositories:\n  - c/third\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored\n").unwrap();

        let repos = load_watch_repositories(dir.path()).unwrap();
        assert_eq!(repos, vec!["a/first", "b/second", "c/third"]);
    }

    #[test]
    fn test_directory_keeps_duplicates_and_blanks() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("watch.yaml"),
            "repositories:\n  - acme/widget\n  - ''\n  - acme/widget\n",
        )
        .unwrap();

        let repos = load_watch_repositories(dir.path()).unwrap();
        assert_eq!(repos, vec!["acme/widget", "", "acme/widget"]);
    }

    #[test]
    fn test_directory_skips_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.yaml"), "repositories: not-a-list\n").unwrap();
        fs::write(dir.path().join("good.yaml"), "repositories:\n  - acme/widget\n").unwrap();

        let repos = load_watch_repositories(dir.path()).unwrap();
        assert_eq!(repos, vec!["acme/widget"]);
    }

    #[test]
    fn test_directory_tolerates_missing_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.yaml"), "other_key: 1\n").unwrap();

        let repos = load_watch_repositories(dir.path()).unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn test_empty_directory_is_empty_list() {
        let dir = TempDir::new().unwrap();
        assert!(load_watch_repositories(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_path_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = load_watch_repositories(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WatchtowerError>(),
            Some(WatchtowerError::WatchPathMissing { .. })
        ));
    }

    #[test]
    fn test_malformed_single_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch.yaml");
        fs::write(&path, "repositories: not-a-list\n").unwrap();

        let err = load_watch_repositories(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WatchtowerError>(),
            Some(WatchtowerError::MalformedWatchList { .. })
        ));
    }

    #[test]
    fn test_non_mapping_single_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch.yaml");
        fs::write(&path, "- just\n- a\n- list\n").unwrap();

        assert!(load_watch_repositories(&path).is_err());
    }

    #[test]
    fn test_single_file_with_missing_field_is_empty_not_fatal() {
        // Zero entries overall is the caller's fatal condition, not ours
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watch.yaml");
        fs::write(&path, "other_key: 1\n").unwrap();

        assert!(load_watch_repositories(&path).unwrap().is_empty());
    }
}
