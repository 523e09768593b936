//! Persisted run state: YAML documents mapping repository URL to version
//!
//! The state document carries every version ever observed; the process
//! document carries only the current run's changes. Both share the same
//! `repositories` wrapper. Maps are BTreeMaps so serialization is always
//! lexicographically sorted and reruns with no semantic change produce
//! byte-identical files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Mapping of repository URL (verbatim watch-list text) to version string
pub type RepoMap = BTreeMap<String, String>;

/// On-disk wrapper shared by the state and process documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoDocument {
    /// An explicit `repositories: null` reads the same as an absent field
    #[serde(default, deserialize_with = "null_as_empty")]
    pub repositories: RepoMap,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<RepoMap, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<RepoMap>::deserialize(deserializer)?;
    Ok(map.unwrap_or_default())
}

/// Load the state map; a missing or empty file is an empty state.
pub fn load_state(path: &Path) -> Result<RepoMap> {
    if !path.exists() {
        return Ok(RepoMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(RepoMap::new());
    }

    let doc: RepoDocument = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(doc.repositories)
}

/// Write a document with stable, diff-friendly ordering.
pub fn save_document(path: &Path, map: &RepoMap) -> Result<()> {
    let doc = RepoDocument {
        repositories: map.clone(),
    };

    let content = serde_yaml::to_string(&doc)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
