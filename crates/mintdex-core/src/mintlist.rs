//! Named mint collections used for bulk registration and exclusion.
//!
//! A mintlist is a JSON document of the form
//! `{"name": "...", "version": "...", "mints": ["...", ...]}`. The repository
//! only ever reads `mints`; name and version are carried for callers.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Mint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mintlist {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub mints: Vec<Mint>,
}

impl Mintlist {
    pub fn new(name: impl Into<String>, mints: impl IntoIterator<Item = impl Into<Mint>>) -> Self {
        Self {
            name: name.into(),
            version: None,
            mints: mints.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a mintlist JSON document. `source_name` only labels errors.
    pub fn from_json(source_name: &str, content: &str) -> Result<Self, CoreError> {
        serde_json::from_str(content).map_err(|e| CoreError::MintlistParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }
}

pub fn load_mintlist_file(path: &Path) -> Result<Mintlist, CoreError> {
    let content = std::fs::read_to_string(path)?;
    let mintlist = Mintlist::from_json(&path.display().to_string(), &content)?;
    tracing::debug!(
        path = %path.display(),
        name = %mintlist.name,
        mints = mintlist.mints.len(),
        "loaded mintlist"
    );
    Ok(mintlist)
}

/// Recursively load every `.json` file under `dir` as a mintlist. Two lists
/// with the same `name` are rejected, since callers tag mints by list name.
pub fn load_mintlist_dir(dir: &Path) -> Result<Vec<Mintlist>, CoreError> {
    if !dir.is_dir() {
        return Err(CoreError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("mintlist directory not found: {}", dir.display()),
        )));
    }

    let mut mintlists = Vec::new();
    let mut seen_names = HashSet::new();
    walk_mintlist_dir(dir, &mut mintlists, &mut seen_names)?;
    Ok(mintlists)
}

fn walk_mintlist_dir(
    current: &Path,
    mintlists: &mut Vec<Mintlist>,
    seen_names: &mut HashSet<String>,
) -> Result<(), CoreError> {
    // Sorted for a deterministic load order across platforms and filesystems.
    let mut entries: Vec<_> = std::fs::read_dir(current)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.path());

    entries.into_iter().try_for_each(|entry| {
        let path = entry.path();
        if path.is_dir() {
            return walk_mintlist_dir(&path, mintlists, seen_names);
        }

        if path.extension().is_none_or(|ext| ext != "json") {
            return Ok(());
        }

        let mintlist = load_mintlist_file(&path)?;
        if !seen_names.insert(mintlist.name.clone()) {
            return Err(CoreError::DuplicateMintlist {
                name: mintlist.name,
                path: path.display().to_string(),
            });
        }
        mintlists.push(mintlist);
        Ok(())
    })
}
