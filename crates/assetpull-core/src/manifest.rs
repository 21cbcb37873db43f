//! Manifest loading: a JSON document of filename -> URL maps grouped by category.
//!
//! The document is kept as a parsed `serde_json` object (key order preserved)
//! because its shape differs between exports: some categories are flat maps,
//! some nest one level of sub-screens. Layouts decide which key paths to walk.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal manifest errors. Any of these aborts the run before a request is made.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("malformed manifest {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One filename -> URL pair at the bottom of the manifest nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafEntry {
    pub filename: String,
    /// `None` when the manifest value is not a string.
    pub url: Option<String>,
}

/// Parsed manifest. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(ManifestError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };
        let manifest = Self::from_json_str(&data).map_err(|e| ManifestError::Malformed {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(
            path = %path.display(),
            top_level_keys = manifest.root.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from JSON text. The top level must be an object.
    pub fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        let root: Map<String, Value> = serde_json::from_str(data)?;
        Ok(Self { root })
    }

    pub fn generated_date(&self) -> Option<&str> {
        self.root.get("generated_date").and_then(Value::as_str)
    }

    pub fn note(&self) -> Option<&str> {
        self.root.get("note").and_then(Value::as_str)
    }

    /// True if the top level has an object under `key`.
    pub fn has_object(&self, key: &str) -> bool {
        matches!(self.root.get(key), Some(Value::Object(_)))
    }

    /// Walks `path` from the top level; returns the object found there, if any.
    pub fn object_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&Map<String, Value>> {
        let mut current = &self.root;
        for key in path {
            match current.get(key.as_ref())? {
                Value::Object(map) => current = map,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Leaf entries of the object at `path`, in document order.
    ///
    /// Returns `None` when the section is absent, which callers treat as
    /// "nothing to do" rather than an error.
    pub fn leaf_entries<S: AsRef<str>>(&self, path: &[S]) -> Option<Vec<LeafEntry>> {
        let map = self.object_at(path)?;
        Some(
            map.iter()
                .map(|(filename, value)| LeafEntry {
                    filename: filename.clone(),
                    url: value.as_str().map(str::to_string),
                })
                .collect(),
        )
    }
}
