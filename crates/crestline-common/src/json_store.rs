//! JSON file persistence.
//!
//! One canonical implementation of load/save for the JSON documents the
//! suite keeps on disk (test-run reports, exported fault records), so the
//! owning crates do not each grow their own copy.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors raised by the JSON store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file not found: {path}")]
    Missing { path: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read and deserialize a JSON document.
pub fn read_json<T, P>(path: P) -> StoreResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::Missing {
            path: path.display().to_string(),
        });
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read a JSON document, falling back to `T::default()` when the file
/// does not exist yet. Other failures still surface.
pub fn read_json_or_default<T, P>(path: P) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    match read_json(path) {
        Ok(value) => Ok(value),
        Err(StoreError::Missing { .. }) => Ok(T::default()),
        Err(other) => Err(other),
    }
}

/// Serialize `value` as pretty JSON, creating parent directories as needed.
pub fn write_json<T, P>(path: P, value: &T) -> StoreResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}

/// Like [`write_json`] but writes through a sibling temp file and renames,
/// so readers never observe a half-written document.
pub fn write_json_atomic<T, P>(path: P, value: &T) -> StoreResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(value)?;
    let staging = path.with_extension("tmp");
    std::fs::write(&staging, &body)?;
    std::fs::rename(&staging, path)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");

        let doc = Doc {
            name: "totals".into(),
            count: 7,
        };
        write_json(&path, &doc).unwrap();
        let loaded: Doc = read_json(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_missing_file_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let result: StoreResult<Doc> = read_json(dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreError::Missing { .. })));
    }

    #[test]
    fn test_read_or_default_on_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Doc = read_json_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Doc::default());
    }

    #[test]
    fn test_atomic_write_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        write_json_atomic(&path, &Doc::default()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
