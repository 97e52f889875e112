//! JSON document persistence to named paths.
//!
//! Writes are whole-file replacements and are not crash-atomic: a crash in
//! the middle of a write can leave a truncated document behind.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CacheError;

/// Reads and writes structured documents as JSON files.
pub struct DocumentStore;

impl DocumentStore {
    /// Serializes `value` to `path`, creating parent directories as needed.
    pub fn save<T: Serialize + ?Sized>(value: &T, path: &Path, pretty: bool) -> Result<(), CacheError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::io(parent, e))?;
        }
        let json = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| CacheError::io(path, e))
    }

    /// Loads and deserializes the document at `path`.
    ///
    /// Fails if the file is missing, unreadable, or does not deserialize as `T`.
    pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CacheError> {
        let content = std::fs::read_to_string(path).map_err(|e| CacheError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| CacheError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Loads a JSON object, or an empty object if `path` does not exist.
    ///
    /// Present-but-malformed content is still an error.
    pub fn load_object_or_empty(path: &Path) -> Result<Map<String, Value>, CacheError> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| CacheError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    /// Recursively removes the directory at `path`. A missing directory is not an error.
    pub fn remove_tree(path: &Path) -> Result<(), CacheError> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("doc.json");
        DocumentStore::save(&json!({"k": 1}), &path, false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        DocumentStore::save(&json!([[1, 2], [3, 4]]), &path, true).unwrap();
        let back: Value = DocumentStore::load(&path).unwrap();
        assert_eq!(back, json!([[1, 2], [3, 4]]));
    }

    #[test]
    fn pretty_output_is_multiline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        DocumentStore::save(&json!({"a": "x", "b": "y"}), &path, true).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
    }

    #[test]
    fn load_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentStore::load::<Value>(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
    }

    #[test]
    fn load_corrupt_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not valid json {{{").unwrap();
        let err = DocumentStore::load::<Value>(&path).unwrap_err();
        assert!(matches!(err, CacheError::Malformed { .. }));
    }

    #[test]
    fn object_or_empty_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let obj = DocumentStore::load_object_or_empty(&dir.path().join("index.json")).unwrap();
        assert!(obj.is_empty());
    }

    #[test]
    fn object_or_empty_rejects_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            DocumentStore::load_object_or_empty(&path),
            Err(CacheError::Malformed { .. })
        ));
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            DocumentStore::load_object_or_empty(&path),
            Err(CacheError::Malformed { .. })
        ));
    }

    #[test]
    fn save_to_unwritable_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let err = DocumentStore::save(&json!({}), &blocker.join("doc.json"), false).unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
    }

    #[test]
    fn remove_tree_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        DocumentStore::remove_tree(&dir.path().join("absent")).unwrap();
        let nested = dir.path().join("x").join("y");
        std::fs::create_dir_all(&nested).unwrap();
        DocumentStore::remove_tree(&dir.path().join("x")).unwrap();
        assert!(!dir.path().join("x").exists());
    }
}
