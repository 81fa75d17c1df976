//! Atomic JSON document persistence.
//!
//! One [`DocumentStore`] owns one file path holding one JSON document (the
//! recipe array or the user map). Writes go through a temp file created in
//! the target directory followed by an atomic rename, so readers only ever
//! observe the old complete document or the new complete document.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use tastetales_core::{Error, Result};

/// Handle to a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or return `default` when the file does not exist.
    ///
    /// A file that exists but fails to parse is fatal
    /// ([`Error::MalformedStore`]); partially dropping unreadable records
    /// would silently lose data.
    pub fn load_or<T: DeserializeOwned>(&self, default: T) -> Result<T> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store file missing, using default");
                return Ok(default);
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&text).map_err(|source| Error::MalformedStore {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Serialize `value` and atomically replace the document with it.
    ///
    /// The JSON is pretty-printed with 4-space indentation; non-ASCII
    /// characters are written literally. The temp file lives in the same
    /// directory as the target so the rename stays on one filesystem. On any
    /// failure before the rename the temp file is removed (the
    /// [`NamedTempFile`] guard deletes it on drop) and the target is left
    /// untouched.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut buf = Vec::with_capacity(4096);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(&buf)?;
        tmp.as_file().sync_data()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = buf.len(), "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("recipes.json"));
        let loaded: Vec<serde_json::Value> = store.load_or(Vec::new()).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("recipes.json"));
        let doc = vec![json!({"id": 1, "title": "Soup"}), json!({"id": 2})];
        store.save(&doc).unwrap();
        let loaded: Vec<serde_json::Value> = store.load_or(Vec::new()).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("nested/data/users.json"));
        store.save(&json!({})).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_uses_four_space_indent_and_raw_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("recipes.json"));
        store.save(&vec![json!({"title": "Crème brûlée"})]).unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("    \"title\""), "expected 4-space indent:\n{text}");
        assert!(text.contains("Crème brûlée"), "non-ASCII must not be escaped:\n{text}");
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "{not json at all").unwrap();
        let store = DocumentStore::new(&path);
        let err = store.load_or::<Vec<serde_json::Value>>(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedStore { .. }));
    }

    #[test]
    fn test_failed_save_leaves_existing_document_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let store = DocumentStore::new(&path);
        store.save(&json!([1, 2, 3])).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // A map with non-string keys fails serde_json serialization before
        // any file I/O happens.
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1u8], "x");
        assert!(store.save(&bad).is_err());

        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("users.json"));
        store.save(&json!({"alice": {"password": "hash"}})).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
