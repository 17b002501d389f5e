//! Key-value persistence of the document.
//!
//! The document is saved as a raw JSON snapshot under one configured key
//! (`content` by default). Saving happens only on request; loading happens
//! once at startup and falls back to an empty document if nothing usable is
//! stored.

use std::cell::RefCell;
use std::collections::HashMap;

use smol_str::SmolStr;

use crate::config::EditorConfig;
use crate::engine::RichTextEngine;
use crate::error::{SnapshotError, StorageError};
use crate::snapshot::RawDraftContentState;
use crate::state::EditorState;

/// A string key-value store, e.g. browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Saves and restores the document through a `KeyValueStore`.
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    store: S,
    key: SmolStr,
    max_undo_steps: usize,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S, config: &EditorConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            max_undo_steps: config.max_undo_steps,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the current document under the configured key.
    pub fn save<E: RichTextEngine>(&self, engine: &E) -> Result<(), StorageError> {
        let raw = engine.export_snapshot();
        let json = serde_json::to_string(&raw).map_err(|e| StorageError::Write {
            key: self.key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, bytes = json.len(), "saved document");
        Ok(())
    }

    /// Read the saved document.
    ///
    /// `Ok(None)` when nothing (or an empty string) is stored, or the store
    /// cannot be read.
    pub fn try_load(&self) -> Result<Option<EditorState>, SnapshotError> {
        let json = match self.store.get(&self.key) {
            Ok(Some(json)) if json.is_empty() => return Ok(None),
            Ok(Some(json)) => json,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read saved document");
                return Ok(None);
            }
        };

        let raw: RawDraftContentState = serde_json::from_str(&json)?;
        let state = EditorState::import_snapshot(raw)?;
        Ok(Some(state.with_max_undo_steps(self.max_undo_steps)))
    }

    /// The startup document: the saved one if it parses, otherwise empty.
    ///
    /// Parse failures are logged and swallowed.
    pub fn load(&self) -> EditorState {
        match self.try_load() {
            Ok(Some(state)) => {
                tracing::debug!(key = %self.key, "loaded saved document");
                state
            }
            Ok(None) => self.empty_state(),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "error loading saved content");
                self.empty_state()
            }
        }
    }

    fn empty_state(&self) -> EditorState {
        EditorState::create_empty().with_max_undo_steps(self.max_undo_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "quota exceeded".into(),
            })
        }
    }

    #[test]
    fn test_save_writes_configured_key() {
        let store = MemoryStore::new();
        let bridge = PersistenceBridge::new(&store, &EditorConfig::default());
        bridge.save(&EditorState::create_empty()).unwrap();

        let saved = store.get("content").unwrap().unwrap();
        assert!(saved.starts_with(r#"{"blocks":[{"key":"#));
    }

    #[test]
    fn test_custom_key() {
        let config = EditorConfig {
            storage_key: "notes".into(),
            ..Default::default()
        };
        let store = MemoryStore::new();
        let bridge = PersistenceBridge::new(&store, &config);
        bridge.save(&EditorState::create_empty()).unwrap();
        assert!(store.get("notes").unwrap().is_some());
        assert!(store.get("content").unwrap().is_none());
    }

    #[test]
    fn test_load_nothing_saved() {
        let bridge = PersistenceBridge::new(MemoryStore::new(), &EditorConfig::default());
        assert!(bridge.try_load().unwrap().is_none());
        assert!(!bridge.load().content().has_text());
    }

    #[test]
    fn test_load_empty_string_is_nothing_saved() {
        let bridge = PersistenceBridge::new(
            MemoryStore::with_entry("content", ""),
            &EditorConfig::default(),
        );
        assert!(bridge.try_load().unwrap().is_none());
        assert!(!bridge.load().content().has_text());
    }

    #[test]
    fn test_load_corrupted() {
        let store = MemoryStore::with_entry("content", "{\"blocks\": [");
        let bridge = PersistenceBridge::new(store, &EditorConfig::default());
        assert!(matches!(bridge.try_load(), Err(SnapshotError::Json(_))));
        assert!(!bridge.load().content().has_text());
    }

    #[test]
    fn test_broken_store() {
        let bridge = PersistenceBridge::new(BrokenStore, &EditorConfig::default());
        assert!(bridge.try_load().unwrap().is_none());
        assert!(matches!(
            bridge.save(&EditorState::create_empty()),
            Err(StorageError::Write { .. })
        ));
    }

    #[test]
    fn test_loaded_state_uses_configured_undo_limit() {
        let store = MemoryStore::with_entry(
            "content",
            r#"{"blocks":[{"key":"a","text":"saved"}],"entityMap":{}}"#,
        );
        let config = EditorConfig {
            max_undo_steps: 7,
            ..Default::default()
        };
        let state = PersistenceBridge::new(store, &config).load();
        assert_eq!(state.content().plain_text(), "saved");
        assert_eq!(state.history().max_steps(), 7);
    }
}
