//! `KeyValueStore` over `window.localStorage`.
//!
//! Values are stored verbatim: the persistence bridge already hands us the
//! raw snapshot JSON, so going through gloo's serde layer would quote it a
//! second time.

use draftpad_editor_core::{KeyValueStore, StorageError};
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, Copy)]
pub struct LocalStorageStore {
    _private: (),
}

impl LocalStorageStore {
    /// Check that local storage exists (it can be disabled or blocked in
    /// private browsing) before handing out a store.
    pub fn new() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(_)) => Ok(Self { _private: () }),
            Ok(None) => Err(StorageError::Unavailable(
                "localStorage is not available".into(),
            )),
            Err(e) => Err(StorageError::Unavailable(format!("{e:?}"))),
        }
    }

    /// Remove a stored value.
    pub fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }
}
