use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Local storage key holding the saved snapshot.
    pub storage_key: SmolStr,
    /// Undo entries kept before the oldest are dropped.
    pub max_undo_steps: usize,
    /// Label shown above the editor.
    pub title: SmolStr,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: SmolStr::new_static(DEFAULT_STORAGE_KEY),
            max_undo_steps: 100,
            title: SmolStr::new_static("Demo Editor"),
        }
    }
}
