//! Build-time configuration.
//!
//! `DRAFTPAD_STORAGE_KEY`, `DRAFTPAD_MAX_UNDO_STEPS` and `DRAFTPAD_TITLE` are
//! read when the app is compiled; anything unset keeps the editor default.

use draftpad_editor_browser::{EditorConfig, SmolStr};

pub fn from_env() -> EditorConfig {
    from_values(
        option_env!("DRAFTPAD_STORAGE_KEY"),
        option_env!("DRAFTPAD_MAX_UNDO_STEPS"),
        option_env!("DRAFTPAD_TITLE"),
    )
}

fn from_values(
    storage_key: Option<&str>,
    max_undo_steps: Option<&str>,
    title: Option<&str>,
) -> EditorConfig {
    let mut config = EditorConfig::default();
    if let Some(key) = storage_key.filter(|k| !k.is_empty()) {
        config.storage_key = SmolStr::new(key);
    }
    if let Some(steps) = max_undo_steps {
        match steps.parse::<usize>() {
            Ok(steps) => config.max_undo_steps = steps,
            Err(e) => tracing::warn!(value = steps, error = %e, "ignoring DRAFTPAD_MAX_UNDO_STEPS"),
        }
    }
    if let Some(title) = title {
        config.title = SmolStr::new(title);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_keeps_defaults() {
        assert_eq!(from_values(None, None, None), EditorConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_values(Some("draft"), Some("5"), Some("Notes"));
        assert_eq!(config.storage_key, "draft");
        assert_eq!(config.max_undo_steps, 5);
        assert_eq!(config.title, "Notes");
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let config = from_values(Some(""), Some("lots"), None);
        assert_eq!(config.storage_key, "content");
        assert_eq!(config.max_undo_steps, 100);
    }
}
