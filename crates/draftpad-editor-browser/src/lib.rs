//! Browser layer for the draftpad editor.
//!
//! This crate turns browser events into editor events and provides the
//! local storage backend for persistence. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `events`: `KeyboardEvent` and `beforeinput` translation
//! - `platform`: Browser/OS detection for platform-specific key bindings
//! - `storage`: `KeyValueStore` over `window.localStorage`
//!
//! # Re-exports
//!
//! This crate re-exports `draftpad-editor-core` for convenience, so consumers
//! only need to depend on `draftpad-editor-browser`.

// Re-export core crate
pub use draftpad_editor_core;
pub use draftpad_editor_core::*;

pub mod events;
pub mod platform;
pub mod storage;

pub use events::{
    InputType, editor_event_from_input, editor_event_from_input_event, key_from_browser,
    parse_browser_input_type,
};
pub use platform::{Platform, platform};
pub use storage::LocalStorageStore;
