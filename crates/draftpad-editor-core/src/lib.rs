//! draftpad-editor-core: Pure Rust rich-text editor logic without framework dependencies.
//!
//! This crate provides:
//! - `ContentState` / `ContentBlock` - block-structured document with per-character inline styles
//! - `EditorState` - content + selection + undo history, the unit every handler consumes and produces
//! - `modifier` - content transformations (insert, remove, split, restyle)
//! - `handlers` - the key-command, before-input (autoformat) and return intercepts
//! - `EditorHost` - composes the intercepts with the default editing behaviour
//! - `snapshot` / `storage` - raw JSON export and key-value persistence
//! - `render` - styled runs and the CSS style map for presentation layers

pub mod actions;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod execute;
pub mod handlers;
pub mod host;
pub mod modifier;
pub mod render;
pub mod rich_utils;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod style;
pub mod text_helpers;
pub mod types;
pub mod undo;

pub use actions::{EditorCommand, Key, KeyCombo, Modifiers, default_key_binding};
pub use config::EditorConfig;
pub use content::{BlockType, ContentBlock, ContentState};
pub use engine::RichTextEngine;
pub use error::{SnapshotError, StorageError};
pub use execute::execute_command;
pub use handlers::{HandleResult, handle_before_input, handle_key_command, handle_return};
pub use host::{EditorEvent, EditorHost};
pub use render::{BlockRender, StyledRun, render_content};
pub use smol_str::SmolStr;
pub use snapshot::{RawDraftContentBlock, RawDraftContentState, RawInlineStyleRange};
pub use state::{ChangeType, EditorState};
pub use storage::{KeyValueStore, MemoryStore, PersistenceBridge};
pub use style::{AutoformatStyle, CssStyle, InlineStyle, StyleMap, StyleSet};
pub use types::{BlockKey, BlockPoint, SelectionState};
pub use undo::{History, UndoManager};
