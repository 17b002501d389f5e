//! Rich-text editor component with markdown-style autoformatting.
//!
//! All editing logic lives in `draftpad-editor-core`; this module renders
//! the state and feeds browser input into an `EditorHost`.

mod actions;
mod component;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod dom;
mod toolbar;
mod view;

/// DOM id of the hidden textarea that receives keyboard input.
pub(crate) const INPUT_ID: &str = "draftpad-input";

pub use component::DraftEditor;
