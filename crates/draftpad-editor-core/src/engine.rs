//! The narrow engine interface the intercept handlers are written against.
//!
//! Handlers only need to read block text and the selection, delete a range,
//! toggle a style, and move whole documents in and out as raw snapshots.
//! `EditorState` is the implementation; tests can substitute their own.

use crate::content::ContentState;
use crate::error::SnapshotError;
use crate::modifier;
use crate::rich_utils;
use crate::snapshot::{self, RawDraftContentState};
use crate::state::{ChangeType, EditorState};
use crate::style::InlineStyle;
use crate::types::{BlockKey, SelectionState};

/// Operations an autoformatting editor needs from its rich-text engine.
///
/// Every mutating operation returns a new engine value and leaves `self`
/// untouched.
pub trait RichTextEngine: Sized {
    /// Plain text of the block `key`, if it exists.
    fn block_text(&self, key: &BlockKey) -> Option<&str>;

    /// The current selection.
    fn selection(&self) -> &SelectionState;

    /// Toggle `style` over `range`. A collapsed range toggles the style
    /// for the next typed character.
    fn apply_style(&self, style: &InlineStyle, range: &SelectionState) -> Self;

    /// Delete the text in `range`, leaving a caret at its start.
    fn delete_range(&self, range: &SelectionState) -> Self;

    fn export_snapshot(&self) -> RawDraftContentState;

    fn import_snapshot(raw: RawDraftContentState) -> Result<Self, SnapshotError>;
}

impl RichTextEngine for EditorState {
    fn block_text(&self, key: &BlockKey) -> Option<&str> {
        self.content().block_for_key(key).map(|block| block.text())
    }

    fn selection(&self) -> &SelectionState {
        EditorState::selection(self)
    }

    fn apply_style(&self, style: &InlineStyle, range: &SelectionState) -> Self {
        let mut target = self.clone();
        target.accept_selection(range.clone());
        rich_utils::toggle_inline_style(&target, style)
    }

    fn delete_range(&self, range: &SelectionState) -> Self {
        let content = modifier::remove_range(self.content(), range);
        let mut next = self.clone();
        next.push(content, ChangeType::RemoveRange);
        next
    }

    fn export_snapshot(&self) -> RawDraftContentState {
        snapshot::convert_to_raw(self.content())
    }

    fn import_snapshot(raw: RawDraftContentState) -> Result<Self, SnapshotError> {
        let content: ContentState = snapshot::convert_from_raw(raw)?;
        Ok(EditorState::create_with_content(content))
    }
}
