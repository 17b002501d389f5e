//! Editor state: content, selection, pending inline style, and undo history.
//!
//! `EditorState` is a value: handlers clone it, apply a change through
//! `push`, and hand the result back to the host.

use crate::content::ContentState;
use crate::style::StyleSet;
use crate::types::SelectionState;
use crate::undo::{History, UndoManager};

/// What kind of edit produced a content change. Drives undo coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    InsertFragment,
    Undo,
    Redo,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertCharacters => "insert-characters",
            Self::BackspaceCharacter => "backspace-character",
            Self::DeleteCharacter => "delete-character",
            Self::RemoveRange => "remove-range",
            Self::SplitBlock => "split-block",
            Self::ChangeBlockType => "change-block-type",
            Self::ChangeInlineStyle => "change-inline-style",
            Self::InsertFragment => "insert-fragment",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Runs of these changes collapse into one undo step.
    fn coalesces(self) -> bool {
        matches!(
            self,
            Self::InsertCharacters | Self::BackspaceCharacter | Self::DeleteCharacter
        )
    }
}

/// The complete state of one editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    content: ContentState,
    selection: SelectionState,
    inline_style_override: Option<StyleSet>,
    history: History,
    last_change_type: Option<ChangeType>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}

impl EditorState {
    /// A fresh state over an empty document.
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::empty())
    }

    /// A fresh state over `content`, caret at the start of the first block.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self {
            content,
            selection,
            inline_style_override: None,
            history: History::default(),
            last_change_type: None,
        }
    }

    /// Replace the undo limit, dropping any recorded history.
    pub fn with_max_undo_steps(mut self, max_steps: usize) -> Self {
        self.history = History::new(max_steps);
        self
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Commit new content produced by a modifier.
    ///
    /// Records the current content as an undo step unless this change
    /// continues a run of the same typing/deleting change with the caret
    /// where the last change left it. Clears redo and any pending inline style.
    ///
    /// A coalesced change inherits `selection_before` from the start of the
    /// run, so undo puts the caret back where typing began.
    pub fn push(&mut self, mut content: ContentState, change_type: ChangeType) {
        let continues_run = self.last_change_type == Some(change_type)
            && change_type.coalesces()
            && self.selection == *self.content.selection_after();

        let after = content.selection_after().clone();
        if continues_run {
            content.set_selections(self.content.selection_before().clone(), after);
        } else {
            self.history.record(self.content.clone());
            content.set_selections(self.selection.clone(), after);
        }
        self.history.clear_redo();

        self.selection = content.selection_after().clone().with_focus(true);
        self.content = content;
        self.inline_style_override = None;
        self.last_change_type = Some(change_type);
    }

    /// Accept a selection coming from the UI. Clears any pending inline style.
    pub fn accept_selection(&mut self, selection: SelectionState) {
        if self.selection != selection {
            self.inline_style_override = None;
        }
        self.selection = selection;
    }

    pub fn set_inline_style_override(&mut self, style: Option<StyleSet>) {
        self.inline_style_override = style;
    }

    /// The style that the next inserted character will carry.
    ///
    /// For a caret: the pending override if any, otherwise the style of the
    /// character before the caret, the first character of a caret-at-start
    /// block, or the last character of the nearest non-empty block above an
    /// empty one. For a range: the style at its start.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = &self.inline_style_override {
            return style.clone();
        }

        let start = self.selection.start();
        let Some(block) = self.content.block_for_key(&start.key) else {
            return StyleSet::new();
        };

        if !self.selection.is_collapsed() {
            return block.style_at(start.offset);
        }
        if start.offset > 0 {
            return block.style_at(start.offset - 1);
        }
        if !block.is_empty() {
            return block.style_at(0);
        }
        self.look_upward_for_inline_style()
    }

    fn look_upward_for_inline_style(&self) -> StyleSet {
        let Some(index) = self.content.block_index(self.selection.start_key()) else {
            return StyleSet::new();
        };
        self.content.blocks()[..index]
            .iter()
            .rev()
            .find(|block| !block.is_empty())
            .map(|block| block.style_at(block.len() - 1))
            .unwrap_or_default()
    }
}

impl UndoManager for EditorState {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        let current = self.content.clone();
        let selection = current.selection_before().clone().with_focus(true);
        let Some(previous) = self.history.step_back(current) else {
            return false;
        };
        self.content = previous;
        self.selection = selection;
        self.inline_style_override = None;
        self.last_change_type = Some(ChangeType::Undo);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(next) = self.history.step_forward(self.content.clone()) else {
            return false;
        };
        self.selection = next.selection_after().clone().with_focus(true);
        self.content = next;
        self.inline_style_override = None;
        self.last_change_type = Some(ChangeType::Redo);
        true
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier;
    use crate::style::InlineStyle;

    fn type_text(state: &mut EditorState, text: &str) {
        for ch in text.chars() {
            let style = state.current_inline_style();
            let content =
                modifier::insert_text(state.content(), state.selection(), &ch.to_string(), &style);
            state.push(content, ChangeType::InsertCharacters);
        }
    }

    #[test]
    fn test_typing_coalesces_into_one_undo_step() {
        let mut state = EditorState::create_empty();
        type_text(&mut state, "hello");
        assert_eq!(state.content().plain_text(), "hello");
        assert_eq!(state.history().undo_len(), 1);

        assert!(state.undo());
        assert_eq!(state.content().plain_text(), "");
        assert_eq!(state.selection().start_offset(), 0);
        assert!(!state.can_undo());

        assert!(state.redo());
        assert_eq!(state.content().plain_text(), "hello");
        assert_eq!(state.selection().start_offset(), 5);
    }

    #[test]
    fn test_moving_caret_breaks_run() {
        let mut state = EditorState::create_empty();
        type_text(&mut state, "ab");
        let key = state.content().first_block().key().clone();
        state.accept_selection(SelectionState::collapsed(key, 0));
        type_text(&mut state, "x");
        assert_eq!(state.content().plain_text(), "xab");
        assert_eq!(state.history().undo_len(), 2);
    }

    #[test]
    fn test_different_change_type_is_boundary() {
        let mut state = EditorState::create_empty();
        type_text(&mut state, "ab");
        let content = modifier::split_block(state.content(), state.selection());
        state.push(content, ChangeType::SplitBlock);
        type_text(&mut state, "c");
        assert_eq!(state.history().undo_len(), 3);
    }

    #[test]
    fn test_push_clears_redo_and_override() {
        let mut state = EditorState::create_empty();
        type_text(&mut state, "a");
        state.undo();
        assert!(state.can_redo());

        state.set_inline_style_override(Some(StyleSet::new().with(InlineStyle::Bold)));
        type_text(&mut state, "b");
        assert!(!state.can_redo());
        assert!(state.inline_style_override().is_none());
        assert!(state.content().first_block().style_at(0).contains(&InlineStyle::Bold));
    }

    #[test]
    fn test_current_style_follows_previous_char() {
        let mut state = EditorState::create_empty();
        state.set_inline_style_override(Some(StyleSet::new().with(InlineStyle::Italic)));
        type_text(&mut state, "ab");
        assert!(state.current_inline_style().contains(&InlineStyle::Italic));
        let block = state.content().first_block();
        assert!(block.style_at(1).contains(&InlineStyle::Italic));
    }

    #[test]
    fn test_current_style_looks_upward_from_empty_block() {
        let mut state = EditorState::create_empty();
        state.set_inline_style_override(Some(StyleSet::new().with(InlineStyle::Heading)));
        type_text(&mut state, "Title");
        let content = modifier::split_block(state.content(), state.selection());
        state.push(content, ChangeType::SplitBlock);

        assert!(state.content().blocks()[1].is_empty());
        assert!(state.current_inline_style().contains(&InlineStyle::Heading));
    }

    #[test]
    fn test_accept_same_selection_keeps_override() {
        let mut state = EditorState::create_empty();
        let bold = StyleSet::new().with(InlineStyle::Bold);
        state.set_inline_style_override(Some(bold.clone()));
        state.accept_selection(state.selection().clone());
        assert_eq!(state.inline_style_override(), Some(&bold));
    }

    #[test]
    fn test_undo_limit() {
        let mut state = EditorState::create_empty().with_max_undo_steps(2);
        for _ in 0..4 {
            let content = modifier::split_block(state.content(), state.selection());
            state.push(content, ChangeType::SplitBlock);
        }
        assert_eq!(state.history().undo_len(), 2);
    }
}
