//! The editor's intercept handlers.
//!
//! Each handler looks at one incoming event and the current state and either
//! returns a replacement state or declines, in which case the host runs the
//! default behaviour. Handlers never mutate their input.

use crate::actions::EditorCommand;
use crate::content::BlockType;
use crate::engine::RichTextEngine;
use crate::modifier;
use crate::rich_utils;
use crate::state::{ChangeType, EditorState};
use crate::style::AutoformatStyle;
use crate::types::SelectionState;

/// Outcome of an intercept handler.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleResult<S = EditorState> {
    /// The event was consumed; this is the new state.
    Handled(S),
    /// Run the default behaviour.
    NotHandled,
}

impl<S> HandleResult<S> {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    pub fn into_state(self) -> Option<S> {
        match self {
            Self::Handled(state) => Some(state),
            Self::NotHandled => None,
        }
    }
}

impl<S> From<Option<S>> for HandleResult<S> {
    fn from(state: Option<S>) -> Self {
        match state {
            Some(state) => Self::Handled(state),
            None => Self::NotHandled,
        }
    }
}

/// Inputs worth inspecting for autoformat. Only a space can complete a trigger.
const AUTOFORMAT_INPUTS: [&str; 5] = [" ", "#", "*", "**", "***"];

/// Resolve a key command through the standard rich-text mapping.
pub fn handle_key_command(command: EditorCommand, state: &EditorState) -> HandleResult {
    match rich_utils::handle_rich_command(state, command) {
        Some(next) => {
            tracing::debug!(command = %command, "key command handled");
            HandleResult::Handled(next)
        }
        None => HandleResult::NotHandled,
    }
}

/// Autoformat: when a space is typed into a block whose entire text is a
/// trigger string, clear the block and toggle the trigger's style instead
/// of inserting the space.
pub fn handle_before_input<E: RichTextEngine>(chars: &str, engine: &E) -> HandleResult<E> {
    if !AUTOFORMAT_INPUTS.contains(&chars) {
        return HandleResult::NotHandled;
    }

    let key = engine.selection().start_key().clone();
    let Some(text) = engine.block_text(&key) else {
        return HandleResult::NotHandled;
    };

    let style = match AutoformatStyle::from_trigger(text) {
        Some(style) if chars == " " => style,
        _ => return HandleResult::NotHandled,
    };

    let whole_block = SelectionState::within_block(key, 0, text.chars().count());
    let cleared = engine.delete_range(&whole_block);
    let caret = cleared.selection().clone();
    let styled = cleared.apply_style(&style.inline_style(), &caret);

    tracing::debug!(
        trigger = style.trigger(),
        style = %style.inline_style(),
        "autoformat applied"
    );
    HandleResult::Handled(styled)
}

/// Return in a styled block resets it to `unstyled` without splitting.
pub fn handle_return(state: &EditorState) -> HandleResult {
    if rich_utils::current_block_type(state).is_unstyled() {
        return HandleResult::NotHandled;
    }

    let content = modifier::set_block_type(state.content(), state.selection(), BlockType::Unstyled);
    let mut next = state.clone();
    next.push(content, ChangeType::ChangeBlockType);
    tracing::debug!("block type reset on return");
    HandleResult::Handled(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBlock, ContentState};
    use crate::style::InlineStyle;
    use crate::types::BlockKey;

    fn state_with_text(text: &str) -> EditorState {
        let mut state = EditorState::create_with_content(ContentState::from_text(text));
        let key = state.content().first_block().key().clone();
        let len = text.chars().count();
        state.accept_selection(SelectionState::collapsed(key, len));
        state
    }

    #[test]
    fn test_each_trigger_maps_to_its_style() {
        let cases = [
            ("#", InlineStyle::Heading),
            ("*", InlineStyle::Bold),
            ("**", InlineStyle::RedLine),
            ("***", InlineStyle::Underline),
        ];
        for (trigger, expected) in cases {
            let state = state_with_text(trigger);
            let next = handle_before_input(" ", &state)
                .into_state()
                .unwrap_or_else(|| panic!("{trigger} not handled"));
            assert_eq!(next.content().first_block().text(), "", "{trigger}");
            assert!(
                next.current_inline_style().contains(&expected),
                "{trigger}"
            );
        }
    }

    #[test]
    fn test_non_space_never_formats() {
        let state = state_with_text("#");
        assert_eq!(handle_before_input("#", &state), HandleResult::NotHandled);
        assert_eq!(handle_before_input("a", &state), HandleResult::NotHandled);
    }

    #[test]
    fn test_space_after_other_text_declines() {
        for text in ["", "# ", "#a", "****", "hello"] {
            let state = state_with_text(text);
            assert_eq!(
                handle_before_input(" ", &state),
                HandleResult::NotHandled,
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_trigger_checks_block_of_selection_start() {
        let blocks = vec![
            ContentBlock::new(BlockKey::from("a"), "plain"),
            ContentBlock::new(BlockKey::from("b"), "**"),
        ];
        let mut state = EditorState::create_with_content(ContentState::from_blocks(blocks));
        state.accept_selection(SelectionState::collapsed(BlockKey::from("b"), 2));

        let next = handle_before_input(" ", &state).into_state().unwrap();
        assert_eq!(next.content().blocks()[0].text(), "plain");
        assert_eq!(next.content().blocks()[1].text(), "");
        assert!(next.current_inline_style().contains(&InlineStyle::RedLine));
    }

    #[test]
    fn test_return_resets_styled_block() {
        let block = ContentBlock::new(BlockKey::from("a"), "Title").with_type(BlockType::HeaderOne);
        let state = EditorState::create_with_content(ContentState::from_blocks(vec![block]));

        let next = handle_return(&state).into_state().unwrap();
        assert_eq!(next.content().blocks().len(), 1);
        assert_eq!(
            next.content().first_block().block_type(),
            &BlockType::Unstyled
        );
        assert_eq!(next.last_change_type(), Some(ChangeType::ChangeBlockType));
    }

    #[test]
    fn test_return_in_unstyled_block_declines() {
        let state = state_with_text("hello");
        assert_eq!(handle_return(&state), HandleResult::NotHandled);
    }

    #[test]
    fn test_key_command() {
        let state = state_with_text("hi");
        assert!(handle_key_command(EditorCommand::Bold, &state).is_handled());
        assert!(!handle_key_command(EditorCommand::Undo, &state).is_handled());
    }
}
