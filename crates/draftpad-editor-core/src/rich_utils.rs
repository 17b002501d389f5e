//! Rich-text conveniences on top of `EditorState`: block type lookup,
//! inline style toggling, and the standard key command mapping.

use crate::actions::EditorCommand;
use crate::content::{BlockType, ContentState};
use crate::modifier;
use crate::state::{ChangeType, EditorState};
use crate::style::InlineStyle;
use crate::types::{BlockPoint, SelectionState};

/// Type of the block holding the selection start.
pub fn current_block_type(state: &EditorState) -> BlockType {
    state
        .content()
        .block_for_key(state.selection().start_key())
        .map(|block| block.block_type().clone())
        .unwrap_or_default()
}

/// Toggle `style` at the selection.
///
/// A caret flips the pending style for the next typed character. A range
/// gains the style everywhere, or loses it everywhere if the range start
/// already has it.
pub fn toggle_inline_style(state: &EditorState, style: &InlineStyle) -> EditorState {
    let mut next = state.clone();
    let current = state.current_inline_style();

    if state.selection().is_collapsed() {
        next.set_inline_style_override(Some(current.toggled(style)));
        return next;
    }

    let content = if current.contains(style) {
        modifier::remove_inline_style(state.content(), state.selection(), style)
    } else {
        modifier::apply_inline_style(state.content(), state.selection(), style)
    };
    next.push(content, ChangeType::ChangeInlineStyle);
    next
}

/// Reset a styled block to `unstyled` when backspace hits its start.
///
/// Returns `None` unless the selection is a caret at offset 0 of a
/// non-unstyled block. A code block directly after a non-empty code block
/// keeps its type so the two can merge.
pub fn try_remove_block_style(state: &EditorState) -> Option<ContentState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.anchor.offset != 0 {
        return None;
    }

    let content = state.content();
    let key = &selection.anchor.key;
    let block = content.block_for_key(key)?;

    if *block.block_type() == BlockType::CodeBlock {
        if let Some(before) = content.block_before(key) {
            if *before.block_type() == BlockType::CodeBlock && !before.is_empty() {
                return None;
            }
        }
    }

    if block.block_type().is_unstyled() {
        return None;
    }
    Some(modifier::set_block_type(
        content,
        selection,
        BlockType::Unstyled,
    ))
}

/// Backspace at the start of a block: remove a preceding atomic block, or
/// drop the block style.
pub fn on_backspace(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.anchor.offset != 0 {
        return None;
    }

    let content = state.content();
    let key = selection.start_key();
    if let Some(before) = content.block_before(key) {
        if *before.block_type() == BlockType::Atomic {
            let current_type = current_block_type(state);
            let target = SelectionState::between(
                BlockPoint::new(before.key().clone(), 0),
                selection.anchor.clone(),
                false,
            );
            let removed = modifier::remove_range(content, &target);
            let restyled =
                modifier::set_block_type(&removed, removed.selection_after(), current_type);

            let mut next = state.clone();
            next.push(restyled, ChangeType::RemoveRange);
            return Some(next);
        }
    }

    let content = try_remove_block_style(state)?;
    let mut next = state.clone();
    next.push(content, ChangeType::ChangeBlockType);
    Some(next)
}

/// The standard rich-text command mapping.
///
/// Formatting commands toggle their inline style; backspace variants may
/// reset the block style. Everything else is left to the default behaviour.
pub fn handle_rich_command(state: &EditorState, command: EditorCommand) -> Option<EditorState> {
    let style = match command {
        EditorCommand::Bold => InlineStyle::Bold,
        EditorCommand::Italic => InlineStyle::Italic,
        EditorCommand::Underline => InlineStyle::Underline,
        EditorCommand::Code => InlineStyle::Code,
        EditorCommand::Strikethrough => InlineStyle::Strikethrough,
        command if command.is_backspace() => return on_backspace(state),
        _ => return None,
    };
    Some(toggle_inline_style(state, &style))
}
