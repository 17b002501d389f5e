//! Default command execution.
//!
//! This is what happens when no intercept handler claims an event:
//! character insertion, deletion, block splitting and merging, undo/redo,
//! and caret movement. The logic is platform-agnostic.

use crate::actions::EditorCommand;
use crate::content::ContentState;
use crate::modifier;
use crate::state::{ChangeType, EditorState};
use crate::text_helpers::{find_word_boundary_backward, find_word_boundary_forward};
use crate::types::{BlockPoint, SelectionState};
use crate::undo::UndoManager;

/// Execute a command's default behaviour.
///
/// Returns the new state, or `None` if the command does nothing here
/// (formatting commands, or movement/deletion at the edge of the document).
pub fn execute_command(state: &EditorState, command: EditorCommand) -> Option<EditorState> {
    match command {
        EditorCommand::Undo => execute_undo(state),
        EditorCommand::Redo => execute_redo(state),
        EditorCommand::SelectAll => Some(execute_select_all(state)),
        EditorCommand::SplitBlock => Some(execute_split_block(state)),
        EditorCommand::Backspace => delete_backward(state, Granularity::Character),
        EditorCommand::BackspaceWord => delete_backward(state, Granularity::Word),
        EditorCommand::BackspaceToStartOfLine => delete_backward(state, Granularity::Line),
        EditorCommand::Delete => delete_forward(state, Granularity::Character),
        EditorCommand::DeleteWord => delete_forward(state, Granularity::Word),
        EditorCommand::DeleteToEndOfBlock => delete_forward(state, Granularity::Line),
        EditorCommand::MoveLeft { extend } => move_caret(state, Direction::Left, extend),
        EditorCommand::MoveRight { extend } => move_caret(state, Direction::Right, extend),
        EditorCommand::MoveUp { extend } => move_caret(state, Direction::Up, extend),
        EditorCommand::MoveDown { extend } => move_caret(state, Direction::Down, extend),
        EditorCommand::MoveToLineStart { extend } => {
            move_caret(state, Direction::LineStart, extend)
        }
        EditorCommand::MoveToLineEnd { extend } => move_caret(state, Direction::LineEnd, extend),
        // Formatting is resolved by the key command handler.
        EditorCommand::Bold
        | EditorCommand::Italic
        | EditorCommand::Underline
        | EditorCommand::Code
        | EditorCommand::Strikethrough => None,
    }
}

/// Insert typed characters at the selection with the current inline style.
pub fn insert_characters(state: &EditorState, chars: &str) -> EditorState {
    let style = state.current_inline_style();
    let content = modifier::insert_text(state.content(), state.selection(), chars, &style);
    let mut next = state.clone();
    next.push(content, ChangeType::InsertCharacters);
    next
}

fn execute_undo(state: &EditorState) -> Option<EditorState> {
    let mut next = state.clone();
    next.undo().then_some(next)
}

fn execute_redo(state: &EditorState) -> Option<EditorState> {
    let mut next = state.clone();
    next.redo().then_some(next)
}

fn execute_select_all(state: &EditorState) -> EditorState {
    let content = state.content();
    let first = content.first_block();
    let last = content.last_block();
    let selection = SelectionState::between(
        BlockPoint::new(first.key().clone(), 0),
        BlockPoint::new(last.key().clone(), last.len()),
        false,
    )
    .with_focus(true);

    let mut next = state.clone();
    next.accept_selection(selection);
    next
}

fn execute_split_block(state: &EditorState) -> EditorState {
    let content = modifier::split_block(state.content(), state.selection());
    let mut next = state.clone();
    next.push(content, ChangeType::SplitBlock);
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Character,
    Word,
    Line,
}

fn remove_selection(state: &EditorState) -> EditorState {
    let content = modifier::remove_range(state.content(), state.selection());
    let mut next = state.clone();
    next.push(content, ChangeType::RemoveRange);
    next
}

fn push_removal(
    state: &EditorState,
    range: SelectionState,
    change_type: ChangeType,
) -> EditorState {
    let content = modifier::remove_range(state.content(), &range);
    let mut next = state.clone();
    next.push(content, change_type);
    next
}

fn delete_backward(state: &EditorState, granularity: Granularity) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state));
    }

    let content = state.content();
    let caret = selection.start();
    let block = content.block_for_key(&caret.key)?;
    let offset = caret.offset.min(block.len());

    if offset == 0 {
        // Merge into the previous block.
        let previous = content.block_before(&caret.key)?;
        let range = SelectionState::between(
            BlockPoint::new(previous.key().clone(), previous.len()),
            BlockPoint::new(caret.key.clone(), 0),
            false,
        );
        return Some(push_removal(state, range, ChangeType::BackspaceCharacter));
    }

    let (start, change_type) = match granularity {
        Granularity::Character => (offset - 1, ChangeType::BackspaceCharacter),
        Granularity::Word => (
            find_word_boundary_backward(block, offset),
            ChangeType::RemoveRange,
        ),
        Granularity::Line => (0, ChangeType::RemoveRange),
    };
    let range = SelectionState::within_block(caret.key.clone(), offset, start);
    Some(push_removal(state, range, change_type))
}

fn delete_forward(state: &EditorState, granularity: Granularity) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return Some(remove_selection(state));
    }

    let content = state.content();
    let caret = selection.start();
    let block = content.block_for_key(&caret.key)?;
    let offset = caret.offset.min(block.len());

    if offset == block.len() {
        // Pull the next block up into this one.
        let next_block = content.block_after(&caret.key)?;
        let range = SelectionState::between(
            BlockPoint::new(caret.key.clone(), offset),
            BlockPoint::new(next_block.key().clone(), 0),
            false,
        );
        return Some(push_removal(state, range, ChangeType::DeleteCharacter));
    }

    let (end, change_type) = match granularity {
        Granularity::Character => (offset + 1, ChangeType::DeleteCharacter),
        Granularity::Word => (
            find_word_boundary_forward(block, offset),
            ChangeType::RemoveRange,
        ),
        Granularity::Line => (block.len(), ChangeType::RemoveRange),
    };
    let range = SelectionState::within_block(caret.key.clone(), offset, end);
    Some(push_removal(state, range, change_type))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

fn move_caret(state: &EditorState, direction: Direction, extend: bool) -> Option<EditorState> {
    let content = state.content();
    let selection = state.selection();

    // Collapsing a range with Left/Right lands on its edge.
    if !extend && !selection.is_collapsed() {
        let edge = match direction {
            Direction::Left => Some(selection.start().clone()),
            Direction::Right => Some(selection.end().clone()),
            _ => None,
        };
        if let Some(edge) = edge {
            let mut next = state.clone();
            next.accept_selection(SelectionState::collapsed(edge.key, edge.offset).with_focus(true));
            return Some(next);
        }
    }

    let focus = step(content, &selection.focus, direction)?;
    let new_selection = if extend {
        let is_backward = point_before(content, &focus, &selection.anchor);
        SelectionState::between(selection.anchor.clone(), focus, is_backward)
    } else {
        SelectionState::collapsed(focus.key, focus.offset)
    }
    .with_focus(true);

    if new_selection == *selection {
        return None;
    }
    let mut next = state.clone();
    next.accept_selection(new_selection);
    Some(next)
}

/// The point one step from `from` in `direction`, or `None` at the document edge.
fn step(content: &ContentState, from: &BlockPoint, direction: Direction) -> Option<BlockPoint> {
    let index = content.block_index(&from.key)?;
    let blocks = content.blocks();
    let block = &blocks[index];
    let offset = from.offset.min(block.len());

    let point = match direction {
        Direction::Left if offset > 0 => BlockPoint::new(from.key.clone(), offset - 1),
        Direction::Left => {
            let previous = blocks.get(index.checked_sub(1)?)?;
            BlockPoint::new(previous.key().clone(), previous.len())
        }
        Direction::Right if offset < block.len() => BlockPoint::new(from.key.clone(), offset + 1),
        Direction::Right => {
            let next = blocks.get(index + 1)?;
            BlockPoint::new(next.key().clone(), 0)
        }
        Direction::Up => match index.checked_sub(1) {
            Some(i) => BlockPoint::new(blocks[i].key().clone(), offset.min(blocks[i].len())),
            None => BlockPoint::new(from.key.clone(), 0),
        },
        Direction::Down => match blocks.get(index + 1) {
            Some(next) => BlockPoint::new(next.key().clone(), offset.min(next.len())),
            None => BlockPoint::new(from.key.clone(), block.len()),
        },
        Direction::LineStart => BlockPoint::new(from.key.clone(), 0),
        Direction::LineEnd => BlockPoint::new(from.key.clone(), block.len()),
    };
    Some(point)
}

fn point_before(content: &ContentState, a: &BlockPoint, b: &BlockPoint) -> bool {
    match (content.block_index(&a.key), content.block_index(&b.key)) {
        (Some(ia), Some(ib)) => (ia, a.offset) < (ib, b.offset),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockType, ContentBlock};
    use crate::style::{InlineStyle, StyleSet};
    use crate::types::BlockKey;

    fn state_at(text: &str, key_index: usize, offset: usize) -> EditorState {
        let mut state = EditorState::create_with_content(ContentState::from_text(text));
        let key = state.content().blocks()[key_index].key().clone();
        state.accept_selection(SelectionState::collapsed(key, offset));
        state
    }

    fn apply(state: &EditorState, command: EditorCommand) -> EditorState {
        execute_command(state, command).expect("command applies")
    }

    #[test]
    fn test_backspace_character() {
        let state = state_at("hello", 0, 5);
        let next = apply(&state, EditorCommand::Backspace);
        assert_eq!(next.content().plain_text(), "hell");
        assert_eq!(next.last_change_type(), Some(ChangeType::BackspaceCharacter));
    }

    #[test]
    fn test_backspace_merges_blocks_and_keeps_styles() {
        let bold = StyleSet::new().with(InlineStyle::Bold);
        let blocks = vec![
            ContentBlock::from_parts(
                BlockKey::from("a"),
                BlockType::HeaderTwo,
                "ab".to_string(),
                vec![bold.clone(), bold.clone()],
                0,
            ),
            ContentBlock::new(BlockKey::from("b"), "cd"),
        ];
        let mut state = EditorState::create_with_content(ContentState::from_blocks(blocks));
        state.accept_selection(SelectionState::collapsed(BlockKey::from("b"), 0));

        let next = apply(&state, EditorCommand::Backspace);
        let merged = next.content().first_block();
        assert_eq!(next.content().blocks().len(), 1);
        assert_eq!(merged.text(), "abcd");
        assert_eq!(merged.block_type(), &BlockType::HeaderTwo);
        assert!(merged.style_at(1).contains(&InlineStyle::Bold));
        assert!(merged.style_at(2).is_empty());
        assert!(next.selection().is_collapsed());
        assert_eq!(next.selection().start_key(), &BlockKey::from("a"));
        assert_eq!(next.selection().start_offset(), 2);
        assert!(!next.selection().is_backward);
    }

    #[test]
    fn test_backspace_at_document_start() {
        let state = state_at("hello", 0, 0);
        assert!(execute_command(&state, EditorCommand::Backspace).is_none());
    }

    #[test]
    fn test_word_and_line_deletion() {
        let state = state_at("hello big world", 0, 15);
        let next = apply(&state, EditorCommand::BackspaceWord);
        assert_eq!(next.content().plain_text(), "hello big ");

        let next = apply(&state, EditorCommand::BackspaceToStartOfLine);
        assert_eq!(next.content().plain_text(), "");

        let state = state_at("hello big world", 0, 5);
        let next = apply(&state, EditorCommand::DeleteWord);
        assert_eq!(next.content().plain_text(), "hello world");

        let next = apply(&state, EditorCommand::DeleteToEndOfBlock);
        assert_eq!(next.content().plain_text(), "hello");
    }

    #[test]
    fn test_delete_joins_next_block() {
        let state = state_at("one\ntwo", 0, 3);
        let next = apply(&state, EditorCommand::Delete);
        assert_eq!(next.content().plain_text(), "onetwo");

        let state = state_at("one\ntwo", 1, 3);
        assert!(execute_command(&state, EditorCommand::Delete).is_none());
    }

    #[test]
    fn test_deleting_selection() {
        let mut state = state_at("one\ntwo", 0, 0);
        let (a, b) = {
            let blocks = state.content().blocks();
            (blocks[0].key().clone(), blocks[1].key().clone())
        };
        state.accept_selection(SelectionState::between(
            BlockPoint::new(a, 1),
            BlockPoint::new(b, 2),
            false,
        ));
        let next = apply(&state, EditorCommand::Delete);
        assert_eq!(next.content().plain_text(), "oo");
        assert_eq!(next.last_change_type(), Some(ChangeType::RemoveRange));
    }

    #[test]
    fn test_split_and_undo() {
        let state = state_at("hello", 0, 2);
        let split = apply(&state, EditorCommand::SplitBlock);
        assert_eq!(split.content().plain_text(), "he\nllo");

        let undone = apply(&split, EditorCommand::Undo);
        assert_eq!(undone.content().plain_text(), "hello");
        assert_eq!(undone.selection().start_offset(), 2);

        let redone = apply(&undone, EditorCommand::Redo);
        assert_eq!(redone.content().plain_text(), "he\nllo");
        assert!(execute_command(&redone, EditorCommand::Redo).is_none());
    }

    #[test]
    fn test_insert_characters_replaces_selection() {
        let mut state = state_at("hello", 0, 0);
        let key = state.content().first_block().key().clone();
        state.accept_selection(SelectionState::within_block(key, 1, 4));
        let next = insert_characters(&state, "ipp");
        assert_eq!(next.content().plain_text(), "hippo");
        assert_eq!(next.selection().start_offset(), 4);
    }

    #[test]
    fn test_select_all() {
        let state = state_at("one\ntwo", 0, 1);
        let next = apply(&state, EditorCommand::SelectAll);
        let selection = next.selection();
        assert_eq!(selection.start_offset(), 0);
        assert_eq!(selection.end_key(), next.content().last_block().key());
        assert_eq!(selection.end_offset(), 3);
    }

    #[test]
    fn test_caret_movement() {
        let state = state_at("ab\ncd", 0, 2);
        let right = apply(&state, EditorCommand::MoveRight { extend: false });
        assert_eq!(right.selection().start_key(), right.content().blocks()[1].key());
        assert_eq!(right.selection().start_offset(), 0);

        let left = apply(&right, EditorCommand::MoveLeft { extend: false });
        assert_eq!(left.selection().start_offset(), 2);

        let down = apply(&state, EditorCommand::MoveDown { extend: false });
        assert_eq!(down.selection().start_offset(), 2);
        assert!(execute_command(&down, EditorCommand::MoveDown { extend: false })
            .is_none_or(|s| s.selection().start_offset() == 2));
    }

    #[test]
    fn test_extend_selection_backward() {
        let state = state_at("abc", 0, 2);
        let next = apply(&state, EditorCommand::MoveLeft { extend: true });
        let selection = next.selection();
        assert!(selection.is_backward);
        assert_eq!(selection.start_offset(), 1);
        assert_eq!(selection.end_offset(), 2);

        let collapsed = apply(&next, EditorCommand::MoveRight { extend: false });
        assert!(collapsed.selection().is_collapsed());
        assert_eq!(collapsed.selection().start_offset(), 2);
    }

    #[test]
    fn test_formatting_has_no_default() {
        let state = state_at("abc", 0, 1);
        assert!(execute_command(&state, EditorCommand::Bold).is_none());
    }
}
