//! Content transformations.
//!
//! Every function takes the current `ContentState` and a selection and
//! returns a new `ContentState`, leaving the input untouched so the caller
//! can keep it for undo. Each result records the selection it was applied
//! to (`selection_before`) and where the caret should land (`selection_after`).
//!
//! Selections naming blocks that do not exist leave the content unchanged.

use crate::content::{BlockType, ContentBlock, ContentState};
use crate::style::{InlineStyle, StyleSet};
use crate::types::SelectionState;

/// A selection resolved against a document: block indices plus clamped offsets,
/// ordered start-to-end regardless of `is_backward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start_block: usize,
    start_offset: usize,
    end_block: usize,
    end_offset: usize,
}

impl Span {
    fn resolve(content: &ContentState, selection: &SelectionState) -> Option<Self> {
        let anchor_block = content.block_index(&selection.anchor.key)?;
        let focus_block = content.block_index(&selection.focus.key)?;
        let anchor_offset = selection.anchor.offset.min(content.blocks()[anchor_block].len());
        let focus_offset = selection.focus.offset.min(content.blocks()[focus_block].len());

        let anchor = (anchor_block, anchor_offset);
        let focus = (focus_block, focus_offset);
        let (start, end) = if focus < anchor {
            (focus, anchor)
        } else {
            (anchor, focus)
        };
        Some(Self {
            start_block: start.0,
            start_offset: start.1,
            end_block: end.0,
            end_offset: end.1,
        })
    }

    fn is_collapsed(&self) -> bool {
        self.start_block == self.end_block && self.start_offset == self.end_offset
    }

    /// Character range covered within block `index`.
    fn chars_in_block(&self, index: usize, block_len: usize) -> std::ops::Range<usize> {
        let start = if index == self.start_block {
            self.start_offset
        } else {
            0
        };
        let end = if index == self.end_block {
            self.end_offset
        } else {
            block_len
        };
        start..end.max(start)
    }
}

fn caret_at(content: &ContentState, block: usize, offset: usize) -> SelectionState {
    SelectionState::collapsed(content.blocks()[block].key().clone(), offset).with_focus(true)
}

/// Remove the selected range, merging the edge blocks when it spans several.
///
/// The merged block keeps the key and type of the block where the range starts.
pub fn remove_range(content: &ContentState, selection: &SelectionState) -> ContentState {
    let mut next = content.clone();
    let Some(span) = Span::resolve(content, selection) else {
        return next;
    };

    if !span.is_collapsed() {
        if span.start_block == span.end_block {
            next.block_mut(span.start_block).splice(
                span.start_offset,
                span.end_offset,
                "",
                &StyleSet::new(),
            );
        } else {
            let (tail_text, tail_styles) = next.block_mut(span.end_block).split_off(span.end_offset);
            let start = next.block_mut(span.start_block);
            start.split_off(span.start_offset);
            start.append(&tail_text, &tail_styles);
            next.blocks_mut().drain(span.start_block + 1..=span.end_block);
        }
    }

    let after = caret_at(&next, span.start_block, span.start_offset);
    next.set_selections(selection.clone(), after);
    next
}

/// Insert `text` at the selection, replacing any selected range.
///
/// Inserted characters carry `style`. Newlines split the block, so pasted
/// multi-line text lands in separate blocks.
pub fn insert_text(
    content: &ContentState,
    selection: &SelectionState,
    text: &str,
    style: &StyleSet,
) -> ContentState {
    let mut next = remove_range(content, selection);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            let caret = next.selection_after().clone();
            next = split_block(&next, &caret);
        }
        let caret = next.selection_after().clone();
        let Some(span) = Span::resolve(&next, &caret) else {
            return next;
        };
        next.block_mut(span.start_block)
            .splice(span.start_offset, span.start_offset, line, style);
        let after = caret_at(&next, span.start_block, span.start_offset + line.chars().count());
        next.set_selections(caret, after);
    }

    let after = next.selection_after().clone();
    next.set_selections(selection.clone(), after);
    next
}

/// Split the block at the selection start (removing any selected range first).
///
/// The new block takes the text after the caret and keeps the original type.
pub fn split_block(content: &ContentState, selection: &SelectionState) -> ContentState {
    let mut next = remove_range(content, selection);
    let caret = next.selection_after().clone();
    let Some(span) = Span::resolve(&next, &caret) else {
        return next;
    };

    let key = next.generate_key();
    let original = next.block_mut(span.start_block);
    let (tail_text, tail_styles) = original.split_off(span.start_offset);
    let block = ContentBlock::from_parts(
        key,
        original.block_type().clone(),
        tail_text,
        tail_styles,
        original.depth(),
    );
    next.blocks_mut().insert(span.start_block + 1, block);

    let after = caret_at(&next, span.start_block + 1, 0);
    next.set_selections(selection.clone(), after);
    next
}

/// Set the type of every block the selection touches.
pub fn set_block_type(
    content: &ContentState,
    selection: &SelectionState,
    block_type: BlockType,
) -> ContentState {
    let mut next = content.clone();
    if let Some(span) = Span::resolve(content, selection) {
        for index in span.start_block..=span.end_block {
            next.block_mut(index).set_type(block_type.clone());
        }
    }
    next.set_selections(selection.clone(), selection.clone());
    next
}

/// Add `style` to every selected character.
pub fn apply_inline_style(
    content: &ContentState,
    selection: &SelectionState,
    style: &InlineStyle,
) -> ContentState {
    modify_inline_style(content, selection, |set| set.insert(style.clone()))
}

/// Remove `style` from every selected character.
pub fn remove_inline_style(
    content: &ContentState,
    selection: &SelectionState,
    style: &InlineStyle,
) -> ContentState {
    modify_inline_style(content, selection, |set| {
        set.remove(style);
    })
}

fn modify_inline_style(
    content: &ContentState,
    selection: &SelectionState,
    mut f: impl FnMut(&mut StyleSet),
) -> ContentState {
    let mut next = content.clone();
    if let Some(span) = Span::resolve(content, selection) {
        for index in span.start_block..=span.end_block {
            let block = next.block_mut(index);
            let range = span.chars_in_block(index, block.len());
            for set in &mut block.styles_mut()[range] {
                f(set);
            }
        }
    }
    next.set_selections(selection.clone(), selection.clone());
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockKey, BlockPoint};

    fn key_of(content: &ContentState, index: usize) -> BlockKey {
        content.blocks()[index].key().clone()
    }

    fn texts(content: &ContentState) -> Vec<&str> {
        content.blocks().iter().map(|b| b.text()).collect()
    }

    #[test]
    fn test_remove_range_within_block() {
        let content = ContentState::from_text("hello world");
        let sel = SelectionState::within_block(key_of(&content, 0), 5, 11);
        let next = remove_range(&content, &sel);
        assert_eq!(texts(&next), vec!["hello"]);
        assert_eq!(next.selection_after().start_offset(), 5);
        // Input untouched
        assert_eq!(texts(&content), vec!["hello world"]);
    }

    #[test]
    fn test_remove_whole_block_text() {
        let content = ContentState::from_text("***");
        let sel = SelectionState::within_block(key_of(&content, 0), 0, 3);
        let next = remove_range(&content, &sel);
        assert_eq!(texts(&next), vec![""]);
        assert!(next.selection_after().is_collapsed());
        assert_eq!(next.selection_after().start_offset(), 0);
    }

    #[test]
    fn test_remove_range_across_blocks() {
        let content = ContentState::from_text("abc\nmiddle\nxyz");
        let sel = SelectionState::between(
            BlockPoint::new(key_of(&content, 0), 1),
            BlockPoint::new(key_of(&content, 2), 2),
            false,
        );
        let next = remove_range(&content, &sel);
        assert_eq!(texts(&next), vec!["az"]);
        assert_eq!(next.first_block().key(), content.first_block().key());
    }

    #[test]
    fn test_remove_range_ignores_wrong_direction_flag() {
        let content = ContentState::from_text("abc\nxyz");
        // Claims forward but focus is before anchor.
        let sel = SelectionState::between(
            BlockPoint::new(key_of(&content, 1), 1),
            BlockPoint::new(key_of(&content, 0), 2),
            false,
        );
        let next = remove_range(&content, &sel);
        assert_eq!(texts(&next), vec!["abyz"]);
    }

    #[test]
    fn test_insert_text_with_style() {
        let content = ContentState::from_text("ab");
        let sel = SelectionState::collapsed(key_of(&content, 0), 1);
        let bold = StyleSet::new().with(InlineStyle::Bold);
        let next = insert_text(&content, &sel, "XY", &bold);
        assert_eq!(texts(&next), vec!["aXYb"]);
        let block = next.first_block();
        assert!(block.style_at(0).is_empty());
        assert!(block.style_at(1).contains(&InlineStyle::Bold));
        assert!(block.style_at(2).contains(&InlineStyle::Bold));
        assert!(block.style_at(3).is_empty());
        assert_eq!(next.selection_after().start_offset(), 3);
        assert_eq!(next.selection_before(), &sel);
    }

    #[test]
    fn test_insert_text_replaces_selection() {
        let content = ContentState::from_text("hello world");
        let sel = SelectionState::within_block(key_of(&content, 0), 6, 11);
        let next = insert_text(&content, &sel, "there", &StyleSet::new());
        assert_eq!(texts(&next), vec!["hello there"]);
    }

    #[test]
    fn test_insert_multiline_text_splits_blocks() {
        let content = ContentState::from_text("ab");
        let sel = SelectionState::collapsed(key_of(&content, 0), 1);
        let next = insert_text(&content, &sel, "1\r\n2\n3", &StyleSet::new());
        assert_eq!(texts(&next), vec!["a1", "2", "3b"]);
        let caret = next.selection_after();
        assert_eq!(caret.start_key(), &key_of(&next, 2));
        assert_eq!(caret.start_offset(), 1);
    }

    #[test]
    fn test_split_block_keeps_styles_and_type() {
        let content = ContentState::from_text("hello");
        let all = SelectionState::within_block(key_of(&content, 0), 0, 5);
        let content = apply_inline_style(&content, &all, &InlineStyle::Italic);
        let content = set_block_type(&content, &all, BlockType::Blockquote);

        let sel = SelectionState::collapsed(key_of(&content, 0), 2);
        let next = split_block(&content, &sel);
        assert_eq!(texts(&next), vec!["he", "llo"]);
        let second = &next.blocks()[1];
        assert_eq!(second.block_type(), &BlockType::Blockquote);
        assert!(second.style_at(0).contains(&InlineStyle::Italic));
        assert_ne!(second.key(), next.first_block().key());
        assert_eq!(next.selection_after().start_key(), second.key());
        assert_eq!(next.selection_after().start_offset(), 0);
    }

    #[test]
    fn test_split_at_end_makes_empty_block() {
        let content = ContentState::from_text("line");
        let sel = SelectionState::collapsed(key_of(&content, 0), 4);
        let next = split_block(&content, &sel);
        assert_eq!(texts(&next), vec!["line", ""]);
    }

    #[test]
    fn test_set_block_type_covers_selection() {
        let content = ContentState::from_text("a\nb\nc");
        let sel = SelectionState::between(
            BlockPoint::new(key_of(&content, 0), 0),
            BlockPoint::new(key_of(&content, 1), 1),
            false,
        );
        let next = set_block_type(&content, &sel, BlockType::HeaderOne);
        let types: Vec<_> = next.blocks().iter().map(|b| b.block_type().clone()).collect();
        assert_eq!(
            types,
            vec![BlockType::HeaderOne, BlockType::HeaderOne, BlockType::Unstyled]
        );
    }

    #[test]
    fn test_apply_and_remove_inline_style_across_blocks() {
        let content = ContentState::from_text("abc\ndef");
        let sel = SelectionState::between(
            BlockPoint::new(key_of(&content, 0), 1),
            BlockPoint::new(key_of(&content, 1), 2),
            false,
        );
        let styled = apply_inline_style(&content, &sel, &InlineStyle::Underline);
        let flags = |c: &ContentState, i: usize| -> Vec<bool> {
            c.blocks()[i]
                .styles()
                .iter()
                .map(|s| s.contains(&InlineStyle::Underline))
                .collect()
        };
        assert_eq!(flags(&styled, 0), vec![false, true, true]);
        assert_eq!(flags(&styled, 1), vec![true, true, false]);

        let cleared = remove_inline_style(&styled, &sel, &InlineStyle::Underline);
        assert_eq!(flags(&cleared, 0), vec![false, false, false]);
        assert_eq!(flags(&cleared, 1), vec![false, false, false]);
    }

    #[test]
    fn test_unknown_block_is_noop() {
        let content = ContentState::from_text("abc");
        let sel = SelectionState::within_block(BlockKey::from("missing"), 0, 2);
        let next = remove_range(&content, &sel);
        assert_eq!(texts(&next), vec!["abc"]);
    }
}
