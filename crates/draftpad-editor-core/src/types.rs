//! Core editor types: block keys, block-relative positions, and selection.
//!
//! These types are framework-agnostic; positions are always character
//! offsets within one block, never byte offsets.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Stable identifier of a block within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(SmolStr);

impl BlockKey {
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for BlockKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for BlockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position inside the document: a block and a character offset within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockPoint {
    pub key: BlockKey,
    /// Character offset in the block text (NOT byte offset!)
    pub offset: usize,
}

impl BlockPoint {
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// Selection with anchor and focus positions.
///
/// The anchor is where the selection started, the focus is where the caret
/// is now. `is_backward` records whether the focus precedes the anchor in
/// document order; it cannot be derived without the block order, so whoever
/// builds a cross-block selection must supply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor: BlockPoint,
    pub focus: BlockPoint,
    pub is_backward: bool,
    pub has_focus: bool,
}

impl SelectionState {
    /// Create a collapsed selection (caret) in `key` at `offset`.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor: BlockPoint::new(key.clone(), offset),
            focus: BlockPoint::new(key, offset),
            is_backward: false,
            has_focus: false,
        }
    }

    /// Create a selection within one block. Offsets may be in any order.
    pub fn within_block(key: BlockKey, anchor: usize, focus: usize) -> Self {
        Self {
            anchor: BlockPoint::new(key.clone(), anchor),
            focus: BlockPoint::new(key, focus),
            is_backward: focus < anchor,
            has_focus: false,
        }
    }

    /// Create a selection between two points with a known direction.
    pub fn between(anchor: BlockPoint, focus: BlockPoint, is_backward: bool) -> Self {
        Self {
            anchor,
            focus,
            is_backward,
            has_focus: false,
        }
    }

    pub fn with_focus(mut self, has_focus: bool) -> Self {
        self.has_focus = has_focus;
        self
    }

    /// The earlier edge in document order.
    pub fn start(&self) -> &BlockPoint {
        if self.is_backward {
            &self.focus
        } else {
            &self.anchor
        }
    }

    /// The later edge in document order.
    pub fn end(&self) -> &BlockPoint {
        if self.is_backward {
            &self.anchor
        } else {
            &self.focus
        }
    }

    pub fn start_key(&self) -> &BlockKey {
        &self.start().key
    }

    pub fn start_offset(&self) -> usize {
        self.start().offset
    }

    pub fn end_key(&self) -> &BlockKey {
        &self.end().key
    }

    pub fn end_offset(&self) -> usize {
        self.end().offset
    }

    /// Check if the selection is collapsed (caret only).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Check whether both edges sit in the same block.
    pub fn is_single_block(&self) -> bool {
        self.anchor.key == self.focus.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> BlockKey {
        BlockKey::from(s)
    }

    #[test]
    fn test_selection_bounds() {
        // Forward selection
        let sel = SelectionState::within_block(key("a"), 5, 10);
        assert_eq!(sel.start_offset(), 5);
        assert_eq!(sel.end_offset(), 10);
        assert!(!sel.is_backward);

        // Backward selection
        let sel = SelectionState::within_block(key("a"), 10, 5);
        assert_eq!(sel.start_offset(), 5);
        assert_eq!(sel.end_offset(), 10);
        assert!(sel.is_backward);
    }

    #[test]
    fn test_selection_collapsed() {
        let sel = SelectionState::collapsed(key("a"), 7);
        assert!(sel.is_collapsed());
        assert!(sel.is_single_block());
        assert_eq!(sel.start(), sel.end());
    }

    #[test]
    fn test_cross_block_selection() {
        let sel = SelectionState::between(
            BlockPoint::new(key("b"), 2),
            BlockPoint::new(key("a"), 4),
            true,
        );
        assert_eq!(sel.start_key(), &key("a"));
        assert_eq!(sel.start_offset(), 4);
        assert_eq!(sel.end_key(), &key("b"));
        assert!(!sel.is_collapsed());
        assert!(!sel.is_single_block());
    }

    #[test]
    fn test_same_offset_different_blocks_is_not_collapsed() {
        let sel = SelectionState::between(
            BlockPoint::new(key("a"), 0),
            BlockPoint::new(key("b"), 0),
            false,
        );
        assert!(!sel.is_collapsed());
    }
}
