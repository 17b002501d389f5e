//! Block-structured document content.
//!
//! A `ContentState` is an ordered, never-empty list of `ContentBlock`s.
//! Each block carries its text and one `StyleSet` per character, so inline
//! styles survive splits, merges and deletions without range bookkeeping.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::style::StyleSet;
use crate::types::{BlockKey, SelectionState};

/// The block-level type of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "SmolStr", into = "SmolStr")]
pub enum BlockType {
    #[default]
    Unstyled,
    Paragraph,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    Atomic,
    Custom(SmolStr),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unstyled => "unstyled",
            Self::Paragraph => "paragraph",
            Self::HeaderOne => "header-one",
            Self::HeaderTwo => "header-two",
            Self::HeaderThree => "header-three",
            Self::HeaderFour => "header-four",
            Self::HeaderFive => "header-five",
            Self::HeaderSix => "header-six",
            Self::UnorderedListItem => "unordered-list-item",
            Self::OrderedListItem => "ordered-list-item",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "code-block",
            Self::Atomic => "atomic",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// HTML element used to render blocks of this type.
    pub fn html_tag(&self) -> &'static str {
        match self {
            Self::HeaderOne => "h1",
            Self::HeaderTwo => "h2",
            Self::HeaderThree => "h3",
            Self::HeaderFour => "h4",
            Self::HeaderFive => "h5",
            Self::HeaderSix => "h6",
            Self::UnorderedListItem | Self::OrderedListItem => "li",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "pre",
            Self::Atomic => "figure",
            Self::Unstyled | Self::Paragraph | Self::Custom(_) => "div",
        }
    }

    pub fn is_unstyled(&self) -> bool {
        matches!(self, Self::Unstyled)
    }
}

impl From<&str> for BlockType {
    fn from(s: &str) -> Self {
        match s {
            "unstyled" => Self::Unstyled,
            "paragraph" => Self::Paragraph,
            "header-one" => Self::HeaderOne,
            "header-two" => Self::HeaderTwo,
            "header-three" => Self::HeaderThree,
            "header-four" => Self::HeaderFour,
            "header-five" => Self::HeaderFive,
            "header-six" => Self::HeaderSix,
            "unordered-list-item" => Self::UnorderedListItem,
            "ordered-list-item" => Self::OrderedListItem,
            "blockquote" => Self::Blockquote,
            "code-block" => Self::CodeBlock,
            "atomic" => Self::Atomic,
            other => Self::Custom(SmolStr::new(other)),
        }
    }
}

impl From<SmolStr> for BlockType {
    fn from(s: SmolStr) -> Self {
        Self::from(s.as_str())
    }
}

impl From<BlockType> for SmolStr {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Custom(name) => name,
            other => SmolStr::new(other.as_str()),
        }
    }
}

/// One paragraph-like unit of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    /// One entry per character of `text`.
    styles: Vec<StyleSet>,
    depth: u32,
}

impl ContentBlock {
    /// Create an unstyled block with plain text.
    pub fn new(key: BlockKey, text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![StyleSet::new(); text.chars().count()];
        Self {
            key,
            block_type: BlockType::Unstyled,
            text,
            styles,
            depth: 0,
        }
    }

    /// Create a block from parts. `styles` is padded or truncated to the
    /// character count of `text`.
    pub fn from_parts(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        mut styles: Vec<StyleSet>,
        depth: u32,
    ) -> Self {
        styles.resize(text.chars().count(), StyleSet::new());
        Self {
            key,
            block_type,
            text,
            styles,
            depth,
        }
    }

    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Per-character styles, parallel to the characters of `text()`.
    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style of the character at `offset`, empty if out of range.
    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.styles.get(offset).cloned().unwrap_or_default()
    }

    /// Character at `offset`.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Text of the character range `start..end`, clamped to the block.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let start = self.byte_offset(start);
        let end = self.byte_offset(end).max(start);
        &self.text[start..end]
    }

    /// Convert a character offset to a byte offset, clamped to the text length.
    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub(crate) fn set_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    pub(crate) fn styles_mut(&mut self) -> &mut [StyleSet] {
        &mut self.styles
    }

    /// Replace the characters in `start..end` with `text`, each styled `style`.
    pub(crate) fn splice(&mut self, start: usize, end: usize, text: &str, style: &StyleSet) {
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        self.text.replace_range(byte_start..byte_end, text);
        let inserted = std::iter::repeat_n(style.clone(), text.chars().count());
        self.styles.splice(start..end, inserted);
    }

    /// Remove everything from `offset` on, returning the removed text and styles.
    pub(crate) fn split_off(&mut self, offset: usize) -> (String, Vec<StyleSet>) {
        let offset = offset.min(self.len());
        let byte = self.byte_offset(offset);
        let text = self.text.split_off(byte);
        let styles = self.styles.split_off(offset);
        (text, styles)
    }

    /// Append text with per-character styles.
    pub(crate) fn append(&mut self, text: &str, styles: &[StyleSet]) {
        self.text.push_str(text);
        self.styles.extend_from_slice(styles);
    }
}

/// The full document: ordered blocks plus the selections around the last edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    selection_before: SelectionState,
    selection_after: SelectionState,
    next_key: u64,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::empty()
    }
}

impl ContentState {
    /// A document with one empty unstyled block.
    pub fn empty() -> Self {
        let mut content = Self {
            blocks: Vec::new(),
            selection_before: SelectionState::collapsed(BlockKey::from(""), 0),
            selection_after: SelectionState::collapsed(BlockKey::from(""), 0),
            next_key: 0,
        };
        let key = content.generate_key();
        content.blocks.push(ContentBlock::new(key.clone(), ""));
        content.selection_before = SelectionState::collapsed(key.clone(), 0);
        content.selection_after = SelectionState::collapsed(key, 0);
        content
    }

    /// Build a document from blocks. An empty list yields `ContentState::empty()`.
    ///
    /// Keys are assumed unique; snapshot import checks this before calling.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        let Some(first) = blocks.first() else {
            return Self::empty();
        };
        let caret = SelectionState::collapsed(first.key().clone(), 0);
        Self {
            blocks,
            selection_before: caret.clone(),
            selection_after: caret,
            next_key: 0,
        }
    }

    /// Convenience: one unstyled block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut content = Self::empty();
        content.blocks.clear();
        for line in text.split('\n') {
            let key = content.generate_key();
            content.blocks.push(ContentBlock::new(key, line));
        }
        let caret = SelectionState::collapsed(content.blocks[0].key().clone(), 0);
        content.selection_before = caret.clone();
        content.selection_after = caret;
        content
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn first_block(&self) -> &ContentBlock {
        // Never empty: every constructor and modifier keeps at least one block.
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        index.checked_sub(1).map(|i| &self.blocks[i])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        self.blocks.get(index + 1)
    }

    pub fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    /// Whether any block has text.
    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.first_block().is_empty()
    }

    /// All block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether `a` comes strictly before `b` in document order.
    pub fn is_before(&self, a: &BlockKey, b: &BlockKey) -> bool {
        match (self.block_index(a), self.block_index(b)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    /// A fresh block key not used by any block in this document.
    pub fn generate_key(&mut self) -> BlockKey {
        loop {
            let key = BlockKey::new(to_base36(self.next_key));
            self.next_key += 1;
            if self.block_for_key(&key).is_none() {
                return key;
            }
        }
    }

    pub(crate) fn block_mut(&mut self, index: usize) -> &mut ContentBlock {
        &mut self.blocks[index]
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<ContentBlock> {
        &mut self.blocks
    }

    pub(crate) fn set_selections(&mut self, before: SelectionState, after: SelectionState) {
        self.selection_before = before;
        self.selection_after = after;
    }
}

pub(crate) fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
