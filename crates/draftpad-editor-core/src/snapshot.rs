//! Raw JSON snapshot of a document.
//!
//! The shape matches the editor-neutral raw format used by browser rich-text
//! editors: a list of blocks with text, type, depth and inline style ranges,
//! plus an entity map. Entities are accepted on import and dropped.
//! Offsets and lengths count characters, not bytes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::content::{BlockType, ContentBlock, ContentState, to_base36};
use crate::error::SnapshotError;
use crate::style::{InlineStyle, StyleSet};
use crate::types::BlockKey;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentState {
    #[serde(default)]
    pub blocks: Vec<RawDraftContentBlock>,
    #[serde(default)]
    pub entity_map: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentBlock {
    /// Generated on import when empty.
    #[serde(default)]
    pub key: SmolStr,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<serde_json::Value>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

/// Export `content` to its raw form.
pub fn convert_to_raw(content: &ContentState) -> RawDraftContentState {
    RawDraftContentState {
        blocks: content.blocks().iter().map(block_to_raw).collect(),
        entity_map: serde_json::Map::new(),
    }
}

fn block_to_raw(block: &ContentBlock) -> RawDraftContentBlock {
    RawDraftContentBlock {
        key: SmolStr::new(block.key().as_str()),
        text: block.text().to_string(),
        block_type: block.block_type().clone(),
        depth: block.depth(),
        inline_style_ranges: encode_style_ranges(block.styles()),
        entity_ranges: Vec::new(),
        data: serde_json::Map::new(),
    }
}

/// Maximal runs per style, styles in order of first appearance.
fn encode_style_ranges(styles: &[StyleSet]) -> Vec<RawInlineStyleRange> {
    let mut seen: Vec<&InlineStyle> = Vec::new();
    for set in styles {
        for style in set.iter() {
            if !seen.contains(&style) {
                seen.push(style);
            }
        }
    }

    let mut ranges = Vec::new();
    for style in seen {
        let mut run_start = None;
        for (offset, set) in styles.iter().enumerate() {
            match (set.contains(style), run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    ranges.push(RawInlineStyleRange {
                        offset: start,
                        length: offset - start,
                        style: style.clone(),
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(RawInlineStyleRange {
                offset: start,
                length: styles.len() - start,
                style: style.clone(),
            });
        }
    }
    ranges
}

/// Rebuild a document from its raw form.
///
/// Style ranges are clamped to the block text. Blocks without a key get a
/// fresh one; two blocks sharing a key are rejected.
pub fn convert_from_raw(raw: RawDraftContentState) -> Result<ContentState, SnapshotError> {
    let mut used: HashSet<SmolStr> = HashSet::new();
    for block in &raw.blocks {
        if !block.key.is_empty() && !used.insert(block.key.clone()) {
            return Err(SnapshotError::DuplicateKey(block.key.to_string()));
        }
    }

    let mut counter = 0u64;
    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for block in raw.blocks {
        let key = if block.key.is_empty() {
            loop {
                let candidate = SmolStr::new(to_base36(counter));
                counter += 1;
                if used.insert(candidate.clone()) {
                    break candidate;
                }
            }
        } else {
            block.key
        };

        let len = block.text.chars().count();
        let mut styles = vec![StyleSet::new(); len];
        for range in &block.inline_style_ranges {
            let start = range.offset.min(len);
            let end = range.offset.saturating_add(range.length).min(len);
            for set in &mut styles[start..end] {
                set.insert(range.style.clone());
            }
        }

        blocks.push(ContentBlock::from_parts(
            BlockKey::new(key),
            block.block_type,
            block.text,
            styles,
            block.depth,
        ));
    }

    Ok(ContentState::from_blocks(blocks))
}

/// Serialize `content` to a compact JSON string.
pub fn to_json(content: &ContentState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&convert_to_raw(content))?)
}

/// Parse a JSON snapshot into a document.
pub fn from_json(json: &str) -> Result<ContentState, SnapshotError> {
    let raw: RawDraftContentState = serde_json::from_str(json)?;
    convert_from_raw(raw)
}
