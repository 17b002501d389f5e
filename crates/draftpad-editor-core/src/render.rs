//! Block-level render model.
//!
//! Presentation layers walk `render_content` output instead of the raw
//! document: each block becomes a tag plus a list of runs of identically
//! styled text with their resolved CSS.

use std::ops::Range;

use smol_str::SmolStr;

use crate::content::{BlockType, ContentState};
use crate::style::{StyleMap, StyleSet};
use crate::types::BlockKey;

/// A contiguous run of characters sharing one style set.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub styles: StyleSet,
    /// Inline CSS for `styles`; empty when unstyled.
    pub css: String,
    /// Char range within the block.
    pub char_range: Range<usize>,
}

impl StyledRun {
    /// Split the run at a block-relative char offset. Offsets outside the
    /// run yield the whole run on one side.
    pub fn split_at(&self, offset: usize) -> (StyledRun, StyledRun) {
        let at = offset.clamp(self.char_range.start, self.char_range.end);
        let local = at - self.char_range.start;
        let byte = self
            .text
            .char_indices()
            .nth(local)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        let left = StyledRun {
            text: self.text[..byte].to_string(),
            char_range: self.char_range.start..at,
            ..self.clone()
        };
        let right = StyledRun {
            text: self.text[byte..].to_string(),
            char_range: at..self.char_range.end,
            ..self.clone()
        };
        (left, right)
    }
}

/// A rendered block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRender {
    pub key: BlockKey,
    pub block_type: BlockType,
    /// HTML element for the block (`h1`, `li`, `div`, ...).
    pub tag: &'static str,
    pub depth: u32,
    pub runs: Vec<StyledRun>,
}

impl BlockRender {
    /// Stable DOM id for the block.
    pub fn id(&self) -> SmolStr {
        smol_str::format_smolstr!("block-{}", self.key)
    }

    pub fn char_len(&self) -> usize {
        self.runs.last().map(|run| run.char_range.end).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Runs further split at each offset in `marks` (caret, selection edges).
    /// Marks on run boundaries or outside the block are ignored.
    pub fn segments(&self, marks: &[usize]) -> Vec<StyledRun> {
        let mut out = Vec::with_capacity(self.runs.len() + marks.len());
        for run in &self.runs {
            let mut rest = run.clone();
            let mut cuts: Vec<usize> = marks
                .iter()
                .copied()
                .filter(|m| *m > run.char_range.start && *m < run.char_range.end)
                .collect();
            cuts.sort_unstable();
            cuts.dedup();
            for cut in cuts {
                let (left, right) = rest.split_at(cut);
                out.push(left);
                rest = right;
            }
            out.push(rest);
        }
        out
    }
}

/// Render every block of `content` into styled runs.
pub fn render_content(content: &ContentState, style_map: &StyleMap) -> Vec<BlockRender> {
    content
        .blocks()
        .iter()
        .map(|block| {
            let mut runs: Vec<StyledRun> = Vec::new();
            for (offset, (ch, styles)) in block.text().chars().zip(block.styles()).enumerate() {
                match runs.last_mut() {
                    Some(run) if run.styles == *styles => {
                        run.text.push(ch);
                        run.char_range.end = offset + 1;
                    }
                    _ => runs.push(StyledRun {
                        text: ch.to_string(),
                        styles: styles.clone(),
                        css: style_map.css_for(styles),
                        char_range: offset..offset + 1,
                    }),
                }
            }

            BlockRender {
                key: block.key().clone(),
                block_type: block.block_type().clone(),
                tag: block.block_type().html_tag(),
                depth: block.depth(),
                runs,
            }
        })
        .collect()
}
