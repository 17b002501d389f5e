//! What the editor surface draws for each block: styled segments, the
//! selection highlight and the caret position.

use std::sync::LazyLock;

use draftpad_editor_browser::{BlockKey, EditorState, SmolStr, StyleMap, render_content};

static STYLE_MAP: LazyLock<StyleMap> = LazyLock::new(StyleMap::default);

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub css: String,
    /// Character offset of the segment in its block.
    pub start: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub id: SmolStr,
    pub key: BlockKey,
    pub block_type: SmolStr,
    pub tag: &'static str,
    pub depth: u32,
    pub len: usize,
    pub segments: Vec<Segment>,
    /// Caret offset when the selection is collapsed inside this block.
    pub caret: Option<usize>,
}

impl BlockView {
    /// Whether the caret sits right before the segment starting at `start`.
    pub fn caret_before(&self, start: usize) -> bool {
        self.caret == Some(start) && start < self.len
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret == Some(self.len)
    }
}

pub fn block_views(state: &EditorState) -> Vec<BlockView> {
    let content = state.content();
    let selection = state.selection();
    let collapsed = selection.is_collapsed();
    let start_index = content.block_index(&selection.start().key);
    let end_index = content.block_index(&selection.end().key);

    render_content(content, &STYLE_MAP)
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let len = block.char_len();
            let selected = match (start_index, end_index) {
                (Some(first), Some(last)) if !collapsed && first <= index && index <= last => {
                    let from = if index == first { selection.start().offset } else { 0 };
                    let to = if index == last { selection.end().offset } else { len };
                    Some((from, to))
                }
                _ => None,
            };
            let caret = (collapsed && selection.start().key == block.key)
                .then(|| selection.start().offset.min(len));

            let mut marks = Vec::with_capacity(2);
            marks.extend(selected.map(|(from, _)| from));
            marks.extend(selected.map(|(_, to)| to));
            marks.extend(caret);

            let segments = block
                .segments(&marks)
                .into_iter()
                .map(|run| Segment {
                    selected: selected.is_some_and(|(from, to)| {
                        run.char_range.start >= from && run.char_range.end <= to
                    }),
                    start: run.char_range.start,
                    text: run.text,
                    css: run.css,
                })
                .collect();

            BlockView {
                id: block.id(),
                block_type: SmolStr::new(block.block_type.as_str()),
                key: block.key,
                tag: block.tag,
                depth: block.depth,
                len,
                segments,
                caret,
            }
        })
        .collect()
}

/// Convert a UTF-16 offset inside `text` (as DOM selections report them)
/// into a character offset.
pub fn char_offset_from_utf16(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, c) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += c.len_utf16();
    }
    text.chars().count()
}
