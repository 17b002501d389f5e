//! Browser DOM glue: reading the document selection back into block
//! coordinates and moving focus to the hidden input.

use draftpad_editor_browser::{BlockKey, BlockPoint, ContentState, SelectionState};
use wasm_bindgen::JsCast;

use super::INPUT_ID;
use super::view::char_offset_from_utf16;

/// Read `window.getSelection()` and map it onto the rendered blocks.
///
/// Returns `None` when the selection is outside the editor surface.
pub fn selection_from_dom(content: &ContentState) -> Option<SelectionState> {
    let selection = web_sys::window()?.get_selection().ok()??;
    let anchor = point_from_dom(
        content,
        &selection.anchor_node()?,
        selection.anchor_offset() as usize,
    )?;
    let focus = point_from_dom(
        content,
        &selection.focus_node()?,
        selection.focus_offset() as usize,
    )?;

    let is_backward = if anchor.key == focus.key {
        focus.offset < anchor.offset
    } else {
        content.is_before(&focus.key, &anchor.key)
    };
    Some(SelectionState::between(anchor, focus, is_backward).with_focus(true))
}

fn point_from_dom(
    content: &ContentState,
    node: &web_sys::Node,
    dom_offset: usize,
) -> Option<BlockPoint> {
    let is_text = node.node_type() == web_sys::Node::TEXT_NODE;
    let element = if is_text {
        node.parent_element()?
    } else {
        node.dyn_ref::<web_sys::Element>()?.clone()
    };

    let block_el = element.closest("[data-block]").ok()??;
    let key = BlockKey::new(block_el.get_attribute("data-block")?);
    let len = content.block_for_key(&key)?.len();

    let run_start = element
        .closest("[data-start]")
        .ok()
        .flatten()
        .and_then(|run| run.get_attribute("data-start"))
        .and_then(|start| start.parse::<usize>().ok());

    let offset = match (is_text, run_start) {
        (true, Some(start)) => {
            let text = node.text_content().unwrap_or_default();
            start + char_offset_from_utf16(&text, dom_offset)
        }
        (false, Some(start)) => start,
        // Landed on the block element itself (empty block, or past the caret marker).
        (_, None) if dom_offset == 0 => 0,
        (_, None) => len,
    };
    Some(BlockPoint::new(key, offset.min(len)))
}

/// Move keyboard focus to the hidden input that receives typing.
pub fn focus_input() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(input) = document
        .get_element_by_id(INPUT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        if let Err(e) = input.focus() {
            tracing::warn!(error = ?e, "could not focus editor input");
        }
    }
}

/// Drop whatever the browser left in the hidden input (composition text).
pub fn clear_input() {
    if let Some(input) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(INPUT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
    {
        input.set_value("");
    }
}
