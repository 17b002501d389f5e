//! The editor component.
//!
//! The surface is plain markup rebuilt from the editor state on every
//! change; keyboard input goes to a hidden textarea so the browser never
//! edits the rendered blocks itself.

use std::rc::Rc;

use dioxus::prelude::*;
use draftpad_editor_browser::{
    EditorEvent, EditorHost, EditorState, Key, LocalStorageStore, PersistenceBridge, platform,
};

use super::INPUT_ID;
use super::actions::keycombo_from_dioxus_event;
use super::toolbar::{EditorToolbar, SaveStatus};
use super::view::{BlockView, block_views};
use crate::CONFIG;

type Bridge = PersistenceBridge<LocalStorageStore>;

fn open_bridge() -> Option<Bridge> {
    match LocalStorageStore::new() {
        Ok(store) => Some(PersistenceBridge::new(store, &CONFIG)),
        Err(e) => {
            tracing::error!(error = %e, "local storage unavailable, saving is disabled");
            None
        }
    }
}

/// Rich-text editor with markdown-style autoformatting and a Save button.
///
/// The saved document is loaded once when the component mounts.
#[component]
pub fn DraftEditor() -> Element {
    let bridge: Rc<Option<Bridge>> = use_hook(|| Rc::new(open_bridge()));

    let mut host = use_signal({
        let bridge = bridge.clone();
        move || {
            let state = match bridge.as_ref() {
                Some(bridge) => bridge.load(),
                None => EditorState::create_empty().with_max_undo_steps(CONFIG.max_undo_steps),
            };
            EditorHost::new(state, platform().uses_command_key())
        }
    });
    let mut status = use_signal(|| None::<SaveStatus>);

    let mut dispatch = move |event: EditorEvent| -> bool {
        let changed = host.with_mut(|host| host.dispatch(event));
        if changed && status.peek().is_some() {
            status.set(None);
        }
        changed
    };

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use_effect(move || {
        use draftpad_editor_browser::editor_event_from_input_event;
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(INPUT_ID))
        else {
            tracing::warn!("editor input element not found");
            return;
        };

        let closure = Closure::wrap(Box::new(move |evt: web_sys::InputEvent| {
            if let Some(event) = editor_event_from_input_event(&evt) {
                evt.prevent_default();
                dispatch(event);
            }
        }) as Box<dyn FnMut(web_sys::InputEvent)>);

        let _ = input
            .add_event_listener_with_callback("beforeinput", closure.as_ref().unchecked_ref());
        closure.forget();
    });

    let save = {
        let bridge = bridge.clone();
        move |_: ()| {
            let Some(bridge) = bridge.as_ref() else {
                status.set(Some(SaveStatus::Failed));
                return;
            };
            match bridge.save(host.read().state()) {
                Ok(()) => status.set(Some(SaveStatus::Saved)),
                Err(e) => {
                    tracing::error!(error = %e, "failed to save document");
                    status.set(Some(SaveStatus::Failed));
                }
            }
        }
    };

    let blocks = block_views(host.read().state());

    rsx! {
        div { class: "draftpad-editor",
            EditorToolbar {
                title: CONFIG.title.to_string(),
                status: status(),
                on_save: save,
            }

            div {
                class: "editor-surface",
                onmouseup: move |_| {
                    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
                    {
                        let selection = super::dom::selection_from_dom(host.read().state().content());
                        if let Some(selection) = selection {
                            dispatch(EditorEvent::Select(selection));
                        }
                        super::dom::focus_input();
                    }
                },
                for block in blocks {
                    BlockElement { key: "{block.id}", block }
                }
            }

            textarea {
                id: INPUT_ID,
                class: "editor-input",
                autofocus: true,
                spellcheck: "false",
                "aria-label": "Editor input",
                onkeydown: move |evt| {
                    if evt.is_composing() {
                        return;
                    }
                    let combo = keycombo_from_dioxus_event(&evt.data());
                    if combo.key == Key::Unidentified || combo.key.is_modifier() {
                        return;
                    }
                    if dispatch(EditorEvent::KeyDown(combo)) {
                        evt.prevent_default();
                    }
                },
                oncompositionend: move |evt| {
                    let text = evt.data().data();
                    if !text.is_empty() {
                        dispatch(EditorEvent::BeforeInput(text));
                    }
                    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
                    super::dom::clear_input();
                },
            }
        }
    }
}

#[component]
fn BlockElement(block: BlockView) -> Element {
    let class = if block.caret_at_end() {
        format!("block block-{} caret-end", block.block_type)
    } else {
        format!("block block-{}", block.block_type)
    };
    let id = block.id.to_string();
    let key = block.key.to_string();
    let style = format!("--depth: {}", block.depth);

    let runs = rsx! {
        for segment in block.segments.iter() {
            span {
                class: run_class(&block, segment.start, segment.selected),
                style: "{segment.css}",
                "data-start": "{segment.start}",
                "{segment.text}"
            }
        }
    };

    match block.tag {
        "h1" => rsx! {
            h1 { id, class, "data-block": key, style, {runs} }
        },
        "h2" => rsx! {
            h2 { id, class, "data-block": key, style, {runs} }
        },
        "h3" => rsx! {
            h3 { id, class, "data-block": key, style, {runs} }
        },
        "h4" => rsx! {
            h4 { id, class, "data-block": key, style, {runs} }
        },
        "h5" => rsx! {
            h5 { id, class, "data-block": key, style, {runs} }
        },
        "h6" => rsx! {
            h6 { id, class, "data-block": key, style, {runs} }
        },
        "li" => rsx! {
            li { id, class, "data-block": key, style, {runs} }
        },
        "blockquote" => rsx! {
            blockquote { id, class, "data-block": key, style, {runs} }
        },
        "pre" => rsx! {
            pre { id, class, "data-block": key, style, {runs} }
        },
        "figure" => rsx! {
            figure { id, class, "data-block": key, style, {runs} }
        },
        _ => rsx! {
            div { id, class, "data-block": key, style, {runs} }
        },
    }
}

fn run_class(block: &BlockView, start: usize, selected: bool) -> &'static str {
    match (block.caret_before(start), selected) {
        (true, _) => "run caret-before",
        (false, true) => "run selected",
        (false, false) => "run",
    }
}
