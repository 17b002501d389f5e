//! Title bar with the Save button.

use dioxus::prelude::*;

/// Outcome of the last save, shown next to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed,
}

impl SaveStatus {
    fn label(self) -> &'static str {
        match self {
            Self::Saved => "Saved",
            Self::Failed => "Save failed",
        }
    }
}

#[component]
pub fn EditorToolbar(
    title: String,
    status: Option<SaveStatus>,
    on_save: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "editor-toolbar",
            h2 { class: "editor-title", "{title}" }
            div { class: "toolbar-actions",
                if let Some(status) = status {
                    span { class: "save-status", "{status.label()}" }
                }
                button {
                    class: "toolbar-button",
                    title: "Save to local storage",
                    // Keep focus on the editor input.
                    onmousedown: move |evt| evt.prevent_default(),
                    onclick: move |_| on_save.call(()),
                    "Save"
                }
            }
        }
    }
}
