use std::sync::LazyLock;

use dioxus::prelude::*;
use draftpad_editor_browser::EditorConfig;

use components::editor::DraftEditor;

/// Define a components module that contains all shared components for our app.
mod components;
mod config;

const MAIN_CSS: Asset = asset!("/assets/main.css");

pub static CONFIG: LazyLock<EditorConfig> = LazyLock::new(config::from_env);

fn main() {
    // Set up better panic messages for wasm
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Must happen before dioxus::launch so dioxus skips its own init
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use tracing::Level;
        use tracing::subscriber::set_global_default;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        let _ = set_global_default(Registry::default().with(wasm_layer));
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "{CONFIG.title}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        DraftEditor {}
    }
}
