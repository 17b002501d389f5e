//! WASM browser tests for draftpad-editor-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use draftpad_editor_browser::{
    EditorCommand, EditorConfig, EditorEvent, EditorHost, InlineStyle, InputType, Key,
    KeyValueStore, LocalStorageStore, PersistenceBridge, editor_event_from_input,
    editor_event_from_input_event, key_from_browser, parse_browser_input_type, platform,
};

fn input_event(input_type: &str, data: Option<&str>) -> web_sys::InputEvent {
    let init = web_sys::InputEventInit::new();
    init.set_input_type(input_type);
    init.set_data(data);
    web_sys::InputEvent::new_with_event_init_dict("beforeinput", &init).unwrap()
}

// === InputType parsing tests ===

#[wasm_bindgen_test]
fn test_parse_insert_text() {
    assert_eq!(
        parse_browser_input_type("insertText"),
        InputType::InsertText
    );
}

#[wasm_bindgen_test]
fn test_parse_delete_backward() {
    assert_eq!(
        parse_browser_input_type("deleteContentBackward"),
        InputType::DeleteContentBackward
    );
}

#[wasm_bindgen_test]
fn test_parse_entire_word_aliases() {
    assert_eq!(
        parse_browser_input_type("deleteEntireWordBackward"),
        InputType::DeleteWordBackward
    );
}

#[wasm_bindgen_test]
fn test_parse_unknown() {
    match parse_browser_input_type("unknownType") {
        InputType::Unknown(s) => assert_eq!(s, "unknownType"),
        _ => panic!("Expected Unknown variant"),
    }
}

// === Event translation tests ===

#[wasm_bindgen_test]
fn test_insert_text_carries_data() {
    let event = editor_event_from_input(&InputType::InsertText, Some("#"));
    assert_eq!(event, Some(EditorEvent::BeforeInput("#".to_string())));

    assert_eq!(editor_event_from_input(&InputType::InsertText, None), None);
    assert_eq!(editor_event_from_input(&InputType::InsertText, Some("")), None);
}

#[wasm_bindgen_test]
fn test_structural_inputs_become_commands() {
    assert_eq!(
        editor_event_from_input(&InputType::InsertParagraph, None),
        Some(EditorEvent::Command(EditorCommand::SplitBlock))
    );
    assert_eq!(
        editor_event_from_input(&InputType::DeleteWordBackward, None),
        Some(EditorEvent::Command(EditorCommand::BackspaceWord))
    );
    assert_eq!(
        editor_event_from_input(&InputType::FormatBold, None),
        Some(EditorEvent::Command(EditorCommand::Bold))
    );
    assert_eq!(
        editor_event_from_input(&InputType::Unknown("insertLink".into()), None),
        None
    );
}

#[wasm_bindgen_test]
fn test_dom_input_events() {
    assert_eq!(
        editor_event_from_input_event(&input_event("insertText", Some("#"))),
        Some(EditorEvent::BeforeInput("#".to_string()))
    );
    assert_eq!(
        editor_event_from_input_event(&input_event("insertParagraph", None)),
        Some(EditorEvent::Command(EditorCommand::SplitBlock))
    );
    // Composition is committed separately, so in-progress text is ignored.
    assert_eq!(
        editor_event_from_input_event(&input_event("insertCompositionText", Some("に"))),
        None
    );
}

#[wasm_bindgen_test]
fn test_key_mapping() {
    assert_eq!(key_from_browser(" "), Key::Space);
    assert_eq!(key_from_browser("Enter"), Key::Enter);
    assert_eq!(key_from_browser("ArrowLeft"), Key::ArrowLeft);
    assert_eq!(key_from_browser("#"), Key::character("#"));
    assert_eq!(key_from_browser("F13"), Key::Unidentified);
    assert_eq!(key_from_browser("Unidentified"), Key::Unidentified);
}

#[wasm_bindgen_test]
fn test_autoformat_from_browser_inputs() {
    let mut host = EditorHost::default();
    for data in ["*", "*", " ", "x"] {
        let event = editor_event_from_input(&InputType::InsertText, Some(data));
        host.dispatch(event.expect("text input"));
    }
    let block = host.state().content().first_block();
    assert_eq!(block.text(), "x");
    assert!(block.style_at(0).contains(&InlineStyle::RedLine));
}

// === Platform tests ===

#[wasm_bindgen_test]
fn test_platform_detection_is_cached() {
    let first = platform() as *const _;
    let second = platform() as *const _;
    assert_eq!(first, second);
}

// === Local storage tests ===

#[wasm_bindgen_test]
fn test_local_storage_round_trip() {
    let store = LocalStorageStore::new().expect("localStorage in test browser");
    store.remove("draftpad-test");
    assert_eq!(store.get("draftpad-test").unwrap(), None);

    store.set("draftpad-test", "{\"a\":1}").unwrap();
    assert_eq!(
        store.get("draftpad-test").unwrap().as_deref(),
        Some("{\"a\":1}")
    );
    store.remove("draftpad-test");
}

#[wasm_bindgen_test]
fn test_save_and_load_through_local_storage() {
    let config = EditorConfig {
        storage_key: "draftpad-test-content".into(),
        ..EditorConfig::default()
    };
    let store = LocalStorageStore::new().expect("localStorage in test browser");
    store.remove(&config.storage_key);

    let mut host = EditorHost::default();
    for data in ["#", " ", "H", "i"] {
        host.dispatch(EditorEvent::BeforeInput(data.to_string()));
    }

    let bridge = PersistenceBridge::new(store, &config);
    bridge.save(host.state()).unwrap();
    let loaded = bridge.load();
    assert_eq!(loaded.content().plain_text(), "Hi");
    assert!(
        loaded
            .content()
            .first_block()
            .style_at(1)
            .contains(&InlineStyle::Heading)
    );

    store.set(&config.storage_key, "{broken").unwrap();
    assert_eq!(bridge.load().content().plain_text(), "");
    store.remove(&config.storage_key);
}
