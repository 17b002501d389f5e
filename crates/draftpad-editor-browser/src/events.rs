//! Browser event translation.
//!
//! Converts `KeyboardEvent.key` names and `beforeinput` input types into
//! the platform-agnostic `Key` / `EditorEvent` values the host consumes.

use draftpad_editor_core::{EditorCommand, EditorEvent, Key};
use smol_str::SmolStr;

/// Convert a `KeyboardEvent.key` value into a `Key`.
pub fn key_from_browser(key: &str) -> Key {
    match key {
        "Backspace" => Key::Backspace,
        "Delete" => Key::Delete,
        "Enter" => Key::Enter,
        "Tab" => Key::Tab,
        "Escape" => Key::Escape,
        " " | "Spacebar" => Key::Space,
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        "ArrowUp" => Key::ArrowUp,
        "ArrowDown" => Key::ArrowDown,
        "Home" => Key::Home,
        "End" => Key::End,
        "PageUp" => Key::PageUp,
        "PageDown" => Key::PageDown,
        "Alt" => Key::Alt,
        "AltGraph" => Key::AltGraph,
        "CapsLock" => Key::CapsLock,
        "Control" => Key::Control,
        "Meta" => Key::Meta,
        "Shift" => Key::Shift,
        "Copy" => Key::Copy,
        "Cut" => Key::Cut,
        "Paste" => Key::Paste,
        "Undo" => Key::Undo,
        "Redo" => Key::Redo,
        "" | "Unidentified" | "Dead" | "Process" => Key::Unidentified,
        // Single printable characters; other named keys are not interesting here.
        other if other.chars().count() == 1 => Key::character(other),
        _ => Key::Unidentified,
    }
}

/// W3C Input Events `inputType` values the editor distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    InsertText,
    InsertCompositionText,
    InsertReplacementText,
    InsertFromPaste,
    InsertFromDrop,
    InsertParagraph,
    InsertLineBreak,
    DeleteContentBackward,
    DeleteContentForward,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteSoftLineBackward,
    DeleteSoftLineForward,
    DeleteHardLineBackward,
    DeleteHardLineForward,
    DeleteByCut,
    HistoryUndo,
    HistoryRedo,
    FormatBold,
    FormatItalic,
    FormatUnderline,
    FormatStrikethrough,
    Unknown(SmolStr),
}

/// Parse a browser inputType string to an InputType enum.
///
/// This handles the W3C Input Events inputType values as returned by
/// `InputEvent.inputType` in browsers.
pub fn parse_browser_input_type(s: &str) -> InputType {
    match s {
        // Insertion
        "insertText" => InputType::InsertText,
        "insertCompositionText" => InputType::InsertCompositionText,
        "insertReplacementText" => InputType::InsertReplacementText,
        "insertFromPaste" => InputType::InsertFromPaste,
        "insertFromDrop" => InputType::InsertFromDrop,
        "insertParagraph" => InputType::InsertParagraph,
        "insertLineBreak" => InputType::InsertLineBreak,

        // Deletion
        "deleteContentBackward" => InputType::DeleteContentBackward,
        "deleteContentForward" => InputType::DeleteContentForward,
        "deleteWordBackward" | "deleteEntireWordBackward" => InputType::DeleteWordBackward,
        "deleteWordForward" | "deleteEntireWordForward" => InputType::DeleteWordForward,
        "deleteSoftLineBackward" | "deleteEntireSoftLine" => InputType::DeleteSoftLineBackward,
        "deleteSoftLineForward" => InputType::DeleteSoftLineForward,
        "deleteHardLineBackward" => InputType::DeleteHardLineBackward,
        "deleteHardLineForward" => InputType::DeleteHardLineForward,
        "deleteByCut" => InputType::DeleteByCut,

        // History
        "historyUndo" => InputType::HistoryUndo,
        "historyRedo" => InputType::HistoryRedo,

        // Formatting
        "formatBold" => InputType::FormatBold,
        "formatItalic" => InputType::FormatItalic,
        "formatUnderline" => InputType::FormatUnderline,
        "formatStrikethrough" => InputType::FormatStrikethrough,

        // Unknown
        other => InputType::Unknown(SmolStr::new(other)),
    }
}

/// Translate a `beforeinput` event into an editor event.
///
/// Text insertions carry their data; structural edits become commands.
/// Returns `None` for input types the editor leaves to the browser.
pub fn editor_event_from_input(input_type: &InputType, data: Option<&str>) -> Option<EditorEvent> {
    let command = match input_type {
        InputType::InsertText
        | InputType::InsertCompositionText
        | InputType::InsertReplacementText
        | InputType::InsertFromPaste
        | InputType::InsertFromDrop => {
            return data
                .filter(|text| !text.is_empty())
                .map(|text| EditorEvent::BeforeInput(text.to_string()));
        }
        InputType::InsertParagraph | InputType::InsertLineBreak => EditorCommand::SplitBlock,
        InputType::DeleteContentBackward => EditorCommand::Backspace,
        InputType::DeleteWordBackward => EditorCommand::BackspaceWord,
        InputType::DeleteSoftLineBackward | InputType::DeleteHardLineBackward => {
            EditorCommand::BackspaceToStartOfLine
        }
        InputType::DeleteContentForward | InputType::DeleteByCut => EditorCommand::Delete,
        InputType::DeleteWordForward => EditorCommand::DeleteWord,
        InputType::DeleteSoftLineForward | InputType::DeleteHardLineForward => {
            EditorCommand::DeleteToEndOfBlock
        }
        InputType::HistoryUndo => EditorCommand::Undo,
        InputType::HistoryRedo => EditorCommand::Redo,
        InputType::FormatBold => EditorCommand::Bold,
        InputType::FormatItalic => EditorCommand::Italic,
        InputType::FormatUnderline => EditorCommand::Underline,
        InputType::FormatStrikethrough => EditorCommand::Strikethrough,
        InputType::Unknown(name) => {
            tracing::debug!(input_type = %name, "unhandled beforeinput type");
            return None;
        }
    };
    Some(EditorEvent::Command(command))
}

/// Translate a browser `InputEvent` directly.
///
/// In-progress composition text is left to the browser; the committed text
/// arrives with `compositionend`.
pub fn editor_event_from_input_event(event: &web_sys::InputEvent) -> Option<EditorEvent> {
    let input_type = parse_browser_input_type(&event.input_type());
    if input_type == InputType::InsertCompositionText {
        return None;
    }
    editor_event_from_input(&input_type, event.data().as_deref())
}
