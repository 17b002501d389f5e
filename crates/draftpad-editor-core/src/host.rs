//! The editor host: owns the current state and routes events through the
//! intercept handlers before falling back to default editing behaviour.

use crate::actions::{EditorCommand, Key, KeyCombo, default_key_binding};
use crate::execute::{execute_command, insert_characters};
use crate::handlers::{HandleResult, handle_before_input, handle_key_command, handle_return};
use crate::state::EditorState;
use crate::types::SelectionState;

/// An input event from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A key was pressed.
    KeyDown(KeyCombo),
    /// Text is about to be inserted (typing, IME commit, paste).
    BeforeInput(String),
    /// A command from outside the keyboard path (toolbar, `beforeinput`).
    Command(EditorCommand),
    /// The user placed the caret or selected a range.
    Select(SelectionState),
}

#[derive(Debug, Clone, Default)]
pub struct EditorHost {
    state: EditorState,
    is_mac: bool,
}

impl EditorHost {
    pub fn new(state: EditorState, is_mac: bool) -> Self {
        Self { state, is_mac }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_mac(&self) -> bool {
        self.is_mac
    }

    /// Replace the whole state, e.g. after loading a saved document.
    pub fn set_state(&mut self, state: EditorState) {
        self.state = state;
    }

    pub fn into_state(self) -> EditorState {
        self.state
    }

    /// Process one event. Returns whether the state changed.
    pub fn dispatch(&mut self, event: EditorEvent) -> bool {
        match event {
            EditorEvent::KeyDown(combo) => self.key_down(&combo),
            EditorEvent::BeforeInput(chars) => self.before_input(&chars),
            EditorEvent::Command(EditorCommand::SplitBlock) => {
                self.key_down(&KeyCombo::new(Key::Enter))
            }
            EditorEvent::Command(command) => self.run_command(command),
            EditorEvent::Select(selection) => {
                if *self.state.selection() == selection {
                    return false;
                }
                self.state.accept_selection(selection);
                true
            }
        }
    }

    fn key_down(&mut self, combo: &KeyCombo) -> bool {
        if combo.key == Key::Enter && !combo.modifiers.has_ctrl_or_meta() {
            if let HandleResult::Handled(next) = handle_return(&self.state) {
                self.state = next;
                return true;
            }
            return self.run_command(EditorCommand::SplitBlock);
        }

        if let Some(command) = default_key_binding(combo, self.is_mac) {
            return self.run_command(command);
        }

        match combo.key.text() {
            Some(text) if !combo.modifiers.has_ctrl_or_meta() => self.before_input(text),
            _ => false,
        }
    }

    fn run_command(&mut self, command: EditorCommand) -> bool {
        let next = match handle_key_command(command, &self.state) {
            HandleResult::Handled(next) => Some(next),
            HandleResult::NotHandled => execute_command(&self.state, command),
        };
        match next {
            Some(next) => {
                self.state = next;
                true
            }
            None => {
                tracing::trace!(command = %command, "command had no effect");
                false
            }
        }
    }

    fn before_input(&mut self, chars: &str) -> bool {
        if chars.is_empty() {
            return false;
        }
        self.state = match handle_before_input(chars, &self.state) {
            HandleResult::Handled(next) => next,
            HandleResult::NotHandled => insert_characters(&self.state, chars),
        };
        true
    }
}
