//! Keyboard input and the editor commands it maps to.
//!
//! This module provides:
//! - `Key` / `Modifiers` / `KeyCombo` - platform-agnostic key events
//! - `EditorCommand` - named editing commands
//! - `default_key_binding` - the default key-to-command mapping

use smol_str::SmolStr;

/// Key values for keyboard input.
///
/// Platform-agnostic key representation. Platform-specific code converts
/// from native key events to this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,

    // === Whitespace / editing ===
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    // === Navigation ===
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    // === Modifiers ===
    Alt,
    AltGraph,
    CapsLock,
    Control,
    Meta,
    Shift,

    // === Clipboard / editing commands ===
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
}

impl Key {
    /// Create a character key.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt | Self::AltGraph | Self::CapsLock | Self::Control | Self::Meta | Self::Shift
        )
    }

    /// The text this key types, if it types any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Character(s) => Some(s.as_str()),
            Self::Space => Some(" "),
            _ => None,
        }
    }

    /// Whether this is the character key `c`, ignoring case.
    fn is_char(&self, c: char) -> bool {
        match self {
            Self::Character(s) => {
                let mut chars = s.chars();
                matches!((chars.next(), chars.next()), (Some(k), None) if k.eq_ignore_ascii_case(&c))
            }
            _ => false,
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META_SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: true,
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    /// Get the primary modifier + Shift for the platform.
    pub fn primary_shift(is_mac: bool) -> Self {
        if is_mac {
            Self::META_SHIFT
        } else {
            Self::CTRL_SHIFT
        }
    }

    /// Whether the platform command modifier is held (without Alt).
    pub fn has_command(&self, is_mac: bool) -> bool {
        let primary = if is_mac { self.meta } else { self.ctrl };
        primary && !self.alt
    }

    /// Whether Ctrl or Meta is held. Such keys never type text.
    pub fn has_ctrl_or_meta(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key combination for triggering a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CTRL,
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::META,
        }
    }

    pub fn shift(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::SHIFT,
        }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary(is_mac),
        }
    }

    pub fn primary_shift(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary_shift(is_mac),
        }
    }
}

/// A named editing command.
///
/// Names match the command strings of browser rich-text editors, so key
/// command handlers read the same way across implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Undo,
    Redo,
    SelectAll,
    SplitBlock,
    Backspace,
    BackspaceWord,
    BackspaceToStartOfLine,
    Delete,
    DeleteWord,
    DeleteToEndOfBlock,
    MoveLeft { extend: bool },
    MoveRight { extend: bool },
    MoveUp { extend: bool },
    MoveDown { extend: bool },
    MoveToLineStart { extend: bool },
    MoveToLineEnd { extend: bool },
}

impl EditorCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Code => "code",
            Self::Strikethrough => "strikethrough",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::SelectAll => "select-all",
            Self::SplitBlock => "split-block",
            Self::Backspace => "backspace",
            Self::BackspaceWord => "backspace-word",
            Self::BackspaceToStartOfLine => "backspace-to-start-of-line",
            Self::Delete => "delete",
            Self::DeleteWord => "delete-word",
            Self::DeleteToEndOfBlock => "delete-to-end-of-block",
            Self::MoveLeft { .. } => "move-left",
            Self::MoveRight { .. } => "move-right",
            Self::MoveUp { .. } => "move-up",
            Self::MoveDown { .. } => "move-down",
            Self::MoveToLineStart { .. } => "move-to-line-start",
            Self::MoveToLineEnd { .. } => "move-to-line-end",
        }
    }

    /// Whether this is one of the backspace variants.
    pub fn is_backspace(&self) -> bool {
        matches!(
            self,
            Self::Backspace | Self::BackspaceWord | Self::BackspaceToStartOfLine
        )
    }
}

impl std::fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a key combination to its default command.
///
/// Returns `None` for keys that type text or have no binding.
pub fn default_key_binding(combo: &KeyCombo, is_mac: bool) -> Option<EditorCommand> {
    let mods = combo.modifiers;
    let command = mods.has_command(is_mac);
    let word_modifier = if is_mac { mods.alt } else { mods.ctrl };
    let extend = mods.shift;

    match &combo.key {
        Key::Enter => Some(EditorCommand::SplitBlock),
        Key::Backspace if word_modifier => Some(EditorCommand::BackspaceWord),
        Key::Backspace if command => Some(EditorCommand::BackspaceToStartOfLine),
        Key::Backspace => Some(EditorCommand::Backspace),
        Key::Delete if word_modifier => Some(EditorCommand::DeleteWord),
        Key::Delete if command => Some(EditorCommand::DeleteToEndOfBlock),
        Key::Delete => Some(EditorCommand::Delete),
        Key::Undo => Some(EditorCommand::Undo),
        Key::Redo => Some(EditorCommand::Redo),
        Key::ArrowLeft if command => Some(EditorCommand::MoveToLineStart { extend }),
        Key::ArrowRight if command => Some(EditorCommand::MoveToLineEnd { extend }),
        Key::ArrowLeft => Some(EditorCommand::MoveLeft { extend }),
        Key::ArrowRight => Some(EditorCommand::MoveRight { extend }),
        Key::ArrowUp => Some(EditorCommand::MoveUp { extend }),
        Key::ArrowDown => Some(EditorCommand::MoveDown { extend }),
        Key::Home => Some(EditorCommand::MoveToLineStart { extend }),
        Key::End => Some(EditorCommand::MoveToLineEnd { extend }),
        key if command => command_key_binding(key, mods.shift, is_mac),
        // Emacs-style deletion on mac.
        key if is_mac && mods.ctrl && !mods.alt && !mods.meta => {
            if key.is_char('h') {
                Some(EditorCommand::Backspace)
            } else if key.is_char('d') {
                Some(EditorCommand::Delete)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn command_key_binding(key: &Key, shift: bool, is_mac: bool) -> Option<EditorCommand> {
    let bindings: [(char, EditorCommand); 5] = [
        ('b', EditorCommand::Bold),
        ('i', EditorCommand::Italic),
        ('u', EditorCommand::Underline),
        ('j', EditorCommand::Code),
        ('a', EditorCommand::SelectAll),
    ];

    if key.is_char('z') {
        return Some(if shift {
            EditorCommand::Redo
        } else {
            EditorCommand::Undo
        });
    }
    if key.is_char('y') && !is_mac {
        return Some(EditorCommand::Redo);
    }
    if key.is_char('x') {
        return shift.then_some(EditorCommand::Strikethrough);
    }
    if shift {
        return None;
    }
    bindings
        .into_iter()
        .find(|(c, _)| key.is_char(*c))
        .map(|(_, command)| command)
}
