//! Inline styles, ordered style sets, and the style map that turns them into CSS.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A named inline style applied to individual characters.
///
/// Names round-trip verbatim through snapshots, so unknown names survive as
/// `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SmolStr", into = "SmolStr")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    /// Large heading text, applied inline (`header-one`).
    Heading,
    /// Red text at body size (`red-line`).
    RedLine,
    Custom(SmolStr),
}

impl InlineStyle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Custom(name) => name.as_str(),
            other => other.static_name(),
        }
    }

    fn static_name(&self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Underline => "UNDERLINE",
            Self::Code => "CODE",
            Self::Strikethrough => "STRIKETHROUGH",
            Self::Heading => "header-one",
            Self::RedLine => "red-line",
            Self::Custom(_) => "",
        }
    }
}

impl From<&str> for InlineStyle {
    fn from(s: &str) -> Self {
        match s {
            "BOLD" => Self::Bold,
            "ITALIC" => Self::Italic,
            "UNDERLINE" => Self::Underline,
            "CODE" => Self::Code,
            "STRIKETHROUGH" => Self::Strikethrough,
            "header-one" => Self::Heading,
            "red-line" => Self::RedLine,
            other => Self::Custom(SmolStr::new(other)),
        }
    }
}

impl From<SmolStr> for InlineStyle {
    fn from(s: SmolStr) -> Self {
        Self::from(s.as_str())
    }
}

impl From<InlineStyle> for SmolStr {
    fn from(style: InlineStyle) -> Self {
        match style {
            InlineStyle::Custom(name) => name,
            other => SmolStr::new_static(other.static_name()),
        }
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered set of inline styles.
///
/// Equality ignores order: `{BOLD, ITALIC}` equals `{ITALIC, BOLD}`.
#[derive(Debug, Clone, Default, Eq)]
pub struct StyleSet(Vec<InlineStyle>);

impl StyleSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, style: &InlineStyle) -> bool {
        self.0.contains(style)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InlineStyle> {
        self.0.iter()
    }

    /// Add a style. No-op if already present.
    pub fn insert(&mut self, style: InlineStyle) {
        if !self.contains(&style) {
            self.0.push(style);
        }
    }

    /// Remove a style. Returns whether it was present.
    pub fn remove(&mut self, style: &InlineStyle) -> bool {
        let before = self.0.len();
        self.0.retain(|s| s != style);
        self.0.len() != before
    }

    /// Copy of this set with `style` added.
    pub fn with(&self, style: InlineStyle) -> Self {
        let mut next = self.clone();
        next.insert(style);
        next
    }

    /// Copy of this set with `style` removed.
    pub fn without(&self, style: &InlineStyle) -> Self {
        let mut next = self.clone();
        next.remove(style);
        next
    }

    /// Copy of this set with `style` flipped.
    pub fn toggled(&self, style: &InlineStyle) -> Self {
        if self.contains(style) {
            self.without(style)
        } else {
            self.with(style.clone())
        }
    }
}

impl PartialEq for StyleSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|s| other.contains(s))
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        let mut set = StyleSet::new();
        for style in iter {
            set.insert(style);
        }
        set
    }
}

/// The four styles reachable through autoformat triggers.
///
/// `Bold` stores under the literal `BOLD` key but is toggled through the
/// generic inline style toggle, never through the keyboard bold command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoformatStyle {
    Heading,
    Bold,
    RedLine,
    Underline,
}

impl AutoformatStyle {
    pub const ALL: [AutoformatStyle; 4] = [
        AutoformatStyle::Heading,
        AutoformatStyle::Bold,
        AutoformatStyle::RedLine,
        AutoformatStyle::Underline,
    ];

    /// The block text that triggers this style.
    pub fn trigger(self) -> &'static str {
        match self {
            Self::Heading => "#",
            Self::Bold => "*",
            Self::RedLine => "**",
            Self::Underline => "***",
        }
    }

    /// Look up the style whose trigger is exactly `text`.
    pub fn from_trigger(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.trigger() == text)
    }

    pub fn inline_style(self) -> InlineStyle {
        match self {
            Self::Heading => InlineStyle::Heading,
            Self::Bold => InlineStyle::Bold,
            Self::RedLine => InlineStyle::RedLine,
            Self::Underline => InlineStyle::Underline,
        }
    }
}

/// CSS declarations for one inline style. Unset fields leave the property alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CssStyle {
    pub color: Option<&'static str>,
    pub font_size: Option<&'static str>,
    pub font_weight: Option<&'static str>,
    pub font_style: Option<&'static str>,
    pub font_family: Option<&'static str>,
    pub text_decoration: Option<&'static str>,
}

impl CssStyle {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    ///
    /// Text decorations accumulate (`underline line-through`) unless either
    /// side is `none`, in which case the overlay wins.
    fn overlay(&mut self, other: &CssStyle) {
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight;
        }
        if other.font_style.is_some() {
            self.font_style = other.font_style;
        }
        if other.font_family.is_some() {
            self.font_family = other.font_family;
        }
        self.text_decoration = match (self.text_decoration, other.text_decoration) {
            (Some(current), Some(next)) if current != "none" && next != "none" && current != next => {
                Some(join_decorations(current, next))
            }
            (current, None) => current,
            (_, next) => next,
        };
    }

    /// Render as an inline `style` attribute value.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        let props = [
            ("color", self.color),
            ("font-size", self.font_size),
            ("font-weight", self.font_weight),
            ("font-style", self.font_style),
            ("font-family", self.font_family),
            ("text-decoration", self.text_decoration),
        ];
        for (name, value) in props {
            if let Some(value) = value {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(name);
                out.push_str(": ");
                out.push_str(value);
                out.push(';');
            }
        }
        out
    }
}

fn join_decorations(a: &'static str, b: &'static str) -> &'static str {
    match (a, b) {
        ("underline", "line-through") | ("line-through", "underline") => "underline line-through",
        ("underline line-through", _) | (_, "underline line-through") => "underline line-through",
        (_, b) => b,
    }
}

/// Maps inline styles to CSS. Built-in styles come first; custom entries
/// for the same name replace them.
#[derive(Debug, Clone)]
pub struct StyleMap {
    entries: Vec<(InlineStyle, CssStyle)>,
}

impl Default for StyleMap {
    fn default() -> Self {
        let mut map = Self::builtin();
        for (style, css) in Self::custom_entries() {
            map.set(style, css);
        }
        map
    }
}

impl StyleMap {
    /// Only the engine's built-in styles.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                (
                    InlineStyle::Bold,
                    CssStyle {
                        font_weight: Some("bold"),
                        ..Default::default()
                    },
                ),
                (
                    InlineStyle::Italic,
                    CssStyle {
                        font_style: Some("italic"),
                        ..Default::default()
                    },
                ),
                (
                    InlineStyle::Underline,
                    CssStyle {
                        text_decoration: Some("underline"),
                        ..Default::default()
                    },
                ),
                (
                    InlineStyle::Code,
                    CssStyle {
                        font_family: Some("monospace"),
                        ..Default::default()
                    },
                ),
                (
                    InlineStyle::Strikethrough,
                    CssStyle {
                        text_decoration: Some("line-through"),
                        ..Default::default()
                    },
                ),
            ],
        }
    }

    /// The fixed presentation of the autoformat styles.
    fn custom_entries() -> [(InlineStyle, CssStyle); 4] {
        [
            (
                InlineStyle::RedLine,
                CssStyle {
                    color: Some("red"),
                    font_size: Some("16px"),
                    text_decoration: Some("none"),
                    ..Default::default()
                },
            ),
            (
                InlineStyle::Heading,
                CssStyle {
                    color: Some("black"),
                    font_size: Some("2rem"),
                    font_weight: Some("bold"),
                    ..Default::default()
                },
            ),
            (
                InlineStyle::Bold,
                CssStyle {
                    color: Some("black"),
                    font_size: Some("16px"),
                    font_weight: Some("bold"),
                    ..Default::default()
                },
            ),
            (
                InlineStyle::Underline,
                CssStyle {
                    color: Some("black"),
                    font_size: Some("16px"),
                    font_weight: Some("normal"),
                    text_decoration: Some("underline"),
                    ..Default::default()
                },
            ),
        ]
    }

    fn set(&mut self, style: InlineStyle, css: CssStyle) {
        match self.entries.iter_mut().find(|(s, _)| *s == style) {
            Some(entry) => entry.1 = css,
            None => self.entries.push((style, css)),
        }
    }

    pub fn get(&self, style: &InlineStyle) -> Option<&CssStyle> {
        self.entries.iter().find(|(s, _)| s == style).map(|(_, css)| css)
    }

    /// Merge the declarations of every style in `styles`, in set order.
    pub fn resolve(&self, styles: &StyleSet) -> CssStyle {
        let mut merged = CssStyle::default();
        for style in styles.iter() {
            if let Some(css) = self.get(style) {
                merged.overlay(css);
            }
        }
        merged
    }

    /// Inline CSS for a set of styles.
    pub fn css_for(&self, styles: &StyleSet) -> String {
        self.resolve(styles).to_css()
    }
}
