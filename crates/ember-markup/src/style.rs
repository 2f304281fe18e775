//! Style keys and the table of derived styles
//!
//! Every ordered pair of registered codes gets a concrete style, keyed by the
//! two-character foreground/background code.

use crate::ansi::AnsiAttributes;
use crate::color::{Color, ColorRegistry};
use crate::MarkupError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Foreground/background code pair, e.g. `rb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleKey {
    pub fg: char,
    pub bg: char,
}

impl StyleKey {
    pub const fn new(fg: char, bg: char) -> Self {
        Self { fg, bg }
    }
}

impl FromStr for StyleKey {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(fg), Some(bg), None) => Ok(Self::new(fg, bg)),
            _ => Err(MarkupError::InvalidStyleKey(s.to_string())),
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.fg, self.bg)
    }
}

/// Font attributes shared by every derived style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: String,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Monospaced".to_string(),
            size: 14,
            bold: false,
            italic: false,
        }
    }
}

/// A style ready to be painted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConcreteStyle {
    pub font: Font,
    pub fg: Color,
    pub bg: Color,
}

/// Style attached to a piece of buffer text, resolved only at paint time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Two-character code style
    Dc(StyleKey),

    /// Attribute state built from SGR escapes
    Ansi(AnsiAttributes),
}

impl From<StyleKey> for Style {
    fn from(key: StyleKey) -> Self {
        Style::Dc(key)
    }
}

/// Derived styles for every ordered pair of registered codes
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    font: Font,
    styles: HashMap<StyleKey, ConcreteStyle>,
}

impl StyleTable {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            styles: HashMap::new(),
        }
    }

    /// Build a table holding every pair of the registry's codes
    pub fn from_registry(registry: &ColorRegistry, font: Font) -> Self {
        let mut table = Self::new(font);
        for code in registry.codes() {
            table.regenerate_for(code, registry);
        }
        table
    }

    /// Create or update `code+other` and `other+code` for every registered code.
    ///
    /// Does nothing if `code` itself is not registered.
    pub fn regenerate_for(&mut self, code: char, registry: &ColorRegistry) {
        let Some(color) = registry.get(code) else {
            return;
        };

        for (other, other_color) in registry.iter() {
            self.upsert(StyleKey::new(code, other), color, other_color);
            self.upsert(StyleKey::new(other, code), other_color, color);
        }

        tracing::debug!(
            "Regenerated styles for code {:?}, {} styles total",
            code,
            self.styles.len()
        );
    }

    /// Drop every style that uses `code` on either channel
    pub fn remove_code(&mut self, code: char) {
        self.styles.retain(|key, _| key.fg != code && key.bg != code);
    }

    pub fn clear(&mut self) {
        self.styles.clear();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Re-derive the font of every style in place; colors are untouched.
    pub fn set_font(&mut self, font: Font) {
        for style in self.styles.values_mut() {
            style.font = font.clone();
        }
        self.font = font;
    }

    pub fn get(&self, key: StyleKey) -> Option<&ConcreteStyle> {
        self.styles.get(&key)
    }

    pub fn contains(&self, key: StyleKey) -> bool {
        self.styles.contains_key(&key)
    }

    /// Resolve `key`, falling back to `previous` when either code is not
    /// registered. Without a previous style the channels fall back to the
    /// registry's lookup colors.
    pub fn resolve(
        &self,
        key: StyleKey,
        previous: Option<&ConcreteStyle>,
        registry: &ColorRegistry,
    ) -> ConcreteStyle {
        if let Some(style) = self.styles.get(&key) {
            return style.clone();
        }

        match previous {
            Some(style) => style.clone(),
            None => ConcreteStyle {
                font: self.font.clone(),
                fg: registry.lookup(key.fg),
                bg: registry.lookup(key.bg),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    fn upsert(&mut self, key: StyleKey, fg: Color, bg: Color) {
        let font = &self.font;
        self.styles
            .entry(key)
            .and_modify(|style| {
                style.fg = fg;
                style.bg = bg;
            })
            .or_insert_with(|| ConcreteStyle {
                font: font.clone(),
                fg,
                bg,
            });
    }
}
