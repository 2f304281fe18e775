//! Color values and the single-character code registry

use crate::ansi::{BRIGHT, NORMAL};
use crate::MarkupError;

/// Code that resets the whole style to the configured default
pub const RESET_CODE: char = '0';

/// Code that keeps the current value of a channel
pub const CARRY_CODE: char = '-';

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 255);
    pub const GOLD: Color = Color::rgb(241, 234, 139);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel down to 70%
    pub fn darker(self) -> Self {
        let scale = |c: u8| ((c as u16 * 7) / 10) as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Maps single-character codes to colors.
///
/// Entries keep their registration order so reverse lookups by color return
/// the code that was registered first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorRegistry {
    entries: Vec<(char, Color)>,
}

impl ColorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled with the stock console palette
    pub fn with_default_palette() -> Self {
        let mut registry = Self::new();
        for (code, color) in default_palette() {
            // Stock codes are never reserved
            let _ = registry.add(code, color);
        }
        registry
    }

    /// Register `color` under `code`, replacing any previous value.
    ///
    /// Returns the replaced color, if any.
    pub fn add(&mut self, code: char, color: Color) -> Result<Option<Color>, MarkupError> {
        if is_reserved(code) {
            tracing::warn!("Refusing to register reserved color code {:?}", code);
            return Err(MarkupError::ReservedCode(code));
        }

        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == code) {
            let old = entry.1;
            entry.1 = color;
            return Ok(Some(old));
        }

        self.entries.push((code, color));
        Ok(None)
    }

    /// Remove the entry for `code`
    pub fn remove(&mut self, code: char) -> Option<Color> {
        let index = self.entries.iter().position(|(c, _)| *c == code)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove the first entry holding `color`, returning its code
    pub fn remove_color(&mut self, color: Color) -> Option<char> {
        let index = self.entries.iter().position(|(_, c)| *c == color)?;
        Some(self.entries.remove(index).0)
    }

    /// Color for `code`, or white when it is not registered
    pub fn lookup(&self, code: char) -> Color {
        self.get(code).unwrap_or(Color::WHITE)
    }

    pub fn get(&self, code: char) -> Option<Color> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, color)| *color)
    }

    pub fn contains(&self, code: char) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }

    /// First code registered for `color`
    pub fn code_for(&self, color: Color) -> Option<char> {
        self.entries
            .iter()
            .find(|(_, c)| *c == color)
            .map(|(code, _)| *code)
    }

    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Color)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Whether `code` is one of the control codes that can never name a color
pub fn is_reserved(code: char) -> bool {
    code == RESET_CODE || code == CARRY_CODE
}

/// The stock palette: ANSI colors on their normal/intense slots plus a few
/// extra hues.
pub fn default_palette() -> Vec<(char, Color)> {
    vec![
        ('r', BRIGHT[1]),
        ('R', NORMAL[1]),
        ('l', BRIGHT[4]),
        ('L', NORMAL[4]),
        ('g', BRIGHT[2]),
        ('G', NORMAL[2]),
        ('y', BRIGHT[3]),
        ('Y', NORMAL[3]),
        ('x', NORMAL[7]),
        ('X', BRIGHT[0]),
        ('c', BRIGHT[6]),
        ('C', NORMAL[6]),
        ('o', Color::ORANGE),
        ('O', Color::ORANGE.darker()),
        ('p', Color::PURPLE),
        ('P', Color::PURPLE.darker()),
        ('d', Color::GOLD),
        ('D', Color::GOLD.darker()),
        ('m', BRIGHT[5]),
        ('M', NORMAL[5]),
        ('b', NORMAL[0]),
        ('w', BRIGHT[7]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_existing_code() {
        let mut registry = ColorRegistry::new();
        assert_eq!(registry.add('r', Color::rgb(255, 0, 0)), Ok(None));
        assert_eq!(
            registry.add('r', Color::rgb(200, 0, 0)),
            Ok(Some(Color::rgb(255, 0, 0)))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup('r'), Color::rgb(200, 0, 0));
    }

    #[test]
    fn test_reserved_codes_rejected() {
        let mut registry = ColorRegistry::new();
        assert_eq!(
            registry.add('0', Color::BLACK),
            Err(MarkupError::ReservedCode('0'))
        );
        assert_eq!(
            registry.add('-', Color::BLACK),
            Err(MarkupError::ReservedCode('-'))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_falls_back_to_white() {
        let registry = ColorRegistry::new();
        assert_eq!(registry.lookup('q'), Color::WHITE);
        assert_eq!(registry.get('q'), None);
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        let registry = ColorRegistry::with_default_palette();
        assert_ne!(registry.lookup('r'), registry.lookup('R'));
    }

    #[test]
    fn test_remove_by_code_and_color() {
        let mut registry = ColorRegistry::with_default_palette();
        let before = registry.len();
        assert_eq!(registry.remove('o'), Some(Color::ORANGE));
        assert_eq!(registry.remove('o'), None);
        assert_eq!(registry.remove_color(Color::GOLD), Some('d'));
        assert_eq!(registry.len(), before - 2);
    }

    #[test]
    fn test_darker_matches_seventy_percent() {
        assert_eq!(Color::rgb(255, 200, 100).darker(), Color::rgb(178, 140, 70));
    }
}
