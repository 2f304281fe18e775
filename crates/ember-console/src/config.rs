//! Console settings and color themes

use ember_markup::{Font, StyleKey, DEFAULT_TRIGGER};
use std::time::Duration;

/// Built-in style sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Theme {
    /// White on black
    #[default]
    #[cfg_attr(feature = "clap", value(name = "dark"))]
    Dark,

    /// Black on white
    #[cfg_attr(feature = "clap", value(name = "light"))]
    Light,
}

/// The four styles a theme sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyles {
    pub default: StyleKey,
    pub system: StyleKey,
    pub error: StyleKey,
    pub input: StyleKey,
}

impl Theme {
    pub fn styles(self) -> ThemeStyles {
        match self {
            Theme::Dark => ThemeStyles {
                default: StyleKey::new('x', 'b'),
                system: StyleKey::new('c', 'b'),
                error: StyleKey::new('r', 'b'),
                input: StyleKey::new('x', 'b'),
            },
            Theme::Light => ThemeStyles {
                default: StyleKey::new('b', 'w'),
                system: StyleKey::new('o', 'w'),
                error: StyleKey::new('r', 'w'),
                input: StyleKey::new('b', 'w'),
            },
        }
    }
}

/// Everything a console is created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Character that introduces a color code
    pub trigger: char,

    /// Style for plain output and the target of a `0` reset
    pub default_style: StyleKey,

    /// Style for system messages
    pub system_style: StyleKey,

    /// Style for error messages
    pub error_style: StyleKey,

    /// Style for text the user types
    pub input_style: StyleKey,

    /// Shown in place of each character of protected input
    pub mask: char,

    pub history_capacity: usize,

    /// Scroll to the bottom after every output, not only when already there
    pub always_scroll_to_bottom: bool,

    /// Keep partially typed input across program output
    pub input_carry_over: bool,

    /// Edit input inside the output; when off, input goes to a separate
    /// line below it
    pub inline_input: bool,

    /// Color-code markup shown before the separate input line
    pub prompt: String,

    /// Shift+Enter breaks the line instead of submitting
    pub input_field_newline: bool,

    /// Display-only mode: no editing, `%` is literal
    pub ignore_input: bool,

    /// Interpret SGR escapes in output
    pub use_ansi: bool,

    /// How long output must settle before the deferred scroll fires
    pub scroll_delay: Duration,

    /// Lines shown at once
    pub viewport_rows: usize,

    pub font: Font,
}

impl ConsoleConfig {
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.set_theme(theme);
        self
    }

    pub fn set_theme(&mut self, theme: Theme) {
        let styles = theme.styles();
        self.default_style = styles.default;
        self.system_style = styles.system;
        self.error_style = styles.error;
        self.input_style = styles.input;
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let styles = Theme::Dark.styles();
        Self {
            trigger: DEFAULT_TRIGGER,
            default_style: styles.default,
            system_style: styles.system,
            error_style: styles.error,
            input_style: styles.input,
            mask: '*',
            history_capacity: 10,
            always_scroll_to_bottom: false,
            input_carry_over: true,
            inline_input: true,
            prompt: ">> ".to_string(),
            input_field_newline: true,
            ignore_input: false,
            use_ansi: false,
            scroll_delay: Duration::from_millis(100),
            viewport_rows: 24,
            font: Font::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.trigger, '&');
        assert_eq!(config.default_style, StyleKey::new('x', 'b'));
        assert_eq!(config.mask, '*');
        assert_eq!(config.history_capacity, 10);
        assert!(config.input_carry_over);
        assert!(config.inline_input);
        assert_eq!(config.prompt, ">> ");
        assert!(config.input_field_newline);
        assert!(!config.ignore_input);
    }

    #[test]
    fn test_light_theme() {
        let config = ConsoleConfig::default().with_theme(Theme::Light);
        assert_eq!(config.default_style, StyleKey::new('b', 'w'));
        assert_eq!(config.system_style, StyleKey::new('o', 'w'));
        assert_eq!(config.error_style, StyleKey::new('r', 'w'));
    }
}
