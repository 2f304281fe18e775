//! Color-code markup for Ember consoles
//!
//! Provides the color registry, the derived style table, SGR translation and
//! the markup scanner that turns output strings into styled runs and inline
//! input directives.

pub mod ansi;
pub mod color;
pub mod markup;
pub mod palette;
pub mod style;

pub use ansi::{ansi_to_dc, apply_sgr, dc_to_ansi, AnsiAttributes};
pub use color::{Color, ColorRegistry, CARRY_CODE, RESET_CODE};
pub use markup::{
    parse_input_directive, Extent, InputDirective, MarkupEngine, MarkupEvent, TextRun,
    DEFAULT_TRIGGER,
};
pub use palette::Palette;
pub use style::{ConcreteStyle, Font, Style, StyleKey, StyleTable};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("Color code '{0}' is reserved")]
    ReservedCode(char),

    #[error("Invalid style key: {0:?}")]
    InvalidStyleKey(String),
}
