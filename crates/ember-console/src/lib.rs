//! Styled text console with inline input
//!
//! A [`Console`] owns a styled buffer that program output is appended to
//! through the markup engine, and an input region the user edits in place,
//! or a separate input line below the output when inline input is off.

pub mod buffer;
pub mod config;
pub mod console;
pub mod display;
pub mod history;
pub mod input;
pub mod processor;
pub mod prompt;
pub mod scroll;

pub use buffer::{Cell, Edit, EditGate, EditOrigin, OpenGate, StyledBuffer, Verdict};
pub use config::{ConsoleConfig, Theme, ThemeStyles};
pub use console::{CaretMove, Console};
pub use display::{render_line_ansi, resolve_cells, StyledSpan};
pub use history::{Direction, HistoryRing};
pub use input::{InputRegion, InputShape, InputValue, Phase};
pub use processor::{CommandProcessor, EchoProcessor};
pub use prompt::InputLine;
pub use scroll::{DeferredScroll, Viewport};

use ember_markup::MarkupError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),

    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
}
