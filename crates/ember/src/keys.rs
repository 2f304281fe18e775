//! Key events to console gestures

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ember_console::{CaretMove, Console};

/// What a key press asks the console to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Type(char),
    Backspace,
    Delete,
    Caret(CaretMove),
    Submit,

    /// Enter with a modifier: a line break, or a submit when the console
    /// does not allow newlines in input
    Newline,

    HistoryOlder,
    HistoryNewer,
    Scroll(isize),
    Quit,
}

/// Outcome of performing an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,

    /// Input was submitted; carries the value
    Submitted(String),

    Quit,
}

/// Rows moved by PageUp/PageDown
const PAGE: isize = 10;

/// Map a key event to an action, `None` for keys the console ignores
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let action = match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if control => Action::Quit,
        KeyCode::Char(_) if control => return None,
        KeyCode::Char(c) => Action::Type(c),
        KeyCode::Enter if shift || control => Action::Newline,
        KeyCode::Enter => Action::Submit,
        KeyCode::Tab => Action::Type('\t'),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Caret(CaretMove::Left),
        KeyCode::Right => Action::Caret(CaretMove::Right),
        KeyCode::Home => Action::Caret(CaretMove::Home),
        KeyCode::End => Action::Caret(CaretMove::End),
        KeyCode::Up => Action::HistoryOlder,
        KeyCode::Down => Action::HistoryNewer,
        KeyCode::PageUp => Action::Scroll(-PAGE),
        KeyCode::PageDown => Action::Scroll(PAGE),
        _ => return None,
    };
    Some(action)
}

/// Apply `action` to the console
pub fn perform(console: &mut Console, action: Action) -> Flow {
    match action {
        Action::Type(c) => {
            console.type_text(c.encode_utf8(&mut [0; 4]));
        }
        Action::Backspace => {
            console.backspace();
        }
        Action::Delete => {
            console.delete();
        }
        Action::Caret(movement) => console.move_caret(movement),
        Action::Submit => {
            if let Some(input) = console.submit() {
                return Flow::Submitted(input);
            }
        }
        Action::Newline => {
            if let Some(input) = console.newline() {
                return Flow::Submitted(input);
            }
        }
        Action::HistoryOlder => {
            console.history_older();
        }
        Action::HistoryNewer => {
            console.history_newer();
        }
        Action::Scroll(rows) => console.scroll_by(rows),
        Action::Quit => return Flow::Quit,
    }
    Flow::Continue
}
