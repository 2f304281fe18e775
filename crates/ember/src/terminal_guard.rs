//! RAII guard for terminal ownership while the console is on screen

use anyhow::Result;
use crossterm::{cursor, event, execute, terminal};
use std::io;
use tracing::subscriber::NoSubscriber;
use tracing_subscriber::util::SubscriberInitExt;

/// Owns the terminal for the lifetime of the console. Raw mode, the
/// alternate screen and bracketed paste are undone on drop.
pub struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen: bool,
    bracketed_paste: bool,
    // Marker to ensure this type is !Send and !Sync
    _marker: std::marker::PhantomData<*const ()>,
}

impl TerminalGuard {
    /// Acquire the terminal.
    ///
    /// Unless logging already goes to a file, a no-op subscriber is
    /// installed so nothing writes over the screen.
    pub fn acquire() -> Result<Self> {
        // Fails harmlessly if a file subscriber is already installed
        let _ = NoSubscriber::default().try_init();

        Ok(Self {
            raw_mode_enabled: false,
            alternate_screen: false,
            bracketed_paste: false,
            _marker: std::marker::PhantomData,
        })
    }

    pub fn enable_raw_mode(&mut self) -> Result<()> {
        if !self.raw_mode_enabled {
            terminal::enable_raw_mode()?;
            self.raw_mode_enabled = true;
        }
        Ok(())
    }

    pub fn enter_alternate_screen(&mut self) -> Result<()> {
        if !self.alternate_screen {
            execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Show)?;
            self.alternate_screen = true;
        }
        Ok(())
    }

    /// Deliver pasted text as one event instead of a burst of key presses
    pub fn enable_bracketed_paste(&mut self) -> Result<()> {
        if !self.bracketed_paste {
            execute!(io::stdout(), event::EnableBracketedPaste)?;
            self.bracketed_paste = true;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Always try to restore terminal state
        if self.bracketed_paste {
            let _ = execute!(io::stdout(), event::DisableBracketedPaste);
        }
        if self.alternate_screen {
            let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        }
        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
        }
    }
}
