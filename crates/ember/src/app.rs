//! Terminal front end: event loop and painting

use crate::demo::DemoProcessor;
use crate::keys::{action_for, perform, Flow};
use crate::terminal_guard::TerminalGuard;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event},
    queue,
    style::Print,
    terminal::{self, ClearType},
};
use ember_console::{render_line_ansi, Console, ConsoleConfig};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long to wait for input before running timers
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Terminal UI state
struct TerminalUI {
    console: Console,
    stdout: io::Stdout,
    dirty: bool,
}

impl TerminalUI {
    fn new(console: Console) -> Self {
        Self {
            console,
            stdout: io::stdout(),
            dirty: true,
        }
    }

    /// Rows left for output once the separate input line, if any, is drawn
    fn output_rows(&self, terminal_rows: u16) -> usize {
        let reserved = if self.console.config().inline_input { 0 } else { 1 };
        (terminal_rows as usize).saturating_sub(reserved).max(1)
    }

    /// Paint the viewport and place the cursor at the caret
    fn render(&mut self) -> Result<()> {
        queue!(self.stdout, cursor::Hide)?;

        let lines = self.console.visible_lines();
        let rows = self.console.viewport().rows();
        for row in 0..rows {
            queue!(
                self.stdout,
                cursor::MoveTo(0, row as u16),
                terminal::Clear(ClearType::CurrentLine)
            )?;
            if let Some(spans) = lines.get(row) {
                queue!(self.stdout, Print(render_line_ansi(spans)))?;
            }
        }

        if let (Some(spans), Some(column)) = (
            self.console.input_line_spans(),
            self.console.input_line_column(),
        ) {
            queue!(
                self.stdout,
                cursor::MoveTo(0, rows as u16),
                terminal::Clear(ClearType::CurrentLine),
                Print(render_line_ansi(&spans)),
                cursor::MoveTo(column as u16, rows as u16),
                cursor::Show
            )?;
        } else {
            let (line, column) = self.console.caret_line_col();
            let top = self.console.viewport().top();
            if line >= top && line < top + rows {
                queue!(
                    self.stdout,
                    cursor::MoveTo(column as u16, (line - top) as u16),
                    cursor::Show
                )?;
            }
        }

        self.stdout.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn bell(&mut self) -> Result<()> {
        queue!(self.stdout, Print('\x07'))?;
        Ok(())
    }

    /// Handle one terminal event. Returns `false` when the console should
    /// close.
    fn handle(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => {
                let Some(action) = action_for(key) else {
                    return Ok(true);
                };
                self.dirty = true;
                match perform(&mut self.console, action) {
                    Flow::Quit => return Ok(false),
                    Flow::Submitted(input) if input.eq_ignore_ascii_case("exit") => {
                        return Ok(false)
                    }
                    Flow::Submitted(_) | Flow::Continue => {}
                }
            }
            Event::Resize(_, rows) => {
                self.console.resize_viewport(self.output_rows(rows))?;
                self.dirty = true;
            }
            Event::Paste(text) => {
                self.console.paste(&text);
                self.dirty = true;
            }
            _ => {}
        }
        Ok(true)
    }
}

/// Run the demo console until the user quits
pub fn run(config: ConsoleConfig) -> Result<()> {
    let mut guard = TerminalGuard::acquire()?;
    guard.enable_raw_mode().context("Failed to enable raw mode")?;
    guard.enter_alternate_screen()?;
    guard.enable_bracketed_paste()?;

    let (_, rows) = terminal::size().context("Failed to query terminal size")?;
    let inline = config.inline_input;
    let mut console = Console::new(config).with_processor(DemoProcessor::new());
    console.append(&DemoProcessor::banner(inline));

    info!("Console started with {} rows", rows);
    let mut ui = TerminalUI::new(console);
    let output_rows = ui.output_rows(rows);
    ui.console.resize_viewport(output_rows)?;
    let result = run_loop(&mut ui);

    debug!("Console loop finished: {:?}", result);
    result
}

fn run_loop(ui: &mut TerminalUI) -> Result<()> {
    loop {
        if event::poll(POLL_INTERVAL)? {
            if !ui.handle(event::read()?)? {
                return Ok(());
            }
        }

        if ui.console.tick(Instant::now()) {
            ui.dirty = true;
        }

        if ui.console.take_alerts() > 0 {
            ui.bell()?;
        }

        if ui.dirty {
            ui.render()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_paste_event_reaches_console() {
        let mut ui = TerminalUI::new(Console::default());
        assert!(ui.handle(Event::Paste("ls -la".to_string())).unwrap());
        assert_eq!(ui.console.text(), "ls -la");
        assert_eq!(ui.console.caret(), 6);
    }

    #[test]
    fn test_separate_input_reserves_a_row() {
        let config = ConsoleConfig {
            inline_input: false,
            ..ConsoleConfig::default()
        };
        let mut ui = TerminalUI::new(Console::new(config));
        assert_eq!(ui.output_rows(24), 23);

        assert!(ui.handle(Event::Resize(80, 10)).unwrap());
        assert_eq!(ui.console.viewport().rows(), 9);
    }

    #[test]
    fn test_exit_closes_loop() {
        let mut ui = TerminalUI::new(Console::default());
        for c in "exit".chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert!(ui.handle(Event::Key(key)).unwrap());
        }
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!ui.handle(Event::Key(enter)).unwrap());
    }
}
