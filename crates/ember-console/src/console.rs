//! The console controller
//!
//! Owns the buffer, palette, markup engine, input region and history, and
//! routes both program output and user gestures through the input region's
//! gate. With inline input off, gestures edit a separate [`InputLine`]
//! instead and the buffer only holds output.

use crate::buffer::{Cell, Edit, EditOrigin, StyledBuffer};
use crate::config::{ConsoleConfig, Theme};
use crate::display::{resolve_cells, StyledSpan};
use crate::history::{Direction, HistoryRing};
use crate::input::InputRegion;
use crate::processor::CommandProcessor;
use crate::prompt::InputLine;
use crate::scroll::{DeferredScroll, Viewport};
use crate::ConsoleError;
use ember_markup::{
    ansi_to_dc, dc_to_ansi, Color, ColorRegistry, Font, MarkupEngine, MarkupEvent, Palette, Style,
    StyleKey,
};
use std::time::{Duration, Instant};
use tracing::debug;

/// Caret gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    /// Start of the input region, or of the buffer
    Home,
    /// End of the typed input, or of the buffer
    End,
}

/// A styled text console with inline input
pub struct Console {
    config: ConsoleConfig,
    palette: Palette,
    engine: MarkupEngine,
    buffer: StyledBuffer,
    region: InputRegion,
    history: HistoryRing,

    /// Where input goes when inline input is off
    input_line: InputLine,

    viewport: Viewport,
    scroll: DeferredScroll,

    /// Viewport was at the bottom when the user last scrolled
    pinned: bool,

    processor: Option<Box<dyn CommandProcessor>>,

    /// Rejected gestures not yet reported
    alerts: usize,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        let palette = Palette::new(ColorRegistry::with_default_palette(), config.font.clone());

        let mut engine = MarkupEngine::new(config.trigger, config.default_style);
        engine.set_use_ansi(config.use_ansi);
        engine.set_directives_enabled(!config.ignore_input);

        let mut region = InputRegion::new(config.mask);
        region.set_ignore_input(config.ignore_input);
        if config.inline_input {
            region.arm_unbounded(0);
        }

        Self {
            palette,
            engine,
            buffer: StyledBuffer::new(),
            region,
            history: HistoryRing::new(config.history_capacity),
            input_line: InputLine::new(config.prompt.clone()),
            viewport: Viewport::new(config.viewport_rows),
            scroll: DeferredScroll::new(config.scroll_delay),
            pinned: true,
            processor: None,
            alerts: 0,
            config,
        }
    }

    /// Install the handler that receives submitted input
    pub fn with_processor(mut self, processor: impl CommandProcessor + 'static) -> Self {
        self.set_processor(processor);
        self
    }

    pub fn set_processor(&mut self, processor: impl CommandProcessor + 'static) {
        self.processor = Some(Box::new(processor));
    }

    pub fn clear_processor(&mut self) {
        self.processor = None;
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn buffer(&self) -> &StyledBuffer {
        &self.buffer
    }

    /// Buffer contents as plain text
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn region(&self) -> &InputRegion {
        &self.region
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn input_line(&self) -> &InputLine {
        &self.input_line
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn caret(&self) -> usize {
        self.buffer.caret()
    }

    /// Zero-based line and column of the caret
    pub fn caret_line_col(&self) -> (usize, usize) {
        let caret = self.buffer.caret();
        let mut line = 0;
        let mut line_start = 0;
        for (i, cell) in self.buffer.cells()[..caret].iter().enumerate() {
            if cell.c == '\n' {
                line += 1;
                line_start = i + 1;
            }
        }
        (line, caret - line_start)
    }

    /// Number of rejected gestures since the last call
    pub fn take_alerts(&mut self) -> usize {
        std::mem::take(&mut self.alerts)
    }

    /// Write markup: color codes, SGR escapes (in ANSI mode) and input
    /// directives.
    pub fn append(&mut self, markup: &str) {
        self.suspend_input();

        let events = self.engine.parse(markup, self.palette.registry());
        let mut configured = false;
        for event in events {
            match event {
                MarkupEvent::Text(run) => self.write(&run.text, run.style),
                MarkupEvent::Input(directive) if !self.config.inline_input => {
                    debug!("No inline input, skipping {:?}", directive);
                }
                MarkupEvent::Input(directive) => {
                    self.region.configure(self.buffer.len(), directive);
                    let placeholder = self.region.placeholder();
                    self.write(&placeholder, Style::Dc(self.config.default_style));
                    configured = true;
                }
            }
        }
        if !configured && self.config.inline_input {
            self.region.arm_unbounded(self.buffer.len());
        }

        self.resume_input();
    }

    pub fn append_system_message(&mut self, text: &str) {
        self.append_fixed(text, self.config.system_style);
    }

    pub fn append_error_message(&mut self, text: &str) {
        self.append_fixed(text, self.config.error_style);
    }

    /// Write `text` verbatim in the default style, then arm open-ended input
    /// after it. An armed bounded field is closed.
    pub fn append_without_processing(&mut self, text: &str) {
        self.write_and_rearm(text, self.config.default_style);
    }

    /// Type `text` at the caret
    pub fn type_text(&mut self, text: &str) -> bool {
        if !self.config.inline_input {
            return self.line_edit(|line| {
                line.insert(text);
                true
            });
        }

        let offset = self.buffer.caret();
        let edit = Edit::Replace {
            offset,
            len: 0,
            text: text.to_string(),
        };
        self.user_edit(edit, offset + text.chars().count())
    }

    /// Insert `text` at the caret
    pub fn paste(&mut self, text: &str) -> bool {
        if !self.config.inline_input {
            return self.type_text(text);
        }

        let offset = self.buffer.caret();
        let edit = Edit::Insert {
            offset,
            text: text.to_string(),
        };
        self.user_edit(edit, offset + text.chars().count())
    }

    pub fn backspace(&mut self) -> bool {
        if !self.config.inline_input {
            return self.line_edit(InputLine::backspace);
        }

        let caret = self.buffer.caret();
        if caret == 0 {
            self.alert();
            return false;
        }
        self.user_edit(
            Edit::Remove {
                offset: caret - 1,
                len: 1,
            },
            caret - 1,
        )
    }

    pub fn delete(&mut self) -> bool {
        if !self.config.inline_input {
            return self.line_edit(InputLine::delete);
        }

        let caret = self.buffer.caret();
        self.user_edit(
            Edit::Remove {
                offset: caret,
                len: 1,
            },
            caret,
        )
    }

    /// Propose an arbitrary user edit, leaving the caret at its offset.
    ///
    /// Without inline input the buffer is output only and every edit is
    /// rejected.
    pub fn propose_edit(&mut self, edit: Edit) -> bool {
        if !self.config.inline_input {
            self.alert();
            return false;
        }

        let caret = edit.offset();
        self.user_edit(edit, caret)
    }

    /// Move the caret, clamped into the input region while it is receiving
    /// input
    pub fn set_caret(&mut self, offset: usize) {
        if !self.config.inline_input {
            self.input_line.set_caret(offset);
            return;
        }

        let offset = if self.config.ignore_input {
            0
        } else {
            self.region.clamp_caret(offset)
        };
        self.buffer.set_caret(offset);
    }

    pub fn move_caret(&mut self, movement: CaretMove) {
        if !self.config.inline_input {
            let caret = self.input_line.caret();
            let target = match movement {
                CaretMove::Left => caret.saturating_sub(1),
                CaretMove::Right => caret + 1,
                CaretMove::Home => 0,
                CaretMove::End => self.input_line.len(),
            };
            self.input_line.set_caret(target);
            return;
        }

        let caret = self.buffer.caret();
        let receiving = self.region.is_receiving_input();
        let target = match movement {
            CaretMove::Left => caret.saturating_sub(1),
            CaretMove::Right => caret + 1,
            CaretMove::Home if receiving => self.region.start(),
            CaretMove::Home => 0,
            CaretMove::End if receiving => self.region.start() + self.region.shown_len(),
            CaretMove::End => self.buffer.len(),
        };
        self.set_caret(target);
    }

    /// Commit the current input.
    ///
    /// The trimmed value goes into history and to the processor. Without a
    /// processor the console just ends the input line, echoing the value
    /// first when it was typed on the separate input line. Returns `None`
    /// when nothing was receiving input.
    pub fn submit(&mut self) -> Option<String> {
        if self.config.ignore_input {
            self.alert();
            return None;
        }

        let input = if self.config.inline_input {
            if !self.region.is_receiving_input() {
                self.alert();
                return None;
            }
            self.region.extract_and_close()
        } else {
            self.input_line.take().trim().to_string()
        };
        debug!("Submitted input of {} chars", input.chars().count());

        match self.processor.take() {
            Some(mut processor) => {
                processor.process(self, &input);
                if self.processor.is_none() {
                    self.processor = Some(processor);
                }
            }
            None if self.config.inline_input => self.append_without_processing("\n"),
            None => self.append_without_processing(&format!("{input}\n")),
        }

        if self.config.inline_input && !self.region.is_receiving_input() {
            self.region.arm_unbounded(self.buffer.len());
            self.buffer.set_caret(self.buffer.len());
        }

        self.history.record(&input);
        Some(input)
    }

    /// Shift+Enter: break the line inside the input, or submit when
    /// newlines in input are turned off
    pub fn newline(&mut self) -> Option<String> {
        if self.config.input_field_newline {
            self.type_text("\n");
            None
        } else {
            self.submit()
        }
    }

    /// Replace open-ended input with the previous history entry
    pub fn history_older(&mut self) -> bool {
        self.recall(Direction::Older)
    }

    /// Replace open-ended input with the next history entry
    pub fn history_newer(&mut self) -> bool {
        self.recall(Direction::Newer)
    }

    /// Scroll so that `top` is the first visible line
    pub fn scroll_to(&mut self, top: usize) {
        let lines = self.buffer.line_count();
        self.viewport.scroll_to(top, lines);
        self.pinned = self.viewport.is_at_bottom(lines);
        if !self.pinned {
            self.scroll.cancel();
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_to(self.viewport.top().saturating_add_signed(delta));
    }

    /// Run the deferred scroll if it is due. Returns `true` if the viewport
    /// moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let lines = self.buffer.line_count();
        let moved = self.scroll.poll(now, &mut self.viewport, lines);
        if moved {
            self.pinned = true;
        }
        moved
    }

    /// Whether a deferred scroll is waiting to fire
    pub fn scroll_pending(&self) -> bool {
        self.scroll.is_pending()
    }

    pub fn resize_viewport(&mut self, rows: usize) -> Result<(), ConsoleError> {
        if rows == 0 {
            return Err(ConsoleError::InvalidViewport(
                "viewport needs at least one row".to_string(),
            ));
        }
        self.viewport.set_rows(rows);
        let lines = self.buffer.line_count();
        if self.pinned {
            self.viewport.scroll_to_bottom(lines);
        } else {
            self.viewport.scroll_to(self.viewport.top(), lines);
        }
        Ok(())
    }

    pub fn set_viewport_visible(&mut self, visible: bool) {
        self.viewport.set_visible(visible);
    }

    /// The viewport's lines, resolved for painting
    pub fn visible_lines(&self) -> Vec<Vec<StyledSpan>> {
        let lines = self.buffer.lines();
        let top = self.viewport.top().min(lines.len());
        let end = (top + self.viewport.rows()).min(lines.len());

        let mut previous = None;
        lines[top..end]
            .iter()
            .map(|range| {
                resolve_cells(
                    &self.buffer.cells()[range.clone()],
                    &self.palette,
                    self.config.default_style,
                    &mut previous,
                )
            })
            .collect()
    }

    pub fn add_text_color(&mut self, code: char, color: Color) -> Result<Option<Color>, ConsoleError> {
        Ok(self.palette.add_color(code, color)?)
    }

    pub fn remove_text_color(&mut self, code: char) -> Option<Color> {
        self.palette.remove_color(code)
    }

    /// Remove the first code registered for `color`
    pub fn remove_text_color_value(&mut self, color: Color) -> Option<char> {
        self.palette.remove_color_value(color)
    }

    /// Change the color behind an existing code. Returns `false` if the code
    /// is not registered.
    pub fn update_text_color(&mut self, code: char, color: Color) -> Result<bool, ConsoleError> {
        Ok(self.palette.update_color(code, color)?)
    }

    /// Move `color` to `new_code`. Returns the code it had, or `None` if no
    /// code holds it.
    pub fn update_text_color_code(
        &mut self,
        color: Color,
        new_code: char,
    ) -> Result<Option<char>, ConsoleError> {
        Ok(self.palette.move_color(color, new_code)?)
    }

    pub fn clear_text_colors(&mut self) {
        self.palette.clear();
    }

    pub fn set_font(&mut self, font: Font) {
        self.config.font = font.clone();
        self.palette.set_font(font);
    }

    pub fn set_trigger(&mut self, trigger: char) {
        self.config.trigger = trigger;
        self.engine.set_trigger(trigger);
    }

    pub fn set_default_style(&mut self, style: StyleKey) {
        self.config.default_style = style;
        self.engine.set_default_style(style);
    }

    pub fn set_system_style(&mut self, style: StyleKey) {
        self.config.system_style = style;
    }

    pub fn set_error_style(&mut self, style: StyleKey) {
        self.config.error_style = style;
    }

    pub fn set_input_style(&mut self, style: StyleKey) {
        self.config.input_style = style;
    }

    pub fn set_mask(&mut self, mask: char) {
        self.config.mask = mask;
        self.region.set_mask(mask);
    }

    pub fn set_use_ansi(&mut self, use_ansi: bool) {
        self.config.use_ansi = use_ansi;
        self.engine.set_use_ansi(use_ansi);
    }

    /// Display-only mode: every user edit is rejected, `%` is literal and
    /// the caret stays at 0
    pub fn set_ignore_input(&mut self, ignore: bool) {
        self.config.ignore_input = ignore;
        self.region.set_ignore_input(ignore);
        self.engine.set_directives_enabled(!ignore);
        if ignore {
            self.buffer.set_caret(0);
        }
    }

    pub fn set_input_carry_over(&mut self, carry_over: bool) {
        self.config.input_carry_over = carry_over;
    }

    /// Switch between editing inside the output and a separate input line.
    ///
    /// Open-ended text typed so far moves along to the new place; a bounded
    /// field is closed.
    pub fn set_inline_input(&mut self, inline: bool) {
        if inline == self.config.inline_input {
            return;
        }
        self.config.inline_input = inline;

        if inline {
            let typed = self.input_line.take();
            self.region.arm_unbounded(self.buffer.len());
            if !typed.is_empty() {
                if let Some(edit) = self.region.set_value(&typed, 0) {
                    let style = Style::Dc(self.config.input_style);
                    self.buffer
                        .submit(&mut self.region, EditOrigin::Program, edit, style);
                }
            }
            self.buffer.set_caret(self.buffer.len());
        } else {
            if self.region.is_receiving_input() && !self.region.extent().is_bounded() {
                let typed = self.region.value();
                self.remove_open_input();
                self.input_line.set_value(&typed);
            }
            self.region.reset();
            self.buffer.set_caret(self.buffer.len());
        }
        debug!("Inline input: {}", inline);
    }

    /// Prompt markup for the separate input line
    pub fn set_prompt(&mut self, prompt: &str) {
        self.config.prompt = prompt.to_string();
        self.input_line.set_prompt(prompt);
    }

    pub fn set_input_field_newline(&mut self, newline: bool) {
        self.config.input_field_newline = newline;
    }

    pub fn set_always_scroll_to_bottom(&mut self, always: bool) {
        self.config.always_scroll_to_bottom = always;
    }

    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.config.history_capacity = capacity;
        self.history.set_capacity(capacity);
    }

    pub fn set_scroll_delay(&mut self, delay: Duration) {
        self.config.scroll_delay = delay;
        self.scroll.set_delay(delay);
    }

    /// Switch style set and start over with an empty console
    pub fn apply_theme(&mut self, theme: Theme) {
        self.config.set_theme(theme);
        self.engine.set_default_style(self.config.default_style);
        self.clear();
    }

    /// Empty the buffer and start over with open-ended input at 0
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.region.reset();
        if self.config.inline_input {
            self.region.arm_unbounded(0);
        }
        self.engine.reset();
        self.scroll.cancel();
        self.viewport.scroll_to(0, 1);
        self.pinned = true;
        debug!("Console cleared");
    }

    /// The separate input line resolved for painting: prompt in its own
    /// color codes, then the typed text in the input style. `None` while
    /// input is inline.
    pub fn input_line_spans(&self) -> Option<Vec<StyledSpan>> {
        if self.config.inline_input {
            return None;
        }

        let mut cells = self.prompt_cells();
        let style = Style::Dc(self.config.input_style);
        cells.extend(self.input_line.chars().iter().map(|&c| Cell { c, style }));

        let mut previous = None;
        Some(resolve_cells(
            &cells,
            &self.palette,
            self.config.default_style,
            &mut previous,
        ))
    }

    /// Screen column of the caret on the separate input line
    pub fn input_line_column(&self) -> Option<usize> {
        if self.config.inline_input {
            return None;
        }
        Some(self.prompt_cells().len() + self.input_line.caret())
    }

    /// Rewrite color-code markup as SGR escapes
    pub fn convert_to_ansi(&self, markup: &str) -> String {
        dc_to_ansi(markup, self.palette.registry(), self.config.trigger)
    }

    /// Rewrite SGR escapes as color codes
    pub fn convert_to_dc(&self, ansi: &str) -> String {
        ansi_to_dc(
            ansi,
            self.palette.registry(),
            self.config.trigger,
            self.config.default_style,
        )
    }

    fn write(&mut self, text: &str, style: Style) {
        self.buffer.append(&mut self.region, text, style);
    }

    fn append_fixed(&mut self, text: &str, key: StyleKey) {
        if self.region.is_receiving_input() && self.region.extent().is_bounded() {
            // A bounded field sits before the tail and stays armed
            self.write(text, Style::Dc(key));
            self.schedule_scroll();
            return;
        }

        self.write_and_rearm(text, key);
    }

    fn write_and_rearm(&mut self, text: &str, key: StyleKey) {
        self.suspend_input();
        self.write(text, Style::Dc(key));
        if self.config.inline_input {
            self.region.arm_unbounded(self.buffer.len());
        }
        self.resume_input();
    }

    /// Prompt markup as cells; `%` and escapes are literal there
    fn prompt_cells(&self) -> Vec<Cell> {
        let mut engine = MarkupEngine::new(self.config.trigger, self.config.default_style);
        engine.set_directives_enabled(false);

        let mut cells = Vec::new();
        for event in engine.parse(self.input_line.prompt(), self.palette.registry()) {
            if let MarkupEvent::Text(run) = event {
                let style = run.style;
                cells.extend(run.text.chars().map(|c| Cell { c, style }));
            }
        }
        cells
    }

    /// Take typed open-ended text off the buffer tail
    fn remove_open_input(&mut self) {
        let start = self.region.start();
        let len = self.buffer.len().saturating_sub(start);
        if len > 0 {
            let edit = Edit::Remove { offset: start, len };
            let style = Style::Dc(self.config.input_style);
            self.buffer
                .submit(&mut self.region, EditOrigin::Program, edit, style);
        }
    }

    /// Park in-progress input before program output
    fn suspend_input(&mut self) {
        if self.config.ignore_input || !self.config.input_carry_over {
            return;
        }

        let Some(shape) = self.region.store() else {
            return;
        };

        // Open-ended input is at the tail; it comes back after the output
        if !shape.extent.is_bounded() {
            self.remove_open_input();
        }
    }

    /// Restore parked input, place the caret and schedule a scroll
    fn resume_input(&mut self) {
        if self.region.has_stored() {
            if let Some(edit) = self.region.restore() {
                let style = Style::Dc(self.config.input_style);
                self.buffer
                    .submit(&mut self.region, EditOrigin::Program, edit, style);
            }
        }

        let caret = if self.config.ignore_input {
            0
        } else if self.region.is_receiving_input() {
            self.region.start() + self.region.shown_len()
        } else {
            self.buffer.len()
        };
        self.buffer.set_caret(caret);

        self.schedule_scroll();
    }

    fn schedule_scroll(&mut self) {
        if self.config.always_scroll_to_bottom || self.pinned {
            self.scroll.schedule(Instant::now());
        }
    }

    fn user_edit(&mut self, edit: Edit, caret: usize) -> bool {
        let style = Style::Dc(self.config.input_style);
        if !self
            .buffer
            .submit(&mut self.region, EditOrigin::User, edit, style)
        {
            self.alert();
            return false;
        }
        self.set_caret(caret);
        true
    }

    fn line_edit(&mut self, edit: impl FnOnce(&mut InputLine) -> bool) -> bool {
        if self.config.ignore_input || !edit(&mut self.input_line) {
            self.alert();
            return false;
        }
        true
    }

    fn recall(&mut self, direction: Direction) -> bool {
        if !self.config.inline_input {
            if self.config.ignore_input {
                self.alert();
                return false;
            }
            let entry = self.history.navigate(direction).to_string();
            self.input_line.set_value(&entry);
            return true;
        }

        if self.config.ignore_input
            || !self.region.is_receiving_input()
            || self.region.extent().is_bounded()
        {
            self.alert();
            return false;
        }

        let entry = self.history.navigate(direction).to_string();
        let current = self.buffer.len().saturating_sub(self.region.start());
        let Some(edit) = self.region.set_value(&entry, current) else {
            return false;
        };

        let style = Style::Dc(self.config.input_style);
        self.buffer
            .submit(&mut self.region, EditOrigin::Program, edit, style);
        self.buffer.set_caret(self.buffer.len());
        true
    }

    fn alert(&mut self) {
        self.alerts += 1;
        debug!("Rejected gesture, {} alerts pending", self.alerts);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("config", &self.config)
            .field("buffer_len", &self.buffer.len())
            .field("region", &self.region)
            .field("has_processor", &self.processor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Phase;

    #[test]
    fn test_plain_append_arms_tail() {
        let mut console = Console::default();
        console.append("Hello\n");
        assert_eq!(console.text(), "Hello\n");
        assert_eq!(console.region().phase(), Phase::Armed);
        assert_eq!(console.region().start(), 6);
        assert_eq!(console.caret(), 6);
    }

    #[test]
    fn test_typing_before_region_is_rejected() {
        let mut console = Console::default();
        console.append("> ");
        console.set_caret(0);
        assert_eq!(console.caret(), 2);

        console.buffer.set_caret(0);
        assert!(!console.type_text("x"));
        assert_eq!(console.take_alerts(), 1);
        assert_eq!(console.text(), "> ");
    }

    #[test]
    fn test_backspace_stops_at_region_start() {
        let mut console = Console::default();
        console.append("> ");
        console.type_text("ab");
        assert!(console.backspace());
        assert!(console.backspace());
        assert!(!console.backspace());
        assert_eq!(console.text(), "> ");
    }

    #[test]
    fn test_caret_line_col() {
        let mut console = Console::default();
        console.append("one\ntwo ");
        console.type_text("x");
        assert_eq!(console.caret_line_col(), (1, 5));
    }

    #[test]
    fn test_zero_row_viewport_rejected() {
        let mut console = Console::default();
        assert!(matches!(
            console.resize_viewport(0),
            Err(ConsoleError::InvalidViewport(_))
        ));
        assert!(console.resize_viewport(5).is_ok());
        assert_eq!(console.viewport().rows(), 5);
    }

    #[test]
    fn test_ignore_input_mode() {
        let mut console = Console::default();
        console.set_ignore_input(true);
        console.append("100% done %i5;");
        assert_eq!(console.text(), "100% done %i5;");
        assert_eq!(console.caret(), 0);
        assert!(!console.type_text("x"));
        assert_eq!(console.submit(), None);
    }
}
