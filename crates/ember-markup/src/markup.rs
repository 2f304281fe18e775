//! Markup scanner
//!
//! A single left-to-right pass over an output string that recognizes:
//!
//! - `&XY` color codes (`&&` is a literal trigger)
//! - `ESC [ n ; n ... m` SGR escapes
//! - `%i[len][+|-];` input directives (`%%` is a literal percent)
//!
//! Malformed or truncated markup is passed through as text; the scanner never
//! fails.

use crate::ansi::{apply_sgr, sgr_len, AnsiAttributes};
use crate::color::{ColorRegistry, CARRY_CODE, RESET_CODE};
use crate::style::{Style, StyleKey};

/// Default character introducing a color code
pub const DEFAULT_TRIGGER: char = '&';

const DIRECTIVE: char = '%';
const DIRECTIVE_INPUT: char = 'i';
const DIRECTIVE_END: char = ';';

/// Width of an input region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    /// Fixed number of character slots (never zero)
    Bounded(usize),

    /// Open-ended input running to the end of the buffer
    Unbounded,
}

impl Extent {
    pub fn is_bounded(&self) -> bool {
        matches!(self, Extent::Bounded(_))
    }

    /// Slot count of a bounded extent, 0 otherwise
    pub fn width(&self) -> usize {
        match self {
            Extent::Bounded(width) => *width,
            Extent::Unbounded => 0,
        }
    }
}

/// A parsed `%i...;` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDirective {
    pub extent: Extent,
    pub protected: bool,
}

impl InputDirective {
    pub const UNBOUNDED: InputDirective = InputDirective {
        extent: Extent::Unbounded,
        protected: false,
    };
}

/// Text written to the buffer tail under one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: Style,
}

/// One step of scanner output, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Text(TextRun),
    Input(InputDirective),
}

/// Parse the body of an input directive: everything between `%i` and `;`.
///
/// Anything that does not describe a positive width degrades to unbounded
/// input; a trailing `+` still marks it protected.
pub fn parse_input_directive(body: &str) -> InputDirective {
    let (length, protected) = match body.chars().last() {
        Some('+') => (&body[..body.len() - 1], true),
        Some('-') => (&body[..body.len() - 1], false),
        _ => (body, false),
    };

    let extent = match length.parse::<usize>() {
        Ok(width) if width > 0 && length.bytes().all(|b| b.is_ascii_digit()) => {
            Extent::Bounded(width)
        }
        _ => Extent::Unbounded,
    };

    InputDirective { extent, protected }
}

/// Scanner with the style state that carries over between calls
#[derive(Debug, Clone)]
pub struct MarkupEngine {
    trigger: char,
    default_style: StyleKey,
    current: StyleKey,
    ansi: Option<AnsiAttributes>,
    use_ansi: bool,
    directives_enabled: bool,
}

impl MarkupEngine {
    pub fn new(trigger: char, default_style: StyleKey) -> Self {
        Self {
            trigger,
            default_style,
            current: default_style,
            ansi: None,
            use_ansi: false,
            directives_enabled: true,
        }
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    pub fn set_trigger(&mut self, trigger: char) {
        self.trigger = trigger;
    }

    pub fn default_style(&self) -> StyleKey {
        self.default_style
    }

    pub fn set_default_style(&mut self, style: StyleKey) {
        self.default_style = style;
    }

    /// Style the next run will carry in code mode
    pub fn current_style(&self) -> StyleKey {
        self.current
    }

    pub fn ansi_attributes(&self) -> Option<AnsiAttributes> {
        self.ansi
    }

    pub fn set_use_ansi(&mut self, use_ansi: bool) {
        self.use_ansi = use_ansi;
    }

    pub fn use_ansi(&self) -> bool {
        self.use_ansi
    }

    /// When disabled, `%` is ordinary text
    pub fn set_directives_enabled(&mut self, enabled: bool) {
        self.directives_enabled = enabled;
    }

    /// Forget carried style state
    pub fn reset(&mut self) {
        self.current = self.default_style;
        self.ansi = None;
    }

    /// Style a flushed run gets right now
    pub fn run_style(&self) -> Style {
        match self.ansi {
            Some(attrs) if self.use_ansi => Style::Ansi(attrs),
            _ => Style::Dc(self.current),
        }
    }

    /// Apply a two-character color code to the current style.
    ///
    /// A reset code anywhere resets the whole style. A carry code keeps that
    /// channel. Any other code is taken only if it is registered.
    pub fn apply_style_code(&mut self, fg: char, bg: char, registry: &ColorRegistry) {
        if fg == RESET_CODE || bg == RESET_CODE {
            self.current = self.default_style;
            return;
        }

        let old = self.current;
        let pick = |code: char, previous: char| {
            if code != CARRY_CODE && registry.contains(code) {
                code
            } else {
                previous
            }
        };
        self.current = StyleKey::new(pick(fg, old.fg), pick(bg, old.bg));
    }

    /// Scan `input` into runs and directives
    pub fn parse(&mut self, input: &str, registry: &ColorRegistry) -> Vec<MarkupEvent> {
        let chars: Vec<char> = input.chars().collect();
        let mut events = Vec::new();
        let mut processed = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == self.trigger {
                if chars.get(i + 1) == Some(&self.trigger) {
                    processed.push(self.trigger);
                    i += 2;
                    continue;
                }
                if i + 2 < chars.len() {
                    self.flush(&mut processed, &mut events);
                    self.apply_style_code(chars[i + 1], chars[i + 2], registry);
                    i += 3;
                    continue;
                }
            } else if let Some(len) = sgr_len(&chars, i) {
                self.flush(&mut processed, &mut events);
                let escape: String = chars[i..i + len].iter().collect();
                self.ansi = Some(apply_sgr(self.ansi.unwrap_or_default(), &escape));
                i += len;
                continue;
            } else if c == DIRECTIVE && self.directives_enabled {
                if chars.get(i + 1) == Some(&DIRECTIVE) {
                    processed.push(DIRECTIVE);
                    i += 2;
                    continue;
                }

                let end = chars[i..].iter().position(|&ch| ch == DIRECTIVE_END);
                if let (Some(DIRECTIVE_INPUT), Some(end)) = (chars.get(i + 1).copied(), end) {
                    let end = i + end;
                    let body: String = chars[i + 2..end].iter().collect();
                    let directive = parse_input_directive(&body);

                    self.flush(&mut processed, &mut events);
                    events.push(MarkupEvent::Input(directive));
                    tracing::debug!("Input directive {:?} -> {:?}", body, directive);

                    if directive.extent == Extent::Unbounded {
                        // Nothing after an open-ended directive is shown
                        return events;
                    }
                    i = end + 1;
                    continue;
                }
            }

            processed.push(c);
            i += 1;
        }

        self.flush(&mut processed, &mut events);
        events
    }

    fn flush(&self, processed: &mut String, events: &mut Vec<MarkupEvent>) {
        if processed.is_empty() {
            return;
        }
        events.push(MarkupEvent::Text(TextRun {
            text: std::mem::take(processed),
            style: self.run_style(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn engine() -> (MarkupEngine, ColorRegistry) {
        (
            MarkupEngine::new(DEFAULT_TRIGGER, StyleKey::new('x', 'b')),
            ColorRegistry::with_default_palette(),
        )
    }

    fn text(s: &str, fg: char, bg: char) -> MarkupEvent {
        MarkupEvent::Text(TextRun {
            text: s.to_string(),
            style: Style::Dc(StyleKey::new(fg, bg)),
        })
    }

    #[test_case("10", Extent::Bounded(10), false ; "bounded")]
    #[test_case("10+", Extent::Bounded(10), true ; "bounded protected")]
    #[test_case("10-", Extent::Bounded(10), false ; "bounded explicit unprotected")]
    #[test_case("", Extent::Unbounded, false ; "bare")]
    #[test_case("+", Extent::Unbounded, true ; "unbounded protected")]
    #[test_case("0", Extent::Unbounded, false ; "zero width")]
    #[test_case("abc", Extent::Unbounded, false ; "garbage")]
    #[test_case("+5", Extent::Unbounded, false ; "sign first")]
    fn test_parse_input_directive(body: &str, extent: Extent, protected: bool) {
        assert_eq!(parse_input_directive(body), InputDirective { extent, protected });
    }

    #[test]
    fn test_plain_text_is_one_run() {
        let (mut engine, registry) = engine();
        assert_eq!(engine.parse("hello world", &registry), vec![text("hello world", 'x', 'b')]);
        assert_eq!(engine.parse("", &registry), vec![]);
    }

    #[test]
    fn test_style_codes_split_runs() {
        let (mut engine, registry) = engine();
        let events = engine.parse("a&rbB&-lC", &registry);
        assert_eq!(
            events,
            vec![text("a", 'x', 'b'), text("B", 'r', 'b'), text("C", 'r', 'l')]
        );
        assert_eq!(engine.current_style(), StyleKey::new('r', 'l'));
    }

    #[test]
    fn test_doubled_trigger_is_literal() {
        let (mut engine, registry) = engine();
        assert_eq!(engine.parse("a && b", &registry), vec![text("a & b", 'x', 'b')]);
    }

    #[test]
    fn test_trailing_trigger_is_literal() {
        let (mut engine, registry) = engine();
        assert_eq!(engine.parse("end&r", &registry), vec![text("end&r", 'x', 'b')]);
        assert_eq!(engine.parse("end&", &registry), vec![text("end&", 'x', 'b')]);
    }

    #[test]
    fn test_reset_codes() {
        let (mut engine, registry) = engine();
        for code in ["&0-", "&-0", "&00", "&r0"] {
            engine.parse("&gl", &registry);
            engine.parse(code, &registry);
            assert_eq!(engine.current_style(), StyleKey::new('x', 'b'), "{code}");
        }
    }

    #[test]
    fn test_unregistered_code_carries_over() {
        let (mut engine, registry) = engine();
        engine.parse("&rl", &registry);
        engine.parse("&zg", &registry);
        assert_eq!(engine.current_style(), StyleKey::new('r', 'g'));
        engine.parse("&--", &registry);
        assert_eq!(engine.current_style(), StyleKey::new('r', 'g'));
    }

    #[test]
    fn test_style_persists_between_calls() {
        let (mut engine, registry) = engine();
        engine.parse("&cb", &registry);
        assert_eq!(engine.parse("next", &registry), vec![text("next", 'c', 'b')]);
    }

    #[test]
    fn test_bounded_directive_continues_scan() {
        let (mut engine, registry) = engine();
        let events = engine.parse("Name: %i10+; done", &registry);
        assert_eq!(
            events,
            vec![
                text("Name: ", 'x', 'b'),
                MarkupEvent::Input(InputDirective {
                    extent: Extent::Bounded(10),
                    protected: true,
                }),
                text(" done", 'x', 'b'),
            ]
        );
    }

    #[test]
    fn test_unbounded_directive_discards_rest() {
        let (mut engine, registry) = engine();
        let events = engine.parse("> %i; ignored &rb text", &registry);
        assert_eq!(
            events,
            vec![text("> ", 'x', 'b'), MarkupEvent::Input(InputDirective::UNBOUNDED)]
        );
        // The discarded code never applied
        assert_eq!(engine.current_style(), StyleKey::new('x', 'b'));
    }

    #[test]
    fn test_percent_escapes() {
        let (mut engine, registry) = engine();
        assert_eq!(engine.parse("100%% sure", &registry), vec![text("100% sure", 'x', 'b')]);
        assert_eq!(engine.parse("50% off", &registry), vec![text("50% off", 'x', 'b')]);
        assert_eq!(engine.parse("%x;", &registry), vec![text("%x;", 'x', 'b')]);
        assert_eq!(engine.parse("%", &registry), vec![text("%", 'x', 'b')]);
    }

    #[test]
    fn test_directives_disabled() {
        let (mut engine, registry) = engine();
        engine.set_directives_enabled(false);
        assert_eq!(engine.parse("%i5;%%", &registry), vec![text("%i5;%%", 'x', 'b')]);
    }

    #[test]
    fn test_sgr_escape_in_ansi_mode() {
        let (mut engine, registry) = engine();
        engine.set_use_ansi(true);
        let events = engine.parse("a\x1b[31mb", &registry);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], text("a", 'x', 'b'));
        let MarkupEvent::Text(run) = &events[1] else {
            panic!("expected text");
        };
        assert_eq!(run.text, "b");
        assert_eq!(
            run.style,
            Style::Ansi(AnsiAttributes {
                fg: Some(Color::rgb(178, 0, 0)),
                bg: None,
                bold: false,
            })
        );
    }

    #[test]
    fn test_sgr_escape_consumed_in_code_mode() {
        let (mut engine, registry) = engine();
        let events = engine.parse("a\x1b[31mb", &registry);
        assert_eq!(events, vec![text("a", 'x', 'b'), text("b", 'x', 'b')]);
    }

    #[test]
    fn test_unterminated_escape_is_text() {
        let (mut engine, registry) = engine();
        assert_eq!(engine.parse("a\x1b[31", &registry), vec![text("a\x1b[31", 'x', 'b')]);
    }
}
