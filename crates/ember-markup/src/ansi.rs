//! SGR escape translation
//!
//! Uses the vte crate to interpret the `ESC [ n ; n ... m` subset the console
//! understands (reset, intensity, 30-39, 40-49) and converts between SGR
//! escapes and two-character color codes.

use crate::color::{Color, ColorRegistry, CARRY_CODE, RESET_CODE};
use crate::style::StyleKey;
use vte::{Params, Perform};

/// Escape character that starts an SGR sequence
pub const ESCAPE: char = '\x1b';

/// Normal intensity palette
pub const NORMAL: [Color; 8] = [
    Color::rgb(0, 0, 0),
    Color::rgb(178, 0, 0),
    Color::rgb(0, 178, 0),
    Color::rgb(178, 178, 0),
    Color::rgb(0, 0, 174),
    Color::rgb(178, 0, 178),
    Color::rgb(0, 178, 178),
    Color::rgb(182, 182, 182),
];

/// Intense palette, selected by SGR 1 ahead of a foreground color
pub const BRIGHT: [Color; 8] = [
    Color::rgb(128, 128, 128),
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(255, 255, 0),
    Color::rgb(66, 66, 255),
    Color::rgb(255, 0, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 255, 255),
];

/// Persistent attribute state built from SGR escapes.
///
/// `None` channels paint with the console's default style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnsiAttributes {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

/// Collects the effect of SGR sequences on a set of attributes
struct SgrState {
    attrs: AnsiAttributes,
}

impl Perform for SgrState {
    fn print(&mut self, _c: char) {}

    fn execute(&mut self, _byte: u8) {}

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _c: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, c: char) {
        if c != 'm' || !intermediates.is_empty() {
            return;
        }

        if params.is_empty() {
            self.attrs = AnsiAttributes::default();
            return;
        }

        // Intensity only applies to colors later in the same sequence
        let mut intense = false;
        for param in params.iter() {
            if let Some(&code) = param.first() {
                handle_sgr(&mut self.attrs, &mut intense, code);
            }
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}

/// Handle a single SGR parameter
fn handle_sgr(attrs: &mut AnsiAttributes, intense: &mut bool, code: u16) {
    match code {
        0 => {
            *attrs = AnsiAttributes::default();
            *intense = false;
        }
        1 => *intense = true,

        30..=37 => {
            let index = (code - 30) as usize;
            attrs.fg = Some(if *intense { BRIGHT[index] } else { NORMAL[index] });
            attrs.bold = *intense;
        }
        39 => {
            attrs.fg = None;
            attrs.bold = false;
        }

        40..=47 => attrs.bg = Some(NORMAL[(code - 40) as usize]),
        49 => attrs.bg = None,

        _ => {}
    }
}

/// Apply one escape sequence (`ESC [ ... m`) on top of `previous`
pub fn apply_sgr(previous: AnsiAttributes, escape: &str) -> AnsiAttributes {
    let mut parser = vte::Parser::new();
    let mut state = SgrState { attrs: previous };
    for byte in escape.bytes() {
        parser.advance(&mut state, byte);
    }
    state.attrs
}

/// Length in chars of the SGR sequence starting at `chars[start]`, if it is
/// a complete `ESC [ digits/semicolons m` sequence.
pub(crate) fn sgr_len(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&ESCAPE) || chars.get(start + 1) != Some(&'[') {
        return None;
    }

    let mut end = start + 2;
    while let Some(&c) = chars.get(end) {
        match c {
            'm' => return Some(end - start + 1),
            '0'..='9' | ';' => end += 1,
            _ => return None,
        }
    }
    None
}

/// Rewrite color codes in `input` as SGR escapes.
///
/// Doubled triggers are kept as they are. Codes that name colors outside the
/// 16-color palette produce no parameter for their channel.
pub fn dc_to_ansi(input: &str, registry: &ColorRegistry, trigger: char) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == trigger {
            if chars.get(i + 1) == Some(&trigger) {
                output.push(trigger);
                output.push(trigger);
                i += 2;
                continue;
            }
            if i + 2 < chars.len() {
                output.push_str(&sgr_for_key(StyleKey::new(chars[i + 1], chars[i + 2]), registry));
                i += 3;
                continue;
            }
        }
        output.push(c);
        i += 1;
    }

    output
}

/// SGR escape equivalent to one color code, or an empty string
fn sgr_for_key(key: StyleKey, registry: &ColorRegistry) -> String {
    if key.fg == RESET_CODE || key.bg == RESET_CODE {
        return format!("{ESCAPE}[0m");
    }

    let mut codes: Vec<String> = Vec::new();

    if let Some(color) = registry.get(key.fg) {
        if let Some(index) = NORMAL.iter().position(|c| *c == color) {
            codes.push(format!("3{index}"));
        } else if let Some(index) = BRIGHT.iter().position(|c| *c == color) {
            codes.push("1".to_string());
            codes.push(format!("3{index}"));
        }
    }

    if let Some(color) = registry.get(key.bg) {
        // Intense backgrounds have no code in the supported subset
        let index = NORMAL
            .iter()
            .position(|c| *c == color)
            .or_else(|| BRIGHT.iter().position(|c| *c == color));
        if let Some(index) = index {
            codes.push(format!("4{index}"));
        }
    }

    if codes.is_empty() {
        String::new()
    } else {
        format!("{ESCAPE}[{}m", codes.join(";"))
    }
}

/// Rewrite SGR escapes in `input` as color codes.
///
/// Channels an escape does not touch become the carry code; a reset maps to
/// the default style's codes. Literal triggers are doubled so they survive.
pub fn ansi_to_dc(input: &str, registry: &ColorRegistry, trigger: char, default: StyleKey) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(len) = sgr_len(&chars, i) {
            let escape: String = chars[i..i + len].iter().collect();
            let key = key_for_sgr(&escape, registry, default);
            output.push(trigger);
            output.push(key.fg);
            output.push(key.bg);
            i += len;
            continue;
        }

        if chars[i] == trigger {
            output.push(trigger);
        }
        output.push(chars[i]);
        i += 1;
    }

    output
}

/// Color code equivalent to one SGR escape
fn key_for_sgr(escape: &str, registry: &ColorRegistry, default: StyleKey) -> StyleKey {
    let body = &escape[2..escape.len() - 1];
    let mut fg = None;
    let mut bg = None;
    let mut intense = false;

    if body.is_empty() {
        return default;
    }

    for part in body.split(';') {
        let code: u16 = match part.parse() {
            Ok(code) => code,
            Err(_) if part.is_empty() => 0,
            Err(_) => continue,
        };

        match code {
            0 => {
                fg = Some(default.fg);
                bg = Some(default.bg);
                intense = false;
            }
            1 => intense = true,
            30..=37 => {
                let index = (code - 30) as usize;
                let color = if intense { BRIGHT[index] } else { NORMAL[index] };
                fg = registry.code_for(color).or(fg);
            }
            39 => fg = Some(default.fg),
            40..=47 => bg = registry.code_for(NORMAL[(code - 40) as usize]).or(bg),
            49 => bg = Some(default.bg),
            _ => {}
        }
    }

    StyleKey::new(fg.unwrap_or(CARRY_CODE), bg.unwrap_or(CARRY_CODE))
}
