//! Paint-time conversion of buffer cells
//!
//! Buffer styles are resolved against the palette only when a line is
//! drawn, so palette and font changes show up on the next paint.

use crate::buffer::Cell;
use ember_markup::{ConcreteStyle, Palette, Style, StyleKey};

/// Run of text sharing one resolved style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: ConcreteStyle,
}

/// Resolve `cells` into spans.
///
/// `previous` is the last resolved style before these cells and is updated
/// as spans are produced, so consecutive calls can paint line after line.
pub fn resolve_cells(
    cells: &[Cell],
    palette: &Palette,
    default: StyleKey,
    previous: &mut Option<ConcreteStyle>,
) -> Vec<StyledSpan> {
    let mut spans: Vec<StyledSpan> = Vec::new();
    let mut last: Option<Style> = None;

    for cell in cells {
        if last != Some(cell.style) {
            let resolved = palette.resolve(&cell.style, default, previous.as_ref());
            *previous = Some(resolved);
            last = Some(cell.style);
        }
        let Some(style) = previous.as_ref() else {
            continue;
        };

        match spans.last_mut() {
            Some(span) if span.style == *style => span.text.push(cell.c),
            _ => spans.push(StyledSpan {
                text: cell.c.to_string(),
                style: style.clone(),
            }),
        }
    }

    spans
}

/// Render spans as one line of truecolor ANSI output
pub fn render_line_ansi(spans: &[StyledSpan]) -> String {
    let mut output = String::new();
    for span in spans {
        output.push_str(&style_to_ansi(&span.style));
        output.push_str(&span.text);
    }

    // Reset at end of line
    output.push_str("\x1b[0m");
    output
}

fn style_to_ansi(style: &ConcreteStyle) -> String {
    let mut codes: Vec<u16> = vec![0];

    if style.font.bold {
        codes.push(1);
    }
    if style.font.italic {
        codes.push(3);
    }

    let (fg, bg) = (style.fg, style.bg);
    codes.extend([38, 2, fg.r as u16, fg.g as u16, fg.b as u16]);
    codes.extend([48, 2, bg.r as u16, bg.g as u16, bg.b as u16]);

    let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
    format!("\x1b[{}m", codes.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_markup::{AnsiAttributes, Color};

    const DEFAULT: StyleKey = StyleKey::new('x', 'b');

    fn cells(text: &str, style: Style) -> Vec<Cell> {
        text.chars().map(|c| Cell { c, style }).collect()
    }

    #[test]
    fn test_adjacent_cells_merge() {
        let palette = Palette::default();
        let mut line = cells("ab", Style::Dc(DEFAULT));
        line.extend(cells("cd", Style::Dc(StyleKey::new('r', 'b'))));

        let mut previous = None;
        let spans = resolve_cells(&line, &palette, DEFAULT, &mut previous);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "ab");
        assert_eq!(spans[1].text, "cd");
        assert_eq!(previous.as_ref(), Some(&spans[1].style));
    }

    #[test]
    fn test_unregistered_key_reuses_previous() {
        let palette = Palette::default();
        let mut line = cells("ab", Style::Dc(StyleKey::new('r', 'b')));
        line.extend(cells("cd", Style::Dc(StyleKey::new('?', 'b'))));

        let mut previous = None;
        let spans = resolve_cells(&line, &palette, DEFAULT, &mut previous);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "abcd");
    }

    #[test]
    fn test_ansi_style_overrides_default() {
        let palette = Palette::default();
        let attrs = AnsiAttributes {
            fg: Some(Color::rgb(178, 0, 0)),
            bg: None,
            bold: false,
        };
        let line = cells("x", Style::Ansi(attrs));

        let spans = resolve_cells(&line, &palette, DEFAULT, &mut None);
        assert_eq!(spans[0].style.fg, Color::rgb(178, 0, 0));
        assert_eq!(spans[0].style.bg, Color::BLACK);
    }

    #[test]
    fn test_render_line_ansi() {
        let palette = Palette::default();
        let line = cells("hi", Style::Dc(DEFAULT));
        let spans = resolve_cells(&line, &palette, DEFAULT, &mut None);

        assert_eq!(
            render_line_ansi(&spans),
            "\x1b[0;38;2;182;182;182;48;2;0;0;0mhi\x1b[0m"
        );
    }
}
