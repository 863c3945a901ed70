use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use std::iter::Peekable;
use std::str::Chars;

/// mIRC 16-color palette, indexed like [`crate::ui::palette::COLOR_NAMES`].
const MIRC_PALETTE: [Color; 16] = [
    Color::Rgb(255, 255, 255), // 0  White
    Color::Rgb(0, 0, 0),       // 1  Black
    Color::Rgb(0, 0, 127),     // 2  Dark Blue
    Color::Rgb(0, 147, 0),     // 3  Dark Green
    Color::Rgb(255, 0, 0),     // 4  Red
    Color::Rgb(127, 0, 0),     // 5  Dark Red
    Color::Rgb(156, 0, 156),   // 6  Purple
    Color::Rgb(252, 127, 0),   // 7  Orange
    Color::Rgb(255, 255, 0),   // 8  Yellow
    Color::Rgb(0, 252, 0),     // 9  Light Green
    Color::Rgb(0, 147, 147),   // 10 Teal
    Color::Rgb(0, 255, 255),   // 11 Light Cyan
    Color::Rgb(0, 0, 252),     // 12 Light Blue
    Color::Rgb(255, 0, 255),   // 13 Pink
    Color::Rgb(127, 127, 127), // 14 Dark Gray
    Color::Rgb(210, 210, 210), // 15 Light Gray
];

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const RESET: char = '\x0F';
const REVERSE: char = '\x16';
const ITALIC: char = '\x1D';
const UNDERLINE: char = '\x1F';

/// Parse mIRC-formatted text into styled spans. Other control characters are
/// dropped and tabs become spaces.
pub fn parse_mirc_formatted(text: &str, base_style: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut style = base_style;
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    let flush = |current: &mut String, style: Style, spans: &mut Vec<Span<'static>>| {
        if !current.is_empty() {
            spans.push(Span::styled(std::mem::take(current), style));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            BOLD | ITALIC | UNDERLINE => {
                flush(&mut current, style, &mut spans);
                let modifier = match c {
                    BOLD => Modifier::BOLD,
                    ITALIC => Modifier::ITALIC,
                    _ => Modifier::UNDERLINED,
                };
                style = if style.add_modifier.contains(modifier) {
                    style.remove_modifier(modifier)
                } else {
                    style.add_modifier(modifier)
                };
            }
            COLOR => {
                flush(&mut current, style, &mut spans);
                match take_index(&mut chars) {
                    Some(fg) => {
                        if let Some(color) = MIRC_PALETTE.get(fg) {
                            style = style.fg(*color);
                        }
                        // Background only counts when digits follow the comma.
                        let mut lookahead = chars.clone();
                        if lookahead.next() == Some(',') {
                            if let Some(bg) = take_index(&mut lookahead) {
                                if let Some(color) = MIRC_PALETTE.get(bg) {
                                    style = style.bg(*color);
                                }
                                chars = lookahead;
                            }
                        }
                    }
                    // Bare \x03 resets colors.
                    None => {
                        style = Style {
                            fg: base_style.fg,
                            bg: base_style.bg,
                            ..style
                        };
                    }
                }
            }
            RESET => {
                flush(&mut current, style, &mut spans);
                style = base_style;
            }
            REVERSE => {
                flush(&mut current, style, &mut spans);
                let (fg, bg) = (style.fg, style.bg);
                if let Some(bg) = bg {
                    style = style.fg(bg);
                }
                if let Some(fg) = fg {
                    style = style.bg(fg);
                }
            }
            '\t' => current.push(' '),
            // Terminal control sequences from remote text never reach the screen.
            c if c.is_control() => {}
            _ => current.push(c),
        }
    }
    flush(&mut current, style, &mut spans);

    if spans.is_empty() {
        spans.push(Span::styled(String::new(), base_style));
    }
    spans
}

/// Consume up to two digits of a color index.
fn take_index(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while digits.len() < 2 {
        match chars.peek() {
            Some(c) if c.is_ascii_digit() => {
                digits.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_formatting(text: &str) -> String {
        parse_mirc_formatted(text, Style::default())
            .into_iter()
            .map(|span| span.content.into_owned())
            .collect()
    }

    #[test]
    fn test_plain_text_is_one_span() {
        let spans = parse_mirc_formatted("hello", Style::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "hello");
    }

    #[test]
    fn test_colorized_label() {
        let spans = parse_mirc_formatted("[\x02\x0310bob\x0F] hi", Style::default());
        let texts: Vec<_> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["[", "bob", "] hi"]);
        assert_eq!(spans[1].style.fg, Some(MIRC_PALETTE[10]));
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[2].style, Style::default());
    }

    #[test]
    fn test_background_requires_digits() {
        let spans = parse_mirc_formatted("\x0304,02x", Style::default());
        assert_eq!(spans[0].style.fg, Some(MIRC_PALETTE[4]));
        assert_eq!(spans[0].style.bg, Some(MIRC_PALETTE[2]));

        let spans = parse_mirc_formatted("\x0304,x", Style::default());
        assert_eq!(spans[0].content, ",x");
        assert_eq!(spans[0].style.bg, None);
    }

    #[test]
    fn test_control_characters_are_dropped() {
        assert_eq!(
            strip_formatting("< carol> \x1b]0;title\x07\x1b[2Jhi\x7f\u{9b}1m"),
            "< carol> ]0;title[2Jhi1m"
        );
        assert_eq!(strip_formatting("a\tb\r\n"), "a b");
    }

    #[test]
    fn test_multibyte_text_survives() {
        assert_eq!(strip_formatting("\x0304héllo wörld\x0F ✓"), "héllo wörld ✓");
    }
}
