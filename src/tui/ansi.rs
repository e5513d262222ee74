//! SGR escape sequences to ratatui styles
//!
//! Wrapped console text still carries its `ESC [ ... m` styling. Each line
//! becomes a [`Line`] of styled spans; the style carries over line breaks the
//! way a terminal would. Escape sequences other than SGR are dropped.

use crate::text::ansi::{is_terminator, ESC};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Convert wrapped text into styled lines, one per `\n`-separated line
pub fn to_lines(text: &str) -> Vec<Line<'static>> {
    let mut style = Style::default();
    text.split('\n')
        .map(|line| convert_line(line, &mut style))
        .collect()
}

fn convert_line(line: &str, style: &mut Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ESC => {
                let mut seq = String::new();
                for c in chars.by_ref() {
                    seq.push(c);
                    if is_terminator(c) {
                        break;
                    }
                }

                if let Some(params) = seq.strip_prefix('[').and_then(|s| s.strip_suffix('m')) {
                    let next = apply_sgr(*style, params);
                    if next != *style && !current.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut current), *style));
                    }
                    *style = next;
                }
            }
            // Wrapping counted it as one column of whitespace
            '\t' => current.push(' '),
            '\r' => {}
            c if c.is_control() => {}
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, *style));
    }
    Line::from(spans)
}

/// Apply one SGR parameter list (`"1;31"`, `"38;5;208"`, `""`) to `style`
pub fn apply_sgr(style: Style, params: &str) -> Style {
    let codes: Vec<u16> = params
        .split([';', ':'])
        .map(|p| if p.is_empty() { 0 } else { p.parse().unwrap_or(u16::MAX) })
        .collect();

    let mut style = style;
    let mut i = 0;
    while i < codes.len() {
        let code = codes[i];
        match code {
            0 => style = Style::default(),
            1 => style = style.add_modifier(Modifier::BOLD),
            2 => style = style.add_modifier(Modifier::DIM),
            3 => style = style.add_modifier(Modifier::ITALIC),
            4 => style = style.add_modifier(Modifier::UNDERLINED),
            5 | 6 => style = style.add_modifier(Modifier::SLOW_BLINK),
            7 => style = style.add_modifier(Modifier::REVERSED),
            9 => style = style.add_modifier(Modifier::CROSSED_OUT),
            22 => style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style = style.remove_modifier(Modifier::ITALIC),
            24 => style = style.remove_modifier(Modifier::UNDERLINED),
            25 => style = style.remove_modifier(Modifier::SLOW_BLINK),
            27 => style = style.remove_modifier(Modifier::REVERSED),
            29 => style = style.remove_modifier(Modifier::CROSSED_OUT),
            30..=37 => style = style.fg(basic_color(code - 30)),
            39 => style.fg = None,
            40..=47 => style = style.bg(basic_color(code - 40)),
            49 => style.bg = None,
            90..=97 => style = style.fg(bright_color(code - 90)),
            100..=107 => style = style.bg(bright_color(code - 100)),
            38 | 48 => {
                let (color, used) = extended_color(&codes[i + 1..]);
                if let Some(color) = color {
                    style = if code == 38 {
                        style.fg(color)
                    } else {
                        style.bg(color)
                    };
                }
                i += used;
            }
            _ => {}
        }
        i += 1;
    }
    style
}

/// Parse `5;n` or `2;r;g;b`; returns the color and how many codes it used
fn extended_color(rest: &[u16]) -> (Option<Color>, usize) {
    match rest {
        [5, n, ..] => (u8::try_from(*n).ok().map(Color::Indexed), 2),
        [2, r, g, b, ..] => {
            let rgb = (u8::try_from(*r), u8::try_from(*g), u8::try_from(*b));
            match rgb {
                (Ok(r), Ok(g), Ok(b)) => (Some(Color::Rgb(r, g, b)), 4),
                _ => (None, 4),
            }
        }
        _ => (None, rest.len()),
    }
}

fn basic_color(n: u16) -> Color {
    match n {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}

fn bright_color(n: u16) -> Color {
    match n {
        0 => Color::DarkGray,
        1 => Color::LightRed,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        4 => Color::LightBlue,
        5 => Color::LightMagenta,
        6 => Color::LightCyan,
        _ => Color::White,
    }
}
