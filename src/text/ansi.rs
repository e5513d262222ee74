//! Escape-sequence classification shared by the wrapper and the renderer
//!
//! Console logs carry `ESC [ ... final` styling sequences. Both the wrapping
//! engine and the styled-line renderer need to agree on where a sequence ends,
//! otherwise one of them would count or print bytes the other swallowed.

use unicode_width::UnicodeWidthChar;

/// Escape character that opens a control sequence
pub const ESC: char = '\x1b';

/// Whether `c` terminates an escape sequence that started with [`ESC`]
///
/// Any ASCII letter ends the sequence. `[` (0x5B) is deliberately outside
/// both ranges so the CSI introducer never closes the sequence it opens.
pub fn is_terminator(c: char) -> bool {
    matches!(c, '\x40'..='\x5a' | '\x61'..='\x7a')
}

/// Visible width of a single non-escape character
///
/// Control characters report no width from `unicode-width`; they occupy
/// nothing on screen so they count as zero here.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Visible width of a string, ignoring escape sequences
pub fn printable_width(s: &str) -> usize {
    let mut in_escape = false;
    let mut width = 0;

    for c in s.chars() {
        if c == ESC {
            in_escape = true;
        } else if in_escape {
            if is_terminator(c) {
                in_escape = false;
            }
        } else {
            width += char_width(c);
        }
    }

    width
}
