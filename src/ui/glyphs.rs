//! Block-letter digits, three cells wide and five rows tall.

use crate::core::digit::Digit;

pub const GLYPH_WIDTH: u16 = 3;
pub const GLYPH_HEIGHT: u16 = 5;

static FONT: [[&str; GLYPH_HEIGHT as usize]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    [" ▀█", "  █", "  █", "  █", "  █"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

/// Rows of the block glyph for `digit`, top to bottom.
pub fn rows(digit: Digit) -> &'static [&'static str; GLYPH_HEIGHT as usize] {
    &FONT[digit.value() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_is_glyph_width() {
        for d in 0..=9 {
            for row in rows(Digit::new(d).unwrap()) {
                assert_eq!(row.chars().count(), GLYPH_WIDTH as usize, "digit {d}");
            }
        }
    }

    #[test]
    fn glyphs_are_distinct() {
        for a in 0..=9u8 {
            for b in (a + 1)..=9 {
                assert_ne!(
                    rows(Digit::new(a).unwrap()),
                    rows(Digit::new(b).unwrap()),
                    "{a} and {b} share a glyph"
                );
            }
        }
    }
}
