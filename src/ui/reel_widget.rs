//! Ratatui widget that draws a [`DigitReel`] through its one-digit window.
//!
//! In full mode the two block glyphs are stacked into a strip ten rows tall
//! and the window shows five consecutive rows of it, shifted by the reel's
//! offset.  When the area is too small for block glyphs the reel collapses
//! to a single cell holding whichever digit fills most of the window.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::digit::Digit;
use crate::core::reel::{DigitReel, SCROLLED_OFFSET};

use super::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::theme::Theme;

pub struct ReelWidget {
    upper: Digit,
    lower: Digit,
    offset: f64,
    style: Style,
}

impl ReelWidget {
    pub fn new(reel: &DigitReel) -> Self {
        Self::from_parts(reel.upper(), reel.lower(), reel.offset())
    }

    pub fn from_parts(upper: Digit, lower: Digit, offset: f64) -> Self {
        Self {
            upper,
            lower,
            offset,
            style: Theme::reel_style(),
        }
    }

    /// Rows the strip has travelled, in `0..=GLYPH_HEIGHT`.
    fn shift(&self) -> u16 {
        let strip = f64::from(GLYPH_HEIGHT * 2);
        let travelled = (-self.offset * strip).round();
        travelled.clamp(0.0, f64::from(GLYPH_HEIGHT)) as u16
    }

    fn strip_row(&self, index: u16) -> &'static str {
        if index < GLYPH_HEIGHT {
            glyphs::rows(self.upper)[index as usize]
        } else {
            glyphs::rows(self.lower)[(index - GLYPH_HEIGHT) as usize]
        }
    }
}

impl Widget for ReelWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if area.width < GLYPH_WIDTH || area.height < GLYPH_HEIGHT {
            let digit = if self.offset <= SCROLLED_OFFSET / 2.0 {
                self.lower
            } else {
                self.upper
            };
            let x = area.x + area.width / 2;
            let y = area.y + area.height / 2;
            buf.set_string(x, y, digit.as_char().to_string(), self.style);
            return;
        }

        let x = area.x + (area.width - GLYPH_WIDTH) / 2;
        let y = area.y + (area.height - GLYPH_HEIGHT) / 2;
        let shift = self.shift();
        for row in 0..GLYPH_HEIGHT {
            buf.set_string(x, y + row, self.strip_row(row + shift), self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(n: u8) -> Digit {
        Digit::new(n).unwrap()
    }

    fn render(offset: f64, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        ReelWidget::from_parts(digit(5), digit(6), offset).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(buf.area.x + x, y)].symbol().to_string())
            .collect()
    }

    fn window(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height).map(|y| row_text(buf, y)).collect()
    }

    fn glyph(n: u8) -> Vec<String> {
        glyphs::rows(digit(n)).iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn at_rest_only_upper_digit_is_drawn() {
        let buf = render(0.0, Rect::new(0, 0, GLYPH_WIDTH, GLYPH_HEIGHT));
        assert_eq!(window(&buf), glyph(5));
    }

    #[test]
    fn fully_scrolled_only_lower_digit_is_drawn() {
        let buf = render(SCROLLED_OFFSET, Rect::new(0, 0, GLYPH_WIDTH, GLYPH_HEIGHT));
        assert_eq!(window(&buf), glyph(6));
    }

    #[test]
    fn partial_scroll_straddles_both_digits() {
        // -0.1 of a ten-row strip is one row of travel.
        let buf = render(-0.1, Rect::new(0, 0, GLYPH_WIDTH, GLYPH_HEIGHT));
        let rows = window(&buf);
        assert_eq!(rows[0], glyph(5)[1]);
        assert_eq!(rows[4], glyph(6)[0]);
    }

    #[test]
    fn overshoot_is_clamped_to_the_strip() {
        let buf = render(-0.9, Rect::new(0, 0, GLYPH_WIDTH, GLYPH_HEIGHT));
        assert_eq!(window(&buf), glyph(6));
        let buf = render(0.3, Rect::new(0, 0, GLYPH_WIDTH, GLYPH_HEIGHT));
        assert_eq!(window(&buf), glyph(5));
    }

    #[test]
    fn draws_nothing_outside_the_window() {
        let area = Rect::new(0, 0, 5, 9);
        let buf = render(-0.2, area);
        // Rows above and below the centred five-row window stay blank.
        assert_eq!(row_text(&buf, 0).trim(), "");
        assert_eq!(row_text(&buf, 1).trim(), "");
        assert_eq!(row_text(&buf, 7).trim(), "");
        assert_eq!(row_text(&buf, 8).trim(), "");
    }

    #[test]
    fn compact_mode_switches_digit_past_midpoint() {
        let area = Rect::new(0, 0, 1, 1);
        assert_eq!(window(&render(0.0, area)), vec!["5"]);
        assert_eq!(window(&render(-0.2, area)), vec!["5"]);
        assert_eq!(window(&render(-0.3, area)), vec!["6"]);
        assert_eq!(window(&render(SCROLLED_OFFSET, area)), vec!["6"]);
    }
}
