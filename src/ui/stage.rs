//! The stage: static prefix digits followed by the live reel, centred in
//! the given area (e.g. `202` + reel reads as a year about to tick over).

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::digit::Digit;
use crate::core::reel::DigitReel;

use super::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::reel_widget::ReelWidget;
use super::theme::Theme;

/// Columns between adjacent block glyphs.
const GAP: u16 = 1;

pub struct StageWidget<'a> {
    pub prefix: &'a [Digit],
    pub reel: &'a DigitReel,
}

impl StageWidget<'_> {
    fn full_width(&self) -> u16 {
        self.prefix.len() as u16 * (GLYPH_WIDTH + GAP) + GLYPH_WIDTH
    }

    /// Where the reel lands for a given stage area.  Mouse hit-testing uses
    /// this so clicks line up with what was drawn.
    pub fn reel_area(&self, area: Rect) -> Rect {
        let full = self.full_width();
        if area.width >= full && area.height >= GLYPH_HEIGHT {
            let x = area.x + (area.width - full) / 2 + full - GLYPH_WIDTH;
            let y = area.y + (area.height - GLYPH_HEIGHT) / 2;
            Rect::new(x, y, GLYPH_WIDTH, GLYPH_HEIGHT)
        } else {
            let compact = self.prefix.len() as u16 + 1;
            let x = area.x + area.width.saturating_sub(compact) / 2 + compact - 1;
            let y = area.y + area.height / 2;
            Rect::new(x.min(area.right().saturating_sub(1)), y, 1, 1).intersection(area)
        }
    }
}

impl Widget for StageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let reel_area = self.reel_area(area);
        let prefix_style = Theme::prefix_style();

        if reel_area.height == GLYPH_HEIGHT {
            let mut x = reel_area.x - self.prefix.len() as u16 * (GLYPH_WIDTH + GAP);
            for &digit in self.prefix {
                for (row, line) in glyphs::rows(digit).iter().enumerate() {
                    buf.set_string(x, reel_area.y + row as u16, line, prefix_style);
                }
                x += GLYPH_WIDTH + GAP;
            }
        } else {
            let text: String = self.prefix.iter().map(|d| d.as_char()).collect();
            let x = reel_area.x.saturating_sub(text.len() as u16).max(area.x);
            buf.set_stringn(x, reel_area.y, &text, (reel_area.x - x) as usize, prefix_style);
        }

        ReelWidget::new(self.reel).render(reel_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<Digit> {
        s.chars().map(|c| Digit::try_from(c).unwrap()).collect()
    }

    fn reel() -> DigitReel {
        DigitReel::new(Digit::new(5).unwrap(), Digit::new(6).unwrap(), || {})
    }

    #[test]
    fn full_stage_places_reel_after_prefix() {
        let prefix = digits("202");
        let reel = reel();
        let stage = StageWidget { prefix: &prefix, reel: &reel };
        let area = Rect::new(0, 0, 40, 10);
        // 3 prefix glyphs of 4 columns + one 3-column reel = 15 wide.
        let reel_area = stage.reel_area(area);
        assert_eq!(reel_area, Rect::new(12 + 12, 2, 3, 5));
    }

    #[test]
    fn full_stage_renders_prefix_and_upper_digit() {
        let prefix = digits("202");
        let reel = reel();
        let area = Rect::new(0, 0, 15, 5);
        let mut buf = Buffer::empty(area);
        StageWidget { prefix: &prefix, reel: &reel }.render(area, &mut buf);

        let top: String = (0..15).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        let two = glyphs::rows(Digit::new(2).unwrap())[0];
        let zero = glyphs::rows(Digit::new(0).unwrap())[0];
        let five = glyphs::rows(Digit::new(5).unwrap())[0];
        assert_eq!(top, format!("{two} {zero} {two} {five}"));
    }

    #[test]
    fn cramped_stage_falls_back_to_one_line() {
        let prefix = digits("202");
        let reel = reel();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        StageWidget { prefix: &prefix, reel: &reel }.render(area, &mut buf);

        let line: String = (0..10).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(line.trim(), "2025");
    }
}
