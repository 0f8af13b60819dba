//! Popup overlay widget for the settings menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;

use super::theme::Theme;

const POPUP_WIDTH: u16 = 36;

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(POPUP_WIDTH, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Settings ")
            .title_style(Theme::popup_title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::dim_style());

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.state.settings_selected;
            let (prefix, style) = if selected {
                (" ▸ ", Theme::popup_selected_style())
            } else {
                ("   ", Theme::prefix_style())
            };

            // Label left-aligned, value right-aligned.
            let label_col = format!("{prefix}{:<16}", item.label());
            let value = item.value(self.state);
            let value_width = (inner.width as usize).saturating_sub(label_col.chars().count() + 1);
            lines.push(Line::from(vec![
                Span::styled(label_col, style),
                Span::styled(format!("{value:>value_width$}"), Theme::popup_value_style()),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
