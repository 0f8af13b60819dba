//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout with the stage pane and a bottom status bar.
pub struct AppLayout {
    pub stage_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // stage pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            stage_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Inner area of the bordered stage block.
    pub fn stage_inner(&self) -> Rect {
        Rect::new(
            self.stage_area.x.saturating_add(1),
            self.stage_area.y.saturating_add(1),
            self.stage_area.width.saturating_sub(2),
            self.stage_area.height.saturating_sub(2),
        )
    }
}
