use ratatui::layout::{Rect, Layout as RatLayout, Direction, Constraint};

pub struct Layout {
    pub inner_area: Rect,  // Area inside the outer border
    pub tabs_area: Rect,
    pub chips_area: Rect,
    pub list_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: the seven-column calendar grid needs 7 * 4 cells plus borders
    /// Height: 2 outer borders + 1 tabs + 3 chips + content + 1 status
    pub const MIN_WIDTH: u16 = 50;
    pub const MIN_HEIGHT: u16 = 16;

    /// Share of the content row given to the list pane
    pub const LIST_WIDTH_PERCENT: u16 = 45;

    pub fn calculate(size: Rect) -> Self {
        // Ensure minimum terminal size (accounting for outer border)
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        // Tabs (1 line), chips (bordered, 3 lines), content, status (1 line)
        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner_area);

        let list_width = (inner_area.width * Self::LIST_WIDTH_PERCENT / 100)
            .max(24)
            .min(inner_area.width.saturating_sub(20));
        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(list_width),
                Constraint::Min(1),
            ])
            .split(vertical[2]);

        Self {
            inner_area,
            tabs_area: vertical[0],
            chips_area: vertical[1],
            list_area: horizontal[0],
            detail_area: horizontal[1],
            status_area: vertical[3],
        }
    }
}
