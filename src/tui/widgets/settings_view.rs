use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Clear};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Layout, Direction, Constraint, Alignment};
use crate::config::{MAX_REMINDER_DAYS, MIN_REMINDER_DAYS};
use crate::tui::app::SettingsRow;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};
use crate::tui::widgets::help::popup_area;
use crate::tui::App;

fn toggle(on: bool) -> &'static str {
    if on { "[x]" } else { "[ ]" }
}

fn row_label(row: SettingsRow, app: &App) -> String {
    match row {
        SettingsRow::DarkMode => format!("{} Dark mode", toggle(app.config.dark_mode)),
        SettingsRow::WashNotifications => {
            format!("{} Wash reminders", toggle(app.config.wash_notifications_enabled))
        }
        SettingsRow::ReminderDays => format!(
            "    Remind after  < {} days >  ({}-{})",
            app.config.wash_reminder_days, MIN_REMINDER_DAYS, MAX_REMINDER_DAYS
        ),
        SettingsRow::ReplayOnboarding => "    Show welcome screens again".to_string(),
    }
}

/// Render settings as a modal popup overlay
pub fn render_settings_view_modal(f: &mut Frame, area: Rect, app: &App) {
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 60, 50);
    f.render_widget(Clear, popup_area);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Settings")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner_area = outer_block.inner(popup_area);
    f.render_widget(outer_block, popup_area);

    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(inner_area);

    let items: Vec<ListItem> = SettingsRow::ALL
        .iter()
        .map(|row| ListItem::new(row_label(*row, app)))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(app.settings.selected));

    let list = List::new(items)
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));
    StatefulWidget::render(list, areas[0], f.buffer_mut(), &mut list_state);

    let paths = format!(
        "Config: {}\nDatabase: {}\n↑↓ move • Enter/Space toggle • ←→ change days • Esc close",
        crate::Config::get_config_path(app.profile)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "(unavailable)".to_string()),
        app.config.get_database_path().display(),
    );
    let footer = Paragraph::new(paths).style(Style::default().fg(muted).bg(bg_color));
    f.render_widget(footer, areas[1]);
}
