use ratatui::widgets::{Block, Borders, Paragraph, Clear, Wrap};
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::text::{Line, Span};
use crate::Config;
use crate::tui::app::ONBOARDING_PAGES;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::help::popup_area;

/// Page dots, e.g. "● ○ ○"
pub fn page_dots(page: usize, total: usize) -> String {
    (0..total)
        .map(|i| if i == page { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_onboarding(f: &mut Frame, area: Rect, page: usize, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let accent = parse_color(&active_theme.accent);
    let muted = parse_color(&active_theme.muted);

    let popup_area = popup_area(area, 70, 60);
    f.render_widget(Clear, popup_area);

    let page = page.min(ONBOARDING_PAGES.len() - 1);
    let (title, body) = ONBOARDING_PAGES[page];
    let last = page + 1 == ONBOARDING_PAGES.len();
    let action = if last { "Enter: Get started" } else { "Enter: Next" };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(accent).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(body),
        Line::from(""),
        Line::from(page_dots(page, ONBOARDING_PAGES.len())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} • ←: Back • Esc: Skip", action),
            Style::default().fg(muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Welcome")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_mark_the_current_page() {
        assert_eq!(page_dots(1, 3), "○ ● ○");
    }
}
