use ratatui::widgets::{Block, Borders, Paragraph, Clear, Wrap};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::text::{Line, Span};
use crate::Config;
use crate::tui::app::DeleteTarget;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};
use crate::tui::widgets::help::popup_area;

pub fn render_confirm_delete(f: &mut Frame, area: Rect, target: &DeleteTarget, selection: usize, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);
    let warning = parse_color(&active_theme.warning);

    let popup_area = popup_area(area, 50, 35);
    f.render_widget(Clear, popup_area);

    let (question, name, detail) = match target {
        DeleteTarget::Item { name, .. } => (
            "Delete this item?",
            name.as_str(),
            "Its wash history goes too. Saved outfits keep their other items.",
        ),
        DeleteTarget::Outfit { name, .. } => (
            "Delete this outfit?",
            name.as_str(),
            "The clothes in it stay in your closet.",
        ),
    };

    let text_style = Style::default().fg(fg_color).bg(bg_color);
    let mut all_lines = vec![
        Line::from(Span::styled(question, text_style)),
        Line::from(""),
        Line::from(Span::styled(name.to_string(), text_style)),
        Line::from(Span::styled(detail, Style::default().fg(warning).bg(bg_color))),
        Line::from(""),
    ];

    for (index, option) in ["Delete", "Cancel"].iter().enumerate() {
        let is_selected = index == selection;
        let prefix = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            text_style
        };
        all_lines.push(Line::from(Span::styled(format!("{}{}", prefix, option), style)));
    }

    all_lines.push(Line::from(""));
    all_lines.push(Line::from(Span::styled(
        "↑↓ to choose, Enter to confirm, Esc to cancel",
        text_style,
    )));

    let paragraph = Paragraph::new(all_lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Confirm Delete")
            .title_alignment(Alignment::Center)
            .style(text_style))
        .style(text_style)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    f.render_widget(paragraph, popup_area);
}
