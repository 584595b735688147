use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::style::{Style, Modifier};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use ratatui::layout::Rect;
use crate::Config;
use crate::filter::{FilterChip, FilterState};
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};

/// Chip row for the closet tab; the active chip is filled, the cursor chip underlined
pub fn render_filter_chips(
    f: &mut Frame,
    area: Rect,
    filter: &FilterState,
    cursor: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let mut spans = Vec::new();
    for (index, chip) in FilterChip::all_chips().into_iter().enumerate() {
        let mut style = if filter.is_chip_active(chip) {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(fg_color).bg(bg_color)
        };
        if index == cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", chip.label()), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Filter: {}", filter.summary()))
            .style(Style::default().fg(fg_color).bg(bg_color)));

    f.render_widget(paragraph, area);
}

/// Plain bordered line used in the chip row on tabs without chips
pub fn render_info_box(f: &mut Frame, area: Rect, title: &str, text: &str, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let paragraph = Paragraph::new(text.to_string())
        .block(Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color));

    f.render_widget(paragraph, area);
}
