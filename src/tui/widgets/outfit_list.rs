use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Wrap};
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::{Rect, Layout, Direction, Constraint, Alignment};
use ratatui::text::{Line, Span};
use crate::models::Outfit;
use crate::Config;
use crate::tui::widgets::closet_list::{render_list_scrollbar, truncate};
use crate::tui::widgets::color::{parse_color, get_contrast_text_color, swatch_color};
use crate::utils::format_date_short;

pub fn render_outfit_list(
    f: &mut Frame,
    area: Rect,
    outfits: &[Outfit],
    list_state: &mut ListState,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let title = format!("Outfits ({})", outfits.len());

    if outfits.is_empty() {
        let paragraph = Paragraph::new("No outfits yet")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(muted).bg(bg_color))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_width = area.width.saturating_sub(6) as usize;
    let list_items: Vec<ListItem> = outfits
        .iter()
        .map(|outfit| {
            let star = if outfit.is_favorite { "★ " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(star, Style::default().fg(accent)),
                    Span::raw(truncate(&outfit.name, max_width.saturating_sub(2))),
                ]),
                Line::from(Span::styled(
                    format!(
                        "  {} • {} • {} items",
                        outfit.occasion.display_name(),
                        format_date_short(&outfit.date_created),
                        outfit.items.len()
                    ),
                    Style::default().fg(muted),
                )),
            ])
        })
        .collect();

    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_areas[0], f.buffer_mut(), list_state);
    // Two lines per outfit
    render_list_scrollbar(f, list_areas[0], list_areas[1], outfits.len() * 2, list_state);
}

/// Outfit contents; also used under the calendar
pub fn render_outfit_detail(f: &mut Frame, area: Rect, title: &str, outfit: &Outfit, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);

    let favorite = if outfit.is_favorite { " ★" } else { "" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(outfit.name.clone(), Style::default().fg(accent).add_modifier(Modifier::BOLD)),
            Span::styled(favorite, Style::default().fg(accent)),
        ]),
        Line::from(Span::styled(
            format!("{} • {}", outfit.occasion.display_name(), format_date_short(&outfit.date_created)),
            Style::default().fg(muted),
        )),
        Line::from(""),
    ];

    if outfit.items.is_empty() {
        lines.push(Line::from(Span::styled("All items in this outfit were deleted", Style::default().fg(muted))));
    }
    for item in &outfit.items {
        let mut spans = vec![
            Span::styled("● ", Style::default().fg(swatch_color(&item.color_name))),
            Span::styled(format!("{:<12}", item.category.display_name()), Style::default().fg(muted)),
            Span::raw(item.name.clone()),
        ];
        if !item.brand.is_empty() {
            spans.push(Span::styled(format!(" ({})", item.brand), Style::default().fg(muted)));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
