use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use chrono::Utc;
use crate::filter::needs_wash;
use crate::models::ClothingItem;
use crate::Config;
use crate::tui::widgets::color::{parse_color, swatch_color};
use crate::utils::format_date_short;

/// How many wash records the detail pane lists
pub const RECENT_WASHES: usize = 5;

/// "Washed today", "Washed 3 days ago" or "Never washed"
pub fn last_washed_label(days: Option<i64>) -> String {
    match days {
        None => "Never washed".to_string(),
        Some(0) => "Washed today".to_string(),
        Some(1) => "Washed yesterday".to_string(),
        Some(days) => format!("Washed {} days ago", days),
    }
}

pub fn render_item_view(
    f: &mut Frame,
    area: Rect,
    item: &ClothingItem,
    outfit_count: usize,
    config: &Config,
) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);
    let warning = parse_color(&active_theme.warning);
    let label = Style::default().fg(muted);
    let now = Utc::now();

    let mut lines = vec![
        Line::from(Span::styled(item.name.clone(), Style::default().fg(accent).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![Span::styled("Category: ", label), Span::raw(item.category.display_name())]),
    ];

    if !item.color_name.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Color:    ", label),
            Span::styled("● ", Style::default().fg(swatch_color(&item.color_name))),
            Span::raw(item.color_name.clone()),
        ]));
    }
    if !item.brand.is_empty() {
        lines.push(Line::from(vec![Span::styled("Brand:    ", label), Span::raw(item.brand.clone())]));
    }
    lines.push(Line::from(vec![
        Span::styled("Added:    ", label),
        Span::raw(format_date_short(&item.date_added)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Outfits:  ", label),
        Span::raw(outfit_count.to_string()),
    ]));

    lines.push(Line::from(""));
    let washed = last_washed_label(item.days_since_last_wash_at(now));
    let washed_style = if needs_wash(item, now) {
        Style::default().fg(warning)
    } else {
        Style::default().fg(fg_color)
    };
    lines.push(Line::from(Span::styled(washed, washed_style)));
    lines.push(Line::from(vec![
        Span::styled("Wash count: ", label),
        Span::raw(item.wash_count.to_string()),
    ]));

    if !item.wash_records.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Recent washes", label)));
        for record in item.wash_records.iter().take(RECENT_WASHES) {
            lines.push(Line::from(format!(
                "  {}  {}",
                format_date_short(&record.date),
                record.wash_type.display_name()
            )));
        }
    }

    if !item.notes.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Notes", label)));
        lines.push(Line::from(item.notes.clone()));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

/// Placeholder for the detail pane when nothing is selected
pub fn render_empty_view(f: &mut Frame, area: Rect, message: &str, config: &Config) {
    let active_theme = config.get_active_theme();
    let muted = parse_color(&active_theme.muted);
    let bg_color = parse_color(&active_theme.bg);
    let paragraph = Paragraph::new(message.to_string())
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .style(Style::default().fg(muted).bg(bg_color))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wash_labels() {
        assert_eq!(last_washed_label(None), "Never washed");
        assert_eq!(last_washed_label(Some(0)), "Washed today");
        assert_eq!(last_washed_label(Some(1)), "Washed yesterday");
        assert_eq!(last_washed_label(Some(9)), "Washed 9 days ago");
    }
}
