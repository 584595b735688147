use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Scrollbar, ScrollbarState, ScrollbarOrientation};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Layout, Direction, Constraint, Alignment};
use ratatui::text::{Line, Span};
use chrono::Utc;
use crate::filter::{needs_wash, FilterState};
use crate::models::ClothingItem;
use crate::Config;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color, swatch_color};

/// Truncate to `max_width` characters, ending with "..." when cut
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() > max_width {
        text.chars().take(max_width.saturating_sub(3)).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

pub fn render_closet_list(
    f: &mut Frame,
    area: Rect,
    items: &[&ClothingItem],
    total_count: usize,
    filter: &FilterState,
    list_state: &mut ListState,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let warning = parse_color(&active_theme.warning);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let title = format!("Items ({} of {})", items.len(), total_count);

    if items.is_empty() {
        let paragraph = Paragraph::new(filter.empty_message())
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(muted).bg(bg_color))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    // 2 for borders, 2 for the swatch, 2 for the category symbol
    let max_width = area.width.saturating_sub(8) as usize;
    let now = Utc::now();

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let dirty = needs_wash(item, now);
            let mut spans = vec![
                Span::styled("● ", Style::default().fg(swatch_color(&item.color_name))),
                Span::styled(format!("{} ", item.category.symbol()), Style::default().fg(muted)),
                Span::raw(truncate(&item.name, max_width.saturating_sub(2))),
            ];
            if dirty {
                spans.push(Span::styled(" ~", Style::default().fg(warning)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Scrollbar
        ])
        .split(area);

    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_areas[0], f.buffer_mut(), list_state);
    render_list_scrollbar(f, list_areas[0], list_areas[1], items.len(), list_state);
}

/// Scrollbar beside a bordered list, shown only when the list overflows
pub fn render_list_scrollbar(
    f: &mut Frame,
    list_area: Rect,
    scrollbar_area: Rect,
    total_items: usize,
    list_state: &ListState,
) {
    let visible_items = list_area.height.saturating_sub(2) as usize;
    if total_items <= visible_items || scrollbar_area.width == 0 || list_area.height <= 2 {
        return;
    }

    let scrollbar_inner_area = Rect::new(
        scrollbar_area.x,
        list_area.y + 1,
        scrollbar_area.width,
        list_area.height.saturating_sub(2),
    );

    let selected_index = list_state.selected().unwrap_or(0);
    let scroll_position = selected_index.saturating_sub(visible_items.saturating_sub(1));

    let mut scrollbar_state = ScrollbarState::new(total_items)
        .viewport_content_length(visible_items)
        .position(scroll_position);

    let scrollbar = Scrollbar::default()
        .orientation(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("█");

    f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Linen shirt", 20), "Linen shirt");
        assert_eq!(truncate("Linen shirt", 8), "Linen...");
        assert_eq!(truncate("Crème brûlée", 8), "Crème...");
    }
}
