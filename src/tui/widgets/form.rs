use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, StatefulWidget, Clear};
use ratatui::style::{Color, Style, Modifier};
use ratatui::Frame;
use ratatui::layout::{Rect, Constraint, Layout, Direction, Alignment};
use ratatui::text::{Line, Span};
use crate::models::WashType;
use crate::tui::app::{BuilderField, BuilderForm, ItemField, ItemForm};
use crate::tui::widgets::color::{parse_color, get_contrast_text_color, swatch_color};
use crate::tui::widgets::editor::Editor;
use crate::tui::widgets::help::popup_area;
use crate::utils::format_key_binding_for_display as key;
use crate::Config;

/// Width of the "Label:    " column in front of every field
pub const LABEL_WIDTH: u16 = 12;

/// One "Label: value" row; the focused row is highlighted
pub fn field_line(
    label: &str,
    value: &str,
    focused: bool,
    fg: Color,
    highlight_fg: Color,
    highlight_bg: Color,
) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(highlight_fg).bg(highlight_bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fg)
    };
    Line::from(vec![
        Span::styled(format!("{:<10}", label), label_style),
        Span::raw(": "),
        Span::raw(value.to_string()),
    ])
}

/// Terminal cell of an editor's cursor in a bordered area, or `None` when it
/// falls outside. `row` counts from the first line inside the border.
pub fn cursor_position(area: Rect, row: u16, editor: &Editor) -> Option<(u16, u16)> {
    let width = area.width.saturating_sub(2 + LABEL_WIDTH) as usize;
    let (_, col) = editor.visible(width);
    let x = area.x + 1 + LABEL_WIDTH + u16::try_from(col).ok()?;
    let y = area.y + 1 + row;
    (x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1)).then_some((x, y))
}

/// Put the terminal cursor inside a text field on row `row` of `area`
pub fn place_cursor(f: &mut Frame, area: Rect, row: u16, editor: &Editor) {
    if let Some(position) = cursor_position(area, row, editor) {
        f.set_cursor_position(position);
    }
}

pub fn render_item_form(f: &mut Frame, area: Rect, form: &ItemForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let width = area.width.saturating_sub(2 + LABEL_WIDTH) as usize;
    let text_field = |label: &str, editor: &Editor, field: ItemField| {
        let (shown, _) = editor.visible(width);
        field_line(label, &shown, form.current_field == field, fg_color, highlight_fg, highlight_bg)
    };

    let mut color_line = text_field("Color", &form.color, ItemField::Color);
    if !form.color.is_blank() {
        color_line.spans.push(Span::styled(" ●", Style::default().fg(swatch_color(form.color.text()))));
    }

    let lines = vec![
        text_field("Name", &form.name, ItemField::Name),
        field_line(
            "Category",
            &format!("< {} >", form.category.display_name()),
            form.current_field == ItemField::Category,
            fg_color,
            highlight_fg,
            highlight_bg,
        ),
        color_line,
        text_field("Brand", &form.brand, ItemField::Brand),
        text_field("Notes", &form.notes, ItemField::Notes),
        Line::from(""),
        Line::from(Span::styled(
            format!("Tab: Next field • ←→: Category • {}: Save • Esc: Cancel", key(&config.key_bindings.save)),
            Style::default().fg(muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("New Item"))
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(paragraph, area);

    let focused = match form.current_field {
        ItemField::Name => Some((0, &form.name)),
        ItemField::Category => None,
        ItemField::Color => Some((2, &form.color)),
        ItemField::Brand => Some((3, &form.brand)),
        ItemField::Notes => Some((4, &form.notes)),
    };
    if let Some((row, editor)) = focused {
        place_cursor(f, area, row, editor);
    }
}

pub fn render_wash_picker(f: &mut Frame, area: Rect, item_name: &str, selected: WashType, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 40, 40);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(format!("Log a wash for {}", item_name)),
        Line::from(""),
    ];
    for wash_type in WashType::ALL {
        let is_selected = wash_type == selected;
        let radio = if is_selected { "●" } else { "○" };
        let style = if is_selected {
            Style::default().fg(highlight_fg).bg(highlight_bg)
        } else {
            Style::default().fg(fg_color)
        };
        lines.push(Line::from(Span::styled(format!("{} {}", radio, wash_type.display_name()), style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("↑↓ choose • Enter log • Esc cancel", Style::default().fg(muted))));

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Wash")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup_area);
}

pub fn render_builder_form(f: &mut Frame, area: Rect, form: &mut BuilderForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(area);

    let width = areas[0].width.saturating_sub(2 + LABEL_WIDTH) as usize;
    let (shown_name, _) = form.name.visible(width);
    let header = vec![
        field_line("Name", &shown_name, form.current_field == BuilderField::Name, fg_color, highlight_fg, highlight_bg),
        field_line(
            "Occasion",
            &format!("< {} >", form.builder.occasion.display_name()),
            form.current_field == BuilderField::Occasion,
            fg_color,
            highlight_fg,
            highlight_bg,
        ),
        Line::from(Span::styled(
            format!(
                "{} selected • Tab: Next field • Space: Toggle • {}: Save • Esc: Cancel",
                form.builder.selected_count(),
                key(&config.key_bindings.save)
            ),
            Style::default().fg(muted),
        )),
    ];
    let paragraph = Paragraph::new(header)
        .block(Block::default().borders(Borders::ALL).title("Build Outfit"))
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(paragraph, areas[0]);

    let items: Vec<ListItem> = form
        .candidates
        .iter()
        .map(|item| {
            let checked = item.id.is_some_and(|id| form.builder.is_selected(id));
            let check = if checked { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::raw(check),
                Span::styled("● ", Style::default().fg(swatch_color(&item.color_name))),
                Span::styled(format!("{} ", item.category.symbol()), Style::default().fg(muted)),
                Span::raw(item.name.clone()),
            ]))
        })
        .collect();

    let items_focused = form.current_field == BuilderField::Items;
    let list_title = if form.candidates.is_empty() { "Items (closet is empty)" } else { "Items" };
    let mut list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .style(Style::default().fg(fg_color).bg(bg_color));
    if items_focused {
        list = list.highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));
    }
    StatefulWidget::render(list, areas[1], f.buffer_mut(), &mut form.list_state);

    if form.current_field == BuilderField::Name {
        place_cursor(f, areas[0], 0, &form.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_the_editing_point() {
        let area = Rect::new(10, 5, 40, 10);
        let mut editor = Editor::from_string("Monday");
        assert_eq!(cursor_position(area, 2, &editor), Some((10 + 1 + LABEL_WIDTH + 6, 8)));

        editor.move_cursor_home();
        assert_eq!(cursor_position(area, 2, &editor), Some((10 + 1 + LABEL_WIDTH, 8)));

        editor.move_cursor_right();
        assert_eq!(cursor_position(area, 2, &editor), Some((10 + 1 + LABEL_WIDTH + 1, 8)));
    }

    #[test]
    fn cursor_stays_inside_the_field_when_text_scrolls() {
        let area = Rect::new(0, 0, 2 + LABEL_WIDTH + 5, 6);
        let editor = Editor::from_string("a long outfit name");
        // Five visible columns, the cursor sits on the last one
        let (x, y) = cursor_position(area, 0, &editor).unwrap();
        assert_eq!(x, 1 + LABEL_WIDTH + 4);
        assert_eq!(y, 1);
        assert!(x < area.right() - 1);
    }

    #[test]
    fn rows_below_the_border_are_rejected() {
        let area = Rect::new(0, 0, 40, 4);
        let editor = Editor::new();
        assert!(cursor_position(area, 1, &editor).is_some());
        assert!(cursor_position(area, 2, &editor).is_none());
    }
}
