use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::text::{Line, Span};
use chrono::{Local, NaiveDate, Weekday};
use crate::calendar::{self, CalendarState, DayCell};
use crate::models::Outfit;
use crate::Config;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color};

/// Week starts on Sunday
pub const FIRST_WEEKDAY: Weekday = Weekday::Sun;

/// Cell text: day number plus a dot for days with an outfit
pub fn cell_text(cell: &DayCell) -> String {
    let marker = if cell.has_outfit { '•' } else { ' ' };
    format!("{:>3}{}", cell.date.format("%-d"), marker)
}

/// Rows of the month grid: `None` pads the first week
pub fn grid_rows(state: &CalendarState, cells: &[DayCell]) -> Vec<Vec<Option<DayCell>>> {
    let mut slots: Vec<Option<DayCell>> = vec![None; state.leading_blanks(FIRST_WEEKDAY)];
    slots.extend(cells.iter().cloned().map(Some));
    slots.chunks(7).map(|week| week.to_vec()).collect()
}

pub fn render_calendar(
    f: &mut Frame,
    area: Rect,
    state: &CalendarState,
    outfits: &[Outfit],
    today: NaiveDate,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let cells = state.day_cells(outfits, today, &Local);

    let header: Vec<Span> = calendar::weekday_labels(FIRST_WEEKDAY)
        .into_iter()
        .map(|label| Span::styled(format!("{:>3} ", label), Style::default().fg(muted)))
        .collect();
    let mut lines = vec![Line::from(header)];

    for week in grid_rows(state, &cells) {
        let spans: Vec<Span> = week
            .iter()
            .map(|slot| match slot {
                None => Span::raw("    "),
                Some(cell) => {
                    let mut style = if cell.is_selected {
                        Style::default().fg(highlight_fg).bg(highlight_bg)
                    } else if cell.has_outfit {
                        Style::default().fg(accent)
                    } else {
                        Style::default().fg(fg_color)
                    };
                    if cell.is_today {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    if cell.date == state.cursor() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(cell_text(cell), style)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(state.month_title())
            .title_alignment(Alignment::Center))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
