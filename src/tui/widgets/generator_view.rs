use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::{Style, Modifier};
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use ratatui::text::{Line, Span};
use crate::generator::{OutfitGenerator, SLOT_ORDER};
use crate::tui::app::{GeneratorField, GeneratorForm};
use crate::Config;
use crate::tui::widgets::color::{parse_color, get_contrast_text_color, swatch_color};
use crate::tui::widgets::form::{field_line, place_cursor, LABEL_WIDTH};
use crate::tui::widgets::help::popup_area;
use crate::utils::format_key_binding_for_display as key;

/// Spinner frames for slots that are still hidden
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render_generator(
    f: &mut Frame,
    area: Rect,
    generator: &OutfitGenerator,
    form: &GeneratorForm,
    spinner_tick: usize,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let muted = parse_color(&active_theme.muted);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = get_contrast_text_color(highlight_bg);

    let popup_area = popup_area(area, 60, 60);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from("")];

    match generator.draft() {
        Some(draft) if draft.is_empty() => {
            lines.push(Line::from(Span::styled(
                "Add some tops, bottoms, shoes or outerwear first",
                Style::default().fg(muted),
            )));
        }
        Some(draft) => {
            for slot in SLOT_ORDER {
                let Some(pick) = draft.pick(slot) else {
                    continue;
                };
                let label = Span::styled(format!("{:<10} ", slot.display_name()), Style::default().fg(muted));
                let line = if pick.revealed {
                    let mut spans = vec![
                        label,
                        Span::styled("● ", Style::default().fg(swatch_color(&pick.item.color_name))),
                        Span::styled(pick.item.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    ];
                    if !pick.item.brand.is_empty() {
                        spans.push(Span::styled(format!(" ({})", pick.item.brand), Style::default().fg(muted)));
                    }
                    Line::from(spans)
                } else {
                    Line::from(vec![
                        label,
                        Span::styled(SPINNER[spinner_tick % SPINNER.len()], Style::default().fg(accent)),
                    ])
                };
                lines.push(line);
            }
        }
        None => {}
    }

    lines.push(Line::from(""));

    if generator.can_save() {
        let picks_focused = form.current_field == GeneratorField::Picks;
        let name_width = popup_area.width.saturating_sub(2 + LABEL_WIDTH) as usize;
        let (shown_name, _) = form.name.visible(name_width);
        lines.push(field_line(
            "Name",
            &shown_name,
            form.current_field == GeneratorField::Name,
            fg_color,
            highlight_fg,
            highlight_bg,
        ));
        lines.push(field_line(
            "Occasion",
            &format!("< {} >", form.occasion.display_name()),
            form.current_field == GeneratorField::Occasion,
            fg_color,
            highlight_fg,
            highlight_bg,
        ));
        lines.push(Line::from(""));
        let save = key(&config.key_bindings.save);
        let hint = if picks_focused {
            format!("{}: Shuffle again • Tab: Name • {}: Save • Esc: Close", key(&config.key_bindings.generate), save)
        } else {
            format!("Tab: Next field • {}: Save • Esc: Close", save)
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(muted))));
    } else if generator.is_revealing() {
        lines.push(Line::from(Span::styled("Picking your outfit...", Style::default().fg(muted))));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{}: Shuffle again • Esc: Close", key(&config.key_bindings.generate)),
            Style::default().fg(muted),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Random Outfit")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color));

    f.render_widget(paragraph, popup_area);

    // Cursor sits in the name field while it has focus
    if form.current_field == GeneratorField::Name && generator.can_save() {
        let rows_before_name = 1 + generator.draft().map(|d| d.picks.len()).unwrap_or(0) + 1;
        place_cursor(f, popup_area, rows_before_name as u16, &form.name);
    }
}
