use ratatui::Frame;
use ratatui::widgets::{Block, Borders};
use ratatui::style::Style;
use crate::calendar::{NO_OUTFIT_FOR_DAY, NO_OUTFIT_TODAY};
use crate::models::ClothingItem;
use crate::tui::{App, Layout};
use crate::tui::app::{Mode, Tab};
use crate::tui::widgets::{
    tabs::render_tabs,
    calendar_view::render_calendar,
    closet_list::render_closet_list,
    item_view::{render_item_view, render_empty_view},
    outfit_list::{render_outfit_list, render_outfit_detail},
    status_bar::render_status_bar,
    help::render_help,
    form::{render_item_form, render_wash_picker, render_builder_form},
    filter_chips::{render_filter_chips, render_info_box},
    generator_view::render_generator,
    onboarding::render_onboarding,
    settings_view::render_settings_view_modal,
    color::parse_color,
    confirm_delete::render_confirm_delete,
};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    app.ui.frame = app.ui.frame.wrapping_add(1);

    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Closet")
        .title_alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    render_tabs(f, layout.tabs_area, app.ui.current_tab, &app.config);

    match app.ui.current_tab {
        Tab::Closet => render_closet_tab(f, app, layout),
        Tab::Outfits => render_outfits_tab(f, app, layout),
        Tab::Calendar => render_calendar_tab(f, app, layout),
    }

    // Overlays draw after the normal content
    match app.ui.mode {
        Mode::Help => render_help(f, f.area(), &app.config),
        Mode::Settings => render_settings_view_modal(f, f.area(), app),
        Mode::WashPicker => {
            if let Some(item) = app.selected_item() {
                render_wash_picker(f, f.area(), &item.name, app.modals.wash_type, &app.config);
            }
        }
        Mode::ConfirmDelete => {
            if let Some(ref target) = app.modals.delete_target {
                render_confirm_delete(f, f.area(), target, app.modals.delete_modal_selection, &app.config);
            }
        }
        Mode::Generator => {
            render_generator(f, f.area(), &app.generator, &app.form.generator, app.ui.frame / 3, &app.config);
        }
        Mode::Onboarding => render_onboarding(f, f.area(), app.ui.onboarding_page, &app.config),
        Mode::View | Mode::AddItem | Mode::Builder => {}
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_ref(), &key_hints, &app.config);
}

fn render_closet_tab(f: &mut Frame, app: &mut App, layout: &Layout) {
    render_filter_chips(f, layout.chips_area, &app.filter, app.ui.chip_index, &app.config);

    let visible: Vec<ClothingItem> = app.visible_items().into_iter().cloned().collect();
    let refs: Vec<&ClothingItem> = visible.iter().collect();
    render_closet_list(
        f,
        layout.list_area,
        &refs,
        app.items.len(),
        &app.filter,
        &mut app.ui.list_state,
        &app.config,
    );

    if let (Mode::AddItem, Some(form)) = (app.ui.mode, app.form.item_form.as_ref()) {
        render_item_form(f, layout.detail_area, form, &app.config);
    } else if let Some(item) = app.selected_item() {
        let outfit_count = item.id.map(|id| app.outfit_count_for(id)).unwrap_or(0);
        render_item_view(f, layout.detail_area, item, outfit_count, &app.config);
    } else {
        render_empty_view(f, layout.detail_area, "Select an item to view details", &app.config);
    }
}

fn render_outfits_tab(f: &mut Frame, app: &mut App, layout: &Layout) {
    let text = format!(
        "{}: generate  {}: build  {}: favorite",
        key(&app.config.key_bindings.generate),
        key(&app.config.key_bindings.new),
        key(&app.config.key_bindings.favorite),
    );
    render_info_box(f, layout.chips_area, "Outfits", &text, &app.config);

    if app.ui.mode == Mode::Builder {
        if let Some(ref mut form) = app.form.builder {
            render_builder_form(f, layout.list_area.union(layout.detail_area), form, &app.config);
            return;
        }
    }

    render_outfit_list(f, layout.list_area, &app.outfits, &mut app.ui.list_state, &app.config);
    match app.selected_outfit() {
        Some(outfit) => render_outfit_detail(f, layout.detail_area, "Outfit", outfit, &app.config),
        None => render_empty_view(f, layout.detail_area, "Generate or build an outfit", &app.config),
    }
}

fn render_calendar_tab(f: &mut Frame, app: &mut App, layout: &Layout) {
    let today = App::today();
    let focus = app.calendar.focus_date(today);
    let heading = if focus == today {
        "Today".to_string()
    } else {
        focus.format("%A, %B %-d").to_string()
    };
    render_info_box(
        f,
        layout.chips_area,
        "Calendar",
        "h/l: day  j/k: week  [/]: month  Enter: select",
        &app.config,
    );

    render_calendar(f, layout.list_area, &app.calendar, &app.outfits, today, &app.config);

    match app.calendar_focus_outfit() {
        Some(outfit) => render_outfit_detail(f, layout.detail_area, &heading, outfit, &app.config),
        None if focus == today => render_empty_view(f, layout.detail_area, NO_OUTFIT_TODAY, &app.config),
        None => render_empty_view(f, layout.detail_area, NO_OUTFIT_FOR_DAY, &app.config),
    }
}

fn get_key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Onboarding => vec![
            "←/→: Page".to_string(),
            "Enter: Next".to_string(),
            "Esc: Skip".to_string(),
        ],
        Mode::Help => vec![format!("Esc or {}: Exit help", key(&bindings.help))],
        Mode::Settings => vec![
            format!("Esc or {}: Exit settings", key(&bindings.settings)),
            "↑/↓: Navigate".to_string(),
            "←/→: Change".to_string(),
        ],
        Mode::AddItem => vec![
            "Tab: Next field".to_string(),
            "Shift+Tab: Previous field".to_string(),
            format!("{}: Save", key(&bindings.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::WashPicker => vec![
            "←/→: Wash type".to_string(),
            "Enter: Record".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::ConfirmDelete => vec![
            "←/→: Choose".to_string(),
            "Enter: Confirm".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::Builder => vec![
            "Tab: Next field".to_string(),
            "Space: Toggle item".to_string(),
            format!("{}: Save", key(&bindings.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::Generator => vec![
            format!("{}: Regenerate", key(&bindings.generate)),
            "Tab: Next field".to_string(),
            format!("{}: Save", key(&bindings.save)),
            "Esc: Close".to_string(),
        ],
        Mode::View => {
            let mut hints = vec![format!("{}: Quit", key(&bindings.quit))];
            match app.ui.current_tab {
                Tab::Closet => {
                    hints.push(format!("{}: Add", key(&bindings.new)));
                    hints.push(format!("{}: Wash", key(&bindings.wash)));
                    hints.push(format!("{}: Dirty", key(&bindings.mark_dirty)));
                    hints.push(format!("{}: Delete", key(&bindings.delete)));
                    hints.push("h/l/Space: Filter".to_string());
                }
                Tab::Outfits => {
                    hints.push(format!("{}: Build", key(&bindings.new)));
                    hints.push(format!("{}: Favorite", key(&bindings.favorite)));
                    hints.push(format!("{}: Delete", key(&bindings.delete)));
                }
                Tab::Calendar => {
                    hints.push("Enter: Select day".to_string());
                    hints.push("[/]: Month".to_string());
                }
            }
            hints.push(format!("{}: Generate", key(&bindings.generate)));
            hints.push(format!("{}: Settings", key(&bindings.settings)));
            hints.push(format!("{}: Help", key(&bindings.help)));
            hints
        }
    }
}
