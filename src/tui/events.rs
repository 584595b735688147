use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, size as terminal_size};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};
use tracing::error;
use crate::tui::app::{BuilderField, GeneratorField, ItemField, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::editor::Editor;
use crate::tui::App;
use crate::utils::{parse_key_binding, ParsedKeyBinding};

/// Longest time the loop sleeps waiting for input
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or alternate screen, the user's
/// terminal will be unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen so the error
    // lands in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;

    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();
        app.tick(Instant::now());

        let terminal_size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Wake up for the next reveal even if no key arrives
        let timeout = app
            .next_timer_due()
            .map(|due| due.saturating_duration_since(Instant::now()).min(MAX_POLL_INTERVAL))
            .unwrap_or(MAX_POLL_INTERVAL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    // Only process Press events (ignore Release events to prevent double-processing on Windows)
                    if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Layout is recalculated from terminal.size() on the next draw
                }
                _ => {}
            }
        }
    }

    guard.restore()?;

    Ok(())
}

fn binding(key_str: &str) -> Result<ParsedKeyBinding, TuiError> {
    parse_key_binding(key_str).map_err(TuiError::KeyBindingError)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Ctrl on Windows/Linux, Option/Alt on macOS
    let has_primary_mod = crate::utils::has_primary_modifier(key_event.modifiers);
    if binding.requires_ctrl != has_primary_mod {
        return false;
    }
    binding.key_code == key_event.code
}

fn is_binding(key_event: KeyEvent, key_str: &str) -> Result<bool, TuiError> {
    Ok(matches_key_event(key_event, &binding(key_str)?))
}

/// Surface a failed action in the status bar instead of tearing down the UI.
/// Terminal errors still propagate.
fn report(app: &mut App, result: Result<(), TuiError>) -> Result<(), TuiError> {
    match result {
        Ok(()) => Ok(()),
        Err(TuiError::IoError(e)) => Err(TuiError::IoError(e)),
        Err(e) => {
            error!(error = %e, "action failed");
            app.set_status_message(format!("Error: {}", e));
            Ok(())
        }
    }
}

fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match app.ui.mode {
        Mode::Onboarding => handle_onboarding_mode(app, key_event),
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Settings => handle_settings_mode(app, key_event),
        Mode::AddItem => handle_add_item_mode(app, key_event),
        Mode::WashPicker => handle_wash_picker(app, key_event),
        Mode::ConfirmDelete => handle_delete_confirmation_modal(app, key_event),
        Mode::Builder => handle_builder_mode(app, key_event),
        Mode::Generator => handle_generator_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn handle_onboarding_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let result = match key_event.code {
        KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => app.next_onboarding_page(),
        KeyCode::Left => {
            app.previous_onboarding_page();
            Ok(())
        }
        KeyCode::Esc => app.complete_onboarding(),
        _ => Ok(()),
    };
    report(app, result.map_err(TuiError::from))?;
    Ok(false)
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || is_binding(key_event, &app.config.key_bindings.help)? {
        app.exit_help_mode();
    }
    Ok(false)
}

fn handle_settings_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || is_binding(key_event, &app.config.key_bindings.settings)? {
        app.exit_settings_mode();
        return Ok(false);
    }

    let result = match key_event.code {
        KeyCode::Up => {
            app.move_settings_selection(false);
            Ok(())
        }
        KeyCode::Down => {
            app.move_settings_selection(true);
            Ok(())
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('+') => app.adjust_setting(true),
        KeyCode::Left | KeyCode::Char('-') => app.adjust_setting(false),
        _ => {
            if is_binding(key_event, &app.config.key_bindings.list_up)? {
                app.move_settings_selection(false);
            } else if is_binding(key_event, &app.config.key_bindings.list_down)? {
                app.move_settings_selection(true);
            }
            Ok(())
        }
    };
    report(app, result.map_err(TuiError::from))?;
    Ok(false)
}

/// Shared text editing keys for single-line fields
fn edit_text(editor: &mut Editor, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => editor.insert_char(c),
        KeyCode::Backspace => editor.delete_char(),
        KeyCode::Delete => editor.delete_forward(),
        KeyCode::Left => editor.move_cursor_left(),
        KeyCode::Right => editor.move_cursor_right(),
        KeyCode::Home => editor.move_cursor_home(),
        KeyCode::End => editor.move_cursor_end(),
        _ => {}
    }
}

fn handle_add_item_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if is_binding(key_event, &app.config.key_bindings.save)? {
        let result = app.save_item_form();
        report(app, result)?;
        return Ok(false);
    }

    let on_category = app
        .form
        .item_form
        .as_ref()
        .is_some_and(|form| form.current_field == ItemField::Category);

    match key_event.code {
        KeyCode::Esc => app.exit_add_item_mode(),
        KeyCode::Tab | KeyCode::Down => app.navigate_item_field(true),
        KeyCode::BackTab | KeyCode::Up => app.navigate_item_field(false),
        KeyCode::Enter => {
            // Enter on the last field saves, elsewhere it advances
            let on_last = app
                .form
                .item_form
                .as_ref()
                .is_some_and(|form| form.current_field == ItemField::Notes);
            if on_last {
                let result = app.save_item_form();
                report(app, result)?;
            } else {
                app.navigate_item_field(true);
            }
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_category => {
            app.cycle_item_category(key_event.code != KeyCode::Left);
        }
        _ => {
            if let Some(editor) = app.current_item_editor() {
                edit_text(editor, key_event);
            }
        }
    }
    Ok(false)
}

fn handle_wash_picker(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.ui.mode = Mode::View,
        KeyCode::Up | KeyCode::Left => app.cycle_wash_type(false),
        KeyCode::Down | KeyCode::Right | KeyCode::Tab => app.cycle_wash_type(true),
        KeyCode::Enter => {
            let result = app.confirm_wash();
            report(app, result)?;
        }
        _ => {
            if is_binding(key_event, &app.config.key_bindings.list_up)? {
                app.cycle_wash_type(false);
            } else if is_binding(key_event, &app.config.key_bindings.list_down)? {
                app.cycle_wash_type(true);
            }
        }
    }
    Ok(false)
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.toggle_delete_selection();
        }
        KeyCode::Enter => {
            if app.modals.delete_modal_selection == 0 {
                let result = app.confirm_delete();
                report(app, result)?;
            } else {
                app.cancel_delete();
            }
        }
        KeyCode::Char('y') => {
            let result = app.confirm_delete();
            report(app, result)?;
        }
        KeyCode::Esc | KeyCode::Char('n') => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

fn handle_builder_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if is_binding(key_event, &app.config.key_bindings.save)? {
        let result = app.save_builder();
        report(app, result)?;
        return Ok(false);
    }

    if key_event.code == KeyCode::Esc {
        app.exit_builder_mode();
        return Ok(false);
    }

    let Some(ref mut form) = app.form.builder else {
        app.ui.mode = Mode::View;
        return Ok(false);
    };

    match key_event.code {
        KeyCode::Tab => form.next_field(true),
        KeyCode::BackTab => form.next_field(false),
        _ => match form.current_field {
            BuilderField::Name => match key_event.code {
                KeyCode::Enter | KeyCode::Down => form.next_field(true),
                _ => edit_text(&mut form.name, key_event),
            },
            BuilderField::Occasion => match key_event.code {
                KeyCode::Left => form.builder.occasion = form.builder.occasion.previous(),
                KeyCode::Right | KeyCode::Char(' ') => form.builder.occasion = form.builder.occasion.next(),
                KeyCode::Enter | KeyCode::Down => form.next_field(true),
                KeyCode::Up => form.next_field(false),
                _ => {}
            },
            BuilderField::Items => match key_event.code {
                KeyCode::Up | KeyCode::Char('k') => form.move_cursor(false),
                KeyCode::Down | KeyCode::Char('j') => form.move_cursor(true),
                KeyCode::Enter | KeyCode::Char(' ') => form.toggle_at_cursor(),
                _ => {}
            },
        },
    }
    Ok(false)
}

fn handle_generator_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc {
        app.close_generator();
        return Ok(false);
    }
    if is_binding(key_event, &app.config.key_bindings.save)? {
        let result = app.save_generated_outfit();
        report(app, result)?;
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Tab => app.next_generator_field(true),
        KeyCode::BackTab => app.next_generator_field(false),
        _ => match app.form.generator.current_field {
            GeneratorField::Picks => {
                if is_binding(key_event, &app.config.key_bindings.generate)? {
                    let result = app.start_generation(Instant::now());
                    report(app, result)?;
                } else if key_event.code == KeyCode::Enter && app.generator.can_save() {
                    app.next_generator_field(true);
                }
            }
            GeneratorField::Name => match key_event.code {
                KeyCode::Enter => app.next_generator_field(true),
                _ => edit_text(&mut app.form.generator.name, key_event),
            },
            GeneratorField::Occasion => match key_event.code {
                KeyCode::Left => {
                    app.form.generator.occasion = app.form.generator.occasion.previous();
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    app.form.generator.occasion = app.form.generator.occasion.next();
                }
                KeyCode::Enter => {
                    let result = app.save_generated_outfit();
                    report(app, result)?;
                }
                _ => {}
            },
        },
    }
    Ok(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let bindings = app.config.key_bindings.clone();

    if is_binding(key_event, &bindings.quit)? {
        return Ok(true);
    }
    if is_binding(key_event, &bindings.help)? {
        app.enter_help_mode();
        return Ok(false);
    }
    if is_binding(key_event, &bindings.settings)? {
        app.enter_settings_mode();
        return Ok(false);
    }

    // Tab navigation
    if is_binding(key_event, &bindings.tab_left)? {
        app.previous_tab();
        return Ok(false);
    }
    if is_binding(key_event, &bindings.tab_right)? {
        app.next_tab();
        return Ok(false);
    }
    for (key, tab) in [(&bindings.tab_1, Tab::Closet), (&bindings.tab_2, Tab::Outfits), (&bindings.tab_3, Tab::Calendar)] {
        if is_binding(key_event, key)? {
            app.switch_tab(tab);
            return Ok(false);
        }
    }

    if is_binding(key_event, &bindings.generate)? {
        let result = app.start_generation(Instant::now());
        report(app, result)?;
        return Ok(false);
    }

    match app.ui.current_tab {
        Tab::Closet => handle_closet_keys(app, key_event, &bindings)?,
        Tab::Outfits => handle_outfit_keys(app, key_event, &bindings)?,
        Tab::Calendar => handle_calendar_keys(app, key_event, &bindings)?,
    }
    Ok(false)
}

fn handle_closet_keys(app: &mut App, key_event: KeyEvent, bindings: &crate::config::KeyBindings) -> Result<(), TuiError> {
    if is_binding(key_event, &bindings.list_up)? || key_event.code == KeyCode::Up {
        app.move_selection_up();
    } else if is_binding(key_event, &bindings.list_down)? || key_event.code == KeyCode::Down {
        app.move_selection_down();
    } else if is_binding(key_event, &bindings.new)? {
        app.enter_add_item_mode();
    } else if is_binding(key_event, &bindings.wash)? {
        app.enter_wash_picker();
    } else if is_binding(key_event, &bindings.mark_dirty)? {
        let result = app.mark_selected_dirty();
        report(app, result)?;
    } else if is_binding(key_event, &bindings.delete)? {
        app.enter_delete_confirmation();
    } else {
        match key_event.code {
            KeyCode::Char('h') => app.move_chip_cursor(false),
            KeyCode::Char('l') => app.move_chip_cursor(true),
            KeyCode::Char(' ') => app.activate_chip(),
            _ => {}
        }
    }
    Ok(())
}

fn handle_outfit_keys(app: &mut App, key_event: KeyEvent, bindings: &crate::config::KeyBindings) -> Result<(), TuiError> {
    if is_binding(key_event, &bindings.list_up)? || key_event.code == KeyCode::Up {
        app.move_selection_up();
    } else if is_binding(key_event, &bindings.list_down)? || key_event.code == KeyCode::Down {
        app.move_selection_down();
    } else if is_binding(key_event, &bindings.new)? {
        let result = app.enter_builder_mode();
        report(app, result)?;
    } else if is_binding(key_event, &bindings.favorite)? {
        let result = app.toggle_favorite_selected();
        report(app, result)?;
    } else if is_binding(key_event, &bindings.delete)? {
        app.enter_delete_confirmation();
    }
    Ok(())
}

fn handle_calendar_keys(app: &mut App, key_event: KeyEvent, bindings: &crate::config::KeyBindings) -> Result<(), TuiError> {
    if is_binding(key_event, &bindings.list_up)? || key_event.code == KeyCode::Up {
        app.calendar.move_cursor(-7);
    } else if is_binding(key_event, &bindings.list_down)? || key_event.code == KeyCode::Down {
        app.calendar.move_cursor(7);
    } else if is_binding(key_event, &bindings.select)? || key_event.code == KeyCode::Char(' ') {
        app.toggle_calendar_day();
    } else {
        match key_event.code {
            KeyCode::Char('h') => app.calendar.move_cursor(-1),
            KeyCode::Char('l') => app.calendar.move_cursor(1),
            KeyCode::Char('[') => app.calendar.previous_month(),
            KeyCode::Char(']') => app.calendar.next_month(),
            KeyCode::Esc => app.calendar.clear_selection(),
            _ => {}
        }
    }
    Ok(())
}
