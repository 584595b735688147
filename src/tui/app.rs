use crate::{Config, Database, Profile};
use crate::calendar::{self, CalendarState};
use crate::config::ConfigError;
use crate::database::DatabaseError;
use crate::filter::{filter_items, FilterChip, FilterState};
use crate::generator::{OutfitGenerator, RevealEvent};
use crate::models::{Category, ClothingItem, Occasion, Outfit, WashType};
use crate::store::{ItemSort, WardrobeStore};
use crate::timer::TimerQueue;
use crate::tui::error::TuiError;
use crate::tui::widgets::editor::Editor;
use crate::wardrobe::{self, NewItem, OutfitBuilder, WardrobeError};
use chrono::{Local, NaiveDate, Utc};
use ratatui::widgets::ListState;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Closet,
    Outfits,
    Calendar,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Closet, Tab::Outfits, Tab::Calendar];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Closet => "Closet",
            Tab::Outfits => "Outfits",
            Tab::Calendar => "Calendar",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Closet => 0,
            Tab::Outfits => 1,
            Tab::Calendar => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Onboarding,
    Help,
    Settings,
    AddItem,
    WashPicker,
    ConfirmDelete,
    Builder,
    Generator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Category,
    Color,
    Brand,
    Notes,
}

impl ItemField {
    const ORDER: [ItemField; 5] = [
        ItemField::Name,
        ItemField::Category,
        ItemField::Color,
        ItemField::Brand,
        ItemField::Notes,
    ];

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        Self::ORDER[next]
    }
}

#[derive(Debug, Clone)]
pub struct ItemForm {
    pub current_field: ItemField,
    pub name: Editor,
    pub category: Category,
    pub color: Editor,
    pub brand: Editor,
    pub notes: Editor,
}

impl ItemForm {
    pub fn new() -> Self {
        Self {
            current_field: ItemField::Name,
            name: Editor::new(),
            category: Category::Top,
            color: Editor::new(),
            brand: Editor::new(),
            notes: Editor::new(),
        }
    }

    pub fn to_new_item(&self) -> NewItem {
        let mut item = NewItem::new(self.name.text(), self.category);
        item.color_name = self.color.text().trim().to_string();
        item.brand = self.brand.text().trim().to_string();
        item.notes = self.notes.text().trim().to_string();
        item
    }
}

impl Default for ItemForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderField {
    Name,
    Occasion,
    Items,
}

/// Manual outfit builder: a name, an occasion and a checklist of every item
#[derive(Debug, Clone)]
pub struct BuilderForm {
    pub current_field: BuilderField,
    pub name: Editor,
    pub builder: OutfitBuilder,
    pub candidates: Vec<ClothingItem>,
    pub cursor: usize,
    pub list_state: ListState,
}

impl BuilderForm {
    pub fn new(candidates: Vec<ClothingItem>) -> Self {
        let mut list_state = ListState::default();
        if !candidates.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            current_field: BuilderField::Name,
            name: Editor::new(),
            builder: OutfitBuilder::new(),
            candidates,
            cursor: 0,
            list_state,
        }
    }

    pub fn next_field(&mut self, forward: bool) {
        self.current_field = match (self.current_field, forward) {
            (BuilderField::Name, true) => BuilderField::Occasion,
            (BuilderField::Occasion, true) => BuilderField::Items,
            (BuilderField::Items, true) => BuilderField::Name,
            (BuilderField::Name, false) => BuilderField::Items,
            (BuilderField::Occasion, false) => BuilderField::Name,
            (BuilderField::Items, false) => BuilderField::Occasion,
        };
    }

    pub fn move_cursor(&mut self, down: bool) {
        if self.candidates.is_empty() {
            return;
        }
        if down {
            self.cursor = (self.cursor + 1).min(self.candidates.len() - 1);
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.list_state.select(Some(self.cursor));
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(id) = self.candidates.get(self.cursor).and_then(|item| item.id) {
            self.builder.toggle(id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorField {
    Picks,
    Name,
    Occasion,
}

#[derive(Debug, Clone)]
pub struct GeneratorForm {
    pub current_field: GeneratorField,
    pub name: Editor,
    pub occasion: Occasion,
}

impl Default for GeneratorForm {
    fn default() -> Self {
        Self {
            current_field: GeneratorField::Picks,
            name: Editor::new(),
            occasion: Occasion::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Item { id: i64, name: String },
    Outfit { id: i64, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    DarkMode,
    WashNotifications,
    ReminderDays,
    ReplayOnboarding,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 4] = [
        SettingsRow::DarkMode,
        SettingsRow::WashNotifications,
        SettingsRow::ReminderDays,
        SettingsRow::ReplayOnboarding,
    ];
}

/// Onboarding pages: title and body
pub const ONBOARDING_PAGES: [(&str, &str); 3] = [
    (
        "Your closet, in the terminal",
        "Catalog every piece you own with its category, color and brand.",
    ),
    (
        "Keep track of laundry",
        "Log each wash. Anything not washed for a week lands in the Laundry filter.",
    ),
    (
        "Never wonder what to wear",
        "Press g to shuffle a random outfit, save the ones you like and see them on the calendar.",
    ),
];

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
    pub chip_index: usize,
    pub onboarding_page: usize,
    pub frame: usize, // render counter for the spinner
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Closet,
            mode: Mode::View,
            selected_index: 0,
            list_state: ListState::default(),
            chip_index: 0,
            onboarding_page: 0,
            frame: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct ModalState {
    pub delete_target: Option<DeleteTarget>,
    pub delete_modal_selection: usize, // 0 = Delete, 1 = Cancel
    pub wash_type: WashType,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            delete_target: None,
            delete_modal_selection: 1,
            wash_type: WashType::Machine,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub item_form: Option<ItemForm>,
    pub builder: Option<BuilderForm>,
    pub generator: GeneratorForm,
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub profile: Profile,
    pub database: Database,

    // Data collections
    pub items: Vec<ClothingItem>,
    pub outfits: Vec<Outfit>,

    // Grouped state
    pub ui: UiState,
    pub filter: FilterState,
    pub generator: OutfitGenerator,
    pub reveal_timers: TimerQueue<RevealEvent>,
    pub calendar: CalendarState,
    pub settings: SettingsState,
    pub modals: ModalState,
    pub status: StatusState,
    pub form: FormState,
}

impl App {
    pub fn new(config: Config, profile: Profile, database: Database) -> Result<Self, DatabaseError> {
        let mode = if config.has_completed_onboarding {
            Mode::View
        } else {
            Mode::Onboarding
        };

        let mut app = Self {
            config,
            profile,
            database,
            items: Vec::new(),
            outfits: Vec::new(),
            ui: UiState {
                mode,
                ..UiState::default()
            },
            filter: FilterState::default(),
            generator: OutfitGenerator::new(),
            reveal_timers: TimerQueue::new(),
            calendar: CalendarState::new(Local::now().date_naive()),
            settings: SettingsState::default(),
            modals: ModalState::default(),
            status: StatusState::default(),
            form: FormState::default(),
        };

        app.load_data()?;
        app.show_wash_reminder();
        Ok(app)
    }

    pub fn load_data(&mut self) -> Result<(), DatabaseError> {
        self.items = self.database.items(ItemSort::NewestFirst)?;
        self.outfits = self.database.outfits()?;
        self.adjust_selected_index();
        Ok(())
    }

    /// Closet items that pass the active filter chips
    pub fn visible_items(&self) -> Vec<&ClothingItem> {
        filter_items(&self.items, &self.filter, Utc::now())
    }

    fn current_list_len(&self) -> usize {
        match self.ui.current_tab {
            Tab::Closet => self.visible_items().len(),
            Tab::Outfits => self.outfits.len(),
            Tab::Calendar => 0,
        }
    }

    pub fn selected_item(&self) -> Option<&ClothingItem> {
        if self.ui.current_tab != Tab::Closet {
            return None;
        }
        self.visible_items().get(self.ui.selected_index).copied()
    }

    pub fn selected_outfit(&self) -> Option<&Outfit> {
        if self.ui.current_tab != Tab::Outfits {
            return None;
        }
        self.outfits.get(self.ui.selected_index)
    }

    /// Number of saved outfits that include the item
    pub fn outfit_count_for(&self, item_id: i64) -> usize {
        self.outfits
            .iter()
            .filter(|outfit| outfit.item_ids().contains(&item_id))
            .count()
    }

    pub fn adjust_selected_index(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            self.ui.selected_index = 0;
            self.ui.list_state.select(None);
        } else {
            self.ui.selected_index = self.ui.selected_index.min(len - 1);
            self.sync_list_state();
        }
    }

    pub fn sync_list_state(&mut self) {
        self.ui.list_state.select(Some(self.ui.selected_index));
    }

    pub fn move_selection_up(&mut self) {
        if self.ui.selected_index > 0 {
            self.ui.selected_index -= 1;
            self.sync_list_state();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.ui.selected_index < self.current_list_len().saturating_sub(1) {
            self.ui.selected_index += 1;
            self.sync_list_state();
        }
    }

    /// Switch to a new tab and select its first entry
    pub fn switch_tab(&mut self, new_tab: Tab) {
        self.ui.current_tab = new_tab;
        self.ui.selected_index = 0;
        self.adjust_selected_index();
    }

    pub fn next_tab(&mut self) {
        let index = (self.ui.current_tab.index() + 1).min(Tab::ALL.len() - 1);
        self.switch_tab(Tab::ALL[index]);
    }

    pub fn previous_tab(&mut self) {
        let index = self.ui.current_tab.index().saturating_sub(1);
        self.switch_tab(Tab::ALL[index]);
    }

    // Filter chips

    pub fn move_chip_cursor(&mut self, forward: bool) {
        let len = FilterChip::all_chips().len();
        self.ui.chip_index = if forward {
            (self.ui.chip_index + 1) % len
        } else {
            (self.ui.chip_index + len - 1) % len
        };
    }

    /// Apply the chip under the cursor and go back to the top of the list
    pub fn activate_chip(&mut self) {
        if let Some(chip) = FilterChip::all_chips().get(self.ui.chip_index).copied() {
            self.filter.apply_chip(chip);
            self.ui.selected_index = 0;
            self.adjust_selected_index();
        }
    }

    // Status bar

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    /// Reminder shown on start when wash notifications are on
    pub fn show_wash_reminder(&mut self) {
        if !self.config.wash_notifications_enabled {
            return;
        }
        let due = wardrobe::items_due_for_reminder(
            &self.items,
            self.config.wash_reminder_days,
            Utc::now(),
        )
        .len();
        if due > 0 {
            let noun = if due == 1 { "item needs" } else { "items need" };
            self.set_status_message(format!(
                "{} {} washing ({}+ days)",
                due, noun, self.config.wash_reminder_days
            ));
        }
    }

    // Onboarding

    pub fn next_onboarding_page(&mut self) -> Result<(), ConfigError> {
        if self.ui.onboarding_page + 1 >= ONBOARDING_PAGES.len() {
            self.complete_onboarding()
        } else {
            self.ui.onboarding_page += 1;
            Ok(())
        }
    }

    pub fn previous_onboarding_page(&mut self) {
        self.ui.onboarding_page = self.ui.onboarding_page.saturating_sub(1);
    }

    pub fn complete_onboarding(&mut self) -> Result<(), ConfigError> {
        self.config.has_completed_onboarding = true;
        self.config.save_with_profile(self.profile)?;
        self.ui.onboarding_page = 0;
        self.ui.mode = Mode::View;
        Ok(())
    }

    // Help and settings

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::View;
    }

    pub fn enter_settings_mode(&mut self) {
        self.settings.selected = 0;
        self.ui.mode = Mode::Settings;
    }

    pub fn exit_settings_mode(&mut self) {
        self.ui.mode = Mode::View;
    }

    pub fn move_settings_selection(&mut self, down: bool) {
        let last = SettingsRow::ALL.len() - 1;
        self.settings.selected = if down {
            (self.settings.selected + 1).min(last)
        } else {
            self.settings.selected.saturating_sub(1)
        };
    }

    /// Change the selected setting and persist the config.
    /// `forward` only matters for the reminder days stepper.
    pub fn adjust_setting(&mut self, forward: bool) -> Result<(), ConfigError> {
        let Some(row) = SettingsRow::ALL.get(self.settings.selected).copied() else {
            return Ok(());
        };
        match row {
            SettingsRow::DarkMode => {
                self.config.dark_mode = !self.config.dark_mode;
            }
            SettingsRow::WashNotifications => {
                self.config.wash_notifications_enabled = !self.config.wash_notifications_enabled;
            }
            SettingsRow::ReminderDays => {
                if forward {
                    self.config.increment_wash_reminder_days();
                } else {
                    self.config.decrement_wash_reminder_days();
                }
            }
            SettingsRow::ReplayOnboarding => {
                self.config.reset_onboarding();
                self.config.save_with_profile(self.profile)?;
                self.ui.onboarding_page = 0;
                self.ui.mode = Mode::Onboarding;
                return Ok(());
            }
        }
        self.config.save_with_profile(self.profile)
    }

    // Add item form

    pub fn enter_add_item_mode(&mut self) {
        self.form.item_form = Some(ItemForm::new());
        self.ui.mode = Mode::AddItem;
    }

    pub fn exit_add_item_mode(&mut self) {
        self.form.item_form = None;
        self.ui.mode = Mode::View;
    }

    pub fn navigate_item_field(&mut self, forward: bool) {
        if let Some(ref mut form) = self.form.item_form {
            form.current_field = form.current_field.step(forward);
        }
    }

    /// Editor for the focused text field; `None` on the category picker
    pub fn current_item_editor(&mut self) -> Option<&mut Editor> {
        let form = self.form.item_form.as_mut()?;
        match form.current_field {
            ItemField::Name => Some(&mut form.name),
            ItemField::Category => None,
            ItemField::Color => Some(&mut form.color),
            ItemField::Brand => Some(&mut form.brand),
            ItemField::Notes => Some(&mut form.notes),
        }
    }

    pub fn cycle_item_category(&mut self, forward: bool) {
        if let Some(ref mut form) = self.form.item_form {
            form.category = if forward {
                form.category.next()
            } else {
                form.category.previous()
            };
        }
    }

    pub fn save_item_form(&mut self) -> Result<(), TuiError> {
        let Some(ref form) = self.form.item_form else {
            return Ok(());
        };
        match wardrobe::add_item(&self.database, form.to_new_item(), Utc::now()) {
            Ok(item) => {
                self.exit_add_item_mode();
                self.load_data()?;
                self.select_item_by_id(item.id);
                self.set_status_message(format!("Added {}", item.name));
                Ok(())
            }
            Err(WardrobeError::Validation(e)) => {
                self.set_status_message(format!("Validation error: {}", e));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn select_item_by_id(&mut self, id: Option<i64>) {
        if let Some(index) = self.visible_items().iter().position(|item| item.id == id) {
            self.ui.selected_index = index;
            self.sync_list_state();
        }
    }

    // Laundry actions

    pub fn enter_wash_picker(&mut self) {
        if self.selected_item().is_none() {
            self.set_status_message("No item selected".to_string());
            return;
        }
        self.modals.wash_type = WashType::Machine;
        self.ui.mode = Mode::WashPicker;
    }

    pub fn cycle_wash_type(&mut self, forward: bool) {
        let len = WashType::ALL.len();
        let pos = WashType::ALL
            .iter()
            .position(|w| *w == self.modals.wash_type)
            .unwrap_or(0);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.modals.wash_type = WashType::ALL[next];
    }

    pub fn confirm_wash(&mut self) -> Result<(), TuiError> {
        self.ui.mode = Mode::View;
        let Some(id) = self.selected_item().and_then(|item| item.id) else {
            return Ok(());
        };
        let wash_type = self.modals.wash_type;
        let (item, _) = wardrobe::record_wash(&self.database, id, wash_type, Utc::now())?;
        self.load_data()?;
        self.set_status_message(format!(
            "{}: {} logged (washed {} times)",
            item.name,
            wash_type.display_name(),
            item.wash_count
        ));
        Ok(())
    }

    pub fn mark_selected_dirty(&mut self) -> Result<(), TuiError> {
        let Some(id) = self.selected_item().and_then(|item| item.id) else {
            self.set_status_message("No item selected".to_string());
            return Ok(());
        };
        let item = wardrobe::mark_dirty(&self.database, id)?;
        self.load_data()?;
        self.set_status_message(format!("{} marked as dirty", item.name));
        Ok(())
    }

    // Delete confirmation

    pub fn enter_delete_confirmation(&mut self) {
        let target = match self.ui.current_tab {
            Tab::Closet => self.selected_item().and_then(|item| {
                item.id.map(|id| DeleteTarget::Item { id, name: item.name.clone() })
            }),
            Tab::Outfits => self.selected_outfit().and_then(|outfit| {
                outfit.id.map(|id| DeleteTarget::Outfit { id, name: outfit.name.clone() })
            }),
            Tab::Calendar => None,
        };
        match target {
            Some(target) => {
                self.modals.delete_target = Some(target);
                self.modals.delete_modal_selection = 1;
                self.ui.mode = Mode::ConfirmDelete;
            }
            None => self.set_status_message("Nothing selected to delete".to_string()),
        }
    }

    pub fn toggle_delete_selection(&mut self) {
        self.modals.delete_modal_selection = 1 - self.modals.delete_modal_selection.min(1);
    }

    pub fn cancel_delete(&mut self) {
        self.modals.delete_target = None;
        self.ui.mode = Mode::View;
    }

    pub fn confirm_delete(&mut self) -> Result<(), TuiError> {
        let target = self.modals.delete_target.take();
        self.ui.mode = Mode::View;
        match target {
            Some(DeleteTarget::Item { id, name }) => {
                wardrobe::delete_item(&self.database, id)?;
                self.load_data()?;
                self.set_status_message(format!("Deleted {}", name));
            }
            Some(DeleteTarget::Outfit { id, name }) => {
                wardrobe::delete_outfit(&self.database, id)?;
                self.load_data()?;
                self.set_status_message(format!("Deleted outfit {}", name));
            }
            None => {}
        }
        Ok(())
    }

    // Outfits

    pub fn toggle_favorite_selected(&mut self) -> Result<(), TuiError> {
        let Some(id) = self.selected_outfit().and_then(|outfit| outfit.id) else {
            return Ok(());
        };
        let outfit = wardrobe::toggle_favorite(&self.database, id)?;
        self.load_data()?;
        let state = if outfit.is_favorite { "Added to" } else { "Removed from" };
        self.set_status_message(format!("{} favorites: {}", state, outfit.name));
        Ok(())
    }

    // Random generator

    /// Pick a new outfit and schedule its staggered reveal.
    /// Reveals still pending from an earlier run are cancelled first.
    pub fn start_generation(&mut self, now: Instant) -> Result<(), TuiError> {
        let cancelled = self.reveal_timers.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "cancelled pending reveals");
        }

        let items = self.database.items(ItemSort::ByName)?;
        let schedule = self.generator.generate(&items, &mut rand::thread_rng());
        for scheduled in schedule {
            self.reveal_timers.schedule_after(now, scheduled.delay, scheduled.event);
        }

        self.form.generator = GeneratorForm::default();
        self.ui.mode = Mode::Generator;
        Ok(())
    }

    /// Deliver every reveal that is due at `now`
    pub fn tick(&mut self, now: Instant) {
        for event in self.reveal_timers.drain_due(now) {
            self.generator.reveal(event);
        }
    }

    pub fn next_timer_due(&self) -> Option<Instant> {
        self.reveal_timers.next_due()
    }

    pub fn close_generator(&mut self) {
        self.reveal_timers.cancel_all();
        self.generator.clear();
        self.ui.mode = Mode::View;
    }

    /// Name and occasion only exist once the picks are revealed
    pub fn next_generator_field(&mut self, forward: bool) {
        if !self.generator.can_save() {
            return;
        }
        let form = &mut self.form.generator;
        form.current_field = match (form.current_field, forward) {
            (GeneratorField::Picks, true) => GeneratorField::Name,
            (GeneratorField::Name, true) => GeneratorField::Occasion,
            (GeneratorField::Occasion, true) => GeneratorField::Picks,
            (GeneratorField::Picks, false) => GeneratorField::Occasion,
            (GeneratorField::Name, false) => GeneratorField::Picks,
            (GeneratorField::Occasion, false) => GeneratorField::Name,
        };
    }

    pub fn save_generated_outfit(&mut self) -> Result<(), TuiError> {
        let name = self.form.generator.name.text().to_string();
        let occasion = self.form.generator.occasion;
        match self.generator.save(&self.database, &name, occasion, Utc::now()) {
            Ok(outfit) => {
                self.close_generator();
                self.load_data()?;
                self.set_status_message(format!("Saved outfit {}", outfit.name));
                Ok(())
            }
            Err(WardrobeError::Validation(e)) => {
                self.set_status_message(format!("Validation error: {}", e));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // Manual builder

    pub fn enter_builder_mode(&mut self) -> Result<(), TuiError> {
        let candidates = self.database.items(ItemSort::ByName)?;
        self.form.builder = Some(BuilderForm::new(candidates));
        self.ui.mode = Mode::Builder;
        Ok(())
    }

    pub fn exit_builder_mode(&mut self) {
        self.form.builder = None;
        self.ui.mode = Mode::View;
    }

    pub fn save_builder(&mut self) -> Result<(), TuiError> {
        let Some(ref mut form) = self.form.builder else {
            return Ok(());
        };
        form.builder.name = form.name.text().to_string();
        match form.builder.save(&self.database, &form.candidates, Utc::now()) {
            Ok(outfit) => {
                self.exit_builder_mode();
                self.load_data()?;
                self.switch_tab(Tab::Outfits);
                self.set_status_message(format!("Saved outfit {}", outfit.name));
                Ok(())
            }
            Err(WardrobeError::Validation(e)) => {
                self.set_status_message(format!("Validation error: {}", e));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    // Calendar

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Outfit shown under the calendar: the selected day's, or today's
    pub fn calendar_focus_outfit(&self) -> Option<&Outfit> {
        let focus = self.calendar.focus_date(Self::today());
        calendar::outfit_for_date(&self.outfits, focus, &Local)
    }

    pub fn toggle_calendar_day(&mut self) {
        let cursor = self.calendar.cursor();
        self.calendar.select_day(cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{INITIAL_REVEAL_DELAY, REVEAL_INTERVAL};
    use std::time::Duration;

    fn app_with(items: &[(&str, Category)]) -> App {
        let database = Database::open_in_memory().unwrap();
        for (name, category) in items {
            wardrobe::add_item(&database, NewItem::new(*name, *category), Utc::now()).unwrap();
        }
        let mut config = Config::default();
        config.has_completed_onboarding = true;
        App::new(config, Profile::Dev, database).unwrap()
    }

    #[test]
    fn starts_in_onboarding_until_completed() {
        let database = Database::open_in_memory().unwrap();
        let app = App::new(Config::default(), Profile::Dev, database).unwrap();
        assert_eq!(app.ui.mode, Mode::Onboarding);

        let app = app_with(&[]);
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn generated_picks_reveal_on_schedule() {
        let mut app = app_with(&[
            ("Tee", Category::Top),
            ("Jeans", Category::Bottom),
            ("Boots", Category::Shoes),
        ]);
        let start = Instant::now();
        app.start_generation(start).unwrap();
        assert_eq!(app.ui.mode, Mode::Generator);
        assert_eq!(app.reveal_timers.len(), 3);

        app.tick(start + INITIAL_REVEAL_DELAY - Duration::from_millis(1));
        assert_eq!(app.generator.draft().unwrap().revealed_count(), 0);

        app.tick(start + INITIAL_REVEAL_DELAY);
        assert_eq!(app.generator.draft().unwrap().revealed_count(), 1);
        assert!(!app.generator.can_save());

        app.tick(start + INITIAL_REVEAL_DELAY + REVEAL_INTERVAL * 2);
        assert_eq!(app.generator.draft().unwrap().revealed_count(), 3);
        assert!(app.generator.can_save());
        assert!(app.reveal_timers.is_empty());
    }

    #[test]
    fn generator_fields_stay_locked_while_revealing() {
        let mut app = app_with(&[("Tee", Category::Top), ("Jeans", Category::Bottom)]);
        let start = Instant::now();
        app.start_generation(start).unwrap();

        app.next_generator_field(true);
        app.next_generator_field(false);
        assert_eq!(app.form.generator.current_field, GeneratorField::Picks);

        app.tick(start + INITIAL_REVEAL_DELAY + REVEAL_INTERVAL);
        assert!(app.generator.can_save());
        app.next_generator_field(true);
        assert_eq!(app.form.generator.current_field, GeneratorField::Name);
        app.next_generator_field(false);
        app.next_generator_field(false);
        assert_eq!(app.form.generator.current_field, GeneratorField::Occasion);
    }

    #[test]
    fn stale_reveals_never_touch_the_new_draft() {
        let mut app = app_with(&[("Tee", Category::Top), ("Jeans", Category::Bottom)]);
        let start = Instant::now();
        app.start_generation(start).unwrap();
        app.tick(start + INITIAL_REVEAL_DELAY);

        let restart = start + Duration::from_millis(400);
        app.start_generation(restart).unwrap();
        // Past the first run's second deadline, before the new run's first
        app.tick(start + INITIAL_REVEAL_DELAY + REVEAL_INTERVAL + Duration::from_millis(10));
        assert_eq!(app.generator.draft().unwrap().revealed_count(), 0);

        app.tick(restart + INITIAL_REVEAL_DELAY + REVEAL_INTERVAL);
        assert!(app.generator.can_save());
    }

    #[test]
    fn regenerating_cancels_pending_reveals() {
        let mut app = app_with(&[("Tee", Category::Top), ("Jeans", Category::Bottom)]);
        let start = Instant::now();
        app.start_generation(start).unwrap();
        app.tick(start + INITIAL_REVEAL_DELAY);

        app.start_generation(start + Duration::from_millis(400)).unwrap();
        assert_eq!(app.reveal_timers.len(), 2);
        assert_eq!(app.generator.draft().unwrap().revealed_count(), 0);

        app.close_generator();
        assert!(app.reveal_timers.is_empty());
        assert!(app.generator.draft().is_none());
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn saving_generated_outfit_requires_a_name() {
        let mut app = app_with(&[("Tee", Category::Top)]);
        let start = Instant::now();
        app.start_generation(start).unwrap();
        app.tick(start + Duration::from_secs(5));

        app.save_generated_outfit().unwrap();
        assert_eq!(app.ui.mode, Mode::Generator);
        assert!(app.outfits.is_empty());
        assert_eq!(app.status.message.as_deref(), Some("Validation error: Name is required"));

        app.form.generator.name = Editor::from_string("Monday");
        app.save_generated_outfit().unwrap();
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.outfits.len(), 1);
        assert_eq!(app.outfits[0].items[0].name, "Tee");
    }

    #[test]
    fn add_item_form_rejects_blank_names() {
        let mut app = app_with(&[]);
        app.enter_add_item_mode();
        app.save_item_form().unwrap();
        assert_eq!(app.ui.mode, Mode::AddItem);
        assert!(app.items.is_empty());

        if let Some(editor) = app.current_item_editor() {
            for ch in "Rain jacket".chars() {
                editor.insert_char(ch);
            }
        }
        app.navigate_item_field(true);
        assert!(app.current_item_editor().is_none());
        app.cycle_item_category(false);
        app.save_item_form().unwrap();

        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.items.len(), 1);
        assert_eq!(app.items[0].category, Category::Top.previous());
    }

    #[test]
    fn chips_narrow_the_closet_list() {
        let mut app = app_with(&[
            ("Tee", Category::Top),
            ("Jeans", Category::Bottom),
            ("Shirt", Category::Top),
        ]);
        assert_eq!(app.visible_items().len(), 3);

        // Chip 1 is the first category, Top
        app.move_chip_cursor(true);
        app.activate_chip();
        assert_eq!(app.visible_items().len(), 2);

        app.activate_chip();
        assert_eq!(app.visible_items().len(), 3);

        // Laundry is the last chip; never-washed items belong in it
        app.move_chip_cursor(false);
        app.move_chip_cursor(false);
        app.activate_chip();
        assert_eq!(app.visible_items().len(), 3);

        let tee_id = app.items.iter().find(|i| i.name == "Tee").and_then(|i| i.id).unwrap();
        wardrobe::record_wash(&app.database, tee_id, WashType::Hand, Utc::now()).unwrap();
        app.load_data().unwrap();
        let names: Vec<&str> = app.visible_items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(!names.contains(&"Tee"));
    }

    #[test]
    fn wash_picker_logs_the_chosen_type() {
        let mut app = app_with(&[("Tee", Category::Top)]);
        app.enter_wash_picker();
        assert_eq!(app.ui.mode, Mode::WashPicker);
        app.cycle_wash_type(false);
        assert_eq!(app.modals.wash_type, WashType::DryClean);
        app.confirm_wash().unwrap();

        let item = app.selected_item().unwrap();
        assert_eq!(item.wash_count, 1);
        assert_eq!(item.wash_records[0].wash_type, WashType::DryClean);
        assert_eq!(item.last_washed, Some(item.wash_records[0].date));
    }

    #[test]
    fn delete_confirmation_removes_the_item() {
        let mut app = app_with(&[("Tee", Category::Top), ("Jeans", Category::Bottom)]);
        app.enter_delete_confirmation();
        assert_eq!(app.ui.mode, Mode::ConfirmDelete);
        // Cancel is preselected
        assert_eq!(app.modals.delete_modal_selection, 1);
        app.toggle_delete_selection();
        assert_eq!(app.modals.delete_modal_selection, 0);
        app.confirm_delete().unwrap();
        assert_eq!(app.items.len(), 1);
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn builder_saves_selected_items() {
        let mut app = app_with(&[("Tee", Category::Top), ("Jeans", Category::Bottom)]);
        app.enter_builder_mode().unwrap();
        app.save_builder().unwrap();
        assert_eq!(app.ui.mode, Mode::Builder);

        let form = app.form.builder.as_mut().unwrap();
        form.name = Editor::from_string("Weekend");
        form.current_field = BuilderField::Items;
        // Candidates are sorted by name: Jeans, Tee
        form.move_cursor(true);
        form.toggle_at_cursor();
        app.save_builder().unwrap();

        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.ui.current_tab, Tab::Outfits);
        let outfit = app.selected_outfit().unwrap();
        assert_eq!(outfit.name, "Weekend");
        assert_eq!(outfit.items.len(), 1);
        assert_eq!(outfit.items[0].name, "Tee");
    }

    #[test]
    fn tab_navigation_stops_at_the_ends() {
        let mut app = app_with(&[]);
        app.previous_tab();
        assert_eq!(app.ui.current_tab, Tab::Closet);
        app.next_tab();
        app.next_tab();
        app.next_tab();
        assert_eq!(app.ui.current_tab, Tab::Calendar);
    }
}
