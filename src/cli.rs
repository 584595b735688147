use chrono::{Local, Utc, Weekday};
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::calendar::{self, CalendarState};
use crate::database::{Database, DatabaseError};
use crate::filter::{filter_items, FilterState};
use crate::generator::OutfitGenerator;
use crate::models::{Category, ClothingItem, Occasion, Outfit, ParseEnumError, WashType};
use crate::store::{ItemSort, WardrobeStore};
use crate::utils::{format_date_short, parse_month};
use crate::wardrobe::{self, NewItem, WardrobeError};

#[derive(Parser)]
#[command(name = "closet")]
#[command(about = "Wardrobe catalog, wash log and outfit generator")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Add a clothing item
    AddItem {
        /// Item name
        name: String,
        /// top, bottom, shoes, accessories, outerwear or underwear
        #[arg(long)]
        category: String,
        /// Color name (e.g. navy)
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List items, newest first
    List {
        /// Only show this category
        #[arg(long, conflicts_with = "laundry")]
        category: Option<String>,
        /// Only show items that need washing
        #[arg(long)]
        laundry: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Record a wash for an item
    Wash {
        item_id: i64,
        /// machine, hand or dry-clean
        #[arg(long = "type", default_value = "machine")]
        wash_type: String,
    },
    /// Put an item back in the laundry pile
    MarkDirty { item_id: i64 },
    /// Delete an item and its wash history
    DeleteItem { item_id: i64 },
    /// Pick a random outfit
    Generate {
        /// Save the result under this name
        #[arg(long)]
        save: Option<String>,
        #[arg(long, default_value = "casual")]
        occasion: String,
    },
    /// List saved outfits, newest first
    Outfits {
        #[arg(long)]
        json: bool,
    },
    /// Toggle an outfit's favorite flag
    Favorite { outfit_id: i64 },
    /// Delete an outfit (its items are kept)
    DeleteOutfit { outfit_id: i64 },
    /// Print a month with the days that have outfits
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error(transparent)]
    WardrobeError(#[from] WardrobeError),
    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),
    #[error("Failed to parse month: {0}")]
    MonthParseError(String),
    #[error("Failed to encode JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn item_line(item: &ClothingItem) -> String {
    let washed = match item.days_since_last_wash() {
        Some(0) => "washed today".to_string(),
        Some(days) => format!("washed {} days ago", days),
        None => "never washed".to_string(),
    };
    format!(
        "{:>4}  {:<12} {:<28} {:<10} {}",
        item.id.unwrap_or_default(),
        item.category.display_name(),
        item.name,
        item.color_name,
        washed
    )
}

fn outfit_line(outfit: &Outfit) -> String {
    let items: Vec<&str> = outfit.items.iter().map(|i| i.name.as_str()).collect();
    format!(
        "{:>4}  {} {:<24} {:<8} {}  [{}]",
        outfit.id.unwrap_or_default(),
        if outfit.is_favorite { "*" } else { " " },
        outfit.name,
        outfit.occasion.display_name(),
        format_date_short(&outfit.date_created),
        items.join(", ")
    )
}

/// Handle the add-item command
pub fn handle_add_item(
    name: String,
    category: String,
    color: Option<String>,
    brand: Option<String>,
    notes: Option<String>,
    db: &Database,
) -> Result<(), CliError> {
    let mut new_item = NewItem::new(name, category.parse::<Category>()?);
    new_item.color_name = color.unwrap_or_default();
    new_item.brand = brand.unwrap_or_default();
    new_item.notes = notes.unwrap_or_default();

    let item = wardrobe::add_item(db, new_item, Utc::now())?;
    println!("Item added successfully (ID: {})", item.id.unwrap_or_default());
    Ok(())
}

/// Handle the list command
pub fn handle_list(
    category: Option<String>,
    laundry: bool,
    json: bool,
    db: &Database,
) -> Result<(), CliError> {
    let mut state = FilterState::default();
    if let Some(category) = category {
        state.select_category(category.parse()?);
    }
    if laundry {
        state.toggle_laundry();
    }

    let items = db.items(ItemSort::NewestFirst)?;
    let visible = filter_items(&items, &state, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else if visible.is_empty() {
        println!("{}", state.empty_message());
    } else {
        for item in visible {
            println!("{}", item_line(item));
        }
    }
    Ok(())
}

/// Handle the wash command
pub fn handle_wash(item_id: i64, wash_type: String, db: &Database) -> Result<(), CliError> {
    let wash_type: WashType = wash_type.parse()?;
    let (item, _) = wardrobe::record_wash(db, item_id, wash_type, Utc::now())?;
    println!(
        "{}: {} recorded (washed {} times)",
        item.name,
        wash_type.display_name(),
        item.wash_count
    );
    Ok(())
}

pub fn handle_mark_dirty(item_id: i64, db: &Database) -> Result<(), CliError> {
    let item = wardrobe::mark_dirty(db, item_id)?;
    println!("{} marked as dirty", item.name);
    Ok(())
}

pub fn handle_delete_item(item_id: i64, db: &Database) -> Result<(), CliError> {
    wardrobe::delete_item(db, item_id)?;
    println!("Item {} deleted", item_id);
    Ok(())
}

/// Handle the generate command. There is no animation here: every pick is
/// revealed at once before an optional save.
pub fn handle_generate(
    save: Option<String>,
    occasion: String,
    db: &Database,
) -> Result<(), CliError> {
    let occasion: Occasion = occasion.parse()?;
    let items = db.items(ItemSort::ByName)?;

    let mut generator = OutfitGenerator::new();
    let schedule = generator.generate(&items, &mut rand::thread_rng());
    for scheduled in schedule {
        generator.reveal(scheduled.event);
    }

    let Some(draft) = generator.draft() else {
        return Ok(());
    };
    if draft.is_empty() {
        println!("Add some tops, bottoms, shoes or outerwear first");
        return Ok(());
    }
    for pick in &draft.picks {
        let brand = if pick.item.brand.is_empty() {
            String::new()
        } else {
            format!(" ({})", pick.item.brand)
        };
        println!("{:<10} {}{}", pick.slot.display_name(), pick.item.name, brand);
    }

    if let Some(name) = save {
        let outfit = generator.save(db, &name, occasion, Utc::now())?;
        println!("Outfit saved (ID: {})", outfit.id.unwrap_or_default());
    }
    Ok(())
}

pub fn handle_outfits(json: bool, db: &Database) -> Result<(), CliError> {
    let outfits = db.outfits()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&outfits)?);
    } else if outfits.is_empty() {
        println!("No outfits yet");
    } else {
        for outfit in &outfits {
            println!("{}", outfit_line(outfit));
        }
    }
    Ok(())
}

pub fn handle_favorite(outfit_id: i64, db: &Database) -> Result<(), CliError> {
    let outfit = wardrobe::toggle_favorite(db, outfit_id)?;
    let state = if outfit.is_favorite { "added to" } else { "removed from" };
    println!("{} {} favorites", outfit.name, state);
    Ok(())
}

pub fn handle_delete_outfit(outfit_id: i64, db: &Database) -> Result<(), CliError> {
    wardrobe::delete_outfit(db, outfit_id)?;
    println!("Outfit {} deleted", outfit_id);
    Ok(())
}

/// Handle the calendar command: a Sunday-first month grid, `*` marks days with an outfit
pub fn handle_calendar(month: Option<String>, db: &Database) -> Result<(), CliError> {
    let today = Local::now().date_naive();
    let mut state = CalendarState::new(today);
    if let Some(month) = month {
        let first = parse_month(&month)
            .map_err(|e| CliError::MonthParseError(format!("Invalid month '{}': {}", month, e)))?;
        state = CalendarState::new(first);
    }

    let outfits = db.outfits()?;
    let cells = state.day_cells(&outfits, today, &Local);

    println!("{:^28}", state.month_title());
    let labels: Vec<String> = calendar::weekday_labels(Weekday::Sun)
        .into_iter()
        .map(|l| format!("{:>3} ", l))
        .collect();
    println!("{}", labels.concat());

    let mut line = "    ".repeat(state.leading_blanks(Weekday::Sun));
    let mut column = state.leading_blanks(Weekday::Sun);
    for cell in &cells {
        let marker = if cell.has_outfit { '*' } else { ' ' };
        line.push_str(&format!("{:>3}{}", cell.date.format("%-d"), marker));
        column += 1;
        if column == 7 {
            println!("{}", line.trim_end());
            line.clear();
            column = 0;
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    let focus = state.focus_date(today);
    match calendar::outfit_for_date(&outfits, focus, &Local) {
        Some(outfit) => println!("\n{}", outfit_line(outfit)),
        None if focus == today => println!("\n{}", calendar::NO_OUTFIT_TODAY),
        None => println!("\n{}", calendar::NO_OUTFIT_FOR_DAY),
    }
    Ok(())
}
