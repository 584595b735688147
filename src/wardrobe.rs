//! User-triggered wardrobe actions written against [`WardrobeStore`].

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::models::{Category, ClothingItem, Occasion, Outfit, WashRecord, WashType};
use crate::store::WardrobeStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Select at least one item")]
    NoItems,
    #[error("The outfit is still being revealed")]
    DraftNotReady,
}

#[derive(Debug, Error)]
pub enum WardrobeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("No record with id {0}")]
    NotFound(i64),
}

impl WardrobeError {
    fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        WardrobeError::Store(Box::new(e))
    }
}

/// Input for a new clothing item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub category: Category,
    pub color_name: String,
    pub brand: String,
    pub notes: String,
    pub image: Option<Vec<u8>>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            color_name: String::new(),
            brand: String::new(),
            notes: String::new(),
            image: None,
        }
    }
}

/// Trim a required name, rejecting empty or whitespace-only input
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub fn add_item<S: WardrobeStore>(
    store: &S,
    new_item: NewItem,
    now: DateTime<Utc>,
) -> Result<ClothingItem, WardrobeError> {
    let name = validate_name(&new_item.name)?;

    let mut item = ClothingItem::new(name, new_item.category);
    item.color_name = new_item.color_name.trim().to_string();
    item.brand = new_item.brand.trim().to_string();
    item.notes = new_item.notes.trim().to_string();
    item.image = new_item.image;
    item.date_added = now;

    let id = store.insert_item(&item).map_err(WardrobeError::store)?;
    item.id = Some(id);
    info!(id, name = %item.name, "added item");
    Ok(item)
}

pub fn delete_item<S: WardrobeStore>(store: &S, item_id: i64) -> Result<(), WardrobeError> {
    store.delete_item(item_id).map_err(WardrobeError::store)?;
    info!(item_id, "deleted item");
    Ok(())
}

fn load_item<S: WardrobeStore>(store: &S, item_id: i64) -> Result<ClothingItem, WardrobeError> {
    store
        .get_item(item_id)
        .map_err(WardrobeError::store)?
        .ok_or(WardrobeError::NotFound(item_id))
}

/// Log a wash: one new record, `wash_count` up by one, `last_washed` set to the record date
pub fn record_wash<S: WardrobeStore>(
    store: &S,
    item_id: i64,
    wash_type: WashType,
    now: DateTime<Utc>,
) -> Result<(ClothingItem, WashRecord), WardrobeError> {
    let mut item = load_item(store, item_id)?;

    let mut record = WashRecord::new(wash_type, Some(item_id));
    record.date = now;

    item.last_washed = Some(now);
    item.wash_count += 1;

    let record_id = store.record_wash(&record, &item).map_err(WardrobeError::store)?;
    record.id = Some(record_id);
    item.wash_records.insert(0, record.clone());

    info!(item_id, wash_count = item.wash_count, wash_type = wash_type.as_str(), "recorded wash");
    Ok((item, record))
}

/// Put an item back in the laundry pile without touching its wash history
pub fn mark_dirty<S: WardrobeStore>(
    store: &S,
    item_id: i64,
) -> Result<ClothingItem, WardrobeError> {
    let mut item = load_item(store, item_id)?;
    item.last_washed = None;
    store.update_item(&item).map_err(WardrobeError::store)?;
    info!(item_id, "marked item dirty");
    Ok(item)
}

/// Save an outfit from the given items, in the given order
pub fn save_outfit<S: WardrobeStore>(
    store: &S,
    name: &str,
    occasion: Occasion,
    items: Vec<ClothingItem>,
    now: DateTime<Utc>,
) -> Result<Outfit, WardrobeError> {
    let name = validate_name(name)?;
    if items.is_empty() {
        return Err(ValidationError::NoItems.into());
    }

    let mut outfit = Outfit::new(name, items, occasion);
    outfit.date_created = now;
    let id = store.insert_outfit(&outfit).map_err(WardrobeError::store)?;
    outfit.id = Some(id);

    info!(id, name = %outfit.name, items = outfit.items.len(), "saved outfit");
    Ok(outfit)
}

pub fn toggle_favorite<S: WardrobeStore>(
    store: &S,
    outfit_id: i64,
) -> Result<Outfit, WardrobeError> {
    let mut outfit = store
        .get_outfit(outfit_id)
        .map_err(WardrobeError::store)?
        .ok_or(WardrobeError::NotFound(outfit_id))?;
    outfit.is_favorite = !outfit.is_favorite;
    store.update_outfit(&outfit).map_err(WardrobeError::store)?;
    Ok(outfit)
}

pub fn delete_outfit<S: WardrobeStore>(store: &S, outfit_id: i64) -> Result<(), WardrobeError> {
    store.delete_outfit(outfit_id).map_err(WardrobeError::store)?;
    info!(outfit_id, "deleted outfit");
    Ok(())
}

/// Washed items whose last wash is older than the reminder threshold
pub fn items_due_for_reminder(
    items: &[ClothingItem],
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Vec<&ClothingItem> {
    items
        .iter()
        .filter(|item| {
            item.days_since_last_wash_at(now)
                .is_some_and(|days| days >= i64::from(threshold_days))
        })
        .collect()
}

/// State of the manual outfit builder
#[derive(Debug, Clone, Default)]
pub struct OutfitBuilder {
    selected: Vec<i64>,
    pub name: String,
    pub occasion: Occasion,
}

impl OutfitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect an item
    pub fn toggle(&mut self, item_id: i64) {
        if let Some(pos) = self.selected.iter().position(|id| *id == item_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(item_id);
        }
    }

    pub fn is_selected(&self, item_id: i64) -> bool {
        self.selected.contains(&item_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected items in the order of `all`
    pub fn selected_items(&self, all: &[ClothingItem]) -> Vec<ClothingItem> {
        all.iter()
            .filter(|item| item.id.is_some_and(|id| self.is_selected(id)))
            .cloned()
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        if self.selected.is_empty() {
            return Err(ValidationError::NoItems);
        }
        Ok(())
    }

    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn save<S: WardrobeStore>(
        &self,
        store: &S,
        all: &[ClothingItem],
        now: DateTime<Utc>,
    ) -> Result<Outfit, WardrobeError> {
        self.validate()?;
        save_outfit(store, &self.name, self.occasion, self.selected_items(all), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn validate_name_trims_and_rejects_blank() {
        assert_eq!(validate_name("  Friday fit "), Ok("Friday fit".to_string()));
        assert_eq!(validate_name(" \t "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn builder_requires_name_and_items() {
        let mut builder = OutfitBuilder::new();
        assert_eq!(builder.validate(), Err(ValidationError::EmptyName));

        builder.name = "   ".to_string();
        builder.toggle(3);
        assert_eq!(builder.validate(), Err(ValidationError::EmptyName));

        builder.name = "Office".to_string();
        assert!(builder.can_save());

        builder.toggle(3);
        assert_eq!(builder.validate(), Err(ValidationError::NoItems));
    }

    #[test]
    fn builder_keeps_wardrobe_order() {
        let mut all = Vec::new();
        for (id, name) in [(1, "a"), (2, "b"), (3, "c")] {
            let mut item = ClothingItem::new(name.to_string(), Category::Top);
            item.id = Some(id);
            all.push(item);
        }
        let mut builder = OutfitBuilder::new();
        builder.toggle(3);
        builder.toggle(1);
        let names: Vec<_> = builder.selected_items(&all).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn reminder_skips_unwashed_items() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        let mut fresh = ClothingItem::new("fresh".to_string(), Category::Top);
        fresh.last_washed = Some(now - Duration::days(2));
        let mut stale = ClothingItem::new("stale".to_string(), Category::Top);
        stale.last_washed = Some(now - Duration::days(10));
        let never = ClothingItem::new("never".to_string(), Category::Top);

        let items = vec![fresh, stale, never];
        let due: Vec<_> = items_due_for_reminder(&items, 7, now)
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(due, vec!["stale"]);
        assert_eq!(items_due_for_reminder(&items, 1, now).len(), 2);
    }
}
