//! Wardrobe list filtering.
//!
//! The closet view has single-select filter modes: everything, one category,
//! or the laundry pile. Filtering is a pure pass over a snapshot of items and
//! keeps the caller's order.

use chrono::{DateTime, Utc};

use crate::models::{Category, ClothingItem};

/// Items not washed for more than this many days show up in the laundry filter
pub const LAUNDRY_THRESHOLD_DAYS: i64 = 7;

/// An item needs washing if it was never washed or its last wash is older
/// than the laundry threshold.
pub fn needs_wash(item: &ClothingItem, now: DateTime<Utc>) -> bool {
    match item.days_since_last_wash_at(now) {
        None => true,
        Some(days) => days > LAUNDRY_THRESHOLD_DAYS,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<Category>,
    pub laundry_only: bool,
}

/// One chip in the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChip {
    All,
    Category(Category),
    Laundry,
}

impl FilterChip {
    /// Chips in display order: All, each category, Laundry
    pub fn all_chips() -> Vec<FilterChip> {
        let mut chips = vec![FilterChip::All];
        chips.extend(Category::ALL.iter().copied().map(FilterChip::Category));
        chips.push(FilterChip::Laundry);
        chips
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterChip::All => "All",
            FilterChip::Category(category) => category.display_name(),
            FilterChip::Laundry => "Laundry",
        }
    }
}

impl FilterState {
    pub fn select_all(&mut self) {
        self.category = None;
        self.laundry_only = false;
    }

    /// Select a category; selecting the active one again goes back to All
    pub fn select_category(&mut self, category: Category) {
        self.laundry_only = false;
        self.category = if self.category == Some(category) {
            None
        } else {
            Some(category)
        };
    }

    /// Switch to the laundry view, or back to All if it is already active
    pub fn toggle_laundry(&mut self) {
        self.category = None;
        self.laundry_only = !self.laundry_only;
    }

    pub fn apply_chip(&mut self, chip: FilterChip) {
        match chip {
            FilterChip::All => self.select_all(),
            FilterChip::Category(category) => self.select_category(category),
            FilterChip::Laundry => self.toggle_laundry(),
        }
    }

    pub fn is_chip_active(&self, chip: FilterChip) -> bool {
        match chip {
            FilterChip::All => self.category.is_none() && !self.laundry_only,
            FilterChip::Category(category) => self.category == Some(category),
            FilterChip::Laundry => self.laundry_only,
        }
    }

    pub fn is_all(&self) -> bool {
        self.category.is_none() && !self.laundry_only
    }

    pub fn matches(&self, item: &ClothingItem, now: DateTime<Utc>) -> bool {
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }
        !self.laundry_only || needs_wash(item, now)
    }

    /// Message shown when the filtered list is empty
    pub fn empty_message(&self) -> &'static str {
        if self.laundry_only {
            "All clean"
        } else {
            "No items yet"
        }
    }

    pub fn summary(&self) -> String {
        match (self.category, self.laundry_only) {
            (_, true) => "Laundry".to_string(),
            (Some(category), false) => category.display_name().to_string(),
            (None, false) => "All".to_string(),
        }
    }
}

/// Visible subset of `items`, in input order
pub fn filter_items<'a>(
    items: &'a [ClothingItem],
    state: &FilterState,
    now: DateTime<Utc>,
) -> Vec<&'a ClothingItem> {
    items.iter().filter(|item| state.matches(item, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn item(name: &str, category: Category, washed_days_ago: Option<i64>) -> ClothingItem {
        let mut item = ClothingItem::new(name.to_string(), category);
        item.last_washed = washed_days_ago.map(|days| now() - Duration::days(days));
        item
    }

    fn names(items: &[&ClothingItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    fn wardrobe() -> Vec<ClothingItem> {
        vec![
            item("linen shirt", Category::Top, Some(1)),
            item("jeans", Category::Bottom, None),
            item("hoodie", Category::Top, Some(8)),
            item("boots", Category::Shoes, Some(7)),
            item("raincoat", Category::Outerwear, Some(30)),
        ]
    }

    #[test]
    fn default_state_shows_everything_in_order() {
        let items = wardrobe();
        let visible = filter_items(&items, &FilterState::default(), now());
        assert_eq!(
            names(&visible),
            vec!["linen shirt", "jeans", "hoodie", "boots", "raincoat"]
        );
    }

    #[test]
    fn category_filter_keeps_matching_items_in_order() {
        let items = wardrobe();
        let mut state = FilterState::default();
        state.select_category(Category::Top);
        assert_eq!(names(&filter_items(&items, &state, now())), vec!["linen shirt", "hoodie"]);
    }

    #[test]
    fn laundry_filter_uses_strict_seven_day_threshold() {
        let items = wardrobe();
        let mut state = FilterState::default();
        state.toggle_laundry();
        // boots were washed exactly seven days ago and are still clean
        assert_eq!(
            names(&filter_items(&items, &state, now())),
            vec!["jeans", "hoodie", "raincoat"]
        );
    }

    #[test]
    fn both_conditions_are_combined() {
        let items = wardrobe();
        let state = FilterState {
            category: Some(Category::Top),
            laundry_only: true,
        };
        assert_eq!(names(&filter_items(&items, &state, now())), vec!["hoodie"]);
    }

    #[test]
    fn filter_modes_are_mutually_exclusive() {
        let mut state = FilterState::default();

        state.select_category(Category::Shoes);
        assert_eq!(state.category, Some(Category::Shoes));
        assert!(!state.laundry_only);

        state.toggle_laundry();
        assert_eq!(state.category, None);
        assert!(state.laundry_only);

        state.select_category(Category::Top);
        assert_eq!(state.category, Some(Category::Top));
        assert!(!state.laundry_only);

        // re-selecting the active category goes back to All
        state.select_category(Category::Top);
        assert!(state.is_all());

        state.toggle_laundry();
        state.toggle_laundry();
        assert!(state.is_all());

        state.select_category(Category::Bottom);
        state.select_all();
        assert!(state.is_all());
    }

    #[test]
    fn chips_report_the_active_mode() {
        let mut state = FilterState::default();
        let chips = FilterChip::all_chips();
        assert_eq!(chips.len(), Category::ALL.len() + 2);
        assert_eq!(chips.iter().filter(|c| state.is_chip_active(**c)).count(), 1);
        assert!(state.is_chip_active(FilterChip::All));

        state.apply_chip(FilterChip::Laundry);
        assert!(state.is_chip_active(FilterChip::Laundry));
        assert!(!state.is_chip_active(FilterChip::All));
        assert_eq!(state.empty_message(), "All clean");

        state.apply_chip(FilterChip::Category(Category::Accessories));
        assert!(state.is_chip_active(FilterChip::Category(Category::Accessories)));
        assert_eq!(state.empty_message(), "No items yet");
    }
}
