use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Accessories,
    Outerwear,
    Underwear,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Top,
        Category::Bottom,
        Category::Shoes,
        Category::Accessories,
        Category::Outerwear,
        Category::Underwear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Outerwear => "outerwear",
            Category::Underwear => "underwear",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Top => "Top",
            Category::Bottom => "Bottom",
            Category::Shoes => "Shoes",
            Category::Accessories => "Accessories",
            Category::Outerwear => "Outerwear",
            Category::Underwear => "Underwear",
        }
    }

    /// Single glyph shown in list rows and outfit swatches
    pub fn symbol(&self) -> &'static str {
        match self {
            Category::Top => "T",
            Category::Bottom => "B",
            Category::Shoes => "S",
            Category::Accessories => "A",
            Category::Outerwear => "O",
            Category::Underwear => "U",
        }
    }

    /// Next category in display order, wrapping around (used by form pickers)
    pub fn next(&self) -> Category {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Category {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ParseEnumError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WashType {
    Machine,
    Hand,
    DryClean,
}

impl WashType {
    pub const ALL: [WashType; 3] = [WashType::Machine, WashType::Hand, WashType::DryClean];

    pub fn as_str(&self) -> &'static str {
        match self {
            WashType::Machine => "machine",
            WashType::Hand => "hand",
            WashType::DryClean => "dryClean",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WashType::Machine => "Machine Wash",
            WashType::Hand => "Hand Wash",
            WashType::DryClean => "Dry Clean",
        }
    }

    pub fn next(&self) -> WashType {
        let index = Self::ALL.iter().position(|w| w == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for WashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WashType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the stored form plus the kebab/snake spellings people type on the CLI
        match s.trim().to_lowercase().as_str() {
            "machine" => Ok(WashType::Machine),
            "hand" => Ok(WashType::Hand),
            "dryclean" | "dry-clean" | "dry_clean" => Ok(WashType::DryClean),
            _ => Err(ParseEnumError {
                kind: "wash type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Occasion {
    #[default]
    Casual,
    Work,
    Sport,
    Party,
    Date,
    Travel,
}

impl Occasion {
    pub const ALL: [Occasion; 6] = [
        Occasion::Casual,
        Occasion::Work,
        Occasion::Sport,
        Occasion::Party,
        Occasion::Date,
        Occasion::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Work => "work",
            Occasion::Sport => "sport",
            Occasion::Party => "party",
            Occasion::Date => "date",
            Occasion::Travel => "travel",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Occasion::Casual => "Casual",
            Occasion::Work => "Work",
            Occasion::Sport => "Sport",
            Occasion::Party => "Party",
            Occasion::Date => "Date",
            Occasion::Travel => "Travel",
        }
    }

    pub fn next(&self) -> Occasion {
        let index = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Occasion {
        let index = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Occasion {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == lower)
            .ok_or_else(|| ParseEnumError {
                kind: "occasion",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: Option<i64>,
    pub name: String,
    pub category: Category,
    pub color_name: String,
    pub brand: String,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
    pub notes: String,
    pub date_added: DateTime<Utc>,
    pub last_washed: Option<DateTime<Utc>>,
    pub wash_count: u32,
    pub wash_records: Vec<WashRecord>, // newest first
}

impl ClothingItem {
    pub fn new(name: String, category: Category) -> Self {
        Self {
            id: None,
            name,
            category,
            color_name: String::new(),
            brand: String::new(),
            image: None,
            notes: String::new(),
            date_added: Utc::now(),
            last_washed: None,
            wash_count: 0,
            wash_records: Vec::new(),
        }
    }

    /// Whole days since the last wash, or `None` if the item was never washed.
    /// A last-wash time in the future counts as zero days.
    pub fn days_since_last_wash_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_washed
            .map(|washed| now.signed_duration_since(washed).num_days().max(0))
    }

    pub fn days_since_last_wash(&self) -> Option<i64> {
        self.days_since_last_wash_at(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WashRecord {
    pub id: Option<i64>,
    pub date: DateTime<Utc>,
    pub wash_type: WashType,
    pub clothing_item_id: Option<i64>,
}

impl WashRecord {
    pub fn new(wash_type: WashType, clothing_item_id: Option<i64>) -> Self {
        Self {
            id: None,
            date: Utc::now(),
            wash_type,
            clothing_item_id,
        }
    }
}

/// A named combination of items. Items are shared with the wardrobe and
/// loaded without their wash records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: Option<i64>,
    pub name: String,
    pub occasion: Occasion,
    pub date_created: DateTime<Utc>,
    pub is_favorite: bool,
    pub items: Vec<ClothingItem>,
}

impl Outfit {
    pub fn new(name: String, items: Vec<ClothingItem>, occasion: Occasion) -> Self {
        Self {
            id: None,
            name,
            occasion,
            date_created: Utc::now(),
            is_favorite: false,
            items,
        }
    }

    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().filter_map(|item| item.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn days_since_last_wash_is_none_when_never_washed() {
        let item = ClothingItem::new("Tee".to_string(), Category::Top);
        assert_eq!(item.days_since_last_wash(), None);
    }

    #[test]
    fn days_since_last_wash_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let mut item = ClothingItem::new("Tee".to_string(), Category::Top);

        item.last_washed = Some(now - Duration::hours(23));
        assert_eq!(item.days_since_last_wash_at(now), Some(0));

        item.last_washed = Some(now - Duration::hours(49));
        assert_eq!(item.days_since_last_wash_at(now), Some(2));

        item.last_washed = Some(now + Duration::days(3));
        assert_eq!(item.days_since_last_wash_at(now), Some(0));
    }

    #[test]
    fn enums_parse_their_stored_form() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!("dryClean".parse::<WashType>(), Ok(WashType::DryClean));
        assert_eq!("dry-clean".parse::<WashType>(), Ok(WashType::DryClean));
        assert_eq!("Party".parse::<Occasion>(), Ok(Occasion::Party));
        assert!("hat".parse::<Category>().is_err());
    }

    #[test]
    fn pickers_wrap_around() {
        assert_eq!(Category::Underwear.next(), Category::Top);
        assert_eq!(Category::Top.previous(), Category::Underwear);
        assert_eq!(WashType::DryClean.next(), WashType::Machine);
        assert_eq!(Occasion::Travel.next(), Occasion::Casual);
    }
}
