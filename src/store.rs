use crate::models::{ClothingItem, Outfit, WashRecord};

/// Ordering for item queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    /// Date added, most recent first (wardrobe list)
    #[default]
    NewestFirst,
    /// Name ascending (generator and outfit builder)
    ByName,
}

/// Persistence contract the wardrobe actions are written against.
///
/// Items are returned with their wash records (newest first). Outfits are
/// returned newest first with their items in saved order. Deleting an item
/// removes its wash records and its outfit memberships but never the outfits.
pub trait WardrobeStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn insert_item(&self, item: &ClothingItem) -> Result<i64, Self::Error>;
    fn update_item(&self, item: &ClothingItem) -> Result<(), Self::Error>;
    fn delete_item(&self, id: i64) -> Result<(), Self::Error>;
    fn get_item(&self, id: i64) -> Result<Option<ClothingItem>, Self::Error>;
    fn items(&self, sort: ItemSort) -> Result<Vec<ClothingItem>, Self::Error>;

    /// Persist a new wash record together with the item's updated wash fields
    /// in one transaction.
    fn record_wash(&self, record: &WashRecord, item: &ClothingItem) -> Result<i64, Self::Error>;
    fn delete_wash_record(&self, id: i64) -> Result<(), Self::Error>;
    fn wash_records_for_item(&self, item_id: i64) -> Result<Vec<WashRecord>, Self::Error>;

    fn insert_outfit(&self, outfit: &Outfit) -> Result<i64, Self::Error>;
    fn update_outfit(&self, outfit: &Outfit) -> Result<(), Self::Error>;
    fn delete_outfit(&self, id: i64) -> Result<(), Self::Error>;
    fn get_outfit(&self, id: i64) -> Result<Option<Outfit>, Self::Error>;
    fn outfits(&self) -> Result<Vec<Outfit>, Self::Error>;
    fn outfits_for_item(&self, item_id: i64) -> Result<Vec<Outfit>, Self::Error>;
}
