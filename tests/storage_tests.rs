use chrono::{DateTime, TimeZone, Utc};
use closet::store::{ItemSort, WardrobeStore};
use closet::wardrobe::{self, NewItem};
use closet::{Category, Database, Occasion, WashType};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
}

fn add(db: &Database, name: &str, category: Category, day: u32) -> i64 {
    wardrobe::add_item(db, NewItem::new(name, category), at(day, 9))
        .unwrap()
        .id
        .unwrap()
}

#[test]
fn test_items_sorted_newest_first_and_by_name() {
    let db = Database::open_in_memory().unwrap();
    add(&db, "Tee", Category::Top, 1);
    add(&db, "jeans", Category::Bottom, 3);
    add(&db, "Boots", Category::Shoes, 2);

    let newest: Vec<String> = db.items(ItemSort::NewestFirst).unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(newest, vec!["jeans", "Boots", "Tee"]);

    let by_name: Vec<String> = db.items(ItemSort::ByName).unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(by_name, vec!["Boots", "jeans", "Tee"]);
}

#[test]
fn test_item_fields_survive_a_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let mut new_item = NewItem::new("  Oxford shirt ", Category::Top);
    new_item.color_name = "navy".to_string();
    new_item.brand = "Acme".to_string();
    new_item.image = Some(vec![0x89, 0x50, 0x4e, 0x47]);
    let saved = wardrobe::add_item(&db, new_item, at(5, 8)).unwrap();

    let loaded = db.get_item(saved.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.name, "Oxford shirt");
    assert_eq!(loaded.color_name, "navy");
    assert_eq!(loaded.brand, "Acme");
    assert_eq!(loaded.image, Some(vec![0x89, 0x50, 0x4e, 0x47]));
    assert_eq!(loaded.date_added, at(5, 8));
    assert_eq!(loaded.last_washed, None);
    assert_eq!(loaded.wash_count, 0);
}

#[test]
fn test_get_missing_item_returns_none() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_item(42).unwrap().is_none());
    assert!(db.get_outfit(42).unwrap().is_none());
}

#[test]
fn test_deleting_item_removes_its_wash_records() {
    let db = Database::open_in_memory().unwrap();
    let tee = add(&db, "Tee", Category::Top, 1);
    wardrobe::record_wash(&db, tee, WashType::Machine, at(2, 9)).unwrap();
    wardrobe::record_wash(&db, tee, WashType::Hand, at(4, 9)).unwrap();

    wardrobe::delete_item(&db, tee).unwrap();

    let orphans: i64 = db
        .conn()
        .query_row("SELECT COUNT(*) FROM wash_records", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
    assert!(db.get_item(tee).unwrap().is_none());
}

#[test]
fn test_outfit_survives_deletion_of_one_of_its_items() {
    let db = Database::open_in_memory().unwrap();
    let tee = add(&db, "Tee", Category::Top, 1);
    add(&db, "Jeans", Category::Bottom, 1);
    let items = db.items(ItemSort::ByName).unwrap();
    let outfit = wardrobe::save_outfit(&db, "Friday", Occasion::Casual, items, at(6, 9)).unwrap();

    wardrobe::delete_item(&db, tee).unwrap();

    let loaded = db.get_outfit(outfit.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.name, "Friday");
    let names: Vec<&str> = loaded.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Jeans"]);
}

#[test]
fn test_deleting_outfit_keeps_its_items() {
    let db = Database::open_in_memory().unwrap();
    add(&db, "Tee", Category::Top, 1);
    let items = db.items(ItemSort::ByName).unwrap();
    let outfit = wardrobe::save_outfit(&db, "Plain", Occasion::Casual, items, at(6, 9)).unwrap();

    wardrobe::delete_outfit(&db, outfit.id.unwrap()).unwrap();

    assert!(db.outfits().unwrap().is_empty());
    assert_eq!(db.items(ItemSort::NewestFirst).unwrap().len(), 1);
}

#[test]
fn test_deleting_a_wash_record_keeps_the_count() {
    let db = Database::open_in_memory().unwrap();
    let tee = add(&db, "Tee", Category::Top, 1);
    wardrobe::record_wash(&db, tee, WashType::Machine, at(2, 9)).unwrap();
    let (_, latest) = wardrobe::record_wash(&db, tee, WashType::DryClean, at(4, 9)).unwrap();

    db.delete_wash_record(latest.id.unwrap()).unwrap();

    let item = db.get_item(tee).unwrap().unwrap();
    assert_eq!(item.wash_records.len(), 1);
    assert_eq!(item.wash_count, 2);
    assert_eq!(item.last_washed, Some(at(4, 9)));
}

#[test]
fn test_wash_records_are_newest_first() {
    let db = Database::open_in_memory().unwrap();
    let tee = add(&db, "Tee", Category::Top, 1);
    wardrobe::record_wash(&db, tee, WashType::Machine, at(2, 9)).unwrap();
    wardrobe::record_wash(&db, tee, WashType::Hand, at(7, 9)).unwrap();
    wardrobe::record_wash(&db, tee, WashType::DryClean, at(4, 9)).unwrap();

    let types: Vec<WashType> = db
        .wash_records_for_item(tee)
        .unwrap()
        .into_iter()
        .map(|r| r.wash_type)
        .collect();
    assert_eq!(types, vec![WashType::Hand, WashType::DryClean, WashType::Machine]);
}

#[test]
fn test_outfits_are_newest_first_with_items_in_saved_order() {
    let db = Database::open_in_memory().unwrap();
    add(&db, "Tee", Category::Top, 1);
    add(&db, "Jeans", Category::Bottom, 1);
    add(&db, "Boots", Category::Shoes, 1);
    let mut items = db.items(ItemSort::ByName).unwrap();
    // Boots, Jeans, Tee -> Tee, Jeans, Boots
    items.reverse();

    wardrobe::save_outfit(&db, "Older", Occasion::Work, items.clone(), at(3, 9)).unwrap();
    wardrobe::save_outfit(&db, "Newer", Occasion::Sport, items, at(8, 9)).unwrap();

    let outfits = db.outfits().unwrap();
    let names: Vec<&str> = outfits.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Newer", "Older"]);

    let order: Vec<&str> = outfits[0].items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(order, vec!["Tee", "Jeans", "Boots"]);
    assert_eq!(outfits[1].occasion, Occasion::Work);
}

#[test]
fn test_outfits_for_item() {
    let db = Database::open_in_memory().unwrap();
    let tee = add(&db, "Tee", Category::Top, 1);
    let jeans = add(&db, "Jeans", Category::Bottom, 1);
    let all = db.items(ItemSort::ByName).unwrap();
    let tee_only: Vec<_> = all.iter().filter(|i| i.id == Some(tee)).cloned().collect();

    wardrobe::save_outfit(&db, "Both", Occasion::Casual, all, at(3, 9)).unwrap();
    wardrobe::save_outfit(&db, "Tee only", Occasion::Casual, tee_only, at(4, 9)).unwrap();

    assert_eq!(db.outfits_for_item(tee).unwrap().len(), 2);
    let jeans_outfits = db.outfits_for_item(jeans).unwrap();
    assert_eq!(jeans_outfits.len(), 1);
    assert_eq!(jeans_outfits[0].name, "Both");
}

#[test]
fn test_updating_a_missing_row_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    let mut item = closet::ClothingItem::new("Ghost".to_string(), Category::Top);
    item.id = Some(77);

    let err = db.update_item(&item).unwrap_err();
    assert!(matches!(err, closet::database::DatabaseError::NotFound { id: 77, .. }));
}
