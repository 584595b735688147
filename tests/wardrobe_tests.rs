use chrono::{DateTime, Duration, TimeZone, Utc};
use closet::filter::{filter_items, needs_wash, FilterState};
use closet::generator::OutfitGenerator;
use closet::store::{ItemSort, WardrobeStore};
use closet::wardrobe::{self, NewItem, OutfitBuilder, ValidationError, WardrobeError};
use closet::{Category, Database, Occasion, WashType};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
}

fn seeded_wardrobe() -> Database {
    let db = Database::open_in_memory().unwrap();
    for (name, category) in [
        ("Tee", Category::Top),
        ("Jeans", Category::Bottom),
        ("Sneakers", Category::Shoes),
        ("Parka", Category::Outerwear),
        ("Belt", Category::Accessories),
    ] {
        wardrobe::add_item(&db, NewItem::new(name, category), at(1, 9)).unwrap();
    }
    db
}

fn id_of(db: &Database, name: &str) -> i64 {
    db.items(ItemSort::ByName)
        .unwrap()
        .into_iter()
        .find(|i| i.name == name)
        .and_then(|i| i.id)
        .unwrap()
}

#[test]
fn test_record_wash_updates_count_and_last_washed() {
    let db = seeded_wardrobe();
    let tee = id_of(&db, "Tee");

    let (item, record) = wardrobe::record_wash(&db, tee, WashType::Hand, at(3, 18)).unwrap();
    assert_eq!(item.wash_count, 1);
    assert_eq!(item.last_washed, Some(record.date));
    assert_eq!(record.clothing_item_id, Some(tee));

    wardrobe::record_wash(&db, tee, WashType::Machine, at(5, 18)).unwrap();
    let stored = db.get_item(tee).unwrap().unwrap();
    assert_eq!(stored.wash_count, 2);
    assert_eq!(stored.last_washed, Some(at(5, 18)));
    assert_eq!(stored.wash_records.len(), 2);
    assert_eq!(stored.wash_records[0].wash_type, WashType::Machine);
}

#[test]
fn test_wash_count_matches_records_after_many_washes() {
    let db = seeded_wardrobe();
    let jeans = id_of(&db, "Jeans");
    for day in 2..=9 {
        wardrobe::record_wash(&db, jeans, WashType::Machine, at(day, 7)).unwrap();
    }

    let stored = db.get_item(jeans).unwrap().unwrap();
    assert_eq!(stored.wash_count as usize, stored.wash_records.len());
    assert_eq!(stored.last_washed, Some(at(9, 7)));
}

#[test]
fn test_record_wash_on_missing_item_is_not_found() {
    let db = seeded_wardrobe();
    let err = wardrobe::record_wash(&db, 999, WashType::Machine, at(3, 9)).unwrap_err();
    assert!(matches!(err, WardrobeError::NotFound(999)));
}

#[test]
fn test_mark_dirty_puts_item_back_in_laundry() {
    let db = seeded_wardrobe();
    let tee = id_of(&db, "Tee");
    wardrobe::record_wash(&db, tee, WashType::Machine, at(10, 9)).unwrap();
    let now = at(11, 9);
    assert!(!needs_wash(&db.get_item(tee).unwrap().unwrap(), now));

    let item = wardrobe::mark_dirty(&db, tee).unwrap();
    assert_eq!(item.last_washed, None);
    assert_eq!(item.wash_count, 1);

    let items = db.items(ItemSort::NewestFirst).unwrap();
    let mut state = FilterState::default();
    state.toggle_laundry();
    let laundry: Vec<&str> = filter_items(&items, &state, now).iter().map(|i| i.name.as_str()).collect();
    assert!(laundry.contains(&"Tee"));
}

#[test]
fn test_laundry_filter_after_a_week() {
    let db = seeded_wardrobe();
    let tee = id_of(&db, "Tee");
    let washed = at(1, 12);
    wardrobe::record_wash(&db, tee, WashType::Machine, washed).unwrap();
    let item = db.get_item(tee).unwrap().unwrap();

    assert!(!needs_wash(&item, washed + Duration::days(7)));
    assert!(needs_wash(&item, washed + Duration::days(8)));
}

#[test]
fn test_add_item_rejects_blank_name() {
    let db = seeded_wardrobe();
    let err = wardrobe::add_item(&db, NewItem::new("   ", Category::Top), at(2, 9)).unwrap_err();
    assert!(matches!(err, WardrobeError::Validation(ValidationError::EmptyName)));
    assert_eq!(db.items(ItemSort::NewestFirst).unwrap().len(), 5);
}

#[test]
fn test_save_outfit_requires_name_and_items() {
    let db = seeded_wardrobe();
    let items = db.items(ItemSort::ByName).unwrap();

    let err = wardrobe::save_outfit(&db, "", Occasion::Casual, items, at(2, 9)).unwrap_err();
    assert!(matches!(err, WardrobeError::Validation(ValidationError::EmptyName)));

    let err = wardrobe::save_outfit(&db, "Empty", Occasion::Casual, Vec::new(), at(2, 9)).unwrap_err();
    assert!(matches!(err, WardrobeError::Validation(ValidationError::NoItems)));

    assert!(db.outfits().unwrap().is_empty());
}

#[test]
fn test_toggle_favorite_flips_and_persists() {
    let db = seeded_wardrobe();
    let items = db.items(ItemSort::ByName).unwrap();
    let outfit = wardrobe::save_outfit(&db, "Weekend", Occasion::Casual, items, at(2, 9)).unwrap();
    let id = outfit.id.unwrap();
    assert!(!outfit.is_favorite);

    assert!(wardrobe::toggle_favorite(&db, id).unwrap().is_favorite);
    assert!(db.get_outfit(id).unwrap().unwrap().is_favorite);
    assert!(!wardrobe::toggle_favorite(&db, id).unwrap().is_favorite);
}

#[test]
fn test_builder_saves_selected_items() {
    let db = seeded_wardrobe();
    let all = db.items(ItemSort::ByName).unwrap();

    let mut builder = OutfitBuilder::new();
    builder.name = "Office".to_string();
    builder.occasion = Occasion::Work;
    builder.toggle(id_of(&db, "Tee"));
    builder.toggle(id_of(&db, "Belt"));
    builder.toggle(id_of(&db, "Jeans"));
    builder.toggle(id_of(&db, "Belt"));

    let outfit = builder.save(&db, &all, at(4, 9)).unwrap();
    let names: Vec<&str> = outfit.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Jeans", "Tee"]);
    assert_eq!(db.outfits().unwrap()[0].occasion, Occasion::Work);
}

#[test]
fn test_generated_outfit_saves_the_revealed_picks() {
    let db = seeded_wardrobe();
    let items = db.items(ItemSort::ByName).unwrap();
    let mut generator = OutfitGenerator::new();
    let mut rng = StdRng::seed_from_u64(7);

    let schedule = generator.generate(&items, &mut rng);
    assert_eq!(schedule.len(), 4);

    let err = generator.save(&db, "Too early", Occasion::Casual, at(5, 9)).unwrap_err();
    assert!(matches!(err, WardrobeError::Validation(ValidationError::DraftNotReady)));

    for scheduled in schedule {
        assert!(generator.reveal(scheduled.event));
    }
    let outfit = generator.save(&db, "Random", Occasion::Travel, at(5, 9)).unwrap();
    let names: Vec<&str> = outfit.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Tee", "Jeans", "Sneakers", "Parka"]);

    let stored = db.get_outfit(outfit.id.unwrap()).unwrap().unwrap();
    assert_eq!(stored.items.len(), 4);
    assert_eq!(stored.occasion, Occasion::Travel);
}

#[test]
fn test_reminder_counts_only_washed_items_past_threshold() {
    let db = seeded_wardrobe();
    wardrobe::record_wash(&db, id_of(&db, "Tee"), WashType::Machine, at(1, 9)).unwrap();
    wardrobe::record_wash(&db, id_of(&db, "Jeans"), WashType::Machine, at(10, 9)).unwrap();
    let items = db.items(ItemSort::NewestFirst).unwrap();

    let due = wardrobe::items_due_for_reminder(&items, 7, at(10, 9));
    let names: Vec<&str> = due.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Tee"]);
}
