use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Category, ClothingItem, Occasion, Outfit, WashRecord, WashType};
use crate::store::{ItemSort, WardrobeStore};
use crate::utils::{format_timestamp, parse_timestamp};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("{0} has no id; insert it before updating")]
    MissingId(&'static str),
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },
}

pub struct Database {
    conn: Connection,
}

const ITEM_COLUMNS: &str = "id, name, category, color_name, brand, image, notes, date_added, last_washed, wash_count";
const OUTFIT_COLUMNS: &str = "id, name, occasion, date_created, is_favorite";
const WASH_RECORD_COLUMNS: &str = "id, date, wash_type, item_id";

macro_rules! sql_text_enum {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

sql_text_enum!(Category);
sql_text_enum!(WashType);
sql_text_enum!(Occasion);

/// Read a required timestamp column
fn timestamp_at(row: &rusqlite::Row, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a nullable timestamp column
fn optional_timestamp_at(row: &rusqlite::Row, idx: usize) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        parse_timestamp(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let db = Database { conn };
        db.initialize_schema()?;

        info!(path = %db_path.display(), "opened wardrobe database");
        Ok(db)
    }

    /// Open a private in-memory database (tests and dry runs)
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema (tables and indexes)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS clothing_items (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                category        TEXT NOT NULL,
                color_name      TEXT NOT NULL DEFAULT '',
                brand           TEXT NOT NULL DEFAULT '',
                image           BLOB,
                notes           TEXT NOT NULL DEFAULT '',
                date_added      TEXT NOT NULL,
                last_washed     TEXT,
                wash_count      INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS wash_records (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                date            TEXT NOT NULL,
                wash_type       TEXT NOT NULL,
                item_id         INTEGER REFERENCES clothing_items(id) ON DELETE CASCADE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS outfits (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL,
                occasion        TEXT NOT NULL DEFAULT 'casual',
                date_created    TEXT NOT NULL,
                is_favorite     INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        // Outfits reference items without owning them
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS outfit_items (
                outfit_id       INTEGER NOT NULL REFERENCES outfits(id) ON DELETE CASCADE,
                item_id         INTEGER NOT NULL REFERENCES clothing_items(id) ON DELETE CASCADE,
                position        INTEGER NOT NULL,
                PRIMARY KEY (outfit_id, item_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_items_date_added ON clothing_items(date_added)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_wash_records_item_id ON wash_records(item_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_outfits_date_created ON outfits(date_created)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_outfit_items_item_id ON outfit_items(item_id)",
            [],
        )?;

        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Helper function to map a row to a ClothingItem (without wash records)
    fn row_to_item(row: &rusqlite::Row) -> Result<ClothingItem, rusqlite::Error> {
        Ok(ClothingItem {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            category: row.get(2)?,
            color_name: row.get(3)?,
            brand: row.get(4)?,
            image: row.get(5)?,
            notes: row.get(6)?,
            date_added: timestamp_at(row, 7)?,
            last_washed: optional_timestamp_at(row, 8)?,
            wash_count: row.get(9)?,
            wash_records: Vec::new(),
        })
    }

    fn row_to_wash_record(row: &rusqlite::Row) -> Result<WashRecord, rusqlite::Error> {
        Ok(WashRecord {
            id: Some(row.get(0)?),
            date: timestamp_at(row, 1)?,
            wash_type: row.get(2)?,
            clothing_item_id: row.get(3)?,
        })
    }

    fn row_to_outfit(row: &rusqlite::Row) -> Result<Outfit, rusqlite::Error> {
        Ok(Outfit {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            occasion: row.get(2)?,
            date_created: timestamp_at(row, 3)?,
            is_favorite: row.get::<_, i64>(4)? != 0,
            items: Vec::new(),
        })
    }

    /// All wash records grouped by item id, newest first within each item
    fn wash_records_by_item(&self) -> Result<HashMap<i64, Vec<WashRecord>>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WASH_RECORD_COLUMNS} FROM wash_records
             WHERE item_id IS NOT NULL ORDER BY date DESC, id DESC"
        ))?;
        let records = stmt
            .query_map([], Self::row_to_wash_record)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut grouped: HashMap<i64, Vec<WashRecord>> = HashMap::new();
        for record in records {
            if let Some(item_id) = record.clothing_item_id {
                grouped.entry(item_id).or_default().push(record);
            }
        }
        Ok(grouped)
    }

    /// Items of one outfit in saved order
    fn items_for_outfit(&self, outfit_id: i64) -> Result<Vec<ClothingItem>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.name, i.category, i.color_name, i.brand, i.image, i.notes,
                    i.date_added, i.last_washed, i.wash_count
             FROM outfit_items oi
             JOIN clothing_items i ON i.id = oi.item_id
             WHERE oi.outfit_id = ?1
             ORDER BY oi.position ASC",
        )?;
        let items = stmt
            .query_map(rusqlite::params![outfit_id], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn with_items(&self, mut outfits: Vec<Outfit>) -> Result<Vec<Outfit>, DatabaseError> {
        for outfit in &mut outfits {
            if let Some(id) = outfit.id {
                outfit.items = self.items_for_outfit(id)?;
            }
        }
        Ok(outfits)
    }

    fn write_outfit_items(tx: &rusqlite::Transaction, outfit_id: i64, outfit: &Outfit) -> Result<(), DatabaseError> {
        tx.execute(
            "DELETE FROM outfit_items WHERE outfit_id = ?1",
            rusqlite::params![outfit_id],
        )?;
        for (position, item_id) in outfit.item_ids().into_iter().enumerate() {
            // An item listed twice keeps its first position
            tx.execute(
                "INSERT OR IGNORE INTO outfit_items (outfit_id, item_id, position) VALUES (?1, ?2, ?3)",
                rusqlite::params![outfit_id, item_id, position as i64],
            )?;
        }
        Ok(())
    }
}

impl WardrobeStore for Database {
    type Error = DatabaseError;

    /// Insert a clothing item and return its ID
    fn insert_item(&self, item: &ClothingItem) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO clothing_items (name, category, color_name, brand, image, notes, date_added, last_washed, wash_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                item.name,
                item.category,
                item.color_name,
                item.brand,
                item.image,
                item.notes,
                format_timestamp(&item.date_added),
                item.last_washed.as_ref().map(format_timestamp),
                item.wash_count,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %item.name, category = %item.category, "inserted clothing item");
        Ok(id)
    }

    /// Update an existing item's scalar fields (wash records are not touched)
    fn update_item(&self, item: &ClothingItem) -> Result<(), DatabaseError> {
        let id = item.id.ok_or(DatabaseError::MissingId("clothing item"))?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE clothing_items SET name = ?1, category = ?2, color_name = ?3, brand = ?4,
             image = ?5, notes = ?6, last_washed = ?7, wash_count = ?8 WHERE id = ?9",
            rusqlite::params![
                item.name,
                item.category,
                item.color_name,
                item.brand,
                item.image,
                item.notes,
                item.last_washed.as_ref().map(format_timestamp),
                item.wash_count,
                id
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { kind: "clothing item", id });
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete an item, its wash records and its outfit memberships.
    /// Outfits that contained the item are kept.
    fn delete_item(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let records = tx.execute("DELETE FROM wash_records WHERE item_id = ?1", rusqlite::params![id])?;
        let memberships = tx.execute("DELETE FROM outfit_items WHERE item_id = ?1", rusqlite::params![id])?;
        tx.execute("DELETE FROM clothing_items WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        debug!(id, records, memberships, "deleted clothing item");
        Ok(())
    }

    /// Get a single item by ID, with its wash records
    fn get_item(&self, id: i64) -> Result<Option<ClothingItem>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM clothing_items WHERE id = ?1"
        ))?;

        let result = stmt.query_row(rusqlite::params![id], Self::row_to_item);
        match result {
            Ok(mut item) => {
                item.wash_records = self.wash_records_for_item(id)?;
                Ok(Some(item))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Get all items with their wash records
    fn items(&self, sort: ItemSort) -> Result<Vec<ClothingItem>, DatabaseError> {
        let order_by = match sort {
            ItemSort::NewestFirst => "date_added DESC, id DESC",
            ItemSort::ByName => "name COLLATE NOCASE ASC, id ASC",
        };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM clothing_items ORDER BY {order_by}"
        ))?;
        let mut items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = self.wash_records_by_item()?;
        for item in &mut items {
            if let Some(id) = item.id {
                item.wash_records = records.remove(&id).unwrap_or_default();
            }
        }
        Ok(items)
    }

    fn record_wash(&self, record: &WashRecord, item: &ClothingItem) -> Result<i64, DatabaseError> {
        let item_id = item.id.ok_or(DatabaseError::MissingId("clothing item"))?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO wash_records (date, wash_type, item_id) VALUES (?1, ?2, ?3)",
            rusqlite::params![format_timestamp(&record.date), record.wash_type, item_id],
        )?;
        let record_id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE clothing_items SET last_washed = ?1, wash_count = ?2 WHERE id = ?3",
            rusqlite::params![
                item.last_washed.as_ref().map(format_timestamp),
                item.wash_count,
                item_id
            ],
        )?;
        tx.commit()?;
        debug!(item_id, record_id, wash_type = record.wash_type.as_str(), "recorded wash");
        Ok(record_id)
    }

    /// Delete a wash record. The owning item's wash count is left as is.
    fn delete_wash_record(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM wash_records WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(())
    }

    fn wash_records_for_item(&self, item_id: i64) -> Result<Vec<WashRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WASH_RECORD_COLUMNS} FROM wash_records WHERE item_id = ?1 ORDER BY date DESC, id DESC"
        ))?;
        let records = stmt
            .query_map(rusqlite::params![item_id], Self::row_to_wash_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Insert an outfit and its item references, returning the outfit ID
    fn insert_outfit(&self, outfit: &Outfit) -> Result<i64, DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO outfits (name, occasion, date_created, is_favorite) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                outfit.name,
                outfit.occasion,
                format_timestamp(&outfit.date_created),
                if outfit.is_favorite { 1 } else { 0 }
            ],
        )?;
        let id = tx.last_insert_rowid();
        Self::write_outfit_items(&tx, id, outfit)?;
        tx.commit()?;
        debug!(id, name = %outfit.name, items = outfit.items.len(), "inserted outfit");
        Ok(id)
    }

    fn update_outfit(&self, outfit: &Outfit) -> Result<(), DatabaseError> {
        let id = outfit.id.ok_or(DatabaseError::MissingId("outfit"))?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE outfits SET name = ?1, occasion = ?2, is_favorite = ?3 WHERE id = ?4",
            rusqlite::params![
                outfit.name,
                outfit.occasion,
                if outfit.is_favorite { 1 } else { 0 },
                id
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { kind: "outfit", id });
        }
        Self::write_outfit_items(&tx, id, outfit)?;
        tx.commit()?;
        Ok(())
    }

    /// Delete an outfit. Its items stay in the wardrobe.
    fn delete_outfit(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM outfit_items WHERE outfit_id = ?1", rusqlite::params![id])?;
        tx.execute("DELETE FROM outfits WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        debug!(id, "deleted outfit");
        Ok(())
    }

    fn get_outfit(&self, id: i64) -> Result<Option<Outfit>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {OUTFIT_COLUMNS} FROM outfits WHERE id = ?1"
        ))?;

        let result = stmt.query_row(rusqlite::params![id], Self::row_to_outfit);
        match result {
            Ok(mut outfit) => {
                outfit.items = self.items_for_outfit(id)?;
                Ok(Some(outfit))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Get all outfits, newest first
    fn outfits(&self) -> Result<Vec<Outfit>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {OUTFIT_COLUMNS} FROM outfits ORDER BY date_created DESC, id DESC"
        ))?;
        let outfits = stmt
            .query_map([], Self::row_to_outfit)?
            .collect::<Result<Vec<_>, _>>()?;
        self.with_items(outfits)
    }

    /// Outfits that reference the given item, newest first
    fn outfits_for_item(&self, item_id: i64) -> Result<Vec<Outfit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT o.id, o.name, o.occasion, o.date_created, o.is_favorite
             FROM outfits o
             JOIN outfit_items oi ON oi.outfit_id = o.id
             WHERE oi.item_id = ?1
             ORDER BY o.date_created DESC, o.id DESC",
        )?;
        let outfits = stmt
            .query_map(rusqlite::params![item_id], Self::row_to_outfit)?
            .collect::<Result<Vec<_>, _>>()?;
        self.with_items(outfits)
    }
}
