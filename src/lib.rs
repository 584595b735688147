pub mod calendar;
pub mod cli;
pub mod config;
pub mod database;
pub mod filter;
pub mod generator;
pub mod logging;
pub mod models;
pub mod store;
pub mod timer;
pub mod tui;
pub mod utils;
pub mod wardrobe;

pub use config::Config;
pub use database::Database;
pub use models::{Category, ClothingItem, Occasion, Outfit, WashRecord, WashType};
pub use store::{ItemSort, WardrobeStore};
pub use utils::Profile;
