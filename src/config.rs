use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

pub const MIN_REMINDER_DAYS: u32 = 1;
pub const MAX_REMINDER_DAYS: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub has_completed_onboarding: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub wash_notifications_enabled: bool,
    #[serde(default = "default_wash_reminder_days")]
    pub wash_reminder_days: u32,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_tab_left")]
    pub tab_left: String,
    #[serde(default = "default_tab_right")]
    pub tab_right: String,
    #[serde(default = "default_tab_1")]
    pub tab_1: String,
    #[serde(default = "default_tab_2")]
    pub tab_2: String,
    #[serde(default = "default_tab_3")]
    pub tab_3: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_settings")]
    pub settings: String,
    #[serde(default = "default_generate")]
    pub generate: String,
    #[serde(default = "default_wash")]
    pub wash: String,
    #[serde(default = "default_mark_dirty")]
    pub mark_dirty: String,
    #[serde(default = "default_favorite")]
    pub favorite: String,
}

/// Colors used by the terminal UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub fg: String,
    pub bg: String,
    pub accent: String,
    pub muted: String,
    pub highlight_bg: String,
    pub warning: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_completed_onboarding: false,
            dark_mode: false,
            wash_notifications_enabled: false,
            wash_reminder_days: default_wash_reminder_days(),
            database_path: default_database_path(),
            key_bindings: KeyBindings::default(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            new: default_new(),
            save: default_save(),
            delete: default_delete(),
            select: default_select(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            tab_left: default_tab_left(),
            tab_right: default_tab_right(),
            tab_1: default_tab_1(),
            tab_2: default_tab_2(),
            tab_3: default_tab_3(),
            help: default_help(),
            settings: default_settings(),
            generate: default_generate(),
            wash: default_wash(),
            mark_dirty: default_mark_dirty(),
            favorite: default_favorite(),
        }
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            fg: "black".to_string(),
            bg: "white".to_string(),
            accent: "#4B0082".to_string(),
            muted: "darkgray".to_string(),
            highlight_bg: "#4B0082".to_string(),
            warning: "red".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            fg: "white".to_string(),
            bg: "black".to_string(),
            accent: "#8C7CF0".to_string(),
            muted: "gray".to_string(),
            highlight_bg: "#5B4FC4".to_string(),
            warning: "lightred".to_string(),
        }
    }
}

// Default value functions
fn default_wash_reminder_days() -> u32 {
    7
}

fn default_database_path() -> String {
    // This is a fallback - actual profile will be determined at load time
    if let Some(data_dir) = utils::get_data_dir(utils::Profile::Prod) {
        data_dir.join("closet.db").to_string_lossy().to_string()
    } else {
        "~/.local/share/closet/closet.db".to_string()
    }
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_select() -> String {
    "Enter".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_tab_left() -> String {
    "Left".to_string()
}

fn default_tab_right() -> String {
    "Right".to_string()
}

fn default_tab_1() -> String {
    "1".to_string()
}

fn default_tab_2() -> String {
    "2".to_string()
}

fn default_tab_3() -> String {
    "3".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_settings() -> String {
    "F2".to_string()
}

fn default_generate() -> String {
    "g".to_string()
}

fn default_wash() -> String {
    "w".to_string()
}

fn default_mark_dirty() -> String {
    "m".to_string()
}

fn default_favorite() -> String {
    "f".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Parse a config file body, clamping out-of-range values
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(contents)?;
        let requested = config.wash_reminder_days;
        config.set_wash_reminder_days(requested);
        if config.wash_reminder_days != requested {
            warn!(requested, clamped = config.wash_reminder_days, "wash_reminder_days out of range");
        }
        Ok(config)
    }

    /// Load configuration from file, or create default if missing
    /// Uses the provided profile to determine config and database paths
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let mut config = Self::from_toml_str(&contents)?;

            // Ensure database path matches profile (in case config was manually edited)
            config.database_path = Self::default_database_path_for_profile(profile);

            Ok(config)
        } else {
            // Create default config and save it
            let mut config = Config::default();
            config.database_path = Self::default_database_path_for_profile(profile);
            config.save_with_profile(profile)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get default database path for a specific profile
    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("closet.db").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/closet-dev/closet.db".to_string(),
                utils::Profile::Prod => "~/.local/share/closet/closet.db".to_string(),
            }
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Theme chosen by the dark mode flag
    pub fn get_active_theme(&self) -> Theme {
        if self.dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }

    pub fn set_wash_reminder_days(&mut self, days: u32) {
        self.wash_reminder_days = days.clamp(MIN_REMINDER_DAYS, MAX_REMINDER_DAYS);
    }

    pub fn increment_wash_reminder_days(&mut self) {
        self.set_wash_reminder_days(self.wash_reminder_days.saturating_add(1));
    }

    pub fn decrement_wash_reminder_days(&mut self) {
        self.set_wash_reminder_days(self.wash_reminder_days.saturating_sub(1));
    }

    /// Show onboarding again on next start
    pub fn reset_onboarding(&mut self) {
        self.has_completed_onboarding = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert!(!config.has_completed_onboarding);
        assert!(!config.dark_mode);
        assert!(!config.wash_notifications_enabled);
        assert_eq!(config.wash_reminder_days, 7);
        assert_eq!(config.key_bindings.generate, "g");
    }

    #[test]
    fn reminder_days_are_clamped() {
        let config = Config::from_toml_str("wash_reminder_days = 90").unwrap();
        assert_eq!(config.wash_reminder_days, MAX_REMINDER_DAYS);

        let mut config = Config::from_toml_str("wash_reminder_days = 0").unwrap();
        assert_eq!(config.wash_reminder_days, MIN_REMINDER_DAYS);

        config.decrement_wash_reminder_days();
        assert_eq!(config.wash_reminder_days, MIN_REMINDER_DAYS);
        config.set_wash_reminder_days(30);
        config.increment_wash_reminder_days();
        assert_eq!(config.wash_reminder_days, 30);
    }

    #[test]
    fn flags_round_trip_through_toml() {
        let mut config = Config::default();
        config.dark_mode = true;
        config.has_completed_onboarding = true;
        config.wash_notifications_enabled = true;
        config.set_wash_reminder_days(12);

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert!(parsed.dark_mode);
        assert!(parsed.has_completed_onboarding);
        assert!(parsed.wash_notifications_enabled);
        assert_eq!(parsed.wash_reminder_days, 12);
        assert_eq!(parsed.get_active_theme(), Theme::dark());
    }

    #[test]
    fn reset_onboarding_clears_the_flag() {
        let mut config = Config::default();
        config.has_completed_onboarding = true;
        config.reset_onboarding();
        assert!(!config.has_completed_onboarding);
    }
}
