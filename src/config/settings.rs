//! User settings for the expense tracker
//!
//! Stored as `config.json` in the base directory. Every field has a serde
//! default so older or hand-edited files keep loading.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::expense::DEFAULT_CATEGORIES;

/// Static route tables consulted by the route guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Paths that require a session
    #[serde(default = "default_protected_routes")]
    pub protected: Vec<String>,

    /// Paths that signed-in users are bounced away from
    #[serde(default = "default_public_routes")]
    pub public: Vec<String>,

    /// Where unauthenticated visitors of a protected path are sent
    #[serde(default = "default_login_redirect")]
    pub login_redirect: String,

    /// Where signed-in visitors of a public path are sent
    #[serde(default = "default_dashboard_path")]
    pub dashboard: String,
}

fn default_protected_routes() -> Vec<String> {
    vec!["/dashboard".to_string()]
}

fn default_public_routes() -> Vec<String> {
    vec!["/login".to_string(), "/signup".to_string(), "/".to_string()]
}

fn default_login_redirect() -> String {
    "/".to_string()
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            protected: default_protected_routes(),
            public: default_public_routes(),
            login_redirect: default_login_redirect(),
            dashboard: default_dashboard_path(),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category used when an expense is added without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Categories offered by the expense form; free text is still accepted
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Refuse new expenses for a month/category that has no budget goal
    #[serde(default = "default_true")]
    pub require_budget_goal: bool,

    /// How many entries the dashboard's top-categories view shows
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    #[serde(default)]
    pub routes: RouteSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORIES[0].to_string()
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_top_categories() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_category: default_category(),
            categories: default_categories(),
            require_budget_goal: default_true(),
            top_categories: default_top_categories(),
            routes: RouteSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))?;

        if !is_valid_date_format(&settings.date_format) {
            log::warn!(
                "invalid date_format '{}' in {}; using {}",
                settings.date_format,
                settings_path.display(),
                default_date_format()
            );
            settings.date_format = default_date_format();
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Whether `category` is one of the offered categories (case-insensitive)
    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

/// Whether `format` is a strftime string chrono can render
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
