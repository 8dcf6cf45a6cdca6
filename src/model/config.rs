use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from checklist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistConfig {
    #[serde(default)]
    pub checklist: ChecklistInfo,
    /// Items present when the session starts
    #[serde(default)]
    pub items: Vec<SeedItem>,
    /// Backing data for the user directory
    #[serde(default)]
    pub users: Vec<UserConfig>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistInfo {
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ChecklistInfo {
    fn default() -> Self {
        ChecklistInfo {
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    "Checklist".to_string()
}

/// A `[[items]]` entry. Priority stays a string so a bad tier can be
/// reported with the item it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedItem {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub priority: Option<String>,
    /// User id, resolved against `[[users]]`
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Lozenge colors keyed by tier name (low, medium, high)
    #[serde(default)]
    pub priority_colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "checklist=debug"
    #[serde(default)]
    pub level: Option<String>,
    /// Log file path. Without one, nothing is logged.
    #[serde(default)]
    pub file: Option<String>,
}
