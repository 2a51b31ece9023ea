//! Per-user preferences: where each domain's data file lives.
//!
//! # Invariants
//! - Every field carries a serde default; a partial file heals to a full
//!   schema on the rewrite after load.
//! - Event and reminder files are separate, both feeding the calendar.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_address_book_path() -> PathBuf {
    PathBuf::from("data/addressbook.json")
}

fn default_profile_list_path() -> PathBuf {
    PathBuf::from("data/profiles.json")
}

fn default_food_list_path() -> PathBuf {
    PathBuf::from("data/foodlist.json")
}

fn default_record_list_path() -> PathBuf {
    PathBuf::from("data/records.json")
}

fn default_event_list_path() -> PathBuf {
    PathBuf::from("data/events.json")
}

fn default_reminder_list_path() -> PathBuf {
    PathBuf::from("data/reminders.json")
}

/// Per-user settings read at startup and re-saved on shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrefs {
    #[serde(default = "default_address_book_path")]
    pub address_book_path: PathBuf,
    #[serde(default = "default_profile_list_path")]
    pub profile_list_path: PathBuf,
    #[serde(default = "default_food_list_path")]
    pub food_list_path: PathBuf,
    #[serde(default = "default_record_list_path")]
    pub record_list_path: PathBuf,
    #[serde(default = "default_event_list_path")]
    pub event_list_path: PathBuf,
    #[serde(default = "default_reminder_list_path")]
    pub reminder_list_path: PathBuf,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            address_book_path: default_address_book_path(),
            profile_list_path: default_profile_list_path(),
            food_list_path: default_food_list_path(),
            record_list_path: default_record_list_path(),
            event_list_path: default_event_list_path(),
            reminder_list_path: default_reminder_list_path(),
        }
    }
}

impl UserPrefs {
    /// Resolves every data path against `root`, for sandboxed setups.
    pub fn rooted_at(root: &std::path::Path) -> Self {
        let defaults = Self::default();
        Self {
            address_book_path: root.join(defaults.address_book_path),
            profile_list_path: root.join(defaults.profile_list_path),
            food_list_path: root.join(defaults.food_list_path),
            record_list_path: root.join(defaults.record_list_path),
            event_list_path: root.join(defaults.event_list_path),
            reminder_list_path: root.join(defaults.reminder_list_path),
        }
    }
}
