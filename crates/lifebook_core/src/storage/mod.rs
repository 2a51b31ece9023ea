//! Storage adapters: pure translation between domain data and JSON files.
//!
//! # Responsibility
//! - Define the storage error taxonomy (format vs filesystem failures).
//! - Provide one adapter per domain plus the preferences adapter.
//!
//! # Invariants
//! - Adapters carry no business logic, caching or retries; fallback policy
//!   belongs to the initialization sequencer.
//! - Read paths reject invalid persisted state (duplicates, bad field
//!   values) as format errors instead of masking it.

use crate::config::Config;
use crate::model::calendar::{Calendar, Event, Reminder};
use crate::model::contact::AddressBook;
use crate::model::food::FoodList;
use crate::model::health::RecordList;
use crate::model::prefs::UserPrefs;
use crate::model::profile::ProfileList;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod calendar_store;
mod json_store;

pub use calendar_store::CalendarStore;
pub use json_store::JsonStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage failure taxonomy.
///
/// `Format` means the file exists but its content does not match the
/// expected schema; `Io` means a filesystem-level failure.
#[derive(Debug)]
pub enum StorageError {
    Format { path: PathBuf, detail: String },
    Io { path: PathBuf, source: std::io::Error },
}

impl StorageError {
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format { path, detail } => {
                write!(f, "data file `{}` is not in the expected format: {detail}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to access data file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Persistable domain data with invariants beyond the JSON schema.
///
/// `verify` runs after every successful parse; a failure is reported as a
/// `StorageError::Format` by the adapter.
pub trait DomainData: Serialize + DeserializeOwned {
    fn verify(&self) -> Result<(), String>;
}

impl DomainData for AddressBook {
    fn verify(&self) -> Result<(), String> {
        AddressBook::verify(self)
    }
}

impl DomainData for ProfileList {
    fn verify(&self) -> Result<(), String> {
        ProfileList::verify(self)
    }
}

impl DomainData for FoodList {
    fn verify(&self) -> Result<(), String> {
        FoodList::verify(self)
    }
}

impl DomainData for RecordList {
    fn verify(&self) -> Result<(), String> {
        RecordList::verify(self)
    }
}

impl DomainData for Vec<Event> {
    fn verify(&self) -> Result<(), String> {
        Calendar::with_parts(self.clone(), Vec::new()).verify()
    }
}

impl DomainData for Vec<Reminder> {
    fn verify(&self) -> Result<(), String> {
        Calendar::with_parts(Vec::new(), self.clone()).verify()
    }
}

impl DomainData for Config {
    fn verify(&self) -> Result<(), String> {
        crate::logging::normalize_level(&self.log_level).map(|_| ())
    }
}

impl DomainData for UserPrefs {
    fn verify(&self) -> Result<(), String> {
        Ok(())
    }
}

/// One adapter per domain, constructed from the resolved user preferences.
pub struct Stores {
    pub user_prefs: JsonStore<UserPrefs>,
    pub address_book: JsonStore<AddressBook>,
    pub profiles: JsonStore<ProfileList>,
    pub foods: JsonStore<FoodList>,
    pub records: JsonStore<RecordList>,
    pub calendar: CalendarStore,
}

impl Stores {
    /// Wires every domain adapter to the file paths named in `prefs`.
    pub fn from_prefs(user_prefs: JsonStore<UserPrefs>, prefs: &UserPrefs) -> Self {
        Self {
            user_prefs,
            address_book: JsonStore::new(prefs.address_book_path.clone()),
            profiles: JsonStore::new(prefs.profile_list_path.clone()),
            foods: JsonStore::new(prefs.food_list_path.clone()),
            records: JsonStore::new(prefs.record_list_path.clone()),
            calendar: CalendarStore::new(
                prefs.event_list_path.clone(),
                prefs.reminder_list_path.clone(),
            ),
        }
    }
}
