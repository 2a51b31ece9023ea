//! Initialization sequencer: config, prefs, storage wiring and per-domain
//! initial-data resolution.
//!
//! # Responsibility
//! - Resolve and heal the config and user-preferences files.
//! - Construct storage adapters and resolve each domain's initial data.
//! - Assemble a fully populated model manager behind the logic facade.
//!
//! # Invariants
//! - No individual domain failure is fatal; each domain defaults
//!   independently.
//! - Absent file resolves to the domain's sample dataset; a malformed or
//!   unreadable file resolves to an empty collection, never the sample, so
//!   corrupted real data is not silently repopulated.
//! - Config and prefs are re-persisted after load so a missing or partial
//!   file heals to a normalized schema.

use crate::config::{Config, DEFAULT_CONFIG_PATH, DEFAULT_LOG_DIR};
use crate::logging::init_logging;
use crate::manager::ModelManager;
use crate::model::calendar::Calendar;
use crate::model::contact::AddressBook;
use crate::model::food::FoodList;
use crate::model::health::RecordList;
use crate::model::prefs::UserPrefs;
use crate::model::profile::ProfileList;
use crate::model::samples;
use crate::service::Lifebook;
use crate::storage::{JsonStore, StorageResult, Stores};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Identifier for one category of user data, keying the initial-data
/// dispatch below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Contacts,
    Profiles,
    Foods,
    Records,
    Calendar,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Contacts,
        Domain::Profiles,
        Domain::Foods,
        Domain::Records,
        Domain::Calendar,
    ];

    /// Human-readable label used in fallback log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Contacts => "address book",
            Self::Profiles => "profile list",
            Self::Foods => "food list",
            Self::Records => "record list",
            Self::Calendar => "calendar",
        }
    }
}

/// Resolves the config: caller-supplied path or the default, defaulted on
/// any read failure, always re-persisted to heal a missing or partial file.
pub fn init_config(config_path: Option<&Path>) -> Config {
    let path = match config_path {
        Some(custom) => {
            info!(
                "event=config_path module=bootstrap status=custom path={}",
                custom.display()
            );
            custom.to_path_buf()
        }
        None => PathBuf::from(DEFAULT_CONFIG_PATH),
    };
    info!(
        "event=config_load module=bootstrap status=start path={}",
        path.display()
    );

    let store: JsonStore<Config> = JsonStore::new(path);
    let config = match store.read() {
        Ok(Some(config)) => config,
        Ok(None) => {
            info!("event=config_load module=bootstrap status=defaulted reason=file_not_found");
            Config::default()
        }
        Err(err) => {
            warn!("event=config_load module=bootstrap status=defaulted error={err}");
            Config::default()
        }
    };

    // Rewrite in case the file was missing or carried a partial schema.
    if let Err(err) = store.write(&config) {
        warn!("event=config_save module=bootstrap status=error error={err}");
    }

    config
}

/// Loads user prefs with the same default-on-error, always-re-persist
/// policy as the config.
pub fn init_prefs(store: &JsonStore<UserPrefs>) -> UserPrefs {
    info!(
        "event=prefs_load module=bootstrap status=start path={}",
        store.path().display()
    );

    let prefs = match store.read() {
        Ok(Some(prefs)) => prefs,
        Ok(None) => {
            info!("event=prefs_load module=bootstrap status=defaulted reason=file_not_found");
            UserPrefs::default()
        }
        Err(err) => {
            warn!("event=prefs_load module=bootstrap status=defaulted error={err}");
            UserPrefs::default()
        }
    };

    if let Err(err) = store.write(&prefs) {
        warn!("event=prefs_save module=bootstrap status=error error={err}");
    }

    prefs
}

/// Generic initial-data resolution applied uniformly across domains.
///
/// Precedence: well-formed file wins; an absent file falls back to the
/// sample dataset; a malformed or unreadable file falls back to the empty
/// collection.
pub fn resolve_initial_data<T>(
    domain: Domain,
    read: impl FnOnce() -> StorageResult<Option<T>>,
    sample: impl FnOnce() -> T,
    empty: impl FnOnce() -> T,
) -> T {
    match read() {
        Ok(Some(data)) => {
            info!(
                "event=initial_data module=bootstrap status=loaded domain={}",
                domain.label()
            );
            data
        }
        Ok(None) => {
            info!(
                "event=initial_data module=bootstrap status=sample domain={} reason=file_not_found",
                domain.label()
            );
            sample()
        }
        Err(err) => {
            warn!(
                "event=initial_data module=bootstrap status=empty domain={} error={err}",
                domain.label()
            );
            empty()
        }
    }
}

/// Resolves every domain through `resolve_initial_data` and assembles the
/// model manager.
pub fn init_model(stores: &Stores, prefs: UserPrefs) -> ModelManager {
    let address_book = resolve_initial_data(
        Domain::Contacts,
        || stores.address_book.read(),
        samples::sample_address_book,
        AddressBook::new,
    );
    let profiles = resolve_initial_data(
        Domain::Profiles,
        || stores.profiles.read(),
        samples::sample_profile_list,
        ProfileList::new,
    );
    let foods = resolve_initial_data(
        Domain::Foods,
        || stores.foods.read(),
        samples::sample_food_list,
        FoodList::new,
    );
    let records = resolve_initial_data(
        Domain::Records,
        || stores.records.read(),
        samples::sample_record_list,
        RecordList::new,
    );
    let calendar = resolve_initial_data(
        Domain::Calendar,
        || stores.calendar.read(),
        samples::sample_calendar,
        Calendar::new,
    );

    ModelManager::new(address_book, profiles, foods, records, calendar, prefs)
}

/// Full startup sequence: config, logging, prefs, storage wiring, initial
/// data, facade.
pub fn init(config_path: Option<&Path>) -> Lifebook {
    let config = init_config(config_path);

    let log_dir = config_path
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(|parent| parent.join(DEFAULT_LOG_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
    if let Err(err) = init_logging(&config.log_level, &log_dir) {
        eprintln!("lifebook: logging unavailable: {err}");
    }

    let prefs_store: JsonStore<UserPrefs> = JsonStore::new(config.user_prefs_path().to_path_buf());
    let prefs = init_prefs(&prefs_store);
    let stores = Stores::from_prefs(prefs_store, &prefs);
    let manager = init_model(&stores, prefs);

    info!("event=bootstrap module=bootstrap status=ok");
    Lifebook::new(config, stores, manager)
}

#[cfg(test)]
mod tests {
    use super::{resolve_initial_data, Domain};
    use crate::storage::StorageError;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn format_error() -> StorageError {
        StorageError::Format {
            path: PathBuf::from("broken.json"),
            detail: "expected value".to_string(),
        }
    }

    #[test]
    fn well_formed_data_wins() {
        let resolved = resolve_initial_data(
            Domain::Foods,
            || Ok(Some(vec![1, 2, 3])),
            || vec![9],
            Vec::new,
        );
        assert_eq!(resolved, vec![1, 2, 3]);
    }

    #[test]
    fn absent_file_falls_back_to_sample() {
        let resolved =
            resolve_initial_data(Domain::Foods, || Ok(None), || vec![9], Vec::new);
        assert_eq!(resolved, vec![9]);
    }

    #[test]
    fn failed_read_falls_back_to_empty_not_sample() {
        let resolved = resolve_initial_data(
            Domain::Foods,
            || Err(format_error()),
            || vec![9],
            Vec::<i32>::new,
        );
        assert!(resolved.is_empty());
    }

    #[test]
    fn domain_labels_are_distinct() {
        let labels: HashSet<&str> = Domain::ALL.iter().map(|domain| domain.label()).collect();
        assert_eq!(labels.len(), Domain::ALL.len());
    }
}
