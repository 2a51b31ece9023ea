//! Logic facade over the model manager and storage adapters.
//!
//! # Responsibility
//! - Route mutations through the model manager, then persist the touched
//!   domain (write-through).
//! - Drive the shutdown policy: persist prefs, cancel pending reminders.
//!
//! # Invariants
//! - A rejected mutation leaves storage untouched.
//! - A persistence failure after an applied mutation is surfaced to the
//!   caller; the in-memory state keeps the change.
//! - Shutdown never fails: persistence errors are logged and do not block
//!   process exit.

use crate::config::Config;
use crate::manager::ModelManager;
use crate::model::calendar::{CalendarError, Event, Reminder};
use crate::model::contact::{AddressBookError, Contact};
use crate::model::food::{Food, FoodListError};
use crate::model::health::{Record, RecordListError};
use crate::model::profile::{Profile, ProfileListError};
use crate::reminder::FireSink;
use crate::storage::{StorageError, Stores};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Facade-level errors: a domain rejection or a persistence failure.
#[derive(Debug)]
pub enum ServiceError {
    Contact(AddressBookError),
    Profile(ProfileListError),
    Food(FoodListError),
    Record(RecordListError),
    Calendar(CalendarError),
    Storage(StorageError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contact(err) => write!(f, "{err}"),
            Self::Profile(err) => write!(f, "{err}"),
            Self::Food(err) => write!(f, "{err}"),
            Self::Record(err) => write!(f, "{err}"),
            Self::Calendar(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contact(err) => Some(err),
            Self::Profile(err) => Some(err),
            Self::Food(err) => Some(err),
            Self::Record(err) => Some(err),
            Self::Calendar(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<AddressBookError> for ServiceError {
    fn from(value: AddressBookError) -> Self {
        Self::Contact(value)
    }
}

impl From<ProfileListError> for ServiceError {
    fn from(value: ProfileListError) -> Self {
        Self::Profile(value)
    }
}

impl From<FoodListError> for ServiceError {
    fn from(value: FoodListError) -> Self {
        Self::Food(value)
    }
}

impl From<RecordListError> for ServiceError {
    fn from(value: RecordListError) -> Self {
        Self::Record(value)
    }
}

impl From<CalendarError> for ServiceError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Thin command-execution layer owning the model manager and stores.
pub struct Lifebook {
    config: Config,
    stores: Stores,
    manager: ModelManager,
}

impl Lifebook {
    pub fn new(config: Config, stores: Stores, manager: ModelManager) -> Self {
        Self {
            config,
            stores,
            manager,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manager(&self) -> &ModelManager {
        &self.manager
    }

    /// Mutable manager access for view attachment and direct mutation.
    pub fn manager_mut(&mut self) -> &mut ModelManager {
        &mut self.manager
    }

    // Write-through commands.

    pub fn add_contact(&mut self, contact: Contact) -> Result<(), ServiceError> {
        self.manager.add_contact(contact)?;
        self.stores.address_book.write(self.manager.address_book())?;
        Ok(())
    }

    pub fn remove_contact(&mut self, name: &str) -> Result<Contact, ServiceError> {
        let removed = self.manager.remove_contact(name)?;
        self.stores.address_book.write(self.manager.address_book())?;
        Ok(removed)
    }

    pub fn add_profile(&mut self, profile: Profile) -> Result<(), ServiceError> {
        self.manager.add_profile(profile)?;
        self.stores.profiles.write(self.manager.profile_list())?;
        Ok(())
    }

    pub fn add_food(&mut self, food: Food) -> Result<(), ServiceError> {
        self.manager.add_food(food)?;
        self.stores.foods.write(self.manager.food_list())?;
        Ok(())
    }

    pub fn remove_food(&mut self, name: &str) -> Result<Food, ServiceError> {
        let removed = self.manager.remove_food(name)?;
        self.stores.foods.write(self.manager.food_list())?;
        Ok(removed)
    }

    pub fn add_record(&mut self, record: Record) -> Result<(), ServiceError> {
        self.manager.add_record(record)?;
        self.stores.records.write(self.manager.record_list())?;
        Ok(())
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), ServiceError> {
        self.manager.add_event(event)?;
        self.stores.calendar.write(self.manager.calendar())?;
        Ok(())
    }

    pub fn add_reminder(&mut self, reminder: Reminder) -> Result<(), ServiceError> {
        self.manager.add_reminder(reminder)?;
        self.stores.calendar.write(self.manager.calendar())?;
        Ok(())
    }

    /// Persists every domain collection plus user prefs.
    pub fn save_all(&self) -> Result<(), StorageError> {
        self.stores.address_book.write(self.manager.address_book())?;
        self.stores.profiles.write(self.manager.profile_list())?;
        self.stores.foods.write(self.manager.food_list())?;
        self.stores.records.write(self.manager.record_list())?;
        self.stores.calendar.write(self.manager.calendar())?;
        self.stores.user_prefs.write(self.manager.user_prefs())?;
        Ok(())
    }

    // Reminder lifecycle.

    pub fn start_reminders(&mut self, sink: FireSink) -> usize {
        self.manager.start_reminders(sink)
    }

    pub fn stop_all_reminders(&mut self) {
        self.manager.stop_all_reminders();
    }

    /// Shutdown policy: persist prefs, cancel reminders.
    ///
    /// Never fails and never blocks exit; safe to call more than once.
    pub fn shutdown(&mut self) {
        info!("event=app_stop module=service status=start");
        if let Err(err) = self.stores.user_prefs.write(self.manager.user_prefs()) {
            error!("event=prefs_save module=service status=error error={err}");
        }
        self.manager.stop_all_reminders();
        info!("event=app_stop module=service status=ok");
    }
}
