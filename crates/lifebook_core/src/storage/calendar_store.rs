//! Calendar adapter over separate event and reminder files.
//!
//! # Invariants
//! - `read` returns `Ok(None)` only when both files are absent; a missing
//!   half defaults to an empty list.
//! - A format or filesystem failure in either file fails the whole read.

use super::{JsonStore, StorageResult};
use crate::model::calendar::{Calendar, Event, Reminder};
use std::path::PathBuf;

/// Storage adapter joining the event and reminder files into one calendar.
pub struct CalendarStore {
    events: JsonStore<Vec<Event>>,
    reminders: JsonStore<Vec<Reminder>>,
}

impl CalendarStore {
    pub fn new(events_path: impl Into<PathBuf>, reminders_path: impl Into<PathBuf>) -> Self {
        Self {
            events: JsonStore::new(events_path),
            reminders: JsonStore::new(reminders_path),
        }
    }

    pub fn read(&self) -> StorageResult<Option<Calendar>> {
        let events = self.events.read()?;
        let reminders = self.reminders.read()?;

        if events.is_none() && reminders.is_none() {
            return Ok(None);
        }
        Ok(Some(Calendar::with_parts(
            events.unwrap_or_default(),
            reminders.unwrap_or_default(),
        )))
    }

    pub fn write(&self, calendar: &Calendar) -> StorageResult<()> {
        self.events.write(&calendar.events().to_vec())?;
        self.reminders.write(&calendar.reminders().to_vec())
    }
}
