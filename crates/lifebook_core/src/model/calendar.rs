//! Calendar model: scheduled events and reminders.
//!
//! # Invariants
//! - Events are unique by `(description, starts_at_epoch_ms)`.
//! - Reminders are unique by `(description, due_at_epoch_ms)`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    EmptyDescription,
    DuplicateEvent(String),
    DuplicateReminder(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "calendar entry description cannot be empty"),
            Self::DuplicateEvent(description) => write!(f, "duplicate event: {description}"),
            Self::DuplicateReminder(description) => {
                write!(f, "duplicate reminder: {description}")
            }
        }
    }
}

impl Error for CalendarError {}

/// One scheduled calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub description: String,
    /// Unix epoch milliseconds of the event start.
    pub starts_at_epoch_ms: i64,
}

impl Event {
    pub fn new(description: impl Into<String>, starts_at_epoch_ms: i64) -> Self {
        Self {
            description: description.into(),
            starts_at_epoch_ms,
        }
    }

    pub fn is_same(&self, other: &Event) -> bool {
        self.starts_at_epoch_ms == other.starts_at_epoch_ms
            && self.description.eq_ignore_ascii_case(&other.description)
    }
}

/// One reminder due at a future time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub description: String,
    /// Unix epoch milliseconds at which the reminder fires.
    pub due_at_epoch_ms: i64,
}

impl Reminder {
    pub fn new(description: impl Into<String>, due_at_epoch_ms: i64) -> Self {
        Self {
            description: description.into(),
            due_at_epoch_ms,
        }
    }

    pub fn is_same(&self, other: &Reminder) -> bool {
        self.due_at_epoch_ms == other.due_at_epoch_ms
            && self.description.eq_ignore_ascii_case(&other.description)
    }
}

/// Events and reminders owned by the model manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    events: Vec<Event>,
    reminders: Vec<Reminder>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(events: Vec<Event>, reminders: Vec<Reminder>) -> Self {
        Self { events, reminders }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.reminders.is_empty()
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), CalendarError> {
        if event.description.trim().is_empty() {
            return Err(CalendarError::EmptyDescription);
        }
        if self.events.iter().any(|existing| existing.is_same(&event)) {
            return Err(CalendarError::DuplicateEvent(event.description));
        }
        self.events.push(event);
        Ok(())
    }

    pub fn add_reminder(&mut self, reminder: Reminder) -> Result<(), CalendarError> {
        if reminder.description.trim().is_empty() {
            return Err(CalendarError::EmptyDescription);
        }
        if self
            .reminders
            .iter()
            .any(|existing| existing.is_same(&reminder))
        {
            return Err(CalendarError::DuplicateReminder(reminder.description));
        }
        self.reminders.push(reminder);
        Ok(())
    }

    /// Reminders due strictly after `now_epoch_ms`, for startup scheduling.
    pub fn upcoming_reminders(&self, now_epoch_ms: i64) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.due_at_epoch_ms > now_epoch_ms)
            .collect()
    }

    /// Checks collection invariants after deserialization.
    pub fn verify(&self) -> Result<(), String> {
        for (index, event) in self.events.iter().enumerate() {
            if event.description.trim().is_empty() {
                return Err(format!("event at index {index} has an empty description"));
            }
            if self.events[..index].iter().any(|earlier| earlier.is_same(event)) {
                return Err(format!("duplicate event: {}", event.description));
            }
        }
        for (index, reminder) in self.reminders.iter().enumerate() {
            if reminder.description.trim().is_empty() {
                return Err(format!(
                    "reminder at index {index} has an empty description"
                ));
            }
            if self.reminders[..index]
                .iter()
                .any(|earlier| earlier.is_same(reminder))
            {
                return Err(format!("duplicate reminder: {}", reminder.description));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Calendar, CalendarError, Event, Reminder};

    #[test]
    fn duplicate_event_is_rejected() {
        let mut calendar = Calendar::new();
        calendar
            .add_event(Event::new("Clinic visit", 1_700_000_000_000))
            .expect("first event should be accepted");
        let err = calendar
            .add_event(Event::new("clinic VISIT", 1_700_000_000_000))
            .expect_err("same description and time should fail");
        assert!(matches!(err, CalendarError::DuplicateEvent(_)));
    }

    #[test]
    fn upcoming_reminders_filters_past_entries() {
        let mut calendar = Calendar::new();
        calendar
            .add_reminder(Reminder::new("take reading", 1_000))
            .expect("past reminder should be accepted");
        calendar
            .add_reminder(Reminder::new("refill prescription", 5_000))
            .expect("future reminder should be accepted");

        let upcoming = calendar.upcoming_reminders(2_000);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].description, "refill prescription");
    }
}
