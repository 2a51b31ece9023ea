//! Model manager: the single owner of all domain collections.
//!
//! # Responsibility
//! - Hold exactly one instance of each domain collection plus user prefs.
//! - Apply mutations, then synchronously notify subscribed observers with
//!   the new collection snapshot.
//! - Own the reminder scheduler lifecycle (`start_reminders`,
//!   `stop_all_reminders`).
//!
//! # Invariants
//! - No other component holds a mutable reference to a collection.
//! - Observers never see a partially applied mutation; rejected mutations
//!   notify nobody.
//! - All mutation happens on the single logical UI thread; observer
//!   callbacks need not be `Send`.

use crate::model::calendar::{Calendar, CalendarError, Event, Reminder};
use crate::model::contact::{AddressBook, AddressBookError, Contact};
use crate::model::food::{Food, FoodList, FoodListError};
use crate::model::health::{Record, RecordList, RecordListError};
use crate::model::prefs::UserPrefs;
use crate::model::profile::{Profile, ProfileList, ProfileListError};
use crate::reminder::{now_epoch_ms, FireSink, ReminderScheduler};
use log::{info, warn};

/// Token returned by a subscribe operation; valid for the collection it was
/// issued for.
pub type SubscriptionId = u64;

/// Registered observers for one collection snapshot type.
struct ObserverSet<T> {
    next_id: SubscriptionId,
    entries: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T> Default for ObserverSet<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<T> ObserverSet<T> {
    fn subscribe(&mut self, callback: Box<dyn FnMut(&T)>) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    fn notify(&mut self, snapshot: &T) {
        for (_, callback) in &mut self.entries {
            callback(snapshot);
        }
    }
}

/// In-memory aggregate of every domain collection.
pub struct ModelManager {
    address_book: AddressBook,
    profiles: ProfileList,
    foods: FoodList,
    records: RecordList,
    calendar: Calendar,
    user_prefs: UserPrefs,
    contact_observers: ObserverSet<AddressBook>,
    profile_observers: ObserverSet<ProfileList>,
    food_observers: ObserverSet<FoodList>,
    record_observers: ObserverSet<RecordList>,
    calendar_observers: ObserverSet<Calendar>,
    scheduler: Option<ReminderScheduler>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new(
            AddressBook::new(),
            ProfileList::new(),
            FoodList::new(),
            RecordList::new(),
            Calendar::new(),
            UserPrefs::default(),
        )
    }
}

impl ModelManager {
    pub fn new(
        address_book: AddressBook,
        profiles: ProfileList,
        foods: FoodList,
        records: RecordList,
        calendar: Calendar,
        user_prefs: UserPrefs,
    ) -> Self {
        Self {
            address_book,
            profiles,
            foods,
            records,
            calendar,
            user_prefs,
            contact_observers: ObserverSet::default(),
            profile_observers: ObserverSet::default(),
            food_observers: ObserverSet::default(),
            record_observers: ObserverSet::default(),
            calendar_observers: ObserverSet::default(),
            scheduler: None,
        }
    }

    // Read-only views.

    pub fn address_book(&self) -> &AddressBook {
        &self.address_book
    }

    pub fn profile_list(&self) -> &ProfileList {
        &self.profiles
    }

    pub fn food_list(&self) -> &FoodList {
        &self.foods
    }

    pub fn record_list(&self) -> &RecordList {
        &self.records
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn user_prefs(&self) -> &UserPrefs {
        &self.user_prefs
    }

    // Mutations: update internal state first, then notify.

    pub fn add_contact(&mut self, contact: Contact) -> Result<(), AddressBookError> {
        self.address_book.add(contact)?;
        self.contact_observers.notify(&self.address_book);
        Ok(())
    }

    pub fn remove_contact(&mut self, name: &str) -> Result<Contact, AddressBookError> {
        let removed = self.address_book.remove(name)?;
        self.contact_observers.notify(&self.address_book);
        Ok(removed)
    }

    pub fn add_profile(&mut self, profile: Profile) -> Result<(), ProfileListError> {
        self.profiles.add(profile)?;
        self.profile_observers.notify(&self.profiles);
        Ok(())
    }

    pub fn remove_profile(&mut self, name: &str) -> Result<Profile, ProfileListError> {
        let removed = self.profiles.remove(name)?;
        self.profile_observers.notify(&self.profiles);
        Ok(removed)
    }

    pub fn add_food(&mut self, food: Food) -> Result<(), FoodListError> {
        self.foods.add(food)?;
        self.food_observers.notify(&self.foods);
        Ok(())
    }

    pub fn remove_food(&mut self, name: &str) -> Result<Food, FoodListError> {
        let removed = self.foods.remove(name)?;
        self.food_observers.notify(&self.foods);
        Ok(removed)
    }

    pub fn add_record(&mut self, record: Record) -> Result<(), RecordListError> {
        self.records.add(record)?;
        self.record_observers.notify(&self.records);
        Ok(())
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), CalendarError> {
        self.calendar.add_event(event)?;
        self.calendar_observers.notify(&self.calendar);
        Ok(())
    }

    /// Adds a reminder; while the scheduler runs, future-dated reminders are
    /// also scheduled to fire.
    pub fn add_reminder(&mut self, reminder: Reminder) -> Result<(), CalendarError> {
        self.calendar.add_reminder(reminder.clone())?;
        if let Some(scheduler) = &self.scheduler {
            if reminder.due_at_epoch_ms > now_epoch_ms()
                && scheduler.schedule(reminder).is_err()
            {
                warn!("event=reminder_schedule module=model status=skipped reason=scheduler_stopped");
            }
        }
        self.calendar_observers.notify(&self.calendar);
        Ok(())
    }

    pub fn set_user_prefs(&mut self, prefs: UserPrefs) {
        self.user_prefs = prefs;
    }

    // Publish/subscribe.

    pub fn subscribe_contacts(
        &mut self,
        callback: Box<dyn FnMut(&AddressBook)>,
    ) -> SubscriptionId {
        self.contact_observers.subscribe(callback)
    }

    pub fn unsubscribe_contacts(&mut self, id: SubscriptionId) -> bool {
        self.contact_observers.unsubscribe(id)
    }

    pub fn subscribe_profiles(
        &mut self,
        callback: Box<dyn FnMut(&ProfileList)>,
    ) -> SubscriptionId {
        self.profile_observers.subscribe(callback)
    }

    pub fn unsubscribe_profiles(&mut self, id: SubscriptionId) -> bool {
        self.profile_observers.unsubscribe(id)
    }

    pub fn subscribe_foods(&mut self, callback: Box<dyn FnMut(&FoodList)>) -> SubscriptionId {
        self.food_observers.subscribe(callback)
    }

    pub fn unsubscribe_foods(&mut self, id: SubscriptionId) -> bool {
        self.food_observers.unsubscribe(id)
    }

    pub fn subscribe_records(&mut self, callback: Box<dyn FnMut(&RecordList)>) -> SubscriptionId {
        self.record_observers.subscribe(callback)
    }

    pub fn unsubscribe_records(&mut self, id: SubscriptionId) -> bool {
        self.record_observers.unsubscribe(id)
    }

    pub fn subscribe_calendar(&mut self, callback: Box<dyn FnMut(&Calendar)>) -> SubscriptionId {
        self.calendar_observers.subscribe(callback)
    }

    pub fn unsubscribe_calendar(&mut self, id: SubscriptionId) -> bool {
        self.calendar_observers.unsubscribe(id)
    }

    // Reminder lifecycle.

    /// Starts the reminder scheduler and schedules every future-dated
    /// calendar reminder. Returns how many were scheduled; calling again
    /// while running is a no-op returning 0.
    pub fn start_reminders(&mut self, sink: FireSink) -> usize {
        if self.scheduler.is_some() {
            return 0;
        }

        let scheduler = ReminderScheduler::new(sink);
        let now = now_epoch_ms();
        let mut scheduled = 0;
        for reminder in self.calendar.upcoming_reminders(now) {
            if scheduler.schedule(reminder.clone()).is_ok() {
                scheduled += 1;
            }
        }
        info!("event=reminders_started module=model status=ok scheduled={scheduled}");
        self.scheduler = Some(scheduler);
        scheduled
    }

    /// Cancels any scheduled reminder notifications.
    ///
    /// Idempotent: a second call, or a call after every reminder already
    /// fired, does nothing.
    pub fn stop_all_reminders(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.stop_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModelManager;
    use crate::model::contact::Contact;
    use crate::model::food::{Food, FoodCategory};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn contact(name: &str) -> Contact {
        Contact::new(name, "91234567", "a@b.co", "somewhere")
    }

    #[test]
    fn observers_receive_post_mutation_snapshots() {
        let mut manager = ModelManager::default();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        manager.subscribe_contacts(Box::new(move |book| {
            sink.borrow_mut().push(book.len());
        }));

        manager
            .add_contact(contact("Alice"))
            .expect("add should succeed");
        manager
            .add_contact(contact("Bob"))
            .expect("add should succeed");
        manager.remove_contact("Alice").expect("remove should succeed");

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn rejected_mutation_notifies_nobody() {
        let mut manager = ModelManager::default();
        let calls = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&calls);
        manager.subscribe_foods(Box::new(move |_| {
            *sink.borrow_mut() += 1;
        }));

        manager
            .add_food(Food::new("Apple", FoodCategory::Fruit, 52, 36, 10))
            .expect("add should succeed");
        let _ = manager
            .add_food(Food::new("apple", FoodCategory::Snack, 1, 1, 1))
            .expect_err("duplicate should fail");

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn unsubscribed_observer_receives_nothing() {
        let mut manager = ModelManager::default();
        let calls = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&calls);
        let token = manager.subscribe_contacts(Box::new(move |_| {
            *sink.borrow_mut() += 1;
        }));

        assert!(manager.unsubscribe_contacts(token));
        assert!(!manager.unsubscribe_contacts(token));

        manager
            .add_contact(contact("Alice"))
            .expect("add should succeed");
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn stop_all_reminders_without_start_is_a_no_op() {
        let mut manager = ModelManager::default();
        manager.stop_all_reminders();
        manager.stop_all_reminders();
    }
}
