//! Built-in sample datasets shown when no user file exists yet.
//!
//! # Invariants
//! - Every sample collection is non-empty and satisfies its uniqueness
//!   invariant; constructors panic in tests, never at runtime, because the
//!   data below is fixed.

use crate::model::calendar::{Calendar, Event, Reminder};
use crate::model::contact::{AddressBook, Contact};
use crate::model::food::{Food, FoodCategory, FoodList};
use crate::model::health::{Record, RecordKind, RecordList};
use crate::model::profile::{Profile, ProfileList};

/// Sample contacts seeded on first launch.
pub fn sample_address_book() -> AddressBook {
    let mut book = AddressBook::new();
    let contacts = [
        Contact::new(
            "Alex Yeoh",
            "87438807",
            "alexyeoh@example.com",
            "Blk 30 Geylang Street 29, #06-40",
        ),
        Contact::new(
            "Bernice Yu",
            "99272758",
            "berniceyu@example.com",
            "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
        ),
        Contact::new(
            "Charlotte Oliveiro",
            "93210283",
            "charlotte@example.com",
            "Blk 11 Ang Mo Kio Street 74, #11-04",
        ),
    ];
    for contact in contacts {
        if let Err(err) = book.add(contact) {
            debug_assert!(false, "sample contact rejected: {err}");
        }
    }
    book
}

/// Sample biographical entries.
pub fn sample_profile_list() -> ProfileList {
    let mut list = ProfileList::new();
    let mut profile = Profile::new("Jamie Tan", "Tracking meals and glucose since 2019.");
    profile.medical_conditions = vec!["type 2 diabetes".to_string()];
    profile.goals = vec![
        "keep fasting glucose under 7 mmol/L".to_string(),
        "walk 8000 steps daily".to_string(),
    ];
    if let Err(err) = list.add(profile) {
        debug_assert!(false, "sample profile rejected: {err}");
    }
    list
}

/// Sample food recommendations.
pub fn sample_food_list() -> FoodList {
    let mut list = FoodList::new();
    let foods = [
        Food::new("Apple", FoodCategory::Fruit, 52, 36, 10),
        Food::new("Blueberries", FoodCategory::Fruit, 57, 53, 10),
        Food::new("Broccoli", FoodCategory::Vegetable, 34, 15, 2),
        Food::new("Spinach", FoodCategory::Vegetable, 23, 15, 0),
        Food::new("Grilled chicken breast", FoodCategory::Protein, 165, 0, 0),
        Food::new("Rolled oats", FoodCategory::Grain, 389, 55, 1),
        Food::new("Unsalted almonds", FoodCategory::Snack, 579, 15, 4),
        Food::new("Unsweetened soy milk", FoodCategory::Drink, 33, 34, 1),
    ];
    for food in foods {
        if let Err(err) = list.add(food) {
            debug_assert!(false, "sample food rejected: {err}");
        }
    }
    list
}

/// Sample health readings.
pub fn sample_record_list() -> RecordList {
    let mut list = RecordList::new();
    let records = [
        Record::new(RecordKind::BloodSugar, 1_735_723_800_000, 5.6),
        Record::new(RecordKind::BloodSugar, 1_735_810_200_000, 6.2),
        Record::new(RecordKind::Weight, 1_735_723_800_000, 68.4),
    ];
    for record in records {
        if let Err(err) = list.add(record) {
            debug_assert!(false, "sample record rejected: {err}");
        }
    }
    list
}

/// Sample calendar with one event and one reminder.
pub fn sample_calendar() -> Calendar {
    let mut calendar = Calendar::new();
    if let Err(err) = calendar.add_event(Event::new("Quarterly clinic review", 1_743_486_600_000)) {
        debug_assert!(false, "sample event rejected: {err}");
    }
    if let Err(err) =
        calendar.add_reminder(Reminder::new("Log a fasting reading", 1_743_471_000_000))
    {
        debug_assert!(false, "sample reminder rejected: {err}");
    }
    calendar
}
