use lifebook_core::model::calendar::{Calendar, Event, Reminder};
use lifebook_core::model::contact::{AddressBook, Contact};
use lifebook_core::model::food::{Food, FoodCategory, FoodList};
use lifebook_core::model::health::{Record, RecordKind, RecordList};
use lifebook_core::{CalendarStore, JsonStore};
use std::fs;
use tempfile::TempDir;

#[test]
fn write_then_read_returns_equal_address_book() {
    let dir = TempDir::new().unwrap();
    let store: JsonStore<AddressBook> = JsonStore::new(dir.path().join("book.json"));

    let mut book = AddressBook::new();
    book.add(Contact::new("Dana Wee", "94440000", "dana@example.com", "4 Fourth Ave"))
        .unwrap();
    store.write(&book).unwrap();

    let loaded = store.read().unwrap().expect("file should exist");
    assert_eq!(loaded, book);
}

#[test]
fn write_then_read_preserves_float_readings() {
    let dir = TempDir::new().unwrap();
    let store: JsonStore<RecordList> = JsonStore::new(dir.path().join("records.json"));

    let mut records = RecordList::new();
    records
        .add(Record::new(RecordKind::BloodSugar, 1_700_000_000_000, 5.6))
        .unwrap();
    records
        .add(Record::new(RecordKind::Weight, 1_700_000_000_001, 68.4))
        .unwrap();
    store.write(&records).unwrap();

    let loaded = store.read().unwrap().expect("file should exist");
    assert_eq!(loaded, records);
}

#[test]
fn missing_file_reads_as_none() {
    let dir = TempDir::new().unwrap();
    let store: JsonStore<FoodList> = JsonStore::new(dir.path().join("absent.json"));
    assert!(store.read().unwrap().is_none());
}

#[test]
fn malformed_content_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("foods.json");
    fs::write(&path, "{{{{").unwrap();
    let store: JsonStore<FoodList> = JsonStore::new(path);

    let err = store.read().expect_err("parse should fail");
    assert!(err.is_format());
}

#[test]
fn filesystem_failure_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("actually-a-directory");
    fs::create_dir_all(&path).unwrap();
    let store: JsonStore<FoodList> = JsonStore::new(path);

    let err = store.read().expect_err("reading a directory should fail");
    assert!(err.is_io());
}

#[test]
fn write_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store: JsonStore<FoodList> =
        JsonStore::new(dir.path().join("deep/nested/foods.json"));

    let mut foods = FoodList::new();
    foods
        .add(Food::new("Apple", FoodCategory::Fruit, 52, 36, 10))
        .unwrap();
    store.write(&foods).unwrap();

    assert_eq!(store.read().unwrap().expect("file should exist"), foods);
}

#[test]
fn calendar_store_round_trips_both_files() {
    let dir = TempDir::new().unwrap();
    let store = CalendarStore::new(
        dir.path().join("events.json"),
        dir.path().join("reminders.json"),
    );

    let mut calendar = Calendar::new();
    calendar
        .add_event(Event::new("Clinic visit", 1_743_486_600_000))
        .unwrap();
    calendar
        .add_reminder(Reminder::new("Log a reading", 1_743_471_000_000))
        .unwrap();
    store.write(&calendar).unwrap();

    let loaded = store.read().unwrap().expect("calendar should exist");
    assert_eq!(loaded, calendar);
}

#[test]
fn calendar_store_is_none_only_when_both_files_are_absent() {
    let dir = TempDir::new().unwrap();
    let events_path = dir.path().join("events.json");
    let reminders_path = dir.path().join("reminders.json");

    let store = CalendarStore::new(&events_path, &reminders_path);
    assert!(store.read().unwrap().is_none());

    fs::write(&events_path, r#"[{"description":"x","starts_at_epoch_ms":1}]"#).unwrap();
    let loaded = store.read().unwrap().expect("one present file is enough");
    assert_eq!(loaded.events().len(), 1);
    assert!(loaded.reminders().is_empty());
}

#[test]
fn calendar_store_propagates_format_errors_from_either_file() {
    let dir = TempDir::new().unwrap();
    let events_path = dir.path().join("events.json");
    let reminders_path = dir.path().join("reminders.json");
    fs::write(&reminders_path, "not json").unwrap();

    let store = CalendarStore::new(&events_path, &reminders_path);
    let err = store.read().expect_err("malformed reminders should fail");
    assert!(err.is_format());
}
