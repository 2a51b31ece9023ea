use lifebook_core::model::contact::{AddressBook, Contact};
use lifebook_core::model::prefs::UserPrefs;
use lifebook_core::model::samples;
use lifebook_core::{init, Config, ServiceError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn seed_config(dir: &Path) -> (PathBuf, UserPrefs) {
    let config_path = dir.join("config.json");
    let prefs_path = dir.join("preferences.json");
    let prefs = UserPrefs::rooted_at(dir);

    let config = Config {
        log_level: lifebook_core::default_log_level().to_string(),
        user_prefs_path: prefs_path.clone(),
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    fs::write(&prefs_path, serde_json::to_string_pretty(&prefs).unwrap()).unwrap();

    (config_path, prefs)
}

#[test]
fn startup_resolves_each_domain_independently() {
    let dir = TempDir::new().unwrap();
    let (config_path, prefs) = seed_config(dir.path());

    // Three valid contacts on disk, a corrupted food list, nothing else.
    let mut book = AddressBook::new();
    book.add(Contact::new("Ann Teo", "91110000", "ann@example.com", "1 First Ave"))
        .unwrap();
    book.add(Contact::new("Ben Ong", "92220000", "ben@example.com", "2 Second Ave"))
        .unwrap();
    book.add(Contact::new("Cara Lim", "93330000", "cara@example.com", "3 Third Ave"))
        .unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(&prefs.address_book_path, serde_json::to_string(&book).unwrap()).unwrap();
    fs::write(&prefs.food_list_path, "{invalid").unwrap();

    let mut app = init(Some(config_path.as_path()));
    let manager = app.manager();

    assert_eq!(*manager.address_book(), book);
    assert!(manager.food_list().is_empty());
    assert_eq!(*manager.profile_list(), samples::sample_profile_list());
    assert_eq!(*manager.record_list(), samples::sample_record_list());
    assert_eq!(*manager.calendar(), samples::sample_calendar());
    assert_eq!(*manager.user_prefs(), prefs);

    app.shutdown();
}

#[test]
fn write_through_command_persists_the_touched_domain() {
    let dir = TempDir::new().unwrap();
    let (config_path, prefs) = seed_config(dir.path());

    let mut app = init(Some(config_path.as_path()));
    app.add_contact(Contact::new("Dana Wee", "94440000", "dana@example.com", "4 Fourth Ave"))
        .expect("add should persist");

    let on_disk: AddressBook =
        serde_json::from_str(&fs::read_to_string(&prefs.address_book_path).unwrap()).unwrap();
    assert_eq!(on_disk, *app.manager().address_book());

    app.shutdown();
}

#[test]
fn rejected_command_leaves_storage_untouched() {
    let dir = TempDir::new().unwrap();
    let (config_path, prefs) = seed_config(dir.path());

    let mut app = init(Some(config_path.as_path()));
    app.add_contact(Contact::new("Dana Wee", "94440000", "dana@example.com", "4 Fourth Ave"))
        .expect("first add should succeed");
    let before = fs::read_to_string(&prefs.address_book_path).unwrap();

    let err = app
        .add_contact(Contact::new("dana wee", "95550000", "d@e.co", "5 Fifth Ave"))
        .expect_err("duplicate should be rejected");
    assert!(matches!(err, ServiceError::Contact(_)));

    let after = fs::read_to_string(&prefs.address_book_path).unwrap();
    assert_eq!(before, after);

    app.shutdown();
}

#[test]
fn shutdown_persists_prefs_and_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let (config_path, _prefs) = seed_config(dir.path());

    let mut app = init(Some(config_path.as_path()));
    let expected = app.manager().user_prefs().clone();

    app.shutdown();
    app.shutdown();

    let prefs_path = app.config().user_prefs_path().to_path_buf();
    let on_disk: UserPrefs =
        serde_json::from_str(&fs::read_to_string(prefs_path).unwrap()).unwrap();
    assert_eq!(on_disk, expected);
}

#[test]
fn partial_config_and_missing_prefs_heal_during_startup() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    let prefs_path = dir.path().join("preferences.json");

    // Only the prefs location is present; the log level must heal in, and
    // the prefs file itself does not exist yet.
    fs::write(
        &config_path,
        format!(r#"{{"user_prefs_path":{}}}"#, serde_json::to_string(&prefs_path).unwrap()),
    )
    .unwrap();

    let mut app = init(Some(config_path.as_path()));

    let healed_config: Config =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(healed_config.log_level, lifebook_core::default_log_level());
    assert_eq!(healed_config.user_prefs_path, prefs_path);

    let healed_prefs: UserPrefs =
        serde_json::from_str(&fs::read_to_string(&prefs_path).unwrap()).unwrap();
    assert_eq!(healed_prefs, UserPrefs::default());

    app.shutdown();
}
