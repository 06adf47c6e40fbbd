#![allow(clippy::unwrap_used)]

use crate::{AppSettings, MemoryStore, RealModeOrder, Storage};

/// WHAT: Absent settings read as defaults
/// WHY: A fresh install has never saved settings
#[test]
fn given_empty_store_when_reading_settings_then_defaults() {
    let mut storage = Storage::new(MemoryStore::new());

    let settings = storage.settings().get().unwrap();

    assert_eq!(settings, AppSettings::default());
    assert!(!settings.preparation_time_enabled);
    assert_eq!(settings.preparation_seconds, 5);
    assert_eq!(settings.real_mode_order, RealModeOrder::Fixed);
    assert_eq!(settings.default_seconds, 60);
    assert_eq!(settings.recording_limit, 20);
}

/// WHAT: Partially stored settings fill missing fields with defaults
/// WHY: Settings saved by older builds lack newer fields
#[test]
fn given_partial_json_when_deserialized_then_missing_fields_defaulted() {
    let settings: AppSettings =
        serde_json::from_str("{\"preparationTimeEnabled\":true,\"preparationSeconds\":15}")
            .unwrap();

    assert!(settings.preparation_time_enabled);
    assert_eq!(settings.preparation_seconds, 15);
    assert_eq!(settings.default_seconds, 60);
    assert_eq!(settings.recording_limit, 20);
}

/// WHAT: Saved settings replace the previous value
#[test]
fn given_saved_settings_when_read_back_then_equal() {
    let mut storage = Storage::new(MemoryStore::new());
    let settings = AppSettings {
        default_seconds: 120,
        recording_limit: 5,
        ..AppSettings::default()
    };

    storage.settings().put(&settings).unwrap();

    assert_eq!(storage.settings().get().unwrap(), settings);
}
