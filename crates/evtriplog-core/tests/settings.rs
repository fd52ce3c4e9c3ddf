//! Tests for settings persistence

use std::fs;

use evtriplog_core::settings::{AppSettings, DistanceUnit};
use tempfile::TempDir;

#[test]
fn test_defaults_when_nothing_is_stored() {
    let dir = TempDir::new().unwrap();
    let settings = AppSettings::load(dir.path());

    assert_eq!(settings.theme, "light");
    assert_eq!(settings.distance_unit, DistanceUnit::Km);
    assert_eq!(settings.currency, "Rs ");
    assert_eq!(settings.date_format, "%d/%m/%Y");
    assert_eq!(settings.default_vehicle_id, None);
    assert_eq!(settings.last_backup_date, None);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();

    let mut settings = AppSettings::default();
    settings.theme = "dark".to_string();
    settings.distance_unit = DistanceUnit::Miles;
    settings.default_vehicle_id = Some("v1".to_string());
    settings.last_backup_date = Some(1_700_000_000_000);
    settings.save(dir.path());

    let loaded = AppSettings::load(dir.path());
    assert_eq!(loaded.theme, "dark");
    assert_eq!(loaded.distance_unit, DistanceUnit::Miles);
    assert_eq!(loaded.default_vehicle_id, Some("v1".to_string()));
    assert_eq!(loaded.last_backup_date, Some(1_700_000_000_000));
}

#[test]
fn test_corrupt_settings_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.json"), "{broken").unwrap();

    let settings = AppSettings::load(dir.path());
    assert_eq!(settings.theme, "light");
}

#[test]
fn test_partial_settings_fill_in_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.json"), r#"{"theme": "dark"}"#).unwrap();

    let settings = AppSettings::load(dir.path());
    assert_eq!(settings.theme, "dark");
    assert_eq!(settings.distance_unit, DistanceUnit::Km);
    assert_eq!(settings.currency, "Rs ");
}

#[test]
fn test_distance_unit_labels_and_wire_shape() {
    assert_eq!(DistanceUnit::Km.label(), "km");
    assert_eq!(DistanceUnit::Miles.label(), "miles");

    let settings = AppSettings::default();
    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains("\"distanceUnit\":\"km\""));
    // Unset optionals stay absent, not null
    assert!(!json.contains("defaultVehicleId"));
}
