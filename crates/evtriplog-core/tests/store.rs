//! Tests for the persistence store

use std::fs;

use evtriplog_core::model::{Trip, TripStatus, Vehicle};
use evtriplog_core::store::Store;
use tempfile::TempDir;

fn vehicle(name: &str) -> Vehicle {
    Vehicle::new(name, "Tata", "Nexon EV", 2023, 40.5, 88.0, 1_700_000_000_000)
}

fn trip(name: &str, status: TripStatus) -> Trip {
    Trip {
        id: evtriplog_core::model::new_id(),
        name: name.to_string(),
        vehicle_id: "vehicle-1".to_string(),
        start_date: 1_700_000_000_000,
        end_date: None,
        status,
        stops: vec![],
        total_distance: 0.0,
        total_energy_used: 0.0,
        total_energy_charged: None,
        average_efficiency: 0.0,
    }
}

#[test]
fn test_empty_store_returns_empty_collections() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();

    assert!(store.vehicles().is_empty());
    assert!(store.trips().is_empty());
    assert!(store.active_trip().is_none());
}

#[test]
fn test_vehicle_crud_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let v = vehicle("My EV");
    let id = v.id.clone();
    store.add_vehicle(v);

    let loaded = store.vehicle_by_id(&id).unwrap();
    assert_eq!(loaded.name, "My EV");
    assert_eq!(loaded.battery_capacity, 40.5);

    let mut renamed = loaded.clone();
    renamed.name = "Renamed".to_string();
    store.update_vehicle(&id, renamed);
    assert_eq!(store.vehicle_by_id(&id).unwrap().name, "Renamed");

    store.delete_vehicle(&id);
    assert!(store.vehicle_by_id(&id).is_none());
    assert!(store.vehicles().is_empty());
}

#[test]
fn test_update_missing_vehicle_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();

    store.add_vehicle(vehicle("Kept"));
    store.update_vehicle("no-such-id", vehicle("Ghost"));

    let vehicles = store.vehicles();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].name, "Kept");
}

#[test]
fn test_trip_queries() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let active = trip("Active", TripStatus::Active);
    let mut done = trip("Done", TripStatus::Completed);
    done.vehicle_id = "vehicle-2".to_string();

    store.add_trip(active.clone());
    store.add_trip(done.clone());

    assert_eq!(store.active_trip().unwrap().id, active.id);
    assert_eq!(store.completed_trips().len(), 1);
    assert_eq!(store.trips_by_vehicle("vehicle-2").len(), 1);
    assert_eq!(store.trips_by_vehicle("vehicle-1")[0].id, active.id);
    assert!(store.trips_by_vehicle("nobody").is_empty());
}

#[test]
fn test_collections_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = Store::open(dir.path()).unwrap();
        store.add_vehicle(vehicle("Persisted"));
    }
    let store = Store::open(dir.path()).unwrap();
    assert_eq!(store.vehicles().len(), 1);
}

#[test]
fn test_corrupt_collection_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_vehicle(vehicle("Will be lost"));

    fs::write(dir.path().join("vehicles.json"), "{not json").unwrap();

    // Corrupt storage degrades to empty, it never errors
    assert!(store.vehicles().is_empty());
}

#[test]
fn test_collections_are_stored_in_separate_files() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_vehicle(vehicle("V"));
    store.add_trip(trip("T", TripStatus::Active));

    fs::write(dir.path().join("trips.json"), "garbage").unwrap();

    // A corrupt trip file leaves the vehicle collection untouched
    assert!(store.trips().is_empty());
    assert_eq!(store.vehicles().len(), 1);
}

#[test]
fn test_stored_json_uses_camel_case_wire_shape() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.add_vehicle(vehicle("Wire"));

    let content = fs::read_to_string(dir.path().join("vehicles.json")).unwrap();
    assert!(content.contains("\"batteryCapacity\""));
    assert!(content.contains("\"chargingEfficiency\""));
    assert!(content.contains("\"createdAt\""));
}
