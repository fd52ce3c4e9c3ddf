//! Tests for the trip mutation service

use evtriplog_core::model::{ChargingSession, NewStop, TripStatus};
use evtriplog_core::service::{ServiceError, TripService};
use evtriplog_core::store::Store;
use tempfile::TempDir;

fn reading(timestamp: i64, odometer: f64, percent: f64, kwh: f64) -> NewStop {
    NewStop {
        timestamp,
        odometer,
        battery_percent: percent,
        battery_kwh: kwh,
        ..NewStop::default()
    }
}

fn session() -> ChargingSession {
    ChargingSession {
        start_soc: 70.0,
        end_soc: 90.0,
        start_kwh: 35.0,
        end_kwh: 45.0,
        cost: 300.0,
        duration: 30.0,
        charger_type: None,
        location: None,
    }
}

#[test]
fn test_create_trip_starts_at_first_stop() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Holiday", "v1", reading(1_000, 12_000.0, 90.0, 45.0))
        .unwrap();

    assert_eq!(trip.status, TripStatus::Active);
    assert_eq!(trip.start_date, 1_000);
    assert_eq!(trip.stops.len(), 1);
    assert_eq!(trip.stops[0].trip_id, trip.id);
    assert_eq!(trip.total_distance, 0.0);

    // Persisted, and visible as the active trip
    assert_eq!(store.active_trip().unwrap().id, trip.id);
}

#[test]
fn test_create_trip_refuses_second_active() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    service
        .create_trip("First", "v1", reading(1_000, 12_000.0, 90.0, 45.0))
        .unwrap();

    let err = service
        .create_trip("Second", "v1", reading(2_000, 13_000.0, 90.0, 45.0))
        .unwrap_err();
    assert!(matches!(err, ServiceError::ActiveTripExists(_)));

    // Completing the first frees the way
    let first = store.active_trip().unwrap();
    service.complete_trip(&first.id, 3_000).unwrap();
    assert!(service
        .create_trip("Second", "v1", reading(4_000, 13_000.0, 90.0, 45.0))
        .is_ok());
}

#[test]
fn test_add_stop_recomputes_metrics() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Run", "v1", reading(0, 1_000.0, 90.0, 45.0))
        .unwrap();
    let trip = service
        .add_stop(&trip.id, reading(1, 1_100.0, 70.0, 35.0))
        .unwrap();

    assert_eq!(trip.total_distance, 100.0);
    assert_eq!(trip.total_energy_used, 10.0);
    assert_eq!(trip.average_efficiency, 0.1);

    // The persisted copy carries the recomputed figures too
    let stored = store.trip_by_id(&trip.id).unwrap();
    assert_eq!(stored.total_distance, 100.0);
}

#[test]
fn test_update_stop_keeps_identity_and_recomputes() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Run", "v1", reading(0, 1_000.0, 90.0, 45.0))
        .unwrap();
    let trip = service
        .add_stop(&trip.id, reading(1, 1_100.0, 70.0, 35.0))
        .unwrap();

    let stop_id = trip.stops[1].id.clone();
    let updated = service
        .update_stop(&trip.id, &stop_id, reading(1, 1_200.0, 60.0, 30.0))
        .unwrap();

    assert_eq!(updated.stops[1].id, stop_id);
    assert_eq!(updated.stops[1].trip_id, trip.id);
    assert_eq!(updated.total_distance, 200.0);
    assert_eq!(updated.total_energy_used, 15.0);
}

#[test]
fn test_delete_stop_recomputes() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Run", "v1", reading(0, 1_000.0, 90.0, 45.0))
        .unwrap();
    let trip = service
        .add_stop(&trip.id, reading(1, 1_100.0, 70.0, 35.0))
        .unwrap();
    let stop_id = trip.stops[1].id.clone();

    let updated = service.delete_stop(&trip.id, &stop_id).unwrap();
    assert_eq!(updated.stops.len(), 1);
    assert_eq!(updated.total_distance, 0.0);

    let err = service.delete_stop(&trip.id, &stop_id).unwrap_err();
    assert!(matches!(err, ServiceError::StopNotFound(_)));
}

#[test]
fn test_charging_session_set_and_clear() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Run", "v1", reading(0, 1_000.0, 90.0, 45.0))
        .unwrap();
    let trip = service
        .add_stop(&trip.id, reading(1, 1_100.0, 70.0, 35.0))
        .unwrap();
    let trip = service
        .add_stop(&trip.id, reading(2, 1_250.0, 60.0, 30.0))
        .unwrap();

    // Attach charging to the middle stop: the following stretch rebases
    let mid_stop = trip.stops[1].id.clone();
    let charged = service
        .set_charging_session(&trip.id, &mid_stop, session())
        .unwrap();

    assert_eq!(charged.total_energy_charged, Some(10.0));
    assert_eq!(charged.total_energy_used, 25.0);
    assert_eq!(charged.total_distance, 250.0);

    let cleared = service.clear_charging_session(&trip.id, &mid_stop).unwrap();
    assert_eq!(cleared.total_energy_charged, Some(0.0));
    // Without the rebase the second stretch consumes 35 - 30 = 5
    assert_eq!(cleared.total_energy_used, 15.0);

    let err = service
        .set_charging_session(&trip.id, "missing-stop", session())
        .unwrap_err();
    assert!(matches!(err, ServiceError::StopNotFound(_)));
}

#[test]
fn test_complete_and_reopen() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Run", "v1", reading(0, 1_000.0, 90.0, 45.0))
        .unwrap();

    let done = service.complete_trip(&trip.id, 9_000).unwrap();
    assert_eq!(done.status, TripStatus::Completed);
    assert_eq!(done.end_date, Some(9_000));
    assert!(store.active_trip().is_none());

    let reopened = service.reopen_trip(&trip.id).unwrap();
    assert_eq!(reopened.status, TripStatus::Active);
    assert_eq!(reopened.end_date, None);
    assert_eq!(store.active_trip().unwrap().id, trip.id);
}

#[test]
fn test_missing_trip_errors() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let err = service
        .add_stop("nope", reading(0, 0.0, 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, ServiceError::TripNotFound(_)));

    let err = service.delete_trip("nope").unwrap_err();
    assert!(matches!(err, ServiceError::TripNotFound(_)));
}

#[test]
fn test_delete_trip_removes_it() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let service = TripService::new(&store);

    let trip = service
        .create_trip("Run", "v1", reading(0, 1_000.0, 90.0, 45.0))
        .unwrap();
    service.delete_trip(&trip.id).unwrap();
    assert!(store.trips().is_empty());
}
