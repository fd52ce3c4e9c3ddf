//! Tests for the domain model wire shapes

use evtriplog_core::model::{new_id, NewStop, Trip, TripStatus, Vehicle};

#[test]
fn test_ids_are_unique() {
    let a = new_id();
    let b = new_id();
    assert_ne!(a, b);
    assert!(!a.is_empty());
}

#[test]
fn test_vehicle_decodes_from_legacy_backup_json() {
    let json = r#"{
        "id": "1700000000000-abc123def",
        "name": "My EV",
        "make": "Tata",
        "model": "Nexon EV",
        "year": 2023,
        "batteryCapacity": 40.5,
        "chargingEfficiency": 88,
        "createdAt": 1700000000000
    }"#;

    let vehicle: Vehicle = serde_json::from_str(json).unwrap();
    assert_eq!(vehicle.name, "My EV");
    assert_eq!(vehicle.battery_capacity, 40.5);
    assert_eq!(vehicle.charging_efficiency, 88.0);
}

#[test]
fn test_trip_decodes_without_optional_fields() {
    // endDate and totalEnergyCharged are absent on older exports
    let json = r#"{
        "id": "t1",
        "name": "Commute",
        "vehicleId": "v1",
        "startDate": 1700000000000,
        "status": "active",
        "stops": [{
            "id": "s1",
            "tripId": "t1",
            "timestamp": 1700000000000,
            "odometer": 1000,
            "batteryPercent": 90,
            "batteryKwh": 45
        }],
        "totalDistance": 0,
        "totalEnergyUsed": 0,
        "averageEfficiency": 0
    }"#;

    let trip: Trip = serde_json::from_str(json).unwrap();
    assert_eq!(trip.status, TripStatus::Active);
    assert_eq!(trip.end_date, None);
    assert_eq!(trip.total_energy_charged, None);
    assert_eq!(trip.stops.len(), 1);
    assert_eq!(trip.stops[0].location, None);
    assert!(trip.stops[0].charging_session.is_none());
}

#[test]
fn test_optional_fields_are_omitted_when_unset() {
    let trip: Trip = serde_json::from_str(
        r#"{
            "id": "t1", "name": "T", "vehicleId": "v1",
            "startDate": 0, "status": "active", "stops": [],
            "totalDistance": 0, "totalEnergyUsed": 0, "averageEfficiency": 0
        }"#,
    )
    .unwrap();

    let out = serde_json::to_string(&trip).unwrap();
    assert!(!out.contains("endDate"));
    assert!(!out.contains("totalEnergyCharged"));
    assert!(out.contains("\"status\":\"active\""));
}

#[test]
fn test_new_stop_attachment() {
    let stop = NewStop {
        timestamp: 42,
        odometer: 1000.0,
        battery_percent: 90.0,
        battery_kwh: 45.0,
        location: Some("Home".to_string()),
        ..NewStop::default()
    }
    .into_stop("trip-9");

    assert_eq!(stop.trip_id, "trip-9");
    assert_eq!(stop.timestamp, 42);
    assert!(!stop.id.is_empty());
}
