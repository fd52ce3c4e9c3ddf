//! Demo data generator
//!
//! Builds a small, plausible dataset (one vehicle, one completed trip with
//! a charging stop) so the app can be tried without entering real readings.
//! Values get mild random jitter so repeated runs don't look copy-pasted.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::metrics::trip_metrics;
use crate::model::{ChargingSession, Stop, Trip, TripStatus, Vehicle};
use crate::store::BackupData;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Build a sample vehicle
pub fn sample_vehicle(now_ms: i64) -> Vehicle {
    Vehicle::new("Demo EV", "Tata", "Nexon EV", 2023, 40.5, 88.0, now_ms)
}

/// Build a completed sample trip for the given vehicle
///
/// Three stops spanning the last six hours: a start, a charging stop, and
/// a final stop, with derived metrics applied.
pub fn sample_trip(vehicle: &Vehicle, now_ms: i64) -> Trip {
    let mut rng = StdRng::from_entropy();

    let capacity = vehicle.battery_capacity;
    let start_odo = rng.gen_range(8_000.0..20_000.0_f64).round();
    let leg1 = rng.gen_range(80.0..120.0_f64).round();
    let leg2 = rng.gen_range(120.0..180.0_f64).round();

    let start_percent = 90.0;
    let mid_percent = rng.gen_range(55.0..70.0_f64).round();
    let charged_percent = 90.0;
    let end_percent = rng.gen_range(45.0..60.0_f64).round();

    let kwh = |percent: f64| (percent * capacity / 100.0 * 100.0).round() / 100.0;

    let trip_id = crate::model::new_id();
    let start_ts = now_ms - 6 * HOUR_MS;

    let session = ChargingSession {
        start_soc: mid_percent,
        end_soc: charged_percent,
        start_kwh: kwh(mid_percent),
        end_kwh: kwh(charged_percent),
        cost: ((charged_percent - mid_percent) * capacity / 100.0 * rng.gen_range(18.0..26.0))
            .round(),
        duration: rng.gen_range(25.0..55.0_f64).round(),
        charger_type: Some("DC fast".to_string()),
        location: Some("Highway plaza".to_string()),
    };

    let stops = vec![
        Stop {
            id: crate::model::new_id(),
            trip_id: trip_id.clone(),
            timestamp: start_ts,
            odometer: start_odo,
            battery_percent: start_percent,
            battery_kwh: kwh(start_percent),
            location: Some("Home".to_string()),
            notes: None,
            charging_session: None,
        },
        Stop {
            id: crate::model::new_id(),
            trip_id: trip_id.clone(),
            timestamp: start_ts + 2 * HOUR_MS,
            odometer: start_odo + leg1,
            battery_percent: mid_percent,
            battery_kwh: kwh(mid_percent),
            location: Some("Highway plaza".to_string()),
            notes: Some("Coffee break while charging".to_string()),
            charging_session: Some(session),
        },
        Stop {
            id: crate::model::new_id(),
            trip_id: trip_id.clone(),
            timestamp: start_ts + 5 * HOUR_MS,
            odometer: start_odo + leg1 + leg2,
            battery_percent: end_percent,
            battery_kwh: kwh(end_percent),
            location: Some("Destination".to_string()),
            notes: None,
            charging_session: None,
        },
    ];

    let mut trip = Trip {
        id: trip_id,
        name: "Weekend demo trip".to_string(),
        vehicle_id: vehicle.id.clone(),
        start_date: start_ts,
        end_date: Some(start_ts + 5 * HOUR_MS),
        status: TripStatus::Completed,
        stops,
        total_distance: 0.0,
        total_energy_used: 0.0,
        total_energy_charged: None,
        average_efficiency: 0.0,
    };

    let metrics = trip_metrics(&trip);
    metrics.apply(&mut trip);
    trip
}

/// Build a full sample dataset
pub fn sample_data(now_ms: i64) -> BackupData {
    let vehicle = sample_vehicle(now_ms);
    let trip = sample_trip(&vehicle, now_ms);
    BackupData {
        vehicles: vec![vehicle],
        trips: vec![trip],
    }
}
