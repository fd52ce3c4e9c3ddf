//! Domain model
//!
//! Vehicles, trips, stops and charging sessions, plus the derived stretch
//! type. All entities serialize with camelCase field names so that exported
//! JSON stays interchangeable with backups produced by earlier releases.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a new opaque entity id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// An electric vehicle being logged against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique id, immutable after creation
    pub id: String,

    /// Display name
    pub name: String,

    /// Manufacturer
    pub make: String,

    /// Model name
    pub model: String,

    /// Model year
    pub year: i32,

    /// Usable battery capacity in kWh
    pub battery_capacity: f64,

    /// Charging efficiency in percent (e.g. 88 means 12% charging loss)
    pub charging_efficiency: f64,

    /// Creation time in Unix milliseconds, immutable after creation
    pub created_at: i64,
}

impl Vehicle {
    /// Create a vehicle with a fresh id and the given creation timestamp
    pub fn new(
        name: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        battery_capacity: f64,
        charging_efficiency: f64,
        created_at: i64,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            make: make.into(),
            model: model.into(),
            year,
            battery_capacity,
            charging_efficiency,
            created_at,
        }
    }
}

/// Trip lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// Currently being logged against
    Active,
    /// Finished; no further stops expected
    Completed,
}

/// A logged trip: an ordered sequence of stops plus denormalized totals
///
/// The `total_*` and `average_efficiency` fields are derived from the stop
/// list and must be recomputed on every stop or charging mutation (see
/// [`crate::metrics::trip_metrics`]). Insertion order of `stops` is taken as
/// chronological order by convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique id
    pub id: String,

    /// Display name
    pub name: String,

    /// Owning vehicle id. Referential integrity is not enforced; a trip may
    /// outlive its vehicle.
    pub vehicle_id: String,

    /// Timestamp of the first stop, Unix milliseconds
    pub start_date: i64,

    /// Set when the trip is completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,

    /// Lifecycle state
    pub status: TripStatus,

    /// Ordered stop sequence
    pub stops: Vec<Stop>,

    /// Derived: sum of stretch distances in km
    pub total_distance: f64,

    /// Derived: energy consumed while driving in kWh
    pub total_energy_used: f64,

    /// Derived: energy added across charging sessions in kWh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_energy_charged: Option<f64>,

    /// Derived: average consumption in kWh/km (inverse of the km/kWh shown
    /// in user-facing output)
    pub average_efficiency: f64,
}

impl Trip {
    /// Whether this trip is still being logged against
    pub fn is_active(&self) -> bool {
        self.status == TripStatus::Active
    }
}

/// A recorded point in a trip: odometer and battery readings, optionally
/// paired with a charging session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Unique within the owning trip
    pub id: String,

    /// Owning trip id
    pub trip_id: String,

    /// When the stop was recorded, Unix milliseconds
    pub timestamp: i64,

    /// Odometer reading in km. Expected non-decreasing across the stop
    /// sequence, but not enforced.
    pub odometer: f64,

    /// Battery remaining in percent (0-100)
    pub battery_percent: f64,

    /// Battery remaining in kWh (percent x vehicle capacity / 100)
    pub battery_kwh: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// At most one charging session per stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_session: Option<ChargingSession>,
}

/// Stop fields supplied by the caller; id and trip id are assigned when the
/// stop is attached to a trip
#[derive(Debug, Clone, Default)]
pub struct NewStop {
    pub timestamp: i64,
    pub odometer: f64,
    pub battery_percent: f64,
    pub battery_kwh: f64,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub charging_session: Option<ChargingSession>,
}

impl NewStop {
    /// Attach to a trip, assigning a fresh stop id
    pub fn into_stop(self, trip_id: &str) -> Stop {
        Stop {
            id: new_id(),
            trip_id: trip_id.to_string(),
            timestamp: self.timestamp,
            odometer: self.odometer,
            battery_percent: self.battery_percent,
            battery_kwh: self.battery_kwh,
            location: self.location,
            notes: self.notes,
            charging_session: self.charging_session,
        }
    }
}

/// A charging session recorded at a stop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSession {
    /// State of charge when charging began, percent
    pub start_soc: f64,

    /// State of charge when charging ended, percent. Expected >= start.
    pub end_soc: f64,

    /// Battery kWh when charging began
    pub start_kwh: f64,

    /// Battery kWh when charging ended
    pub end_kwh: f64,

    /// Cost in currency units
    pub cost: f64,

    /// Duration in minutes
    pub duration: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub charger_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// The derived driving segment between two consecutive stops
///
/// Computed on demand from a trip's stop list, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stretch {
    /// Departure stop
    pub from: Stop,

    /// Arrival stop
    pub to: Stop,

    /// Odometer delta in km
    pub distance: f64,

    /// Energy consumed in kWh. Negative when the recorded readings are
    /// inconsistent; passed through unclamped.
    pub energy_used: f64,

    /// Battery percent consumed
    pub battery_percent_used: f64,

    /// Consumption in kWh/km, 0 when distance is 0
    pub efficiency_kwh_per_km: f64,

    /// Range yield in km/kWh, 0 when no energy was used
    pub efficiency_km_per_kwh: f64,

    /// km travelled per battery percent, 0 when no percent was used
    pub km_per_percent: f64,
}
