//! Trip metrics engine
//!
//! Pure derivation of efficiency and cost figures from a trip's stop
//! sequence: per-stretch numbers, trip aggregates, charging session
//! economics, and fleet-level analytics across completed trips.
//!
//! Every function here is side-effect free and total: arithmetic edge cases
//! (zero distance, zero energy, fewer than two stops) degrade to 0 rather
//! than erroring, and inconsistent user-entered readings pass through
//! unclamped.

use serde::Serialize;

use crate::model::{ChargingSession, Stop, Stretch, Trip};

/// Derived trip aggregates, recomputed on every stop/charging mutation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripMetrics {
    /// Sum of stretch distances in km
    pub total_distance: f64,
    /// Energy consumed while driving in kWh
    pub total_energy_used: f64,
    /// Energy added across all charging sessions in kWh
    pub total_energy_charged: f64,
    /// Average consumption in kWh/km
    pub average_efficiency: f64,
}

impl TripMetrics {
    const ZERO: TripMetrics = TripMetrics {
        total_distance: 0.0,
        total_energy_used: 0.0,
        total_energy_charged: 0.0,
        average_efficiency: 0.0,
    };

    /// Write these aggregates back onto a trip's denormalized fields
    pub fn apply(&self, trip: &mut Trip) {
        trip.total_distance = self.total_distance;
        trip.total_energy_used = self.total_energy_used;
        trip.total_energy_charged = Some(self.total_energy_charged);
        trip.average_efficiency = self.average_efficiency;
    }
}

/// Compute the stretch between two consecutive stops
///
/// When the departure stop carries a charging session, the stretch starts
/// from the battery state *after* charging (the session's end state), not
/// from the stop's own recorded readings.
pub fn stretch(from: &Stop, to: &Stop) -> Stretch {
    let distance = to.odometer - from.odometer;

    let (start_kwh, start_percent) = match &from.charging_session {
        Some(session) => (session.end_kwh, session.end_soc),
        None => (from.battery_kwh, from.battery_percent),
    };

    let energy_used = start_kwh - to.battery_kwh;
    let battery_percent_used = start_percent - to.battery_percent;

    Stretch {
        from: from.clone(),
        to: to.clone(),
        distance,
        energy_used,
        battery_percent_used,
        efficiency_kwh_per_km: if distance > 0.0 { energy_used / distance } else { 0.0 },
        efficiency_km_per_kwh: if energy_used > 0.0 { distance / energy_used } else { 0.0 },
        km_per_percent: if battery_percent_used > 0.0 {
            distance / battery_percent_used
        } else {
            0.0
        },
    }
}

/// Compute all stretches for a stop sequence
///
/// Yields `max(0, stops.len() - 1)` stretches; stretch `i` runs from stop
/// `i` to stop `i + 1`.
pub fn trip_stretches(stops: &[Stop]) -> Vec<Stretch> {
    stops.windows(2).map(|pair| stretch(&pair[0], &pair[1])).collect()
}

/// Compute a trip's aggregate metrics from its stop sequence
///
/// A trip needs at least a start and one more point to have any movement;
/// with fewer than two stops every aggregate is 0. Charging does not count
/// as consumption: summing stretch energy already accounts for charging
/// because [`stretch`] rebases off the post-charge state.
pub fn trip_metrics(trip: &Trip) -> TripMetrics {
    if trip.stops.len() < 2 {
        return TripMetrics::ZERO;
    }

    let stretches = trip_stretches(&trip.stops);

    let total_distance: f64 = stretches.iter().map(|s| s.distance).sum();
    let energy_consumed: f64 = stretches.iter().map(|s| s.energy_used).sum();

    let total_energy_charged: f64 = trip
        .stops
        .iter()
        .filter_map(|stop| stop.charging_session.as_ref())
        .map(charging_energy)
        .sum();

    TripMetrics {
        total_distance,
        total_energy_used: energy_consumed,
        total_energy_charged,
        average_efficiency: if total_distance > 0.0 {
            energy_consumed / total_distance
        } else {
            0.0
        },
    }
}

/// Energy added during a charging session in kWh
pub fn charging_energy(session: &ChargingSession) -> f64 {
    session.end_kwh - session.start_kwh
}

/// Cost per kWh for a charging session, 0 when no energy was added
pub fn cost_per_kwh(session: &ChargingSession) -> f64 {
    let energy_added = charging_energy(session);
    if energy_added > 0.0 {
        session.cost / energy_added
    } else {
        0.0
    }
}

/// Fleet-wide statistics over completed trips
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_trips: usize,
    pub total_distance: f64,
    pub total_energy_used: f64,
    /// kWh/km over the whole fleet
    pub average_efficiency: f64,
    pub total_charging_cost: f64,
    pub total_charging_sessions: usize,
}

/// Aggregate statistics across all completed trips
///
/// Active trips are excluded: their totals are still moving.
pub fn fleet_stats(trips: &[Trip]) -> FleetStats {
    let completed: Vec<&Trip> = trips.iter().filter(|t| !t.is_active()).collect();

    let total_distance: f64 = completed.iter().map(|t| t.total_distance).sum();
    let total_energy_used: f64 = completed.iter().map(|t| t.total_energy_used).sum();

    let mut total_charging_cost = 0.0;
    let mut total_charging_sessions = 0;
    for trip in &completed {
        for stop in &trip.stops {
            if let Some(session) = &stop.charging_session {
                total_charging_cost += session.cost;
                total_charging_sessions += 1;
            }
        }
    }

    FleetStats {
        total_trips: completed.len(),
        total_distance,
        total_energy_used,
        average_efficiency: if total_distance > 0.0 {
            total_energy_used / total_distance
        } else {
            0.0
        },
        total_charging_cost,
        total_charging_sessions,
    }
}

/// One point of the per-trip efficiency trend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyPoint {
    /// Trip start date, formatted "%b %d"
    pub date: String,
    /// km/kWh, 0 when the trip has no usable efficiency
    pub efficiency: f64,
    pub distance: f64,
}

/// Efficiency trend across completed trips, ordered by start date
pub fn efficiency_trend(trips: &[Trip]) -> Vec<EfficiencyPoint> {
    let mut completed: Vec<&Trip> = trips.iter().filter(|t| !t.is_active()).collect();
    completed.sort_by_key(|t| t.start_date);

    completed
        .iter()
        .map(|trip| EfficiencyPoint {
            date: crate::format::format_date(trip.start_date, "%b %d"),
            efficiency: if trip.average_efficiency > 0.0 {
                1.0 / trip.average_efficiency
            } else {
                0.0
            },
            distance: trip.total_distance,
        })
        .collect()
}

/// One point of the charging cost trend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingCostPoint {
    /// Stop date, formatted "%b %d"
    pub date: String,
    pub cost: f64,
    pub energy_added: f64,
}

/// Charging cost trend: one point per charging session of completed trips,
/// ordered by stop timestamp
pub fn charging_cost_trend(trips: &[Trip]) -> Vec<ChargingCostPoint> {
    let mut points: Vec<(i64, ChargingCostPoint)> = Vec::new();

    for trip in trips.iter().filter(|t| !t.is_active()) {
        for stop in &trip.stops {
            if let Some(session) = &stop.charging_session {
                points.push((
                    stop.timestamp,
                    ChargingCostPoint {
                        date: crate::format::format_date(stop.timestamp, "%b %d"),
                        cost: session.cost,
                        energy_added: charging_energy(session),
                    },
                ));
            }
        }
    }

    points.sort_by_key(|(ts, _)| *ts);
    points.into_iter().map(|(_, p)| p).collect()
}

/// Charging totals for a single trip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingSummary {
    pub sessions: usize,
    pub total_cost: f64,
    /// Energy added in kWh
    pub total_energy: f64,
    pub total_duration_minutes: f64,
    /// 0 when nothing was charged
    pub average_cost_per_kwh: f64,
    /// Charging cost per km driven, 0 when the trip has no distance
    pub cost_per_km: f64,
}

/// Summarize a trip's charging sessions
pub fn trip_charging_summary(trip: &Trip) -> ChargingSummary {
    let sessions: Vec<&ChargingSession> = trip
        .stops
        .iter()
        .filter_map(|stop| stop.charging_session.as_ref())
        .collect();

    let total_cost: f64 = sessions.iter().map(|s| s.cost).sum();
    let total_energy: f64 = sessions.iter().map(|s| charging_energy(s)).sum();
    let total_duration_minutes: f64 = sessions.iter().map(|s| s.duration).sum();

    ChargingSummary {
        sessions: sessions.len(),
        total_cost,
        total_energy,
        total_duration_minutes,
        average_cost_per_kwh: if total_energy > 0.0 { total_cost / total_energy } else { 0.0 },
        cost_per_km: if trip.total_distance > 0.0 {
            total_cost / trip.total_distance
        } else {
            0.0
        },
    }
}
