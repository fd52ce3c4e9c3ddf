//! Trip mutation service
//!
//! All stop and charging-session edits go through here so that a trip's
//! denormalized metrics are recomputed and persisted atomically with every
//! mutation. The store itself stays permissive; this layer is also where
//! the "at most one active trip" rule is enforced for interactive creation.

use thiserror::Error;

use crate::metrics::trip_metrics;
use crate::model::{ChargingSession, NewStop, Stop, Trip, TripStatus};
use crate::store::Store;

/// Errors surfaced by trip mutations
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("trip not found: {0}")]
    TripNotFound(String),

    #[error("stop not found: {0}")]
    StopNotFound(String),

    #[error("an active trip already exists: {0}")]
    ActiveTripExists(String),
}

/// Mutation layer over a [`Store`]
#[derive(Debug)]
pub struct TripService<'a> {
    store: &'a Store,
}

impl<'a> TripService<'a> {
    /// Create a service over the given store
    pub fn new(store: &'a Store) -> Self {
        TripService { store }
    }

    /// Start a new trip from its first stop
    ///
    /// The trip's start date is the first stop's timestamp. Refuses when an
    /// active trip already exists; complete it first.
    pub fn create_trip(
        &self,
        name: &str,
        vehicle_id: &str,
        first_stop: NewStop,
    ) -> Result<Trip, ServiceError> {
        if let Some(active) = self.store.active_trip() {
            return Err(ServiceError::ActiveTripExists(active.name));
        }

        let trip_id = crate::model::new_id();
        let stop = first_stop.into_stop(&trip_id);

        let trip = Trip {
            id: trip_id,
            name: name.to_string(),
            vehicle_id: vehicle_id.to_string(),
            start_date: stop.timestamp,
            end_date: None,
            status: TripStatus::Active,
            stops: vec![stop],
            total_distance: 0.0,
            total_energy_used: 0.0,
            total_energy_charged: None,
            average_efficiency: 0.0,
        };

        self.store.add_trip(trip.clone());
        Ok(trip)
    }

    /// Append a stop to a trip
    pub fn add_stop(&self, trip_id: &str, stop: NewStop) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            let stop = stop.into_stop(&trip.id);
            trip.stops.push(stop);
            Ok(())
        })
    }

    /// Replace a stop's recorded fields, keeping its identity
    pub fn update_stop(
        &self,
        trip_id: &str,
        stop_id: &str,
        stop: NewStop,
    ) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            let slot = find_stop(trip, stop_id)?;
            *slot = Stop {
                id: stop_id.to_string(),
                trip_id: trip_id.to_string(),
                timestamp: stop.timestamp,
                odometer: stop.odometer,
                battery_percent: stop.battery_percent,
                battery_kwh: stop.battery_kwh,
                location: stop.location,
                notes: stop.notes,
                charging_session: stop.charging_session,
            };
            Ok(())
        })
    }

    /// Remove a stop from a trip
    pub fn delete_stop(&self, trip_id: &str, stop_id: &str) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            let before = trip.stops.len();
            trip.stops.retain(|s| s.id != stop_id);
            if trip.stops.len() == before {
                return Err(ServiceError::StopNotFound(stop_id.to_string()));
            }
            Ok(())
        })
    }

    /// Attach or replace the charging session at a stop
    pub fn set_charging_session(
        &self,
        trip_id: &str,
        stop_id: &str,
        session: ChargingSession,
    ) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            find_stop(trip, stop_id)?.charging_session = Some(session);
            Ok(())
        })
    }

    /// Remove the charging session at a stop
    pub fn clear_charging_session(
        &self,
        trip_id: &str,
        stop_id: &str,
    ) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            find_stop(trip, stop_id)?.charging_session = None;
            Ok(())
        })
    }

    /// Mark a trip completed at the given timestamp
    pub fn complete_trip(&self, trip_id: &str, end_date: i64) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            trip.status = TripStatus::Completed;
            trip.end_date = Some(end_date);
            Ok(())
        })
    }

    /// Reopen a completed trip for further logging
    pub fn reopen_trip(&self, trip_id: &str) -> Result<Trip, ServiceError> {
        self.mutate_trip(trip_id, |trip| {
            trip.status = TripStatus::Active;
            trip.end_date = None;
            Ok(())
        })
    }

    /// Delete a trip outright
    pub fn delete_trip(&self, trip_id: &str) -> Result<(), ServiceError> {
        let mut trips = self.store.trips();
        let before = trips.len();
        trips.retain(|t| t.id != trip_id);
        if trips.len() == before {
            return Err(ServiceError::TripNotFound(trip_id.to_string()));
        }
        self.store.save_trips(&trips);
        Ok(())
    }

    /// Load a trip, apply a mutation, recompute its derived metrics, and
    /// persist the whole collection
    fn mutate_trip<F>(&self, trip_id: &str, mutate: F) -> Result<Trip, ServiceError>
    where
        F: FnOnce(&mut Trip) -> Result<(), ServiceError>,
    {
        let mut trips = self.store.trips();
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| ServiceError::TripNotFound(trip_id.to_string()))?;

        mutate(trip)?;

        let metrics = trip_metrics(trip);
        metrics.apply(trip);
        let updated = trip.clone();

        self.store.save_trips(&trips);
        Ok(updated)
    }
}

fn find_stop<'t>(trip: &'t mut Trip, stop_id: &str) -> Result<&'t mut Stop, ServiceError> {
    trip.stops
        .iter_mut()
        .find(|s| s.id == stop_id)
        .ok_or_else(|| ServiceError::StopNotFound(stop_id.to_string()))
}
