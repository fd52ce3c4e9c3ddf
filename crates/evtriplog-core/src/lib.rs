//! # EVTripLog Core Library
//!
//! Core functionality for the EVTripLog trip logger.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The trip domain model (vehicles, trips, stops, charging sessions)
//! - Pure efficiency/cost metrics over a trip's stop sequence
//! - Synchronous JSON-file persistence of both collections
//! - Structural validation of imported backups, plus replace and merge import
//! - Per-trip CSV and report export, full backup export
//!
//! ## Example
//!
//! ```rust,ignore
//! use evtriplog_core::prelude::*;
//!
//! let store = Store::open_default()?;
//! let service = TripService::new(&store);
//!
//! // Log a stop against the active trip
//! let trip = store.active_trip().expect("no active trip");
//! let trip = service.add_stop(&trip.id, stop)?;
//! println!("{} km so far", trip.total_distance);
//! ```

pub mod demo;
pub mod export;
pub mod format;
pub mod metrics;
pub mod model;
pub mod service;
pub mod settings;
pub mod store;
pub mod validation;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::metrics::{
        charging_energy, cost_per_kwh, fleet_stats, trip_metrics, trip_stretches, FleetStats,
        TripMetrics,
    };
    pub use crate::model::{ChargingSession, NewStop, Stop, Stretch, Trip, TripStatus, Vehicle};
    pub use crate::service::{ServiceError, TripService};
    pub use crate::settings::{AppSettings, DistanceUnit};
    pub use crate::store::{BackupData, MergeReport, Store};
    pub use crate::validation::{parse_and_validate, validate_import, ImportReport};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
