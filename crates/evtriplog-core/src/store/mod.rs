//! Persistence store
//!
//! Durable, synchronous storage of the two top-level collections — vehicles
//! and trips — as pretty-printed JSON arrays in an application data
//! directory, one file per collection. Every mutation rewrites the whole
//! collection; target scale is a personal trip log, not a database.
//!
//! Storage failures never propagate out of this module: reads degrade to an
//! empty collection and writes to a logged no-op, so the store stays safe to
//! call from presentation code.

mod backup;

pub use backup::{BackupData, MergeReport};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{Trip, Vehicle};

/// File holding the vehicle collection
const VEHICLES_FILE: &str = "vehicles.json";

/// File holding the trip collection
const TRIPS_FILE: &str = "trips.json";

/// JSON-file store for the vehicle and trip collections
#[derive(Debug, Clone)]
pub struct Store {
    /// Data directory path
    path: PathBuf,
}

impl Store {
    /// Get the default data directory (in platform app data)
    pub fn default_dir() -> io::Result<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find app data directory")
            })?;
        Ok(base.join("EVTripLog"))
    }

    /// Open a store at the given directory, creating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;
        Ok(Store { path })
    }

    /// Open a store at the default data directory
    pub fn open_default() -> io::Result<Self> {
        Self::open(Self::default_dir()?)
    }

    /// The directory this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.path.join(file);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entities) => entities,
            Err(e) => {
                tracing::warn!("failed to parse {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(&self, file: &str, entities: &[T]) {
        let path = self.path.join(file);

        let content = match serde_json::to_string_pretty(entities) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("failed to serialize {}: {}", path.display(), e);
                return;
            }
        };

        if let Err(e) = fs::write(&path, content) {
            tracing::warn!("failed to write {}: {}", path.display(), e);
        }
    }

    // ----- vehicles -----

    /// All stored vehicles, in insertion order
    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.read_collection(VEHICLES_FILE)
    }

    /// Overwrite the stored vehicle collection
    pub fn save_vehicles(&self, vehicles: &[Vehicle]) {
        self.write_collection(VEHICLES_FILE, vehicles);
    }

    /// Append a vehicle
    pub fn add_vehicle(&self, vehicle: Vehicle) {
        let mut vehicles = self.vehicles();
        vehicles.push(vehicle);
        self.save_vehicles(&vehicles);
    }

    /// Replace the vehicle with the given id; no-op when absent
    pub fn update_vehicle(&self, id: &str, updated: Vehicle) {
        let mut vehicles = self.vehicles();
        if let Some(slot) = vehicles.iter_mut().find(|v| v.id == id) {
            *slot = updated;
            self.save_vehicles(&vehicles);
        }
    }

    /// Remove the vehicle with the given id
    pub fn delete_vehicle(&self, id: &str) {
        let mut vehicles = self.vehicles();
        vehicles.retain(|v| v.id != id);
        self.save_vehicles(&vehicles);
    }

    /// Look up a vehicle by id
    pub fn vehicle_by_id(&self, id: &str) -> Option<Vehicle> {
        self.vehicles().into_iter().find(|v| v.id == id)
    }

    // ----- trips -----

    /// All stored trips, in insertion order
    pub fn trips(&self) -> Vec<Trip> {
        self.read_collection(TRIPS_FILE)
    }

    /// Overwrite the stored trip collection
    pub fn save_trips(&self, trips: &[Trip]) {
        self.write_collection(TRIPS_FILE, trips);
    }

    /// Append a trip
    pub fn add_trip(&self, trip: Trip) {
        let mut trips = self.trips();
        trips.push(trip);
        self.save_trips(&trips);
    }

    /// Replace the trip with the given id; no-op when absent
    pub fn update_trip(&self, id: &str, updated: Trip) {
        let mut trips = self.trips();
        if let Some(slot) = trips.iter_mut().find(|t| t.id == id) {
            *slot = updated;
            self.save_trips(&trips);
        }
    }

    /// Remove the trip with the given id
    pub fn delete_trip(&self, id: &str) {
        let mut trips = self.trips();
        trips.retain(|t| t.id != id);
        self.save_trips(&trips);
    }

    /// Look up a trip by id
    pub fn trip_by_id(&self, id: &str) -> Option<Trip> {
        self.trips().into_iter().find(|t| t.id == id)
    }

    /// The single in-progress trip, if any
    ///
    /// "At most one active trip" is upheld by the trip service's create
    /// flow, not here; with several active trips stored (e.g. after an
    /// import) the first wins.
    pub fn active_trip(&self) -> Option<Trip> {
        self.trips().into_iter().find(|t| t.is_active())
    }

    /// Trips referencing the given vehicle
    pub fn trips_by_vehicle(&self, vehicle_id: &str) -> Vec<Trip> {
        self.trips()
            .into_iter()
            .filter(|t| t.vehicle_id == vehicle_id)
            .collect()
    }

    /// Trips that have been completed
    pub fn completed_trips(&self) -> Vec<Trip> {
        self.trips().into_iter().filter(|t| !t.is_active()).collect()
    }
}
