//! Backup snapshot, replace import and merge import
//!
//! A backup is the plain `{ vehicles, trips }` snapshot of both collections.
//! Replace import overwrites both collections wholesale; merge import
//! upserts per entity by id, counting additions and updates separately.

use std::fs;
use std::io;

use serde::{Deserialize, Serialize};

use super::{Store, TRIPS_FILE, VEHICLES_FILE};
use crate::model::{Trip, Vehicle};

/// Snapshot of both collections, the backup file payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupData {
    pub vehicles: Vec<Vehicle>,
    pub trips: Vec<Trip>,
}

/// Counts reported by a merge import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub vehicles_added: usize,
    pub vehicles_updated: usize,
    pub trips_added: usize,
    pub trips_updated: usize,
}

impl Store {
    /// Snapshot both collections
    pub fn export_all(&self) -> BackupData {
        BackupData {
            vehicles: self.vehicles(),
            trips: self.trips(),
        }
    }

    /// Replace both collections with the given data
    ///
    /// Anything stored but absent from `data` is discarded.
    pub fn import_all(&self, data: &BackupData) {
        self.save_vehicles(&data.vehicles);
        self.save_trips(&data.trips);
    }

    /// Merge the given data into the stored collections, upserting by id
    ///
    /// A matching id is overwritten wholesale with the imported entity (no
    /// field-level merging, last import wins); a novel id is appended.
    pub fn merge_import(&self, data: &BackupData) -> MergeReport {
        let mut report = MergeReport::default();

        let mut vehicles = self.vehicles();
        for imported in &data.vehicles {
            match vehicles.iter_mut().find(|v| v.id == imported.id) {
                Some(slot) => {
                    *slot = imported.clone();
                    report.vehicles_updated += 1;
                }
                None => {
                    vehicles.push(imported.clone());
                    report.vehicles_added += 1;
                }
            }
        }
        self.save_vehicles(&vehicles);

        let mut trips = self.trips();
        for imported in &data.trips {
            match trips.iter_mut().find(|t| t.id == imported.id) {
                Some(slot) => {
                    *slot = imported.clone();
                    report.trips_updated += 1;
                }
                None => {
                    trips.push(imported.clone());
                    report.trips_added += 1;
                }
            }
        }
        self.save_trips(&trips);

        report
    }

    /// Remove both collections
    pub fn clear_all(&self) {
        for file in [VEHICLES_FILE, TRIPS_FILE] {
            let path = self.path.join(file);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("failed to remove {}: {}", path.display(), e),
            }
        }
    }
}
