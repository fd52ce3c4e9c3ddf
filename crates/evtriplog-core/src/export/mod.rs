//! Export writers
//!
//! Per-trip CSV, per-trip human-readable report, and full backup JSON,
//! plus the file naming conventions shared with earlier releases.

mod csv;
mod report;

pub use csv::{trip_csv, write_trip_csv};
pub use report::{trip_report, write_trip_report};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::format::format_date;
use crate::model::Trip;
use crate::store::BackupData;

/// Backup file name for the given moment: `ev-triplog-backup-<date>-<time>.json`
pub fn backup_file_name(timestamp_ms: i64) -> String {
    format!(
        "ev-triplog-backup-{}.json",
        format_date(timestamp_ms, "%Y-%m-%d-%H%M%S")
    )
}

/// CSV file name for a trip: `trip-<id>-<date>.csv`
pub fn trip_csv_file_name(trip: &Trip) -> String {
    format!("trip-{}-{}.csv", trip.id, format_date(trip.start_date, "%Y-%m-%d"))
}

/// Report file name for a trip: `trip-<id>-<date>-report.txt`
pub fn trip_report_file_name(trip: &Trip) -> String {
    format!(
        "trip-{}-{}-report.txt",
        trip.id,
        format_date(trip.start_date, "%Y-%m-%d")
    )
}

/// Write a pretty-printed backup file into `dir`, named for the given
/// moment. Returns the path written.
pub fn write_backup(dir: &Path, data: &BackupData, timestamp_ms: i64) -> io::Result<PathBuf> {
    let path = dir.join(backup_file_name(timestamp_ms));
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, content)?;
    Ok(path)
}
