//! Per-trip CSV export
//!
//! One header row, one data row per stop. Stretch-derived columns describe
//! the segment *arriving* at the row's stop, so they are blank on the first
//! row; charging columns are blank on stops without a session.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::format::format_date;
use crate::metrics::trip_stretches;
use crate::model::Trip;

const HEADER: [&str; 16] = [
    "Stop #",
    "Date/Time",
    "Odometer (km)",
    "Battery %",
    "Battery kWh",
    "Location",
    "Distance (km)",
    "Energy Used (kWh)",
    "Efficiency (kWh/km)",
    "Efficiency (km/kWh)",
    "km per %",
    "Charging Start SOC",
    "Charging End SOC",
    "Charging Cost (Rs)",
    "Charging Duration (min)",
    "Notes",
];

/// Quote a field when it contains a delimiter, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a trip as CSV text
pub fn trip_csv(trip: &Trip) -> String {
    let stretches = trip_stretches(&trip.stops);
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(trip.stops.len() + 1);

    rows.push(HEADER.iter().map(|h| h.to_string()).collect());

    for (index, stop) in trip.stops.iter().enumerate() {
        // Stretch arriving at this stop; none for the starting point
        let stretch = if index > 0 { stretches.get(index - 1) } else { None };
        let session = stop.charging_session.as_ref();

        rows.push(vec![
            (index + 1).to_string(),
            format_date(stop.timestamp, "%Y-%m-%d %H:%M:%S"),
            stop.odometer.to_string(),
            stop.battery_percent.to_string(),
            stop.battery_kwh.to_string(),
            stop.location.clone().unwrap_or_default(),
            stretch.map(|s| format!("{:.2}", s.distance)).unwrap_or_default(),
            stretch.map(|s| format!("{:.2}", s.energy_used)).unwrap_or_default(),
            stretch
                .map(|s| format!("{:.3}", s.efficiency_kwh_per_km))
                .unwrap_or_default(),
            stretch
                .map(|s| format!("{:.2}", s.efficiency_km_per_kwh))
                .unwrap_or_default(),
            stretch.map(|s| format!("{:.2}", s.km_per_percent)).unwrap_or_default(),
            session.map(|s| s.start_soc.to_string()).unwrap_or_default(),
            session.map(|s| s.end_soc.to_string()).unwrap_or_default(),
            session.map(|s| format!("{:.2}", s.cost)).unwrap_or_default(),
            session.map(|s| s.duration.to_string()).unwrap_or_default(),
            stop.notes.clone().unwrap_or_default(),
        ]);
    }

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Write a trip's CSV to a file
pub fn write_trip_csv<P: AsRef<Path>>(path: P, trip: &Trip) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(trip_csv(trip).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
