//! Per-trip report export
//!
//! A human-readable text report: trip/vehicle header, summary metrics
//! block, then one block per stop with its charging session (if any) and
//! the stretch immediately preceding it.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::format::{
    format_battery_percent, format_cost, format_date_time, format_distance, format_duration,
    format_efficiency, format_energy,
};
use crate::metrics::{cost_per_kwh, charging_energy, trip_charging_summary, trip_stretches};
use crate::model::{Trip, TripStatus, Vehicle};
use crate::settings::AppSettings;

/// Render a trip report as text
pub fn trip_report(trip: &Trip, vehicle: &Vehicle, settings: &AppSettings) -> String {
    let currency = settings.currency.as_str();
    let date_pattern = settings.date_format.as_str();
    let stretches = trip_stretches(&trip.stops);
    let charging = trip_charging_summary(trip);

    let mut out = String::new();

    // Writing into a String cannot fail; discard the fmt results
    let _ = writeln!(out, "EV Trip Report");
    let _ = writeln!(out, "==============");
    let _ = writeln!(out);
    let _ = writeln!(out, "Trip: {}", trip.name);
    let _ = writeln!(
        out,
        "Vehicle: {} ({} {})",
        vehicle.name, vehicle.make, vehicle.model
    );
    let _ = writeln!(out, "Battery Capacity: {} kWh", vehicle.battery_capacity);
    let status = match trip.status {
        TripStatus::Active => "Active",
        TripStatus::Completed => "Completed",
    };
    let _ = writeln!(out, "Status: {}", status);
    let _ = writeln!(
        out,
        "Start Date: {}",
        format_date_time(trip.start_date, date_pattern)
    );

    let first = trip.stops.first();
    let last = trip.stops.last();

    if trip.status == TripStatus::Completed {
        if let Some(last) = last {
            let _ = writeln!(
                out,
                "End Date: {}",
                format_date_time(last.timestamp, date_pattern)
            );
            if let Some(first) = first {
                let _ = writeln!(
                    out,
                    "Trip Duration: {}",
                    describe_span(last.timestamp - first.timestamp)
                );
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "-------");
    let _ = writeln!(out, "Total Distance: {}", format_distance(trip.total_distance));
    let _ = writeln!(
        out,
        "Total Energy Consumed: {}",
        format_energy(trip.total_energy_used)
    );
    let efficiency = if trip.average_efficiency > 0.0 {
        format!("{:.2} km/kWh", 1.0 / trip.average_efficiency)
    } else {
        "N/A".to_string()
    };
    let _ = writeln!(out, "Average Efficiency: {}", efficiency);

    if let (Some(first), Some(last)) = (first, last) {
        let _ = writeln!(
            out,
            "Battery Used: {} ({}% -> {}%)",
            format_battery_percent(first.battery_percent - last.battery_percent),
            first.battery_percent,
            last.battery_percent
        );
    }

    let _ = writeln!(out, "Charging Sessions: {}", charging.sessions);
    if charging.sessions > 0 {
        let _ = writeln!(
            out,
            "Total Charging Time: {}",
            format_duration(charging.total_duration_minutes)
        );
        let _ = writeln!(
            out,
            "Total Energy Charged: {}",
            format_energy(charging.total_energy)
        );
        let _ = writeln!(
            out,
            "Total Charging Cost: {}",
            format_cost(charging.total_cost, currency)
        );
        let _ = writeln!(
            out,
            "Average Cost per kWh: {}",
            format_cost(charging.average_cost_per_kwh, currency)
        );
        let _ = writeln!(
            out,
            "Cost per km: {}",
            format_cost(charging.cost_per_km, currency)
        );
    }
    let _ = writeln!(out, "Total Stops: {}", trip.stops.len());

    let _ = writeln!(out);
    let _ = writeln!(out, "Trip Details");
    let _ = writeln!(out, "------------");

    for (index, stop) in trip.stops.iter().enumerate() {
        let _ = writeln!(out);
        if index == 0 {
            let _ = writeln!(out, "Starting Point");
        } else {
            let _ = writeln!(out, "Stop {}", index);
        }
        let _ = writeln!(out, "  Time: {}", format_date_time(stop.timestamp, date_pattern));
        let _ = writeln!(out, "  Odometer: {} km", stop.odometer);
        let _ = writeln!(
            out,
            "  Battery: {} ({})",
            format_battery_percent(stop.battery_percent),
            format_energy(stop.battery_kwh)
        );
        if let Some(location) = &stop.location {
            let _ = writeln!(out, "  Location: {}", location);
        }
        if let Some(notes) = &stop.notes {
            let _ = writeln!(out, "  Notes: {}", notes);
        }

        if let Some(session) = &stop.charging_session {
            let _ = writeln!(out, "  Charging Session:");
            let _ = writeln!(out, "    SOC: {}% -> {}%", session.start_soc, session.end_soc);
            let _ = writeln!(
                out,
                "    Energy Added: {}",
                format_energy(charging_energy(session))
            );
            let _ = writeln!(
                out,
                "    Cost: {} ({}/kWh)",
                format_cost(session.cost, currency),
                format_cost(cost_per_kwh(session), currency)
            );
            let _ = writeln!(out, "    Duration: {}", format_duration(session.duration));
        }

        if index > 0 {
            if let Some(stretch) = stretches.get(index - 1) {
                let _ = writeln!(out, "  Stretch {}:", index);
                let _ = writeln!(out, "    Distance: {}", format_distance(stretch.distance));
                let _ = writeln!(
                    out,
                    "    Energy Used: {}",
                    format_energy(stretch.energy_used)
                );
                let _ = writeln!(
                    out,
                    "    Efficiency: {}",
                    format_efficiency(
                        stretch.efficiency_kwh_per_km,
                        stretch.efficiency_km_per_kwh
                    )
                );
                let _ = writeln!(
                    out,
                    "    Battery Used: {} ({:.2} km/%)",
                    format_battery_percent(stretch.battery_percent_used),
                    stretch.km_per_percent
                );
            }
        }
    }

    out
}

/// Write a trip's report to a file
pub fn write_trip_report<P: AsRef<Path>>(
    path: P,
    trip: &Trip,
    vehicle: &Vehicle,
    settings: &AppSettings,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(trip_report(trip, vehicle, settings).as_bytes())?;
    writer.flush()
}

/// Describe a millisecond span as "N day(s) N hour(s) N minute(s)"
fn describe_span(span_ms: i64) -> String {
    let minutes = span_ms / (1000 * 60);
    let days = minutes / (60 * 24);
    let hours = (minutes % (60 * 24)) / 60;
    let mins = minutes % 60;
    format!("{} day(s) {} hour(s) {} minute(s)", days, hours, mins)
}
