//! Display formatting helpers
//!
//! Shared by the export writers and the CLI. Output text matches the
//! original app: distances to one decimal, energy to two, efficiency shown
//! both ways round.

use chrono::{DateTime, Local};

/// Format a distance in km, one decimal
pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Format an energy amount in kWh, two decimals
pub fn format_energy(kwh: f64) -> String {
    format!("{:.2} kWh", kwh)
}

/// Format a battery percentage, one decimal
pub fn format_battery_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Format a cost with a currency prefix, two decimals
pub fn format_cost(cost: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, cost)
}

/// Format a duration in minutes as "2h 15m" or "45m"
pub fn format_duration(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let hours = total / 60;
    let mins = total % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Format efficiency both ways round: "0.10 kWh/km (10.00 km/kWh)"
pub fn format_efficiency(kwh_per_km: f64, km_per_kwh: f64) -> String {
    format!("{:.2} kWh/km ({:.2} km/kWh)", kwh_per_km, km_per_kwh)
}

/// Format a Unix-millisecond timestamp with a chrono pattern, local time
///
/// Returns an empty string for timestamps outside chrono's representable
/// range.
pub fn format_date(timestamp_ms: i64, pattern: &str) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(&Local).format(pattern).to_string(),
        None => String::new(),
    }
}

/// Format a timestamp as date plus "HH:MM"
pub fn format_date_time(timestamp_ms: i64, date_pattern: &str) -> String {
    format_date(timestamp_ms, &format!("{} %H:%M", date_pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_energy() {
        assert_eq!(format_distance(123.456), "123.5 km");
        assert_eq!(format_energy(10.5), "10.50 kWh");
        assert_eq!(format_battery_percent(87.25), "87.2%");
    }

    #[test]
    fn test_cost() {
        assert_eq!(format_cost(300.0, "Rs "), "Rs 300.00");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(45.0), "45m");
        assert_eq!(format_duration(135.0), "2h 15m");
        assert_eq!(format_duration(60.0), "1h 0m");
    }

    #[test]
    fn test_efficiency_both_ways() {
        assert_eq!(format_efficiency(0.1, 10.0), "0.10 kWh/km (10.00 km/kWh)");
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert_eq!(format_date(i64::MAX, "%Y-%m-%d"), "");
    }
}
