//! Import validation
//!
//! Structural gate applied to raw JSON before a replace or merge import, so
//! corrupt or foreign files are rejected before touching the store. The
//! checks are deliberately shape-only: field presence and JSON type, not
//! numeric ranges or cross-entity references.

use serde::Serialize;
use serde_json::Value;

/// Outcome of validating an import payload
///
/// Never an error: callers check `success` before applying the data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicles_imported: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trips_imported: Option<usize>,
}

impl ImportReport {
    fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        ImportReport {
            success: false,
            message: message.into(),
            errors,
            vehicles_imported: None,
            trips_imported: None,
        }
    }
}

fn is_string(value: &Value, field: &str) -> bool {
    value.get(field).map_or(false, Value::is_string)
}

fn is_number(value: &Value, field: &str) -> bool {
    value.get(field).map_or(false, Value::is_number)
}

/// Shape check for one vehicle element
fn valid_vehicle(vehicle: &Value) -> bool {
    vehicle.is_object()
        && is_string(vehicle, "id")
        && is_string(vehicle, "name")
        && is_string(vehicle, "make")
        && is_string(vehicle, "model")
        && is_number(vehicle, "year")
        && is_number(vehicle, "batteryCapacity")
        && is_number(vehicle, "chargingEfficiency")
        && is_number(vehicle, "createdAt")
}

/// Shape check for one trip element
fn valid_trip(trip: &Value) -> bool {
    let status_ok = matches!(
        trip.get("status").and_then(Value::as_str),
        Some("active") | Some("completed")
    );

    trip.is_object()
        && is_string(trip, "id")
        && is_string(trip, "name")
        && is_string(trip, "vehicleId")
        && is_number(trip, "startDate")
        && status_ok
        && trip.get("stops").map_or(false, Value::is_array)
        && is_number(trip, "totalDistance")
        && is_number(trip, "totalEnergyUsed")
        && is_number(trip, "averageEfficiency")
}

/// Validate an import payload's structure
///
/// Checks run in stages: the payload must be an object, `vehicles` and
/// `trips` must be arrays, and every element must pass its shape check.
/// All failures are aggregated; element failures report 1-based positions.
pub fn validate_import(data: &Value) -> ImportReport {
    if !data.is_object() {
        return ImportReport::failure(
            "Invalid data format. Expected a JSON object.",
            vec!["Data must be a valid JSON object".to_string()],
        );
    }

    let vehicles = data.get("vehicles").and_then(Value::as_array);
    let trips = data.get("trips").and_then(Value::as_array);

    let (vehicles, trips) = match (vehicles, trips) {
        (Some(vehicles), Some(trips)) => (vehicles, trips),
        (vehicles, trips) => {
            let mut errors = Vec::new();
            if vehicles.is_none() {
                errors.push("Missing or invalid \"vehicles\" array".to_string());
            }
            if trips.is_none() {
                errors.push("Missing or invalid \"trips\" array".to_string());
            }
            return ImportReport::failure("Invalid data structure", errors);
        }
    };

    let mut errors = Vec::new();

    let invalid_vehicles: Vec<String> = vehicles
        .iter()
        .enumerate()
        .filter(|(_, v)| !valid_vehicle(v))
        .map(|(i, _)| (i + 1).to_string())
        .collect();

    if !invalid_vehicles.is_empty() {
        errors.push(format!(
            "Invalid vehicle data at positions: {}",
            invalid_vehicles.join(", ")
        ));
    }

    let invalid_trips: Vec<String> = trips
        .iter()
        .enumerate()
        .filter(|(_, t)| !valid_trip(t))
        .map(|(i, _)| (i + 1).to_string())
        .collect();

    if !invalid_trips.is_empty() {
        errors.push(format!(
            "Invalid trip data at positions: {}",
            invalid_trips.join(", ")
        ));
    }

    if !errors.is_empty() {
        return ImportReport::failure("Data validation failed", errors);
    }

    ImportReport {
        success: true,
        message: "Data validation successful".to_string(),
        errors: Vec::new(),
        vehicles_imported: Some(vehicles.len()),
        trips_imported: Some(trips.len()),
    }
}

/// Parse a JSON string and validate it as an import payload
///
/// Parse failures become a failed report, never a panic or error.
pub fn parse_and_validate(text: &str) -> ImportReport {
    match serde_json::from_str::<Value>(text) {
        Ok(data) => validate_import(&data),
        Err(e) => ImportReport::failure("Failed to parse JSON file", vec![e.to_string()]),
    }
}
