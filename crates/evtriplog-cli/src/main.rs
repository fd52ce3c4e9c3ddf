//! EVTripLog command-line interface
//!
//! Thin presentation layer over `evtriplog-core`: vehicle and trip CRUD,
//! stop/charging logging against the active trip, exports, import with
//! validation, and fleet statistics.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use evtriplog_core::export;
use evtriplog_core::format::{format_cost, format_date_time, format_distance, format_energy};
use evtriplog_core::metrics::{efficiency_trend, fleet_stats};
use evtriplog_core::model::{ChargingSession, NewStop, Trip, Vehicle};
use evtriplog_core::settings::AppSettings;
use evtriplog_core::store::{BackupData, Store};
use evtriplog_core::service::TripService;
use evtriplog_core::validation::parse_and_validate;
use evtriplog_core::{demo, VERSION};

#[derive(Parser)]
#[command(name = "evtriplog", version = VERSION, about = "Local-first EV trip logger")]
struct Cli {
    /// Override the data directory (defaults to the platform app data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCmd),

    /// Manage trips
    #[command(subcommand)]
    Trip(TripCmd),

    /// Log or remove stops on the active trip
    #[command(subcommand)]
    Stop(StopCmd),

    /// Attach or remove charging sessions
    #[command(subcommand)]
    Charge(ChargeCmd),

    /// Export a trip or a full backup
    #[command(subcommand)]
    Export(ExportCmd),

    /// Import a backup file (replace by default)
    Import {
        /// Backup JSON file
        file: PathBuf,
        /// Merge by id instead of replacing both collections
        #[arg(long)]
        merge: bool,
    },

    /// Fleet statistics over completed trips
    Stats,

    /// Insert a sample vehicle and trip
    Demo,

    /// Delete all stored data
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum VehicleCmd {
    /// Register a vehicle
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
        /// Usable battery capacity in kWh
        #[arg(long)]
        battery_capacity: f64,
        /// Charging efficiency in percent
        #[arg(long, default_value_t = 90.0)]
        charging_efficiency: f64,
    },
    /// List vehicles
    List,
    /// Remove a vehicle (its trips are kept)
    Remove { id: String },
}

#[derive(Subcommand)]
enum TripCmd {
    /// Start a new trip from its first stop
    Start {
        #[arg(long)]
        name: String,
        /// Vehicle id
        #[arg(long)]
        vehicle: String,
        #[command(flatten)]
        reading: Reading,
    },
    /// List trips
    List,
    /// Print a trip report
    Show { id: String },
    /// Complete the trip
    Complete { id: String },
    /// Reopen a completed trip
    Reopen { id: String },
    /// Delete a trip
    Remove { id: String },
}

#[derive(Subcommand)]
enum StopCmd {
    /// Log a stop (defaults to the active trip)
    Add {
        /// Trip id; defaults to the active trip
        #[arg(long)]
        trip: Option<String>,
        #[command(flatten)]
        reading: Reading,
    },
    /// Remove a stop
    Remove {
        #[arg(long)]
        trip: String,
        stop: String,
    },
}

#[derive(Subcommand)]
enum ChargeCmd {
    /// Attach or replace the charging session at a stop
    Set {
        #[arg(long)]
        trip: String,
        #[arg(long)]
        stop: String,
        /// State of charge before charging, percent
        #[arg(long)]
        start_soc: f64,
        /// State of charge after charging, percent
        #[arg(long)]
        end_soc: f64,
        #[arg(long)]
        cost: f64,
        /// Duration in minutes
        #[arg(long)]
        duration: f64,
        #[arg(long)]
        charger_type: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Remove the charging session at a stop
    Clear {
        #[arg(long)]
        trip: String,
        #[arg(long)]
        stop: String,
    },
}

#[derive(Subcommand)]
enum ExportCmd {
    /// Per-trip CSV
    Csv {
        trip: String,
        /// Output directory (defaults to the current directory)
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Per-trip report
    Report {
        trip: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Full backup JSON
    Backup {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

/// Odometer/battery reading shared by trip start and stop add
#[derive(Args)]
struct Reading {
    /// Odometer in km
    #[arg(long)]
    odometer: f64,
    /// Battery remaining in percent
    #[arg(long)]
    battery_percent: f64,
    /// Battery remaining in kWh; derived from the vehicle's capacity when
    /// omitted
    #[arg(long)]
    battery_kwh: Option<f64>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    let store = match &cli.data_dir {
        Some(dir) => Store::open(dir),
        None => Store::open_default(),
    }
    .context("failed to open data directory")?;
    tracing::debug!("data directory: {}", store.path().display());

    let settings = AppSettings::load(store.path());

    match cli.command {
        Command::Vehicle(cmd) => run_vehicle(&store, cmd),
        Command::Trip(cmd) => run_trip(&store, &settings, cmd),
        Command::Stop(cmd) => run_stop(&store, cmd),
        Command::Charge(cmd) => run_charge(&store, cmd),
        Command::Export(cmd) => run_export(&store, &settings, cmd),
        Command::Import { file, merge } => run_import(&store, &file, merge),
        Command::Stats => run_stats(&store, &settings),
        Command::Demo => run_demo(&store),
        Command::Clear { yes } => run_clear(&store, yes),
    }
}

fn run_vehicle(store: &Store, cmd: VehicleCmd) -> anyhow::Result<()> {
    match cmd {
        VehicleCmd::Add {
            name,
            make,
            model,
            year,
            battery_capacity,
            charging_efficiency,
        } => {
            if battery_capacity <= 0.0 {
                bail!("battery capacity must be positive");
            }
            if charging_efficiency <= 0.0 || charging_efficiency > 100.0 {
                bail!("charging efficiency must be in (0, 100]");
            }
            let vehicle = Vehicle::new(
                name,
                make,
                model,
                year,
                battery_capacity,
                charging_efficiency,
                now_ms(),
            );
            println!("Added vehicle {} ({})", vehicle.name, vehicle.id);
            store.add_vehicle(vehicle);
        }
        VehicleCmd::List => {
            let vehicles = store.vehicles();
            if vehicles.is_empty() {
                println!("No vehicles yet");
            }
            for v in vehicles {
                println!(
                    "{}  {} — {} {} {} ({} kWh)",
                    v.id, v.name, v.year, v.make, v.model, v.battery_capacity
                );
            }
        }
        VehicleCmd::Remove { id } => {
            if store.vehicle_by_id(&id).is_none() {
                bail!("no vehicle with id {id}");
            }
            store.delete_vehicle(&id);
            println!("Removed vehicle {id}");
        }
    }
    Ok(())
}

fn run_trip(store: &Store, settings: &AppSettings, cmd: TripCmd) -> anyhow::Result<()> {
    let service = TripService::new(store);
    match cmd {
        TripCmd::Start { name, vehicle, reading } => {
            let stop = reading_to_stop(store, Some(vehicle.as_str()), reading)?;
            let trip = service.create_trip(&name, &vehicle, stop)?;
            println!("Started trip {} ({})", trip.name, trip.id);
        }
        TripCmd::List => {
            let trips = store.trips();
            if trips.is_empty() {
                println!("No trips yet");
            }
            for t in &trips {
                let status = if t.is_active() { "active" } else { "completed" };
                println!(
                    "{}  {} [{}] — {} started {}, {} stops",
                    t.id,
                    t.name,
                    status,
                    format_distance(t.total_distance),
                    format_date_time(t.start_date, &settings.date_format),
                    t.stops.len()
                );
            }
        }
        TripCmd::Show { id } => {
            let trip = require_trip(store, &id)?;
            let vehicle = store
                .vehicle_by_id(&trip.vehicle_id)
                .with_context(|| format!("vehicle {} not found", trip.vehicle_id))?;
            print!("{}", export::trip_report(&trip, &vehicle, settings));
        }
        TripCmd::Complete { id } => {
            let trip = service.complete_trip(&id, now_ms())?;
            println!(
                "Completed {}: {}, {} used",
                trip.name,
                format_distance(trip.total_distance),
                format_energy(trip.total_energy_used)
            );
        }
        TripCmd::Reopen { id } => {
            let trip = service.reopen_trip(&id)?;
            println!("Reopened {}", trip.name);
        }
        TripCmd::Remove { id } => {
            service.delete_trip(&id)?;
            println!("Removed trip {id}");
        }
    }
    Ok(())
}

fn run_stop(store: &Store, cmd: StopCmd) -> anyhow::Result<()> {
    let service = TripService::new(store);
    match cmd {
        StopCmd::Add { trip, reading } => {
            let trip = match trip {
                Some(id) => require_trip(store, &id)?,
                None => store.active_trip().context("no active trip; start one first")?,
            };
            let stop = reading_to_stop(store, Some(trip.vehicle_id.as_str()), reading)?;
            let updated = service.add_stop(&trip.id, stop)?;
            println!(
                "Logged stop {} on {}: {} total, {} used",
                updated.stops.len(),
                updated.name,
                format_distance(updated.total_distance),
                format_energy(updated.total_energy_used)
            );
        }
        StopCmd::Remove { trip, stop } => {
            let updated = service.delete_stop(&trip, &stop)?;
            println!("Removed stop; {} stops remain", updated.stops.len());
        }
    }
    Ok(())
}

fn run_charge(store: &Store, cmd: ChargeCmd) -> anyhow::Result<()> {
    let service = TripService::new(store);
    match cmd {
        ChargeCmd::Set {
            trip,
            stop,
            start_soc,
            end_soc,
            cost,
            duration,
            charger_type,
            location,
        } => {
            let owner = require_trip(store, &trip)?;
            let capacity = store
                .vehicle_by_id(&owner.vehicle_id)
                .map(|v| v.battery_capacity)
                .with_context(|| format!("vehicle {} not found", owner.vehicle_id))?;

            let session = ChargingSession {
                start_soc,
                end_soc,
                start_kwh: start_soc * capacity / 100.0,
                end_kwh: end_soc * capacity / 100.0,
                cost,
                duration,
                charger_type,
                location,
            };
            let updated = service.set_charging_session(&trip, &stop, session)?;
            println!(
                "Charging session saved; trip now {} charged",
                format_energy(updated.total_energy_charged.unwrap_or(0.0))
            );
        }
        ChargeCmd::Clear { trip, stop } => {
            service.clear_charging_session(&trip, &stop)?;
            println!("Charging session removed");
        }
    }
    Ok(())
}

fn run_export(store: &Store, settings: &AppSettings, cmd: ExportCmd) -> anyhow::Result<()> {
    match cmd {
        ExportCmd::Csv { trip, out } => {
            let trip = require_trip(store, &trip)?;
            let path = out.join(export::trip_csv_file_name(&trip));
            export::write_trip_csv(&path, &trip)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        ExportCmd::Report { trip, out } => {
            let trip = require_trip(store, &trip)?;
            let vehicle = store
                .vehicle_by_id(&trip.vehicle_id)
                .with_context(|| format!("vehicle {} not found", trip.vehicle_id))?;
            let path = out.join(export::trip_report_file_name(&trip));
            export::write_trip_report(&path, &trip, &vehicle, settings)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        ExportCmd::Backup { out } => {
            let data = store.export_all();
            let path = export::write_backup(&out, &data, now_ms())
                .context("failed to write backup")?;

            let mut settings = settings.clone();
            settings.last_backup_date = Some(now_ms());
            settings.save(store.path());

            println!(
                "Wrote {} ({} vehicles, {} trips)",
                path.display(),
                data.vehicles.len(),
                data.trips.len()
            );
        }
    }
    Ok(())
}

fn run_import(store: &Store, file: &PathBuf, merge: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let report = parse_and_validate(&text);
    if !report.success {
        eprintln!("{}", report.message);
        for error in &report.errors {
            eprintln!("  - {error}");
        }
        bail!("import rejected");
    }

    let data: BackupData = serde_json::from_str(&text).context("failed to decode backup")?;

    if merge {
        let merged = store.merge_import(&data);
        println!(
            "Merged: {} vehicles added, {} updated; {} trips added, {} updated",
            merged.vehicles_added,
            merged.vehicles_updated,
            merged.trips_added,
            merged.trips_updated
        );
    } else {
        store.import_all(&data);
        println!(
            "Imported {} vehicles and {} trips (replaced existing data)",
            data.vehicles.len(),
            data.trips.len()
        );
    }
    Ok(())
}

fn run_stats(store: &Store, settings: &AppSettings) -> anyhow::Result<()> {
    let trips = store.trips();
    let stats = fleet_stats(&trips);

    println!("Completed trips: {}", stats.total_trips);
    println!("Total distance:  {}", format_distance(stats.total_distance));
    println!("Total energy:    {}", format_energy(stats.total_energy_used));
    let km_per_kwh = if stats.average_efficiency > 0.0 {
        format!("{:.2} km/kWh", 1.0 / stats.average_efficiency)
    } else {
        "N/A".to_string()
    };
    println!("Efficiency:      {km_per_kwh}");
    println!(
        "Charging:        {} across {} sessions",
        format_cost(stats.total_charging_cost, &settings.currency),
        stats.total_charging_sessions
    );

    let trend = efficiency_trend(&trips);
    if !trend.is_empty() {
        println!();
        println!("Efficiency by trip:");
        for point in trend {
            println!(
                "  {}  {:.2} km/kWh over {}",
                point.date,
                point.efficiency,
                format_distance(point.distance)
            );
        }
    }
    Ok(())
}

fn run_demo(store: &Store) -> anyhow::Result<()> {
    let data = demo::sample_data(now_ms());
    let merged = store.merge_import(&data);
    println!(
        "Demo data inserted ({} vehicle, {} trip)",
        merged.vehicles_added, merged.trips_added
    );
    Ok(())
}

fn run_clear(store: &Store, yes: bool) -> anyhow::Result<()> {
    if !yes {
        bail!("refusing to delete all data without --yes");
    }
    store.clear_all();
    println!("All data cleared");
    Ok(())
}

fn require_trip(store: &Store, id: &str) -> anyhow::Result<Trip> {
    store.trip_by_id(id).with_context(|| format!("no trip with id {id}"))
}

/// Turn CLI reading flags into a stop, deriving battery kWh from the
/// vehicle's capacity when not given explicitly
fn reading_to_stop(
    store: &Store,
    vehicle_id: Option<&str>,
    reading: Reading,
) -> anyhow::Result<NewStop> {
    let battery_kwh = match reading.battery_kwh {
        Some(kwh) => kwh,
        None => {
            let id = vehicle_id.context("--battery-kwh required without a vehicle")?;
            let vehicle = store
                .vehicle_by_id(id)
                .with_context(|| format!("vehicle {id} not found; pass --battery-kwh"))?;
            reading.battery_percent * vehicle.battery_capacity / 100.0
        }
    };

    Ok(NewStop {
        timestamp: now_ms(),
        odometer: reading.odometer,
        battery_percent: reading.battery_percent,
        battery_kwh,
        location: reading.location,
        notes: reading.notes,
        charging_session: None,
    })
}
