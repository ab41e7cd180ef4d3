//! CSV-backed append-only trip log.
//!
//! The log is the persistence collaborator of the engine: records are
//! appended exactly once on confirmation, never mutated or reordered, and
//! reports consume whole-file snapshots.

use anyhow::Result;
use chrono::Utc;
use csv::WriterBuilder;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::{debug, info};

use crate::catalog::VehicleProfile;
use crate::options::TransportOption;
use crate::route::RouteLeg;
use crate::trips::{TripContext, TripRecord};

/// Appends a [`TripRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &TripRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "appending trip record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

/// Reads a snapshot of the whole log. A missing file is an empty log.
pub fn load_trips(path: &str) -> Result<Vec<TripRecord>> {
    if !Path::new(path).exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut trips = Vec::new();
    for result in rdr.deserialize() {
        let record: TripRecord = result?;
        trips.push(record);
    }

    Ok(trips)
}

/// Persists an accepted option as a trip fact, stamping the store-side
/// timestamp.
///
/// # Errors
///
/// A failed append propagates as an error; the in-memory option stays
/// valid for retry.
pub fn confirm_trip(
    path: &str,
    option: &TransportOption,
    leg: &RouteLeg,
    vehicle: &VehicleProfile,
    ctx: &TripContext,
) -> Result<TripRecord> {
    let record = TripRecord::from_confirmed(option, leg, vehicle, ctx, Utc::now());
    append_record(path, &record)?;
    info!(driver = %record.driver_id, mode = %record.mode, "trip recorded");
    Ok(record)
}

/// Logs a serializable report as pretty-printed JSON.
pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
