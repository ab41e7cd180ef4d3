//! Persisted trip facts.
//!
//! A [`TripRecord`] is written exactly once when a trip is confirmed and
//! never mutated. All numeric fields are kept in their display form for
//! wire compatibility with the existing fleet log; [`crate::parser`]
//! restores numbers at aggregation time.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::VehicleProfile;
use crate::options::{self, TransportOption};
use crate::parser::{self, Consumption};
use crate::route::{Mode, RouteLeg};

/// Caller-supplied context for confirming a trip.
#[derive(Debug, Clone)]
pub struct TripContext {
    pub driver_id: String,
    pub department: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_at: String,
}

/// One append-only historical fact, flattened to plain string fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub driver_id: String,
    pub department: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub fuel_type: String,
    pub market_segment: String,
    pub efficiency: String,
    pub distance: String,
    pub duration: String,
    pub co2: String,
    pub cost: String,
    pub mode: String,
    pub origin: String,
    pub destination: String,
    pub scheduled_at: String,
    pub recorded_at: String,
}

impl TripRecord {
    /// Builds the persisted record for an accepted option. `recorded_at`
    /// is the store-assigned timestamp.
    pub fn from_confirmed(
        option: &TransportOption,
        leg: &RouteLeg,
        vehicle: &VehicleProfile,
        ctx: &TripContext,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            driver_id: ctx.driver_id.clone(),
            department: ctx.department.clone(),
            vehicle_brand: vehicle.brand.clone(),
            vehicle_model: vehicle.model.clone(),
            fuel_type: vehicle.fuel_type.label().to_string(),
            market_segment: vehicle.market_segment.label().to_string(),
            efficiency: vehicle.efficiency.clone(),
            distance: format!("{:.1} km", leg.distance_km),
            duration: options::format_duration(leg.duration_seconds),
            co2: option.emission_label.clone(),
            cost: option.cost_label.clone(),
            mode: option.mode.label().to_string(),
            origin: ctx.origin.clone(),
            destination: ctx.destination.clone(),
            scheduled_at: ctx.scheduled_at.clone(),
            recorded_at: recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn distance_km(&self) -> f64 {
        parser::parse_distance_km(&self.distance)
    }

    pub fn duration_seconds(&self) -> u64 {
        parser::parse_duration_seconds(&self.duration)
    }

    pub fn co2_kg(&self) -> f64 {
        parser::parse_co2_kg(&self.co2)
    }

    pub fn cost_czk(&self) -> f64 {
        parser::parse_cost_czk(&self.cost)
    }

    pub fn consumption(&self) -> Consumption {
        parser::parse_consumption(&self.efficiency)
    }

    /// Recorded timestamp, if it parses as RFC 3339.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.recorded_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Persisted travel mode. Unknown labels default to Driving with the
    /// fallback flagged.
    pub fn mode(&self) -> (Mode, bool) {
        Mode::parse_lossy(&self.mode)
    }
}
