//! Trip CO₂ model.

use crate::catalog::{FuelType, MarketSegment};
use crate::tables::EmissionFactorTable;

/// Flat figure shown for a transit trip, kg. Illustrative only; there is
/// no per-service transit emission model.
pub const TRANSIT_TRIP_CO2_KG: f64 = 0.5;

/// Tailpipe CO₂ of a car trip, kg.
///
/// `None` when the segment × fuel pair has no factor; a missing factor is
/// reported as unavailable, never guessed. Battery electric resolves to a
/// real factor of exactly 0.0.
pub fn car_trip_emissions(
    distance_km: f64,
    fuel: FuelType,
    segment: MarketSegment,
    factors: &EmissionFactorTable,
) -> Option<f64> {
    let factor = factors.kg_per_km(segment, fuel)?;
    Some(factor * distance_km)
}

pub fn transit_trip_emissions() -> f64 {
    TRANSIT_TRIP_CO2_KG
}

/// Walking emits nothing.
pub fn walking_emissions() -> f64 {
    0.0
}
