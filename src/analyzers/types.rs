//! Data types used by the fleet analytics pipeline.

use serde::{Deserialize, Serialize};

use super::rating::{CarbonFootprintRating, EmissionLevel, FuelEfficiencyRating};

/// Reporting window, anchored at the caller's "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// Same calendar day as now.
    Today,
    /// Trailing 7 days through now, inclusive.
    Week,
    /// Same calendar month and year as now.
    Month,
    /// Same calendar year as now.
    Year,
}

impl Period {
    pub fn parse(s: &str) -> Option<Period> {
        match s.trim().to_lowercase().as_str() {
            "today" => Some(Period::Today),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            _ => None,
        }
    }
}

/// One analytics session's filter selection. Empty optionals match every
/// trip.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub period: Period,
    pub department: Option<String>,
    pub driver_id: Option<String>,
    pub vehicle_model: Option<String>,
}

impl FilterCriteria {
    pub fn for_period(period: Period) -> Self {
        Self {
            period,
            department: None,
            driver_id: None,
            vehicle_model: None,
        }
    }
}

/// Aggregated, derived, and classified summary of a filtered trip set.
///
/// A pure function of the snapshot. `trip_count == 0` with `NoData`
/// ratings is the first-class empty state, distinct from a non-empty set
/// whose true totals happen to be zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetMetrics {
    pub trip_count: usize,
    pub total_distance_km: f64,
    pub total_duration_seconds: u64,
    pub total_fuel_liters: f64,
    pub total_cost_czk: f64,
    pub total_co2_kg: f64,
    pub avg_fuel_per_100km: f64,
    pub avg_co2_g_per_km: f64,
    pub avg_speed_kmh: f64,
    pub cost_per_km: f64,
    pub trees_to_offset: u64,
    /// Trips whose consumption came from the documented default rather
    /// than a real efficiency label.
    pub fallback_consumption_trips: usize,
    pub fuel_efficiency: FuelEfficiencyRating,
    pub carbon_footprint: CarbonFootprintRating,
    pub emission_level: EmissionLevel,
}

impl FleetMetrics {
    /// The empty-filter-result state: all numerics zero, all ratings
    /// literally "No Data".
    pub fn no_data() -> Self {
        Self {
            trip_count: 0,
            total_distance_km: 0.0,
            total_duration_seconds: 0,
            total_fuel_liters: 0.0,
            total_cost_czk: 0.0,
            total_co2_kg: 0.0,
            avg_fuel_per_100km: 0.0,
            avg_co2_g_per_km: 0.0,
            avg_speed_kmh: 0.0,
            cost_per_km: 0.0,
            trees_to_offset: 0,
            fallback_consumption_trips: 0,
            fuel_efficiency: FuelEfficiencyRating::NoData,
            carbon_footprint: CarbonFootprintRating::NoData,
            emission_level: EmissionLevel::NoData,
        }
    }
}

/// Dropdown values offered for the current partial filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterValues {
    pub departments: Vec<String>,
    pub driver_ids: Vec<String>,
    pub vehicle_models: Vec<String>,
}
