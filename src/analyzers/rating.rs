//! Qualitative classification of aggregated fleet figures.
//!
//! Thresholds are acceptance criteria, not tuning knobs; the `NoData`
//! variants are reserved for an empty filtered set and are never produced
//! by the classifiers themselves.

use serde::Serialize;
use std::fmt;

/// Total-CO₂ rating over the filtered window, kg.
///
/// | Range   | Rating   |
/// |---------|----------|
/// | < 100   | Low      |
/// | < 500   | Moderate |
/// | >= 500  | High     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CarbonFootprintRating {
    Low,
    Moderate,
    High,
    #[serde(rename = "No Data")]
    NoData,
}

pub fn carbon_footprint(total_co2_kg: f64) -> CarbonFootprintRating {
    match total_co2_kg {
        t if t < 100.0 => CarbonFootprintRating::Low,
        t if t < 500.0 => CarbonFootprintRating::Moderate,
        _ => CarbonFootprintRating::High,
    }
}

/// Average-consumption rating, liters per 100 km.
///
/// | Range   | Rating   |
/// |---------|----------|
/// | <= 6    | Good     |
/// | <= 8    | Moderate |
/// | > 8     | Poor     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuelEfficiencyRating {
    Good,
    Moderate,
    Poor,
    #[serde(rename = "No Data")]
    NoData,
}

pub fn fuel_efficiency(avg_l_per_100km: f64) -> FuelEfficiencyRating {
    match avg_l_per_100km {
        a if a <= 6.0 => FuelEfficiencyRating::Good,
        a if a <= 8.0 => FuelEfficiencyRating::Moderate,
        _ => FuelEfficiencyRating::Poor,
    }
}

/// Average-emission rating, grams CO₂ per km; upper bounds inclusive.
///
/// | Range    | Rating    |
/// |----------|-----------|
/// | <= 50    | Excellent |
/// | <= 100   | Good      |
/// | <= 150   | Moderate  |
/// | <= 200   | High      |
/// | > 200    | Very High |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmissionLevel {
    Excellent,
    Good,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    #[serde(rename = "No Data")]
    NoData,
}

pub fn emission_level(avg_g_per_km: f64) -> EmissionLevel {
    match avg_g_per_km {
        a if a <= 50.0 => EmissionLevel::Excellent,
        a if a <= 100.0 => EmissionLevel::Good,
        a if a <= 150.0 => EmissionLevel::Moderate,
        a if a <= 200.0 => EmissionLevel::High,
        _ => EmissionLevel::VeryHigh,
    }
}

impl CarbonFootprintRating {
    pub fn as_str(self) -> &'static str {
        match self {
            CarbonFootprintRating::Low => "Low",
            CarbonFootprintRating::Moderate => "Moderate",
            CarbonFootprintRating::High => "High",
            CarbonFootprintRating::NoData => "No Data",
        }
    }
}

impl FuelEfficiencyRating {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelEfficiencyRating::Good => "Good",
            FuelEfficiencyRating::Moderate => "Moderate",
            FuelEfficiencyRating::Poor => "Poor",
            FuelEfficiencyRating::NoData => "No Data",
        }
    }
}

impl EmissionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EmissionLevel::Excellent => "Excellent",
            EmissionLevel::Good => "Good",
            EmissionLevel::Moderate => "Moderate",
            EmissionLevel::High => "High",
            EmissionLevel::VeryHigh => "Very High",
            EmissionLevel::NoData => "No Data",
        }
    }
}

impl fmt::Display for CarbonFootprintRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FuelEfficiencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EmissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_footprint_boundaries() {
        assert_eq!(carbon_footprint(0.0), CarbonFootprintRating::Low);
        assert_eq!(carbon_footprint(99.9), CarbonFootprintRating::Low);
        assert_eq!(carbon_footprint(100.0), CarbonFootprintRating::Moderate);
        assert_eq!(carbon_footprint(499.9), CarbonFootprintRating::Moderate);
        assert_eq!(carbon_footprint(500.0), CarbonFootprintRating::High);
    }

    #[test]
    fn test_fuel_efficiency_boundaries() {
        assert_eq!(fuel_efficiency(0.0), FuelEfficiencyRating::Good);
        assert_eq!(fuel_efficiency(6.0), FuelEfficiencyRating::Good);
        assert_eq!(fuel_efficiency(6.1), FuelEfficiencyRating::Moderate);
        assert_eq!(fuel_efficiency(8.0), FuelEfficiencyRating::Moderate);
        assert_eq!(fuel_efficiency(8.1), FuelEfficiencyRating::Poor);
    }

    #[test]
    fn test_emission_level_boundaries() {
        assert_eq!(emission_level(50.0), EmissionLevel::Excellent);
        assert_eq!(emission_level(50.1), EmissionLevel::Good);
        assert_eq!(emission_level(100.0), EmissionLevel::Good);
        assert_eq!(emission_level(100.1), EmissionLevel::Moderate);
        assert_eq!(emission_level(150.0), EmissionLevel::Moderate);
        assert_eq!(emission_level(150.1), EmissionLevel::High);
        assert_eq!(emission_level(200.0), EmissionLevel::High);
        assert_eq!(emission_level(200.1), EmissionLevel::VeryHigh);
    }

    #[test]
    fn test_no_data_display() {
        assert_eq!(CarbonFootprintRating::NoData.to_string(), "No Data");
        assert_eq!(FuelEfficiencyRating::NoData.to_string(), "No Data");
        assert_eq!(EmissionLevel::NoData.to_string(), "No Data");
        assert_eq!(EmissionLevel::VeryHigh.to_string(), "Very High");
    }
}
