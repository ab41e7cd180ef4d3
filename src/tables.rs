//! Static lookup data: fuel prices and emission factors.
//!
//! Both tables are read-only after process start and shared freely between
//! concurrent report sessions. A missing entry surfaces as `None`; a lookup
//! miss must never turn into a silent zero price or factor.

use crate::catalog::{FuelType, MarketSegment};

/// Pump and tariff prices, CZK per liter (CZK per kWh for battery
/// electric). Late-2025 Czech averages; hybrids refuel at the petrol pump.
static FUEL_PRICES_CZK: &[(FuelType, f64)] = &[
    (FuelType::Petrol, 38.4),
    (FuelType::Diesel, 36.9),
    (FuelType::Hybrid, 38.4),
    (FuelType::PlugInHybrid, 38.4),
    (FuelType::BatteryElectric, 6.2),
];

/// Tailpipe CO₂ per km, kg, by market segment and fuel type. Battery
/// electric is exactly 0.0 in every segment; upstream grid emissions are
/// out of scope.
static EMISSION_FACTORS_KG_PER_KM: &[(MarketSegment, FuelType, f64)] = &[
    (MarketSegment::Small, FuelType::Petrol, 0.120),
    (MarketSegment::Small, FuelType::Diesel, 0.112),
    (MarketSegment::Small, FuelType::Hybrid, 0.090),
    (MarketSegment::Small, FuelType::PlugInHybrid, 0.045),
    (MarketSegment::Small, FuelType::BatteryElectric, 0.0),
    (MarketSegment::Medium, FuelType::Petrol, 0.150),
    (MarketSegment::Medium, FuelType::Diesel, 0.140),
    (MarketSegment::Medium, FuelType::Hybrid, 0.110),
    (MarketSegment::Medium, FuelType::PlugInHybrid, 0.055),
    (MarketSegment::Medium, FuelType::BatteryElectric, 0.0),
    (MarketSegment::Large, FuelType::Petrol, 0.200),
    (MarketSegment::Large, FuelType::Diesel, 0.185),
    (MarketSegment::Large, FuelType::Hybrid, 0.140),
    (MarketSegment::Large, FuelType::PlugInHybrid, 0.075),
    (MarketSegment::Large, FuelType::BatteryElectric, 0.0),
    (MarketSegment::Average, FuelType::Petrol, 0.155),
    (MarketSegment::Average, FuelType::Diesel, 0.145),
    (MarketSegment::Average, FuelType::Hybrid, 0.113),
    (MarketSegment::Average, FuelType::PlugInHybrid, 0.058),
    (MarketSegment::Average, FuelType::BatteryElectric, 0.0),
];

/// Price per energy unit keyed by fuel type.
#[derive(Debug, Clone)]
pub struct FuelPriceTable {
    entries: Vec<(FuelType, f64)>,
}

impl FuelPriceTable {
    pub fn czk_defaults() -> Self {
        Self {
            entries: FUEL_PRICES_CZK.to_vec(),
        }
    }

    pub fn from_entries(entries: Vec<(FuelType, f64)>) -> Self {
        Self { entries }
    }

    /// CZK per liter (or kWh). `None` when the fuel type has no quote.
    pub fn price_per_unit(&self, fuel: FuelType) -> Option<f64> {
        self.entries
            .iter()
            .find(|(f, _)| *f == fuel)
            .map(|(_, price)| *price)
    }
}

/// CO₂ factor keyed by market segment and fuel type.
#[derive(Debug, Clone)]
pub struct EmissionFactorTable {
    entries: Vec<(MarketSegment, FuelType, f64)>,
}

impl EmissionFactorTable {
    pub fn defaults() -> Self {
        Self {
            entries: EMISSION_FACTORS_KG_PER_KM.to_vec(),
        }
    }

    pub fn from_entries(entries: Vec<(MarketSegment, FuelType, f64)>) -> Self {
        Self { entries }
    }

    /// kg CO₂ per km. `None` when the pair has no factor.
    pub fn kg_per_km(&self, segment: MarketSegment, fuel: FuelType) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, f, _)| *s == segment && *f == fuel)
            .map(|(_, _, factor)| *factor)
    }
}
