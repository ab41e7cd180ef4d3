//! Vehicle reference catalog.
//!
//! Immutable per-vehicle data (fuel type, market segment, efficiency label)
//! loaded from a CSV file and looked up by a case-insensitive
//! `"brand model"` key.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Propulsion/energy category of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    #[serde(rename = "Plug-in Hybrid")]
    PlugInHybrid,
    #[serde(rename = "Battery Electric")]
    BatteryElectric,
}

impl FuelType {
    /// Hybrid and electric variants mark a driving option as eco-friendly.
    pub fn is_eco_friendly(self) -> bool {
        matches!(
            self,
            FuelType::Hybrid | FuelType::PlugInHybrid | FuelType::BatteryElectric
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::PlugInHybrid => "Plug-in Hybrid",
            FuelType::BatteryElectric => "Battery Electric",
        }
    }
}

/// Vehicle size class, used to key emission factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSegment {
    Small,
    Medium,
    Large,
    Average,
}

impl MarketSegment {
    pub fn label(self) -> &'static str {
        match self {
            MarketSegment::Small => "Small",
            MarketSegment::Medium => "Medium",
            MarketSegment::Large => "Large",
            MarketSegment::Average => "Average",
        }
    }
}

/// Immutable reference data for one fleet vehicle.
///
/// `efficiency` keeps the display label from the catalog file
/// (`"6.3 l/100km"`, `"15.3 kWh/100km"`). It is parsed on use, so the
/// catalog stays wire-compatible with the existing fleet data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub brand: String,
    pub model: String,
    pub fuel_type: FuelType,
    pub market_segment: MarketSegment,
    pub efficiency: String,
}

impl VehicleProfile {
    /// Lookup key: lowercase `"brand model"`.
    pub fn key(&self) -> String {
        format!("{} {}", self.brand, self.model).to_lowercase()
    }
}

pub type VehicleCatalog = HashMap<String, VehicleProfile>;

/// Loads the vehicle catalog CSV into a map keyed by lowercase
/// `"brand model"`.
///
/// # Errors
///
/// Errors if the file cannot be read or a row does not deserialize.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<VehicleCatalog> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("opening vehicle catalog {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut catalog = HashMap::new();
    for result in rdr.deserialize() {
        let profile: VehicleProfile = result?;
        catalog.insert(profile.key(), profile);
    }

    Ok(catalog)
}

/// Case-insensitive lookup by `"brand model"`.
pub fn find_vehicle<'a>(catalog: &'a VehicleCatalog, name: &str) -> Option<&'a VehicleProfile> {
    catalog.get(&name.trim().to_lowercase())
}
