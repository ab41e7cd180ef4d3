//! Per-mode comparison records.
//!
//! Composes the cost and emission models into one normalized record per
//! travel mode. Pure mapping: the active vehicle is an explicit parameter,
//! not ambient state, and selecting an option has no side effect beyond
//! what the caller records.

use serde::Serialize;

use crate::catalog::VehicleProfile;
use crate::cost;
use crate::emissions;
use crate::route::{Mode, RouteLeg};
use crate::tables::{EmissionFactorTable, FuelPriceTable};

/// One comparable option per travel mode. Recomputed whenever the active
/// vehicle or the legs change; never persisted as-is.
#[derive(Debug, Clone, Serialize)]
pub struct TransportOption {
    pub mode: Mode,
    pub time_label: String,
    pub cost_label: String,
    pub emission_label: String,
    pub eco_friendly: bool,
}

/// Maps `(mode, leg, vehicle)` onto a comparison record.
pub fn synthesize_option(
    mode: Mode,
    leg: &RouteLeg,
    vehicle: &VehicleProfile,
    prices: &FuelPriceTable,
    factors: &EmissionFactorTable,
) -> TransportOption {
    let (cost, co2) = match mode {
        Mode::Driving => (
            cost::car_trip_cost(leg.distance_km, vehicle, prices),
            emissions::car_trip_emissions(
                leg.distance_km,
                vehicle.fuel_type,
                vehicle.market_segment,
                factors,
            ),
        ),
        Mode::Transit => (
            Some(cost::transit_fare(
                leg.distance_km,
                leg.duration_minutes(),
                &leg.transit_kinds,
            )),
            Some(emissions::transit_trip_emissions()),
        ),
        Mode::Walking => (
            Some(cost::walking_cost()),
            Some(emissions::walking_emissions()),
        ),
    };

    let eco_friendly = match mode {
        Mode::Driving => vehicle.fuel_type.is_eco_friendly(),
        Mode::Transit | Mode::Walking => true,
    };

    TransportOption {
        mode,
        time_label: format_duration(leg.duration_seconds),
        cost_label: format_money(cost),
        emission_label: format_emissions(co2),
        eco_friendly,
    }
}

/// One record per provided `(mode, leg)` pair, in input order.
pub fn synthesize_options(
    legs: &[(Mode, RouteLeg)],
    vehicle: &VehicleProfile,
    prices: &FuelPriceTable,
    factors: &EmissionFactorTable,
) -> Vec<TransportOption> {
    legs.iter()
        .map(|(mode, leg)| synthesize_option(*mode, leg, vehicle, prices, factors))
        .collect()
}

/// "1h 2 min", "45 min", "2h".
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    match (hours, minutes) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m} min"),
    }
}

/// "30 CZK" for whole amounts, "241.92 CZK" otherwise, "N/A" when the
/// cost could not be computed.
pub fn format_money(czk: Option<f64>) -> String {
    match czk {
        None => "N/A".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.0} CZK"),
        Some(v) => format!("{v:.2} CZK"),
    }
}

/// "12.3kg CO₂", or "N/A" when no factor resolved.
pub fn format_emissions(kg: Option<f64>) -> String {
    match kg {
        None => "N/A".to_string(),
        Some(v) => format!("{v:.1}kg CO₂"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FuelType, MarketSegment};
    use crate::route::TransitVehicleKind;

    fn vehicle(fuel_type: FuelType, efficiency: &str) -> VehicleProfile {
        VehicleProfile {
            brand: "Skoda".to_string(),
            model: "Octavia".to_string(),
            fuel_type,
            market_segment: MarketSegment::Medium,
            efficiency: efficiency.to_string(),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3720), "1h 2 min");
        assert_eq!(format_duration(2700), "45 min");
        assert_eq!(format_duration(7200), "2h");
        assert_eq!(format_duration(0), "0 min");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Some(30.0)), "30 CZK");
        assert_eq!(format_money(Some(241.92)), "241.92 CZK");
        assert_eq!(format_money(None), "N/A");
    }

    #[test]
    fn test_driving_option_for_petrol_car() {
        let prices = FuelPriceTable::czk_defaults();
        let factors = EmissionFactorTable::defaults();
        let v = vehicle(FuelType::Petrol, "6.3 l/100km");
        let leg = RouteLeg::new(10.0, 1320, vec![]);

        let option = synthesize_option(Mode::Driving, &leg, &v, &prices, &factors);
        assert_eq!(option.mode, Mode::Driving);
        assert_eq!(option.time_label, "22 min");
        assert_eq!(option.cost_label, "24.19 CZK");
        assert_eq!(option.emission_label, "1.5kg CO₂");
        assert!(!option.eco_friendly);
    }

    #[test]
    fn test_battery_electric_shows_zero_emissions() {
        let prices = FuelPriceTable::czk_defaults();
        let factors = EmissionFactorTable::defaults();
        let ev = vehicle(FuelType::BatteryElectric, "15.0 kWh/100km");
        let leg = RouteLeg::new(250.0, 9000, vec![]);

        let option = synthesize_option(Mode::Driving, &leg, &ev, &prices, &factors);
        assert_eq!(option.emission_label, "0.0kg CO₂");
        assert!(option.eco_friendly);
    }

    #[test]
    fn test_unresolvable_vehicle_shows_na_not_zero() {
        let prices = FuelPriceTable::from_entries(vec![]);
        let factors = EmissionFactorTable::from_entries(vec![]);
        let v = vehicle(FuelType::Petrol, "6.3 l/100km");
        let leg = RouteLeg::new(10.0, 1320, vec![]);

        let option = synthesize_option(Mode::Driving, &leg, &v, &prices, &factors);
        assert_eq!(option.cost_label, "N/A");
        assert_eq!(option.emission_label, "N/A");
    }

    #[test]
    fn test_transit_and_walking_are_always_eco() {
        let prices = FuelPriceTable::czk_defaults();
        let factors = EmissionFactorTable::defaults();
        let v = vehicle(FuelType::Diesel, "5.9 l/100km");

        let transit_leg = RouteLeg::new(8.0, 2400, vec![TransitVehicleKind::Subway]);
        let transit = synthesize_option(Mode::Transit, &transit_leg, &v, &prices, &factors);
        assert!(transit.eco_friendly);
        assert_eq!(transit.cost_label, "40 CZK");

        let walk_leg = RouteLeg::new(2.0, 1500, vec![]);
        let walking = synthesize_option(Mode::Walking, &walk_leg, &v, &prices, &factors);
        assert!(walking.eco_friendly);
        assert_eq!(walking.cost_label, "0 CZK");
        assert_eq!(walking.emission_label, "0.0kg CO₂");
    }

    #[test]
    fn test_synthesize_options_keeps_input_order() {
        let prices = FuelPriceTable::czk_defaults();
        let factors = EmissionFactorTable::defaults();
        let v = vehicle(FuelType::Petrol, "6.3 l/100km");
        let legs = vec![
            (Mode::Driving, RouteLeg::new(10.0, 1200, vec![])),
            (Mode::Transit, RouteLeg::new(11.0, 2100, vec![])),
            (Mode::Walking, RouteLeg::new(9.5, 7000, vec![])),
        ];

        let options = synthesize_options(&legs, &v, &prices, &factors);
        let modes: Vec<Mode> = options.iter().map(|o| o.mode).collect();
        assert_eq!(modes, vec![Mode::Driving, Mode::Transit, Mode::Walking]);
    }
}
