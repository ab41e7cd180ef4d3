//! Trip cost model: fuel/energy cost for car trips, tiered public transit
//! fares, and the (free) walking contract.

use crate::catalog::VehicleProfile;
use crate::parser;
use crate::route::TransitVehicleKind;
use crate::tables::FuelPriceTable;

/// Per-km price applied when the itinerary includes rail service.
pub const RAIL_FARE_CZK_PER_KM: f64 = 1.5;

/// Duration-tier ticket prices, CZK.
///
/// | Duration     | Fare |
/// |--------------|------|
/// | < 30 min     | 30   |
/// | 30–90 min    | 40   |
/// | > 90 min     | 120  |
pub const FARE_SHORT_CZK: f64 = 30.0;
pub const FARE_MEDIUM_CZK: f64 = 40.0;
pub const FARE_LONG_CZK: f64 = 120.0;

/// Fuel or energy cost of a car trip, rounded to 2 decimals.
///
/// `None` when the distance is not positive, the fuel type has no price
/// quote, or the efficiency label does not parse. An unavailable cost must
/// never surface as a fabricated number. Electric vehicles go through the
/// same formula; the price table is keyed by fuel type.
pub fn car_trip_cost(
    distance_km: f64,
    vehicle: &VehicleProfile,
    prices: &FuelPriceTable,
) -> Option<f64> {
    if distance_km <= 0.0 {
        return None;
    }
    let unit_price = prices.price_per_unit(vehicle.fuel_type)?;
    let per_100km = parser::parse_efficiency_per_100km(&vehicle.efficiency)?;

    Some(round2(distance_km * (per_100km / 100.0) * unit_price))
}

/// Public transit fare. Rail takes priority over the duration tiers: any
/// rail kind prices the itinerary per km, regardless of duration.
pub fn transit_fare(
    distance_km: f64,
    duration_minutes: u64,
    kinds: &[TransitVehicleKind],
) -> f64 {
    if kinds.iter().any(|k| k.is_rail()) {
        return (distance_km * RAIL_FARE_CZK_PER_KM).round();
    }

    if duration_minutes < 30 {
        FARE_SHORT_CZK
    } else if duration_minutes <= 90 {
        FARE_MEDIUM_CZK
    } else {
        FARE_LONG_CZK
    }
}

/// Walking costs nothing; it never enters the car or transit fare paths.
pub fn walking_cost() -> f64 {
    0.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FuelType, MarketSegment};

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
    fn test_car_cost_formula_and_rounding() {
        let prices = FuelPriceTable::from_entries(vec![(FuelType::Petrol, 38.4)]);
        let v = vehicle(FuelType::Petrol, "6.3 l/100km");

        // 100 × 0.063 × 38.4 = 241.92
        assert_eq!(car_trip_cost(100.0, &v, &prices), Some(241.92));
        // 12.3 × 0.063 × 38.4 = 29.75616 → 29.76
        assert_eq!(car_trip_cost(12.3, &v, &prices), Some(29.76));
    }

    #[test]
    fn test_car_cost_linear_in_distance() {
        let prices = FuelPriceTable::czk_defaults();
        let v = vehicle(FuelType::Diesel, "5.0 l/100km");

        let c10 = car_trip_cost(10.0, &v, &prices).unwrap();
        let c20 = car_trip_cost(20.0, &v, &prices).unwrap();
        let c30 = car_trip_cost(30.0, &v, &prices).unwrap();

        assert!(c20 > c10 && c30 > c20);
        assert!((c20 - 2.0 * c10).abs() < 0.01);
        assert!((c30 - 3.0 * c10).abs() < 0.01);
    }

    #[test]
    fn test_car_cost_unavailable_paths() {
        let prices = FuelPriceTable::from_entries(vec![(FuelType::Petrol, 38.4)]);

        // fuel type without a quote
        let diesel = vehicle(FuelType::Diesel, "5.0 l/100km");
        assert_eq!(car_trip_cost(10.0, &diesel, &prices), None);

        // unparsable efficiency label
        let broken = vehicle(FuelType::Petrol, "unknown");
        assert_eq!(car_trip_cost(10.0, &broken, &prices), None);

        // non-positive distance
        let v = vehicle(FuelType::Petrol, "6.3 l/100km");
        assert_eq!(car_trip_cost(0.0, &v, &prices), None);
        assert_eq!(car_trip_cost(-5.0, &v, &prices), None);
    }

    #[test]
    fn test_electric_uses_same_path() {
        let prices = FuelPriceTable::from_entries(vec![(FuelType::BatteryElectric, 6.2)]);
        let ev = vehicle(FuelType::BatteryElectric, "15.0 kWh/100km");

        // 100 × 0.15 × 6.2 = 93.0
        assert_eq!(car_trip_cost(100.0, &ev, &prices), Some(93.0));
    }

    #[test]
    fn test_transit_fare_tier_boundaries() {
        assert_eq!(transit_fare(5.0, 29, &[]), 30.0);
        assert_eq!(transit_fare(5.0, 30, &[]), 40.0);
        assert_eq!(transit_fare(5.0, 90, &[]), 40.0);
        assert_eq!(transit_fare(5.0, 91, &[]), 120.0);
    }

    #[test]
    fn test_rail_fare_ignores_duration() {
        let rail = [TransitVehicleKind::Bus, TransitVehicleKind::Train];
        assert_eq!(transit_fare(20.0, 10, &rail), 30.0);
        assert_eq!(transit_fare(20.0, 300, &rail), 30.0);
        // rounding to whole CZK
        assert_eq!(transit_fare(21.0, 60, &rail), 32.0);
    }

    #[test]
    fn test_non_rail_kinds_use_tiers() {
        let city = [TransitVehicleKind::Subway, TransitVehicleKind::Tram];
        assert_eq!(transit_fare(20.0, 45, &city), 40.0);
    }

    #[test]
    fn test_walking_is_free() {
        assert_eq!(walking_cost(), 0.0);
    }
}
