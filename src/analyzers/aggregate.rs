//! Single-pass fleet aggregation.
//!
//! Filters a trip-log snapshot by period window and equality criteria,
//! folds totals, derives rates, and classifies them. One malformed record
//! degrades locally and never aborts the whole aggregation.

use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::debug;

use super::rating;
use super::types::{FilterCriteria, FleetMetrics, Period};
use crate::trips::TripRecord;

/// Annual CO₂ uptake assumed per tree, kg. A reporting policy choice, not
/// a physical law.
pub const TREE_CO2_KG_PER_YEAR: f64 = 21.0;

/// Folds a trip snapshot into [`FleetMetrics`] using the current wall
/// clock as the window anchor.
pub fn aggregate(trips: &[TripRecord], criteria: &FilterCriteria) -> FleetMetrics {
    aggregate_at(trips, criteria, Utc::now())
}

/// Pure variant with an explicit anchor. The same snapshot, criteria, and
/// anchor always yield identical metrics.
pub fn aggregate_at(
    trips: &[TripRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> FleetMetrics {
    let selected: Vec<&TripRecord> = trips
        .iter()
        .filter(|trip| matches(trip, criteria, now))
        .collect();

    if selected.is_empty() {
        return FleetMetrics::no_data();
    }

    let mut total_distance_km = 0.0;
    let mut total_duration_seconds = 0u64;
    let mut total_fuel_liters = 0.0;
    let mut total_cost_czk = 0.0;
    let mut total_co2_kg = 0.0;
    let mut fallback_consumption_trips = 0usize;

    for trip in &selected {
        let distance = trip.distance_km();
        let consumption = trip.consumption();
        if consumption.fallback {
            fallback_consumption_trips += 1;
        }

        total_distance_km += distance;
        total_duration_seconds += trip.duration_seconds();
        total_fuel_liters += distance * consumption.per_100km / 100.0;
        total_cost_czk += trip.cost_czk();
        total_co2_kg += trip.co2_kg();
    }

    let avg_fuel_per_100km = if total_distance_km > 0.0 {
        total_fuel_liters / total_distance_km * 100.0
    } else {
        0.0
    };
    let avg_co2_g_per_km = if total_distance_km > 0.0 {
        total_co2_kg * 1000.0 / total_distance_km
    } else {
        0.0
    };
    let hours = total_duration_seconds as f64 / 3600.0;
    let avg_speed_kmh = if hours > 0.0 {
        total_distance_km / hours
    } else {
        0.0
    };
    let cost_per_km = if total_distance_km > 0.0 {
        total_cost_czk / total_distance_km
    } else {
        0.0
    };
    let trees_to_offset = (total_co2_kg / TREE_CO2_KG_PER_YEAR).ceil() as u64;

    FleetMetrics {
        trip_count: selected.len(),
        total_distance_km,
        total_duration_seconds,
        total_fuel_liters,
        total_cost_czk,
        total_co2_kg,
        avg_fuel_per_100km,
        avg_co2_g_per_km,
        avg_speed_kmh,
        cost_per_km,
        trees_to_offset,
        fallback_consumption_trips,
        fuel_efficiency: rating::fuel_efficiency(avg_fuel_per_100km),
        carbon_footprint: rating::carbon_footprint(total_co2_kg),
        emission_level: rating::emission_level(avg_co2_g_per_km),
    }
}

/// Period window plus equality filters. A record whose timestamp does not
/// parse falls outside every window.
pub(crate) fn matches(trip: &TripRecord, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    let recorded = match trip.recorded_at() {
        Some(ts) => ts,
        None => {
            debug!(recorded_at = %trip.recorded_at, "skipping record with unparsable timestamp");
            return false;
        }
    };

    if !in_period(recorded, criteria.period, now) {
        return false;
    }
    if let Some(department) = &criteria.department {
        if !department.is_empty() && trip.department != *department {
            return false;
        }
    }
    if let Some(driver_id) = &criteria.driver_id {
        if !driver_id.is_empty() && trip.driver_id != *driver_id {
            return false;
        }
    }
    if let Some(vehicle_model) = &criteria.vehicle_model {
        if !vehicle_model.is_empty() && trip.vehicle_model != *vehicle_model {
            return false;
        }
    }

    true
}

fn in_period(recorded: DateTime<Utc>, period: Period, now: DateTime<Utc>) -> bool {
    match period {
        Period::Today => recorded.date_naive() == now.date_naive(),
        Period::Week => recorded >= now - Duration::days(7) && recorded <= now,
        Period::Month => recorded.year() == now.year() && recorded.month() == now.month(),
        Period::Year => recorded.year() == now.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::rating::{CarbonFootprintRating, EmissionLevel, FuelEfficiencyRating};
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn trip(
        driver_id: &str,
        department: &str,
        model: &str,
        distance: &str,
        duration: &str,
        co2: &str,
        cost: &str,
        efficiency: &str,
        recorded_at: &str,
    ) -> TripRecord {
        TripRecord {
            driver_id: driver_id.to_string(),
            department: department.to_string(),
            vehicle_brand: "Skoda".to_string(),
            vehicle_model: model.to_string(),
            fuel_type: "Petrol".to_string(),
            market_segment: "Medium".to_string(),
            efficiency: efficiency.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            co2: co2.to_string(),
            cost: cost.to_string(),
            mode: "Driving".to_string(),
            origin: "A".to_string(),
            destination: "B".to_string(),
            scheduled_at: "2025-06-15 08:00".to_string(),
            recorded_at: recorded_at.to_string(),
        }
    }

    fn simple_trip(recorded_at: &str) -> TripRecord {
        trip(
            "D-1",
            "Sales",
            "Octavia",
            "100.0 km",
            "2h",
            "15.0kg CO₂",
            "250 CZK",
            "6.5 l/100km",
            recorded_at,
        )
    }

    #[test]
    fn test_empty_filtered_set_is_no_data() {
        let metrics = aggregate_at(&[], &FilterCriteria::for_period(Period::Month), anchor());
        assert_eq!(metrics, FleetMetrics::no_data());
        assert_eq!(metrics.trip_count, 0);
        assert_eq!(metrics.carbon_footprint, CarbonFootprintRating::NoData);
        assert_eq!(metrics.fuel_efficiency, FuelEfficiencyRating::NoData);
        assert_eq!(metrics.emission_level, EmissionLevel::NoData);
    }

    #[test]
    fn test_zero_totals_are_not_no_data() {
        // a walking trip: zero distance label, zero cost, zero emissions
        let trips = vec![trip(
            "D-1",
            "Sales",
            "Octavia",
            "0.0 km",
            "0 min",
            "0.0kg CO₂",
            "0 CZK",
            "6.5 l/100km",
            "2025-06-15T08:00:00Z",
        )];
        let metrics = aggregate_at(&trips, &FilterCriteria::for_period(Period::Today), anchor());

        assert_eq!(metrics.trip_count, 1);
        assert_eq!(metrics.total_distance_km, 0.0);
        // classified, not "No Data"
        assert_eq!(metrics.carbon_footprint, CarbonFootprintRating::Low);
        assert_eq!(metrics.fuel_efficiency, FuelEfficiencyRating::Good);
        assert_eq!(metrics.emission_level, EmissionLevel::Excellent);
    }

    #[test]
    fn test_totals_and_derived_rates() {
        let trips = vec![
            simple_trip("2025-06-14T10:00:00Z"),
            trip(
                "D-2",
                "Sales",
                "Superb",
                "50.0 km",
                "1h",
                "9.25kg CO₂",
                "150 CZK",
                "5.9 l/100km",
                "2025-06-13T10:00:00Z",
            ),
        ];
        let metrics = aggregate_at(&trips, &FilterCriteria::for_period(Period::Week), anchor());

        assert_eq!(metrics.trip_count, 2);
        assert_eq!(metrics.total_distance_km, 150.0);
        assert_eq!(metrics.total_duration_seconds, 10800);
        assert_eq!(metrics.total_co2_kg, 24.25);
        assert_eq!(metrics.total_cost_czk, 400.0);
        // 100 × 0.065 + 50 × 0.059 = 9.45 liters
        assert!((metrics.total_fuel_liters - 9.45).abs() < 1e-9);
        assert!((metrics.avg_fuel_per_100km - 6.3).abs() < 1e-9);
        // 24.25 kg × 1000 / 150 km ≈ 161.67 g/km
        assert!((metrics.avg_co2_g_per_km - 161.666_666_666).abs() < 1e-6);
        assert_eq!(metrics.avg_speed_kmh, 50.0);
        assert!((metrics.cost_per_km - 400.0 / 150.0).abs() < 1e-9);
        // ceil(24.25 / 21) = 2 trees
        assert_eq!(metrics.trees_to_offset, 2);
        assert_eq!(metrics.fallback_consumption_trips, 0);
        assert_eq!(metrics.fuel_efficiency, FuelEfficiencyRating::Moderate);
        assert_eq!(metrics.carbon_footprint, CarbonFootprintRating::Low);
        assert_eq!(metrics.emission_level, EmissionLevel::High);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let trips = vec![
            simple_trip("2025-06-14T10:00:00Z"),
            simple_trip("2025-06-15T09:30:00Z"),
        ];
        let criteria = FilterCriteria::for_period(Period::Week);

        let first = aggregate_at(&trips, &criteria, anchor());
        let second = aggregate_at(&trips, &criteria, anchor());
        assert_eq!(first, second);
    }

    #[test]
    fn test_period_windows() {
        let trips = vec![
            simple_trip("2025-06-15T08:00:00Z"), // today
            simple_trip("2025-06-10T08:00:00Z"), // this week, not today
            simple_trip("2025-06-01T08:00:00Z"), // this month
            simple_trip("2025-01-05T08:00:00Z"), // this year
            simple_trip("2024-12-31T08:00:00Z"), // previous year
        ];
        let now = anchor();

        let count = |period| aggregate_at(&trips, &FilterCriteria::for_period(period), now).trip_count;
        assert_eq!(count(Period::Today), 1);
        assert_eq!(count(Period::Week), 2);
        assert_eq!(count(Period::Month), 3);
        assert_eq!(count(Period::Year), 4);
    }

    #[test]
    fn test_week_window_is_trailing_and_inclusive() {
        let now = anchor();
        let trips = vec![
            simple_trip("2025-06-08T12:00:00Z"), // exactly 7 days back
            simple_trip("2025-06-08T11:59:59Z"), // just outside
            simple_trip("2025-06-15T12:00:00Z"), // exactly now
            simple_trip("2025-06-15T12:00:01Z"), // future
        ];
        let metrics = aggregate_at(&trips, &FilterCriteria::for_period(Period::Week), now);
        assert_eq!(metrics.trip_count, 2);
    }

    #[test]
    fn test_equality_filters() {
        let trips = vec![
            simple_trip("2025-06-15T08:00:00Z"),
            trip(
                "D-2",
                "Engineering",
                "Superb",
                "10.0 km",
                "20 min",
                "1.5kg CO₂",
                "40 CZK",
                "5.9 l/100km",
                "2025-06-15T09:00:00Z",
            ),
        ];
        let now = anchor();

        let mut criteria = FilterCriteria::for_period(Period::Today);
        criteria.department = Some("Engineering".to_string());
        assert_eq!(aggregate_at(&trips, &criteria, now).trip_count, 1);

        criteria.driver_id = Some("D-1".to_string());
        assert_eq!(aggregate_at(&trips, &criteria, now).trip_count, 0);

        // empty strings match everything
        let open = FilterCriteria {
            period: Period::Today,
            department: Some(String::new()),
            driver_id: Some(String::new()),
            vehicle_model: Some(String::new()),
        };
        assert_eq!(aggregate_at(&trips, &open, now).trip_count, 2);
    }

    #[test]
    fn test_malformed_record_degrades_without_aborting() {
        let mut broken = simple_trip("2025-06-15T08:00:00Z");
        broken.distance = "??".to_string();
        broken.cost = "??".to_string();
        broken.efficiency = "??".to_string();

        let trips = vec![simple_trip("2025-06-15T09:00:00Z"), broken];
        let metrics = aggregate_at(&trips, &FilterCriteria::for_period(Period::Today), anchor());

        assert_eq!(metrics.trip_count, 2);
        assert_eq!(metrics.total_distance_km, 100.0);
        assert_eq!(metrics.total_cost_czk, 250.0);
        assert_eq!(metrics.fallback_consumption_trips, 1);
    }

    #[test]
    fn test_unparsable_timestamp_is_excluded() {
        let mut lost = simple_trip("2025-06-15T08:00:00Z");
        lost.recorded_at = "yesterday-ish".to_string();

        let trips = vec![lost, simple_trip("2025-06-15T09:00:00Z")];
        let metrics = aggregate_at(&trips, &FilterCriteria::for_period(Period::Year), anchor());
        assert_eq!(metrics.trip_count, 1);
    }
}
