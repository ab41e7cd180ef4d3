//! Filter dropdown values and the cross-filter reset rule.

use chrono::{DateTime, Utc};

use super::aggregate;
use super::types::{FilterCriteria, FilterValues};
use crate::trips::TripRecord;

/// Unique, sorted dropdown values for the current partial selection:
/// departments scope to the period, driver IDs to period + department,
/// vehicle models to period + department + driver.
pub fn available_filter_values(
    trips: &[TripRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> FilterValues {
    let period_only = FilterCriteria::for_period(criteria.period);
    let department_scoped = FilterCriteria {
        department: criteria.department.clone(),
        ..period_only.clone()
    };
    let driver_scoped = FilterCriteria {
        driver_id: criteria.driver_id.clone(),
        ..department_scoped.clone()
    };

    FilterValues {
        departments: unique_sorted(trips, &period_only, now, |t| t.department.as_str()),
        driver_ids: unique_sorted(trips, &department_scoped, now, |t| t.driver_id.as_str()),
        vehicle_models: unique_sorted(trips, &driver_scoped, now, |t| t.vehicle_model.as_str()),
    }
}

fn unique_sorted<F>(
    trips: &[TripRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
    field: F,
) -> Vec<String>
where
    F: for<'r> Fn(&'r TripRecord) -> &'r str,
{
    let mut values: Vec<String> = trips
        .iter()
        .filter(|trip| aggregate::matches(trip, criteria, now))
        .map(|trip| field(trip).to_string())
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Clears selections invalidated by an upstream filter change: a driver no
/// longer offered under the chosen department resets the driver filter and
/// the dependent vehicle filter; a vehicle no longer offered resets the
/// vehicle filter.
pub fn normalize_criteria(
    trips: &[TripRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> FilterCriteria {
    let mut normalized = criteria.clone();

    let offered = available_filter_values(trips, &normalized, now);
    if let Some(driver_id) = &normalized.driver_id {
        if !driver_id.is_empty() && !offered.driver_ids.contains(driver_id) {
            normalized.driver_id = None;
            normalized.vehicle_model = None;
        }
    }

    let offered = available_filter_values(trips, &normalized, now);
    if let Some(vehicle_model) = &normalized.vehicle_model {
        if !vehicle_model.is_empty() && !offered.vehicle_models.contains(vehicle_model) {
            normalized.vehicle_model = None;
        }
    }

    normalized
}
