//! Boundary normalization of persisted display labels.
//!
//! The trip log stores human-readable labels ("12.4 km", "1h 2 min",
//! "230 CZK") rather than raw numbers. Every parser here is total:
//! malformed history degrades to zero or a flagged fallback and never
//! aborts an aggregation.

use lazy_static::lazy_static;
use regex::Regex;

/// Fixed USD → CZK conversion applied to `$`-tagged cost labels.
pub const USD_TO_CZK: f64 = 23.0;

/// Consumption assumed when a vehicle's efficiency label does not parse.
/// Carried with a fallback flag so reports can tell it from a real figure.
pub const DEFAULT_CONSUMPTION_L_PER_100KM: f64 = 7.0;

lazy_static! {
    static ref LEADING_FLOAT_RE: Regex = Regex::new(r"(\d+(?:\.\d+)?)").unwrap();
    static ref DURATION_RE: Regex = Regex::new(r"(?:(\d+)\s*h)?\s*(?:(\d+)\s*min)?").unwrap();
}

/// First numeric token of a label, if any.
fn leading_float(s: &str) -> Option<f64> {
    LEADING_FLOAT_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// "12.4 km" → 12.4; unparsable → 0.
pub fn parse_distance_km(s: &str) -> f64 {
    leading_float(s).unwrap_or(0.0)
}

/// "1h 2 min" → 3720, "45 min" → 2700, "2h" → 7200, "" → 0.
///
/// Both the hour and the minute group are optional; a missing group
/// contributes zero.
pub fn parse_duration_seconds(s: &str) -> u64 {
    let caps = match DURATION_RE.captures(s) {
        Some(caps) => caps,
        None => return 0,
    };
    let hours: u64 = caps
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let minutes: u64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    (hours * 60 + minutes) * 60
}

/// "1.2kg CO₂" → 1.2; "750g CO₂" → 0.75. Unit-less values are taken as kg
/// already; unparsable → 0.
pub fn parse_co2_kg(s: &str) -> f64 {
    let value = match leading_float(s) {
        Some(v) => v,
        None => return 0.0,
    };
    let lower = s.to_lowercase();
    if lower.contains("kg") {
        value
    } else if lower.contains('g') {
        value / 1000.0
    } else {
        value
    }
}

/// "230 CZK" → 230.0; "$5" → 115.0 via the fixed [`USD_TO_CZK`] rate;
/// malformed → 0.
pub fn parse_cost_czk(s: &str) -> f64 {
    let value = match leading_float(s) {
        Some(v) => v,
        None => return 0.0,
    };
    if s.contains('$') { value * USD_TO_CZK } else { value }
}

/// A consumption figure with its provenance. `fallback` marks the
/// documented default rather than a real catalog measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consumption {
    pub per_100km: f64,
    pub fallback: bool,
}

/// Leading float before a per-100km unit marker ("6.3 l/100km",
/// "15.3 kWh/100km"). A label without the marker yields the flagged
/// [`DEFAULT_CONSUMPTION_L_PER_100KM`].
pub fn parse_consumption(s: &str) -> Consumption {
    match parse_efficiency_per_100km(s) {
        Some(per_100km) => Consumption {
            per_100km,
            fallback: false,
        },
        None => Consumption {
            per_100km: DEFAULT_CONSUMPTION_L_PER_100KM,
            fallback: true,
        },
    }
}

/// Strict efficiency parse for the cost model, where an unparsable label
/// must read as unavailable, not a default.
pub fn parse_efficiency_per_100km(s: &str) -> Option<f64> {
    if !s.to_lowercase().contains("/100km") {
        return None;
    }
    leading_float(s)
}
