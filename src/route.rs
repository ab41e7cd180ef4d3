//! Travel modes, transit vehicle kinds, and externally computed route legs.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A way of completing a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Driving,
    Transit,
    Walking,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Driving => "Driving",
            Mode::Transit => "Transit",
            Mode::Walking => "Walking",
        }
    }

    /// Strict, case-insensitive label resolution.
    pub fn parse(s: &str) -> Option<Mode> {
        match s.trim().to_lowercase().as_str() {
            "driving" => Some(Mode::Driving),
            "transit" => Some(Mode::Transit),
            "walking" => Some(Mode::Walking),
            _ => None,
        }
    }

    /// Resolves a persisted label, defaulting unknown values to Driving.
    /// The second element is true when the default was used; callers must
    /// not present a defaulted mode as recorded fact.
    pub fn parse_lossy(s: &str) -> (Mode, bool) {
        match Mode::parse(s) {
            Some(mode) => (mode, false),
            None => {
                warn!(label = s, "unresolved travel mode, defaulting to Driving");
                (Mode::Driving, true)
            }
        }
    }
}

/// Transit vehicle categories reported by the mapping provider. Kept for
/// display and for the rail fare rule; order of first appearance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitVehicleKind {
    Bus,
    Train,
    Subway,
    Tram,
    Trolley,
    Transit,
}

impl TransitVehicleKind {
    /// Intercity rail is priced per km; metro, tram, trolleybus and bus
    /// ride on the duration tickets.
    pub fn is_rail(self) -> bool {
        matches!(self, TransitVehicleKind::Train)
    }

    pub fn label(self) -> &'static str {
        match self {
            TransitVehicleKind::Bus => "Bus",
            TransitVehicleKind::Train => "Train",
            TransitVehicleKind::Subway => "Subway",
            TransitVehicleKind::Tram => "Tram",
            TransitVehicleKind::Trolley => "Trolley",
            TransitVehicleKind::Transit => "Transit",
        }
    }
}

/// One externally computed route for one travel mode. Immutable after
/// creation; the engine never issues routing requests itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_km: f64,
    pub duration_seconds: u64,
    #[serde(default)]
    pub transit_kinds: Vec<TransitVehicleKind>,
}

impl RouteLeg {
    /// Dedups vehicle kinds, keeping first appearance.
    pub fn new(distance_km: f64, duration_seconds: u64, kinds: Vec<TransitVehicleKind>) -> Self {
        let mut transit_kinds = Vec::new();
        for kind in kinds {
            if !transit_kinds.contains(&kind) {
                transit_kinds.push(kind);
            }
        }
        Self {
            distance_km,
            duration_seconds,
            transit_kinds,
        }
    }

    pub fn duration_minutes(&self) -> u64 {
        self.duration_seconds / 60
    }
}
