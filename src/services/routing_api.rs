//! Trait and types for the external mapping provider.

use anyhow::Result;
use fleet_planner::route::{Mode, RouteLeg};

/// A geographic point, WGS84 `(latitude, longitude)`.
pub type Point = (f64, f64);

/// Abstraction over a routing backend.
///
/// The engine itself never issues routing requests; one externally
/// computed leg per requested mode enters through this seam.
#[async_trait::async_trait]
pub trait RoutingApi {
    /// Returns the computed leg, or `None` when the backend does not serve
    /// the mode (OSRM has no transit graph).
    async fn route(&self, from: Point, to: Point, mode: Mode) -> Result<Option<RouteLeg>>;
}
