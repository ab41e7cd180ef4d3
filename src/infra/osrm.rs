//! OSRM routing client.
//!
//! Talks to an OSRM `route` service (the public demo server by default, or
//! a company-hosted instance behind an API key). Driving and walking map
//! onto OSRM profiles; transit is not served and yields `None`, so transit
//! legs reach the planner through a precomputed legs file instead.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::services::routing_api::{Point, RoutingApi};
use fleet_planner::fetch::{HttpClient, fetch_json};
use fleet_planner::route::{Mode, RouteLeg};

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// meters
    distance: f64,
    /// seconds
    duration: f64,
}

pub struct OsrmClient<C> {
    base_url: String,
    http: C,
}

impl<C: HttpClient> OsrmClient<C> {
    pub fn new(base_url: impl Into<String>, http: C) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn profile(mode: Mode) -> Option<&'static str> {
        match mode {
            Mode::Driving => Some("driving"),
            Mode::Walking => Some("foot"),
            Mode::Transit => None,
        }
    }
}

#[async_trait]
impl<C: HttpClient> RoutingApi for OsrmClient<C> {
    async fn route(&self, from: Point, to: Point, mode: Mode) -> Result<Option<RouteLeg>> {
        let Some(profile) = Self::profile(mode) else {
            return Ok(None);
        };

        // OSRM takes lon,lat pairs
        let url = format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.base_url, profile, from.1, from.0, to.1, to.0
        );

        let resp: OsrmResponse = fetch_json(&self.http, &url).await?;
        if resp.code != "Ok" {
            anyhow::bail!("router returned status {}", resp.code);
        }

        let Some(route) = resp.routes.first() else {
            return Ok(None);
        };
        Ok(Some(RouteLeg::new(
            route.distance / 1000.0,
            route.duration.round() as u64,
            Vec::new(),
        )))
    }
}
