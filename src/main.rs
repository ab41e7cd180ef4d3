//! CLI entry point for the fleet trip planner and reporting tool.
//!
//! Provides subcommands for planning a multi-modal trip, confirming it
//! into the append-only trip log, aggregating fleet metrics, and listing
//! filter values and catalog vehicles.

mod infra;
mod services;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::infra::osrm::OsrmClient;
use crate::services::routing_api::{Point, RoutingApi};
use fleet_planner::analyzers::aggregate::aggregate_at;
use fleet_planner::analyzers::filters::{available_filter_values, normalize_criteria};
use fleet_planner::analyzers::types::{FilterCriteria, Period};
use fleet_planner::catalog::{find_vehicle, load_catalog};
use fleet_planner::fetch::{ApiKey, BasicClient, UrlParam};
use fleet_planner::options::synthesize_options;
use fleet_planner::route::{Mode, RouteLeg};
use fleet_planner::store::{confirm_trip, load_trips, print_json};
use fleet_planner::tables::{EmissionFactorTable, FuelPriceTable};
use fleet_planner::trips::TripContext;

#[derive(Parser)]
#[command(name = "fleet_planner")]
#[command(about = "Corporate fleet trip planner and reporting tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a trip: compare driving, transit, and walking options
    Plan {
        /// Vehicle to plan with, as "brand model"
        #[arg(short, long)]
        vehicle: String,

        /// JSON file with precomputed route legs keyed by mode
        #[arg(short, long)]
        legs: Option<String>,

        /// Origin "lat,lon" for router-computed legs
        #[arg(long)]
        from: Option<String>,

        /// Destination "lat,lon" for router-computed legs
        #[arg(long)]
        to: Option<String>,

        /// Vehicle catalog CSV
        #[arg(long, default_value = "data/vehicles.csv")]
        catalog: String,

        /// Confirm the option for this mode and append it to the trip log
        #[arg(short, long)]
        confirm: Option<String>,

        /// Trip log CSV to append confirmed trips to
        #[arg(long, default_value = "trips.csv")]
        log: String,

        #[arg(long, default_value = "")]
        driver: String,

        #[arg(long, default_value = "")]
        department: String,

        #[arg(long, default_value = "")]
        origin: String,

        #[arg(long, default_value = "")]
        destination: String,

        /// Scheduled departure; defaults to now
        #[arg(long)]
        scheduled_at: Option<String>,

        /// Routing backend base URL
        #[arg(long, default_value = "https://router.project-osrm.org")]
        router_url: String,

        /// Send ROUTER_API_KEY as this HTTP header
        #[arg(long)]
        api_key_header: Option<String>,

        /// Send ROUTER_API_KEY as this URL query parameter
        #[arg(long)]
        api_key_param: Option<String>,
    },
    /// Aggregate the trip log into fleet metrics
    Report {
        /// Trip log CSV
        #[arg(long, default_value = "trips.csv")]
        log: String,

        /// today | week | month | year
        #[arg(short, long, default_value = "month")]
        period: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        driver: Option<String>,

        #[arg(long)]
        vehicle_model: Option<String>,

        /// Print raw JSON instead of the logged summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show filter values available for a partial selection
    Filters {
        #[arg(long, default_value = "trips.csv")]
        log: String,

        /// today | week | month | year
        #[arg(short, long, default_value = "month")]
        period: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        driver: Option<String>,
    },
    /// List the vehicle catalog
    Vehicles {
        #[arg(long, default_value = "data/vehicles.csv")]
        catalog: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fleet_planner.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fleet_planner.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            vehicle,
            legs,
            from,
            to,
            catalog,
            confirm,
            log,
            driver,
            department,
            origin,
            destination,
            scheduled_at,
            router_url,
            api_key_header,
            api_key_param,
        } => {
            let ctx = TripContext {
                driver_id: driver,
                department,
                origin,
                destination,
                scheduled_at: scheduled_at
                    .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            };
            plan(
                &vehicle,
                legs.as_deref(),
                from.as_deref(),
                to.as_deref(),
                &catalog,
                confirm.as_deref(),
                &log,
                ctx,
                router_url,
                api_key_header,
                api_key_param,
            )
            .await?;
        }
        Commands::Report {
            log,
            period,
            department,
            driver,
            vehicle_model,
            json,
        } => {
            report(&log, &period, department, driver, vehicle_model, json)?;
        }
        Commands::Filters {
            log,
            period,
            department,
            driver,
        } => {
            let period = Period::parse(&period)
                .with_context(|| format!("unknown period {period:?}"))?;
            let trips = load_trips(&log)?;
            let criteria = FilterCriteria {
                period,
                department,
                driver_id: driver,
                vehicle_model: None,
            };

            let values = available_filter_values(&trips, &criteria, Utc::now());
            print_json(&values)?;
        }
        Commands::Vehicles { catalog } => {
            let catalog = load_catalog(&catalog)?;
            let mut profiles: Vec<_> = catalog.values().collect();
            profiles.sort_by_key(|p| p.key());

            for profile in &profiles {
                info!(
                    brand = %profile.brand,
                    model = %profile.model,
                    fuel = profile.fuel_type.label(),
                    segment = profile.market_segment.label(),
                    efficiency = %profile.efficiency,
                    "vehicle"
                );
            }
            info!(total = profiles.len(), "catalog loaded");
        }
    }

    Ok(())
}

/// Plans a multi-modal trip and optionally confirms one option into the
/// trip log.
#[allow(clippy::too_many_arguments)]
async fn plan(
    vehicle_name: &str,
    legs_file: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    catalog_path: &str,
    confirm_mode: Option<&str>,
    log_path: &str,
    ctx: TripContext,
    router_url: String,
    api_key_header: Option<String>,
    api_key_param: Option<String>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let vehicle = find_vehicle(&catalog, vehicle_name)
        .with_context(|| format!("vehicle {vehicle_name:?} not in catalog"))?
        .clone();

    let mut legs: Vec<(Mode, RouteLeg)> = match legs_file {
        Some(path) => legs_from_file(path)?,
        None => Vec::new(),
    };

    // Fetch legs for modes the file did not provide
    if let (Some(from), Some(to)) = (from, to) {
        let from = parse_point(from)?;
        let to = parse_point(to)?;
        let router = build_router(router_url, api_key_header, api_key_param);

        for mode in [Mode::Driving, Mode::Transit, Mode::Walking] {
            if legs.iter().any(|(m, _)| *m == mode) {
                continue;
            }
            match router.route(from, to, mode).await? {
                Some(leg) => {
                    debug!(mode = mode.label(), distance_km = leg.distance_km, "leg fetched");
                    legs.push((mode, leg));
                }
                None => debug!(mode = mode.label(), "router does not serve mode"),
            }
        }
    }

    if legs.is_empty() {
        bail!("no route legs: pass --legs and/or --from/--to");
    }
    legs.sort_by_key(|(mode, _)| match mode {
        Mode::Driving => 0,
        Mode::Transit => 1,
        Mode::Walking => 2,
    });

    let prices = FuelPriceTable::czk_defaults();
    let factors = EmissionFactorTable::defaults();
    let options = synthesize_options(&legs, &vehicle, &prices, &factors);
    print_json(&options)?;

    if let Some(confirm_mode) = confirm_mode {
        let mode = Mode::parse(confirm_mode)
            .with_context(|| format!("unknown mode {confirm_mode:?}"))?;
        let (_, leg) = legs
            .iter()
            .find(|(m, _)| *m == mode)
            .context("no leg for the confirmed mode")?;
        let option = options
            .iter()
            .find(|o| o.mode == mode)
            .context("no option for the confirmed mode")?;

        let record = confirm_trip(log_path, option, leg, &vehicle, &ctx)?;
        info!(recorded_at = %record.recorded_at, mode = %record.mode, "trip confirmed");
    }

    Ok(())
}

fn report(
    log_path: &str,
    period: &str,
    department: Option<String>,
    driver: Option<String>,
    vehicle_model: Option<String>,
    json: bool,
) -> Result<()> {
    let period = Period::parse(period).with_context(|| format!("unknown period {period:?}"))?;
    let trips = load_trips(log_path)?;
    let criteria = FilterCriteria {
        period,
        department,
        driver_id: driver,
        vehicle_model,
    };

    let now = Utc::now();
    let normalized = normalize_criteria(&trips, &criteria, now);
    if normalized != criteria {
        info!("filter selection no longer valid, cleared dependent filters");
    }

    let metrics = aggregate_at(&trips, &normalized, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    info!(
        trips = metrics.trip_count,
        distance_km = metrics.total_distance_km,
        duration_seconds = metrics.total_duration_seconds,
        fuel_liters = metrics.total_fuel_liters,
        cost_czk = metrics.total_cost_czk,
        co2_kg = metrics.total_co2_kg,
        "totals"
    );
    info!(
        avg_fuel_per_100km = metrics.avg_fuel_per_100km,
        avg_co2_g_per_km = metrics.avg_co2_g_per_km,
        avg_speed_kmh = metrics.avg_speed_kmh,
        cost_per_km = metrics.cost_per_km,
        trees_to_offset = metrics.trees_to_offset,
        "derived"
    );
    info!(
        fuel_efficiency = %metrics.fuel_efficiency,
        carbon_footprint = %metrics.carbon_footprint,
        emission_level = %metrics.emission_level,
        fallback_consumption_trips = metrics.fallback_consumption_trips,
        "ratings"
    );

    Ok(())
}

/// Loads precomputed route legs from a JSON file keyed by mode label
/// (`{"transit": {"distance_km": 11.2, "duration_seconds": 1680,
/// "transit_kinds": ["Bus", "Subway"]}, ...}`).
fn legs_from_file(path: &str) -> Result<Vec<(Mode, RouteLeg)>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading legs file {path}"))?;
    let by_mode: HashMap<String, RouteLeg> = serde_json::from_str(&raw)?;

    let mut legs = Vec::new();
    for (label, leg) in by_mode {
        match Mode::parse(&label) {
            Some(mode) => legs.push((
                mode,
                RouteLeg::new(leg.distance_km, leg.duration_seconds, leg.transit_kinds),
            )),
            None => warn!(label = %label, "ignoring leg with unknown mode"),
        }
    }
    Ok(legs)
}

fn parse_point(s: &str) -> Result<Point> {
    let (lat, lon) = s
        .split_once(',')
        .with_context(|| format!("expected \"lat,lon\", got {s:?}"))?;
    Ok((lat.trim().parse()?, lon.trim().parse()?))
}

/// Builds the routing client, wrapping it in the auth decorator the
/// hosted router requires. The key comes from `ROUTER_API_KEY`.
fn build_router(
    base_url: String,
    api_key_header: Option<String>,
    api_key_param: Option<String>,
) -> Box<dyn RoutingApi> {
    let api_key = std::env::var("ROUTER_API_KEY").ok();
    match (api_key, api_key_header, api_key_param) {
        (Some(key), Some(header_name), _) => Box::new(OsrmClient::new(
            base_url,
            ApiKey {
                inner: BasicClient::new(),
                header_name,
                key,
            },
        )),
        (Some(key), None, Some(param_name)) => Box::new(OsrmClient::new(
            base_url,
            UrlParam {
                inner: BasicClient::new(),
                param_name,
                key,
            },
        )),
        (Some(key), None, None) => {
            Box::new(OsrmClient::new(base_url, ApiKey::bearer(BasicClient::new(), key)))
        }
        (None, _, _) => Box::new(OsrmClient::new(base_url, BasicClient::new())),
    }
}
