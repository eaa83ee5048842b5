//! Application state management for the exporter.
//!
//! This module defines the shared application state that is passed
//! to HTTP handlers.

use ecobee_exporter::ecobee::EcobeeClient;
use ecobee_exporter::{EcobeeCollector, HealthStats};
use prometheus::{Gauge, IntCounter, Registry};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{resolve_access_token, Config, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Type alias for shared application state.
pub type SharedState = Arc<AppState>;

/// Global application state shared across requests.
pub struct AppState {
    /// Descriptors are built once here and reused by every scrape.
    pub collector: EcobeeCollector<EcobeeClient>,
    /// Exporter self-telemetry, appended to every /metrics response.
    pub telemetry: Registry,
    pub scrape_duration: Gauge,
    pub scrapes_total: IntCounter,
    pub config: Arc<Config>,
    pub health_stats: Arc<HealthStats>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        collector: EcobeeCollector<EcobeeClient>,
        config: Config,
    ) -> Result<Self, prometheus::Error> {
        let prefix = config.metric_prefix().to_string();
        let telemetry = Registry::new();

        let scrape_duration = Gauge::new(
            format!("{}_exporter_scrape_duration_seconds", prefix),
            "Time spent serving the last /metrics request, including API fetches",
        )?;
        let scrapes_total = IntCounter::new(
            format!("{}_exporter_scrapes_total", prefix),
            "Number of /metrics requests served",
        )?;
        telemetry.register(Box::new(scrape_duration.clone()))?;
        telemetry.register(Box::new(scrapes_total.clone()))?;

        Ok(Self {
            collector,
            telemetry,
            scrape_duration,
            scrapes_total,
            config: Arc::new(config),
            health_stats: Arc::new(HealthStats::new()),
            start_time: Instant::now(),
        })
    }
}

/// Builds the ecobee client and collector from the effective configuration.
pub fn build_collector(
    config: &Config,
) -> Result<EcobeeCollector<EcobeeClient>, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(
        config
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    );
    let client = EcobeeClient::new(config.api_base_url(), resolve_access_token(config)?, timeout)?;
    Ok(EcobeeCollector::new(client, config.metric_prefix())?)
}
