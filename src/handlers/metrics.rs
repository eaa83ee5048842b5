//! Metrics endpoint handler for Prometheus scraping.
//!
//! Every request is one scrape: the ecobee API is queried, the samples are
//! rendered in Prometheus text format, and the exporter's own telemetry is
//! appended.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use ecobee_exporter::exposition;
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::state::SharedState;

/// Error type for metrics endpoint failures.
#[derive(Debug)]
pub enum MetricsError {
    EncodingFailed,
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to encode metrics",
        )
            .into_response()
    }
}

/// Handler for the /metrics endpoint.
#[instrument(skip(state))]
pub async fn metrics_handler(State(state): State<SharedState>) -> Result<String, MetricsError> {
    let start = Instant::now();
    debug!("Processing /metrics request");
    state.scrapes_total.inc();

    let (samples, report) = state.collector.collect_samples().await;

    let duration = start.elapsed().as_secs_f64();
    state.scrape_duration.set(duration);
    state
        .health_stats
        .record_scrape(&report, samples.len(), duration);

    debug!(
        "Scrape produced {} samples in {:.3}s (thermostats: {:?}, summary: {:?})",
        samples.len(),
        duration,
        report.thermostats,
        report.summary
    );

    exposition::render(&samples, &state.telemetry).map_err(|e| {
        error!("Failed to encode metrics: {}", e);
        MetricsError::EncodingFailed
    })
}
