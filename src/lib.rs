//! Ecobee Prometheus Exporter Library
//!
//! Polls the ecobee API on demand and re-expresses thermostat, remote sensor
//! and HVAC equipment state as labeled Prometheus gauges.
//!
//! # Features
//!
//! - **Fixed metric schema**: eleven descriptors, built once per collector
//! - **Scrape-time fetching**: every scrape is an independent pair of API calls
//! - **Partial results**: a failed fetch truncates the scrape instead of failing it
//! - **Pluggable API**: the collector is generic over [`ecobee::EcobeeApi`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use ecobee_exporter::ecobee::EcobeeClient;
//! use ecobee_exporter::exporter::EcobeeCollector;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EcobeeClient::new("https://api.ecobee.com", "token".into(), Duration::from_secs(30))?;
//! let collector = EcobeeCollector::new(client, "ecobee")?;
//!
//! let (samples, report) = collector.collect_samples().await;
//! for sample in &samples {
//!     println!("{} {:?} {}", sample.name(), sample.labels, sample.value);
//! }
//! println!("thermostats: {:?}", report.thermostats);
//! # Ok(())
//! # }
//! ```

pub mod collectors;
pub mod descriptors;
pub mod ecobee;
pub mod exporter;
pub mod exposition;
pub mod health_stats;
pub mod sample;

// Re-export main types for convenience
pub use descriptors::{Descriptors, MetricDescriptor};
pub use exporter::{EcobeeCollector, FetchOutcome, ScrapeReport};
pub use health_stats::HealthStats;
pub use sample::{Sample, SampleSink};
