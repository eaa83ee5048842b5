//! Collection orchestrator.
//!
//! One call to [`EcobeeCollector::collect`] is one scrape: fetch thermostats,
//! always emit the fetch time, map thermostats, then fetch and map the
//! equipment summary. A failed fetch truncates the scrape; samples already
//! emitted are kept. Nothing is retried.

use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

use crate::collectors::{map_summary, map_thermostat};
use crate::descriptors::{Descriptors, MetricDescriptor};
use crate::ecobee::{EcobeeApi, Selection};
use crate::sample::{Sample, SampleSink};

/// Result of one remote fetch within a scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fetch succeeded and returned this many entries.
    Fetched(usize),
    Failed(String),
    /// Not attempted because an earlier step failed.
    Skipped,
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened during one scrape. Does not affect the emitted samples.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub fetch_time: Duration,
    pub thermostats: FetchOutcome,
    pub summary: FetchOutcome,
    /// Capability values skipped because they could not be interpreted.
    pub data_errors: usize,
}

/// Collects ecobee metrics on demand.
pub struct EcobeeCollector<C> {
    client: C,
    descriptors: Descriptors,
}

impl<C: EcobeeApi> EcobeeCollector<C> {
    /// Creates a collector with all metric names under `prefix`.
    ///
    /// Prometheus metric names must be unique; two collectors with the same
    /// prefix cannot share one registry.
    pub fn new(client: C, prefix: &str) -> prometheus::Result<Self> {
        Ok(Self {
            client,
            descriptors: Descriptors::new(prefix)?,
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    /// Lists every metric descriptor, without fetching anything.
    pub fn describe(&self) -> Vec<&MetricDescriptor> {
        self.descriptors.describe()
    }

    /// Runs one scrape, emitting samples into `sink`.
    #[instrument(skip_all)]
    pub async fn collect<'a, S: SampleSink<'a>>(&'a self, sink: &mut S) -> ScrapeReport {
        let d = &self.descriptors;

        let start = Instant::now();
        let result = self
            .client
            .thermostats(&Selection::registered_devices())
            .await;
        let fetch_time = start.elapsed();
        sink.emit(Sample::new(&d.fetch_time, fetch_time.as_secs_f64(), vec![]));

        let mut report = ScrapeReport {
            fetch_time,
            thermostats: FetchOutcome::Skipped,
            summary: FetchOutcome::Skipped,
            data_errors: 0,
        };

        let thermostats = match result {
            Ok(thermostats) => thermostats,
            Err(e) => {
                error!("Fetching thermostats failed: {}", e);
                report.thermostats = FetchOutcome::Failed(e.to_string());
                return report;
            }
        };
        debug!(
            "Fetched {} thermostats in {:.3}s",
            thermostats.len(),
            fetch_time.as_secs_f64()
        );
        report.thermostats = FetchOutcome::Fetched(thermostats.len());

        for t in &thermostats {
            report.data_errors += map_thermostat(d, t, sink);
        }

        let summaries = match self
            .client
            .thermostat_summary(&Selection::registered_summary())
            .await
        {
            Ok(summaries) => summaries,
            Err(e) => {
                error!("Fetching thermostat summary failed: {}", e);
                report.summary = FetchOutcome::Failed(e.to_string());
                return report;
            }
        };
        report.summary = FetchOutcome::Fetched(summaries.len());

        for s in &summaries {
            map_summary(d, s, sink);
        }

        report
    }

    /// Runs one scrape and returns the samples.
    pub async fn collect_samples(&self) -> (Vec<Sample<'_>>, ScrapeReport) {
        let mut samples = Vec::new();
        let report = self.collect(&mut samples).await;
        (samples, report)
    }
}
