//! Prometheus text exposition of scrape samples.
//!
//! Each scrape builds a fresh registry of gauge vectors from the descriptors
//! that produced samples. Two samples with the same label values in one
//! scrape resolve to the last one written.

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::sample::Sample;

/// Gathers samples into metric families.
pub fn gather(samples: &[Sample<'_>]) -> prometheus::Result<Vec<MetricFamily>> {
    let registry = Registry::new();
    let mut gauges: HashMap<&str, GaugeVec> = HashMap::new();

    for sample in samples {
        let gauge = match gauges.entry(sample.name()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let d = sample.descriptor;
                let label_names: Vec<&str> = d.label_names().iter().map(String::as_str).collect();
                let vec = GaugeVec::new(Opts::new(d.name(), d.help()), &label_names)?;
                registry.register(Box::new(vec.clone()))?;
                e.insert(vec)
            }
        };

        let values: Vec<&str> = sample.labels.iter().map(String::as_str).collect();
        gauge.get_metric_with_label_values(&values)?.set(sample.value);
    }

    Ok(registry.gather())
}

/// Renders samples, followed by everything in `telemetry`, as Prometheus text.
pub fn render(samples: &[Sample<'_>], telemetry: &Registry) -> prometheus::Result<String> {
    let mut families = gather(samples)?;
    families.extend(telemetry.gather());

    let mut buffer = Vec::with_capacity(16 * 1024);
    TextEncoder::new().encode(&families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
