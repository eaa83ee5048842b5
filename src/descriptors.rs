//! Metric descriptor registry.
//!
//! All metric identities are built once, when the collector is created, and
//! shared read-only by every scrape. Names are `<prefix>_<metric>`; the
//! prefix must be unique within one Prometheus registry.

use prometheus::core::Desc;
use std::collections::HashMap;

/// Labels identifying a thermostat.
pub const THERMOSTAT_LABELS: &[&str] = &["thermostat_id", "thermostat_name"];

/// Labels identifying a remote sensor on a thermostat.
pub const SENSOR_LABELS: &[&str] = &[
    "thermostat_id",
    "thermostat_name",
    "sensor_id",
    "sensor_name",
    "sensor_type",
];

/// Immutable identity of one metric: name, help text and label names.
#[derive(Debug)]
pub struct MetricDescriptor {
    desc: Desc,
}

impl MetricDescriptor {
    fn new(prefix: &str, name: &str, help: &str, labels: &[&str]) -> prometheus::Result<Self> {
        let desc = Desc::new(
            format!("{}_{}", prefix, name),
            help.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
            HashMap::new(),
        )?;
        Ok(Self { desc })
    }

    pub fn name(&self) -> &str {
        &self.desc.fq_name
    }

    pub fn help(&self) -> &str {
        &self.desc.help
    }

    pub fn label_names(&self) -> &[String] {
        &self.desc.variable_labels
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }
}

impl PartialEq for MetricDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.desc.fq_name == other.desc.fq_name
    }
}

/// Appends one metric-specific label to a shared schema.
fn with_label(base: &[&'static str], extra: &'static str) -> Vec<&'static str> {
    let mut labels = base.to_vec();
    labels.push(extra);
    labels
}

/// The fixed set of descriptors exported by the collector.
#[derive(Debug)]
pub struct Descriptors {
    // ========== Collector Metrics ==========
    pub fetch_time: MetricDescriptor,

    // ========== Thermostat Runtime Metrics ==========
    pub actual_temperature: MetricDescriptor,
    pub target_temperature_min: MetricDescriptor,
    pub target_temperature_max: MetricDescriptor,
    pub current_hvac_mode: MetricDescriptor, // + current_hvac_mode
    pub hold_temperature: MetricDescriptor,  // + type
    pub hvac_in_operation: MetricDescriptor, // + equipment

    // ========== Sensor Metrics ==========
    pub temperature: MetricDescriptor,
    pub humidity: MetricDescriptor,
    pub occupancy: MetricDescriptor,
    pub in_use: MetricDescriptor,
}

impl Descriptors {
    /// Builds every descriptor under `prefix`. Fails if the prefix produces
    /// an invalid metric name.
    pub fn new(prefix: &str) -> prometheus::Result<Self> {
        let d = |name: &str, help: &str, labels: &[&str]| {
            MetricDescriptor::new(prefix, name, help, labels)
        };

        Ok(Self {
            fetch_time: d(
                "fetch_time",
                "Elapsed time fetching data via Ecobee API",
                &[],
            )?,

            actual_temperature: d(
                "actual_temperature",
                "Thermostat-averaged current temperature",
                THERMOSTAT_LABELS,
            )?,
            target_temperature_min: d(
                "target_temperature_min",
                "Minimum temperature for thermostat to maintain",
                THERMOSTAT_LABELS,
            )?,
            target_temperature_max: d(
                "target_temperature_max",
                "Maximum temperature for thermostat to maintain",
                THERMOSTAT_LABELS,
            )?,
            current_hvac_mode: d(
                "current_hvac_mode",
                "Current HVAC mode of thermostat",
                &with_label(THERMOSTAT_LABELS, "current_hvac_mode"),
            )?,
            hold_temperature: d(
                "hold_temperature",
                "Temperature to hold by thermostat",
                &with_label(THERMOSTAT_LABELS, "type"),
            )?,
            hvac_in_operation: d(
                "hvac_in_operation",
                "HVAC equipment running status (0 or 1)",
                &with_label(THERMOSTAT_LABELS, "equipment"),
            )?,

            temperature: d(
                "temperature",
                "Temperature reported by a sensor in degrees",
                SENSOR_LABELS,
            )?,
            humidity: d(
                "humidity",
                "Humidity reported by a sensor in percent",
                SENSOR_LABELS,
            )?,
            occupancy: d(
                "occupancy",
                "Occupancy reported by a sensor (0 or 1)",
                SENSOR_LABELS,
            )?,
            in_use: d(
                "in_use",
                "Is sensor being used in thermostat calculations (0 or 1)",
                SENSOR_LABELS,
            )?,
        })
    }

    /// Lists every descriptor, independent of any fetched data.
    pub fn describe(&self) -> Vec<&MetricDescriptor> {
        vec![
            &self.fetch_time,
            &self.actual_temperature,
            &self.target_temperature_max,
            &self.target_temperature_min,
            &self.temperature,
            &self.humidity,
            &self.occupancy,
            &self.in_use,
            &self.current_hvac_mode,
            &self.hold_temperature,
            &self.hvac_in_operation,
        ]
    }
}
