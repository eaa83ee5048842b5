//! Samples emitted during one scrape and the sink that receives them.

use crate::descriptors::MetricDescriptor;

/// One value emitted against a descriptor. Lives only for the scrape that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<'a> {
    pub descriptor: &'a MetricDescriptor,
    pub value: f64,
    pub labels: Vec<String>,
}

impl<'a> Sample<'a> {
    /// Builds a sample. Label arity must match the descriptor's label names.
    pub fn new(descriptor: &'a MetricDescriptor, value: f64, labels: Vec<String>) -> Self {
        debug_assert_eq!(
            descriptor.label_names().len(),
            labels.len(),
            "label arity mismatch for {}",
            descriptor.name()
        );
        Self {
            descriptor,
            value,
            labels,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }
}

/// Receives samples as they are produced.
pub trait SampleSink<'a> {
    fn emit(&mut self, sample: Sample<'a>);
}

impl<'a> SampleSink<'a> for Vec<Sample<'a>> {
    fn emit(&mut self, sample: Sample<'a>) {
        self.push(sample);
    }
}

/// Converts a boolean into a 0/1 gauge value.
pub fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
