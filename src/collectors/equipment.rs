//! Equipment-summary mapper.
//!
//! Emits a 0/1 running state for a fixed allow-list of equipment on every
//! connected thermostat. Other equipment reported by the API is ignored.

use crate::descriptors::Descriptors;
use crate::ecobee::{Equipment, ThermostatSummary};
use crate::sample::{bool_value, Sample, SampleSink};

/// Equipment exported as `hvac_in_operation`, in emission order.
pub const TRACKED_EQUIPMENT: [Equipment; 3] =
    [Equipment::CompCool1, Equipment::AuxHeat1, Equipment::Fan];

/// Emits the running state of each tracked equipment for one summary entry.
pub fn map_summary<'a, S: SampleSink<'a>>(
    d: &'a Descriptors,
    summary: &ThermostatSummary,
    sink: &mut S,
) {
    if !summary.connected {
        return;
    }

    for equipment in TRACKED_EQUIPMENT {
        sink.emit(Sample::new(
            &d.hvac_in_operation,
            bool_value(summary.is_running(equipment)),
            vec![
                summary.identifier.clone(),
                summary.name.clone(),
                equipment.label().to_string(),
            ],
        ));
    }
}
