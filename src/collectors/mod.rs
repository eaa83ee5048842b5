//! Mappers from ecobee API data to samples.
//!
//! - `thermostat`: runtime, hold temperature and remote sensor samples
//! - `equipment`: HVAC equipment running state from the thermostat summary

pub mod equipment;
pub mod thermostat;

pub use equipment::{map_summary, TRACKED_EQUIPMENT};
pub use thermostat::{map_thermostat, Capability, CapabilityError, Reading};
