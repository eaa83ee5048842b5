//! Device-state mapper.
//!
//! Turns one thermostat snapshot into runtime, hold and sensor samples.
//! Nothing is emitted for a thermostat whose runtime reports it as
//! disconnected.

use std::num::ParseFloatError;
use tracing::{error, info};

use crate::descriptors::Descriptors;
use crate::ecobee::{RemoteSensor, SensorCapability, Thermostat};
use crate::sample::{bool_value, Sample, SampleSink};

/// hvacMode values that gate hold temperatures.
const HVAC_MODE_OFF: &str = "off";
const HVAC_MODE_HEAT: &str = "heat";
const HVAC_MODE_COOL: &str = "cool";

/// Ecobee reports temperatures in tenths of a degree.
fn tenths(raw: i64) -> f64 {
    raw as f64 / 10.0
}

/// A sensor capability classified by its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability<'v> {
    Temperature(&'v str),
    Humidity(&'v str),
    Occupancy(&'v str),
    /// Any capability kind the exporter does not track.
    Other(&'v str),
}

impl<'v> From<&'v SensorCapability> for Capability<'v> {
    fn from(c: &'v SensorCapability) -> Self {
        match c.capability_type.as_str() {
            "temperature" => Self::Temperature(&c.value),
            "humidity" => Self::Humidity(&c.value),
            "occupancy" => Self::Occupancy(&c.value),
            other => Self::Other(other),
        }
    }
}

/// A capability value ready to be emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Degrees, already scaled from tenths.
    Temperature(f64),
    /// Percent.
    Humidity(f64),
    Occupancy(bool),
}

/// A capability whose value could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("invalid {kind} value {value:?}: {source}")]
    InvalidNumber {
        kind: &'static str,
        value: String,
        source: ParseFloatError,
    },

    #[error("unknown sensor occupancy value {0:?}")]
    UnknownOccupancy(String),
}

fn parse_number(kind: &'static str, value: &str) -> Result<f64, CapabilityError> {
    value
        .parse::<f64>()
        .map_err(|source| CapabilityError::InvalidNumber {
            kind,
            value: value.to_string(),
            source,
        })
}

impl Capability<'_> {
    /// Interprets the capability value. `Ok(None)` means the kind is not tracked.
    pub fn reading(self) -> Result<Option<Reading>, CapabilityError> {
        let reading = match self {
            Self::Temperature(v) => Reading::Temperature(parse_number("temperature", v)? / 10.0),
            Self::Humidity(v) => Reading::Humidity(parse_number("humidity", v)?),
            Self::Occupancy("true") => Reading::Occupancy(true),
            Self::Occupancy("false") => Reading::Occupancy(false),
            Self::Occupancy(v) => return Err(CapabilityError::UnknownOccupancy(v.to_string())),
            Self::Other(_) => return Ok(None),
        };
        Ok(Some(reading))
    }
}

/// Emits every sample for one thermostat. Returns the number of capability
/// values skipped because they could not be interpreted.
pub fn map_thermostat<'a, S: SampleSink<'a>>(
    d: &'a Descriptors,
    t: &Thermostat,
    sink: &mut S,
) -> usize {
    if !t.runtime.connected {
        return 0;
    }

    let labels = || vec![t.identifier.clone(), t.name.clone()];
    let with = |extra: &str| vec![t.identifier.clone(), t.name.clone(), extra.to_string()];

    sink.emit(Sample::new(
        &d.actual_temperature,
        tenths(t.runtime.actual_temperature),
        labels(),
    ));
    sink.emit(Sample::new(
        &d.target_temperature_max,
        tenths(t.runtime.desired_cool),
        labels(),
    ));
    sink.emit(Sample::new(
        &d.target_temperature_min,
        tenths(t.runtime.desired_heat),
        labels(),
    ));

    let mode = t.settings.hvac_mode.as_str();
    // The mode is carried in the label; the value is always 0.
    sink.emit(Sample::new(&d.current_hvac_mode, 0.0, with(mode)));

    if mode != HVAC_MODE_OFF {
        // One sample per qualifying event; overlapping holds are not merged.
        for event in t.events.iter().filter(|e| e.is_running_hold()) {
            if !event.is_cool_off && mode != HVAC_MODE_HEAT {
                sink.emit(Sample::new(
                    &d.hold_temperature,
                    tenths(event.cool_hold_temp),
                    with("cool"),
                ));
            }
            if !event.is_heat_off && mode != HVAC_MODE_COOL {
                sink.emit(Sample::new(
                    &d.hold_temperature,
                    tenths(event.heat_hold_temp),
                    with("heat"),
                ));
            }
        }
    }

    t.remote_sensors
        .iter()
        .map(|s| map_sensor(d, t, s, sink))
        .sum()
}

fn map_sensor<'a, S: SampleSink<'a>>(
    d: &'a Descriptors,
    t: &Thermostat,
    s: &RemoteSensor,
    sink: &mut S,
) -> usize {
    let labels = || {
        vec![
            t.identifier.clone(),
            t.name.clone(),
            s.id.clone(),
            s.name.clone(),
            s.sensor_type.clone(),
        ]
    };

    sink.emit(Sample::new(&d.in_use, bool_value(s.in_use), labels()));

    let mut skipped = 0;
    for capability in &s.capability {
        let capability = Capability::from(capability);
        match capability.reading() {
            Ok(Some(Reading::Temperature(v))) => {
                sink.emit(Sample::new(&d.temperature, v, labels()));
            }
            Ok(Some(Reading::Humidity(v))) => {
                sink.emit(Sample::new(&d.humidity, v, labels()));
            }
            Ok(Some(Reading::Occupancy(occupied))) => {
                sink.emit(Sample::new(&d.occupancy, bool_value(occupied), labels()));
            }
            Ok(None) => {
                if let Capability::Other(kind) = capability {
                    info!("ignoring sensor capability {:?}", kind);
                }
            }
            Err(e) => {
                error!(
                    thermostat_id = %t.identifier,
                    sensor_id = %s.id,
                    "{}", e
                );
                skipped += 1;
            }
        }
    }
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecobee::{Event, Runtime, Settings};

    fn thermostat(mode: &str, events: Vec<Event>) -> Thermostat {
        Thermostat {
            identifier: "T1".into(),
            name: "Main".into(),
            runtime: Runtime {
                connected: true,
                actual_temperature: 705,
                desired_cool: 720,
                desired_heat: 680,
            },
            settings: Settings {
                hvac_mode: mode.into(),
            },
            events,
            remote_sensors: vec![],
        }
    }

    fn hold(cool: i64, heat: i64) -> Event {
        Event {
            event_type: "hold".into(),
            running: true,
            cool_hold_temp: cool,
            heat_hold_temp: heat,
            is_cool_off: false,
            is_heat_off: false,
        }
    }

    fn capability(kind: &str, value: &str) -> SensorCapability {
        SensorCapability {
            id: "1".into(),
            capability_type: kind.into(),
            value: value.into(),
        }
    }

    fn holds<'a>(samples: &'a [Sample<'a>]) -> Vec<(&'a str, f64)> {
        samples
            .iter()
            .filter(|s| s.name() == "ecobee_hold_temperature")
            .map(|s| (s.labels[2].as_str(), s.value))
            .collect()
    }

    #[test]
    fn test_capability_dispatch() {
        let c = capability("temperature", "712");
        assert_eq!(
            Capability::from(&c).reading().unwrap(),
            Some(Reading::Temperature(71.2))
        );

        let c = capability("humidity", "41");
        assert_eq!(
            Capability::from(&c).reading().unwrap(),
            Some(Reading::Humidity(41.0))
        );

        let c = capability("occupancy", "true");
        assert_eq!(
            Capability::from(&c).reading().unwrap(),
            Some(Reading::Occupancy(true))
        );

        let c = capability("airQuality", "12");
        assert_eq!(Capability::from(&c), Capability::Other("airQuality"));
        assert_eq!(Capability::from(&c).reading().unwrap(), None);
    }

    #[test]
    fn test_capability_errors() {
        let c = capability("humidity", "abc");
        assert!(matches!(
            Capability::from(&c).reading(),
            Err(CapabilityError::InvalidNumber { kind: "humidity", .. })
        ));

        let c = capability("occupancy", "TRUE");
        assert!(matches!(
            Capability::from(&c).reading(),
            Err(CapabilityError::UnknownOccupancy(_))
        ));
    }

    #[test]
    fn test_runtime_values_scaled() {
        let d = Descriptors::new("ecobee").unwrap();
        let mut samples = Vec::new();
        map_thermostat(&d, &thermostat("auto", vec![]), &mut samples);

        let value = |name: &str| samples.iter().find(|s| s.name() == name).unwrap().value;
        assert_eq!(value("ecobee_actual_temperature"), 70.5);
        assert_eq!(value("ecobee_target_temperature_max"), 72.0);
        assert_eq!(value("ecobee_target_temperature_min"), 68.0);
        assert_eq!(value("ecobee_current_hvac_mode"), 0.0);
        assert_eq!(samples.len(), 4);
    }

    #[test]
    fn test_hold_gating_by_mode() {
        let d = Descriptors::new("ecobee").unwrap();

        for (mode, expected) in [
            ("auto", vec![("cool", 73.0), ("heat", 69.0)]),
            ("heat", vec![("heat", 69.0)]),
            ("cool", vec![("cool", 73.0)]),
            ("auxHeatOnly", vec![("cool", 73.0), ("heat", 69.0)]),
            ("off", vec![]),
        ] {
            let mut samples = Vec::new();
            map_thermostat(&d, &thermostat(mode, vec![hold(730, 690)]), &mut samples);
            assert_eq!(holds(&samples), expected, "mode {}", mode);
        }
    }

    #[test]
    fn test_hold_flags_and_event_filter() {
        let d = Descriptors::new("ecobee").unwrap();

        let mut cool_off = hold(730, 690);
        cool_off.is_cool_off = true;
        let mut not_running = hold(700, 650);
        not_running.running = false;
        let mut vacation = hold(700, 650);
        vacation.event_type = "vacation".into();

        let t = thermostat("auto", vec![cool_off, not_running, vacation]);
        let mut samples = Vec::new();
        map_thermostat(&d, &t, &mut samples);
        assert_eq!(holds(&samples), vec![("heat", 69.0)]);
    }

    #[test]
    fn test_overlapping_holds_each_emitted() {
        let d = Descriptors::new("ecobee").unwrap();
        let t = thermostat("cool", vec![hold(730, 690), hold(740, 690)]);
        let mut samples = Vec::new();
        map_thermostat(&d, &t, &mut samples);
        assert_eq!(holds(&samples), vec![("cool", 73.0), ("cool", 74.0)]);
    }

    #[test]
    fn test_disconnected_emits_nothing() {
        let d = Descriptors::new("ecobee").unwrap();
        let mut t = thermostat("auto", vec![hold(730, 690)]);
        t.runtime.connected = false;
        t.remote_sensors.push(RemoteSensor {
            id: "rs:1".into(),
            in_use: true,
            ..Default::default()
        });

        let mut samples = Vec::new();
        assert_eq!(map_thermostat(&d, &t, &mut samples), 0);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_sensor_samples_and_skips() {
        let d = Descriptors::new("ecobee").unwrap();
        let mut t = thermostat("off", vec![]);
        t.remote_sensors.push(RemoteSensor {
            id: "rs:100".into(),
            name: "Bedroom".into(),
            sensor_type: "ecobee3_remote_sensor".into(),
            in_use: false,
            capability: vec![
                capability("temperature", "712"),
                capability("humidity", "abc"),
                capability("occupancy", "maybe"),
                capability("occupancy", "true"),
                capability("unknown", "x"),
            ],
        });

        let mut samples = Vec::new();
        let skipped = map_thermostat(&d, &t, &mut samples);
        assert_eq!(skipped, 2);

        let sensor: Vec<_> = samples.iter().skip(4).collect();
        assert_eq!(sensor.len(), 3);
        assert_eq!(sensor[0].name(), "ecobee_in_use");
        assert_eq!(sensor[0].value, 0.0);
        assert_eq!(
            sensor[0].labels,
            vec!["T1", "Main", "rs:100", "Bedroom", "ecobee3_remote_sensor"]
        );
        assert_eq!(sensor[1].name(), "ecobee_temperature");
        assert_eq!(sensor[1].value, 71.2);
        assert_eq!(sensor[2].name(), "ecobee_occupancy");
        assert_eq!(sensor[2].value, 1.0);
    }
}
