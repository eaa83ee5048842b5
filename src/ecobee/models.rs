//! Wire models for the ecobee thermostat API.
//!
//! Only the fields read by the exporter are modelled. Everything carries
//! `#[serde(default)]` so that a selection which omits a block (for example
//! events) still decodes.

use serde::{Deserialize, Serialize};

/// Status envelope returned with every API response. Code 0 is success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiStatus {
    pub code: i64,
    pub message: String,
}

/// Response body of `GET /1/thermostat`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThermostatResponse {
    pub thermostat_list: Vec<Thermostat>,
    pub status: ApiStatus,
}

/// One thermostat with the runtime, settings, events and sensors blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thermostat {
    pub identifier: String,
    pub name: String,
    pub runtime: Runtime,
    pub settings: Settings,
    pub events: Vec<Event>,
    pub remote_sensors: Vec<RemoteSensor>,
}

/// Runtime block. Temperatures are in tenths of a degree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Runtime {
    pub connected: bool,
    pub actual_temperature: i64,
    pub desired_heat: i64,
    pub desired_cool: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// One of "auto", "auxHeatOnly", "cool", "heat", "off".
    pub hvac_mode: String,
}

/// A scheduled event such as a temperature hold or a vacation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub running: bool,
    pub cool_hold_temp: i64,
    pub heat_hold_temp: i64,
    pub is_cool_off: bool,
    pub is_heat_off: bool,
}

impl Event {
    /// True for a hold event that is currently in effect.
    pub fn is_running_hold(&self) -> bool {
        self.running && self.event_type == "hold"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteSensor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub in_use: bool,
    pub capability: Vec<SensorCapability>,
}

/// A typed sensor reading. The value is always transmitted as a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorCapability {
    pub id: String,
    #[serde(rename = "type")]
    pub capability_type: String,
    pub value: String,
}

/// Response body of `GET /1/thermostatSummary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryResponse {
    pub thermostat_count: usize,
    pub revision_list: Vec<String>,
    pub status_list: Vec<String>,
    pub status: ApiStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_thermostat_response() {
        let body = r#"{
            "page": {"page": 1, "totalPages": 1},
            "thermostatList": [{
                "identifier": "318324702718",
                "name": "Main Floor",
                "runtime": {
                    "connected": true,
                    "actualTemperature": 705,
                    "desiredHeat": 680,
                    "desiredCool": 720
                },
                "settings": {"hvacMode": "auto"},
                "events": [{
                    "type": "hold",
                    "running": true,
                    "coolHoldTemp": 730,
                    "heatHoldTemp": 690,
                    "isCoolOff": false,
                    "isHeatOff": false
                }],
                "remoteSensors": [{
                    "id": "rs:100",
                    "name": "Bedroom",
                    "type": "ecobee3_remote_sensor",
                    "inUse": true,
                    "capability": [
                        {"id": "1", "type": "temperature", "value": "712"},
                        {"id": "2", "type": "occupancy", "value": "false"}
                    ]
                }]
            }],
            "status": {"code": 0, "message": ""}
        }"#;

        let resp: ThermostatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.status.code, 0);
        assert_eq!(resp.thermostat_list.len(), 1);

        let t = &resp.thermostat_list[0];
        assert_eq!(t.identifier, "318324702718");
        assert!(t.runtime.connected);
        assert_eq!(t.runtime.actual_temperature, 705);
        assert_eq!(t.settings.hvac_mode, "auto");
        assert!(t.events[0].is_running_hold());
        assert_eq!(t.remote_sensors[0].sensor_type, "ecobee3_remote_sensor");
        assert_eq!(t.remote_sensors[0].capability[1].capability_type, "occupancy");
    }

    #[test]
    fn test_missing_blocks_default() {
        let body = r#"{"thermostatList": [{"identifier": "1", "name": "x"}]}"#;
        let resp: ThermostatResponse = serde_json::from_str(body).unwrap();
        let t = &resp.thermostat_list[0];
        assert!(!t.runtime.connected);
        assert!(t.events.is_empty());
        assert!(t.remote_sensors.is_empty());
    }

    #[test]
    fn test_vacation_event_is_not_hold() {
        let event = Event {
            event_type: "vacation".into(),
            running: true,
            ..Default::default()
        };
        assert!(!event.is_running_hold());
    }
}
