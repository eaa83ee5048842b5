//! Ecobee API boundary.
//!
//! The exporter only depends on the [`EcobeeApi`] trait. [`EcobeeClient`] is
//! the HTTP implementation used by the binary; tests substitute their own.

mod client;
mod models;
mod summary;

pub use client::{EcobeeClient, DEFAULT_API_BASE_URL};
pub use models::{
    ApiStatus, Event, RemoteSensor, Runtime, SensorCapability, Settings, SummaryResponse,
    Thermostat, ThermostatResponse,
};
pub use summary::{parse_summary, Equipment, ThermostatSummary};

use async_trait::async_trait;
use serde::Serialize;

/// Errors raised while fetching data from the ecobee API.
#[derive(Debug, thiserror::Error)]
pub enum EcobeeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ecobee API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("ecobee API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("failed to decode ecobee response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid thermostat summary: {0}")]
    Summary(String),

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Which thermostats to fetch and which blocks to include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selection_type: String,
    pub selection_match: String,
    pub include_runtime: bool,
    pub include_settings: bool,
    pub include_events: bool,
    pub include_sensors: bool,
    pub include_equipment_status: bool,
    pub include_alerts: bool,
}

impl Selection {
    /// All registered thermostats with sensors, runtime, settings and events.
    pub fn registered_devices() -> Self {
        Self {
            selection_type: "registered".into(),
            include_sensors: true,
            include_runtime: true,
            include_settings: true,
            include_events: true,
            ..Default::default()
        }
    }

    /// Summary of all registered thermostats with equipment status and alerts.
    pub fn registered_summary() -> Self {
        Self {
            selection_type: "registered".into(),
            include_equipment_status: true,
            include_alerts: true,
            ..Default::default()
        }
    }
}

/// Remote operations the collector needs from the ecobee API.
#[async_trait]
pub trait EcobeeApi: Send + Sync {
    /// Fetches full thermostat snapshots.
    async fn thermostats(&self, selection: &Selection) -> Result<Vec<Thermostat>, EcobeeError>;

    /// Fetches the connectivity and equipment status summary.
    async fn thermostat_summary(
        &self,
        selection: &Selection,
    ) -> Result<Vec<ThermostatSummary>, EcobeeError>;
}

/// Maps a non-zero status envelope to an error.
pub(crate) fn check_status(status: &ApiStatus) -> Result<(), EcobeeError> {
    if status.code == 0 {
        Ok(())
    } else {
        Err(EcobeeError::Api {
            code: status.code,
            message: status.message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_devices_selection_json() {
        let json = serde_json::to_value(Selection::registered_devices()).unwrap();
        assert_eq!(json["selectionType"], "registered");
        assert_eq!(json["includeSensors"], true);
        assert_eq!(json["includeRuntime"], true);
        assert_eq!(json["includeSettings"], true);
        assert_eq!(json["includeEvents"], true);
        assert_eq!(json["includeEquipmentStatus"], false);
    }

    #[test]
    fn test_registered_summary_selection() {
        let selection = Selection::registered_summary();
        assert_eq!(selection.selection_type, "registered");
        assert!(selection.include_equipment_status);
        assert!(selection.include_alerts);
        assert!(!selection.include_sensors);
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(&ApiStatus::default()).is_ok());

        let err = check_status(&ApiStatus {
            code: 14,
            message: "Authentication token has expired.".into(),
        })
        .unwrap_err();
        assert!(matches!(err, EcobeeError::Api { code: 14, .. }));
    }
}
