//! HTTP client for the ecobee API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::{
    check_status, parse_summary, EcobeeApi, EcobeeError, Selection, SummaryResponse, Thermostat,
    ThermostatResponse, ThermostatSummary,
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.ecobee.com";

/// Request wrapper: the API expects `{"selection": {...}}` in the `json` query parameter.
#[derive(Serialize)]
struct SelectionQuery<'a> {
    selection: &'a Selection,
}

/// ecobee API client authenticated with a fixed access token.
pub struct EcobeeClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

impl EcobeeClient {
    pub fn new(base_url: &str, access_token: String, timeout: Duration) -> Result<Self, EcobeeError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, selection: &Selection) -> Result<T, EcobeeError> {
        let mut url = self.base_url.join(path)?;
        let query = serde_json::to_string(&SelectionQuery { selection })?;
        url.query_pairs_mut().append_pair("json", &query);

        debug!("GET {}", path);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header("Content-Type", "application/json;charset=UTF-8")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(EcobeeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EcobeeApi for EcobeeClient {
    #[instrument(skip(self))]
    async fn thermostats(&self, selection: &Selection) -> Result<Vec<Thermostat>, EcobeeError> {
        let resp: ThermostatResponse = self.get("1/thermostat", selection).await?;
        check_status(&resp.status)?;
        Ok(resp.thermostat_list)
    }

    #[instrument(skip(self))]
    async fn thermostat_summary(
        &self,
        selection: &Selection,
    ) -> Result<Vec<ThermostatSummary>, EcobeeError> {
        let resp: SummaryResponse = self.get("1/thermostatSummary", selection).await?;
        check_status(&resp.status)?;
        parse_summary(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let result = EcobeeClient::new("not a url", "token".into(), Duration::from_secs(5));
        assert!(matches!(result, Err(EcobeeError::Url(_))));
    }

    #[test]
    fn test_selection_query_shape() {
        let selection = Selection::registered_summary();
        let query = serde_json::to_value(SelectionQuery { selection: &selection }).unwrap();
        assert_eq!(query["selection"]["selectionType"], "registered");
        assert_eq!(query["selection"]["includeAlerts"], true);
    }
}
