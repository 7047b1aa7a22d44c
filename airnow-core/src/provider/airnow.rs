use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::{interpret::RawOutcome, model::PreparedRequest};

use super::ObservationSource;

const CURRENT_OBSERVATION_PATH: &str = "aq/observation/zipCode/current/";

#[derive(Debug, Clone)]
pub struct AirNowProvider {
    base_url: String,
    http: Client,
}

impl AirNowProvider {
    pub fn new(base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Self { base_url, http: Client::new() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CURRENT_OBSERVATION_PATH)
    }
}

#[async_trait]
impl ObservationSource for AirNowProvider {
    async fn fetch(&self, request: &PreparedRequest) -> RawOutcome {
        let url = self.endpoint();
        debug!(%url, zip = %request.query.zip_code, "requesting current observations");

        let distance = request.query.search_radius_miles.to_string();
        let res = self
            .http
            .get(&url)
            .query(&[
                ("api_key", request.api_key.as_str()),
                ("format", "application/json"),
                ("zipCode", request.query.zip_code.as_str()),
                ("distance", distance.as_str()),
            ])
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(e) => {
                let message = redact(&e.without_url().to_string(), &request.api_key);
                error!(%url, error = %message, "request to AirNow failed");
                return RawOutcome::Transport(message);
            }
        };

        let status = res.status().as_u16();
        match res.text().await {
            Ok(body) => RawOutcome::Http { status, body },
            Err(e) => {
                let message = redact(&e.without_url().to_string(), &request.api_key);
                error!(%url, status, error = %message, "failed to read AirNow response body");
                RawOutcome::Transport(format!("Failed to read AirNow response body: {message}"))
            }
        }
    }
}

/// Error text ends up in the chat channel; the credential must never be part of it.
fn redact(message: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        message.to_string()
    } else {
        message.replace(api_key, "[redacted]")
    }
}
