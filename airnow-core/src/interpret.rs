//! Classifies what came back from the upstream API.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    error::LookupError,
    model::{Observation, ObservationSet, Query},
};

/// What the transport handed back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutcome {
    /// The request never produced a response (connect failure, body read failure, ...).
    Transport(String),
    Http { status: u16, body: String },
}

/// Wire shape of a single AirNow observation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiObservation {
    parameter_name: String,
    #[serde(rename = "AQI")]
    aqi: i64,
    category: ApiCategory,
    reporting_area: String,
    state_code: String,
    date_observed: Option<String>,
    hour_observed: Option<u32>,
    local_time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiCategory {
    name: String,
}

impl From<ApiObservation> for Observation {
    fn from(row: ApiObservation) -> Self {
        Self {
            parameter_name: row.parameter_name,
            aqi: row.aqi,
            category_name: row.category.name,
            reporting_area: row.reporting_area,
            state_code: row.state_code,
            date_observed: row.date_observed,
            hour_observed: row.hour_observed,
            local_time_zone: row.local_time_zone,
        }
    }
}

pub fn interpret(outcome: RawOutcome, query: &Query) -> Result<ObservationSet, LookupError> {
    let body = match outcome {
        RawOutcome::Transport(message) => {
            error!(%message, "request to AirNow failed");
            return Err(LookupError::TransportError(message));
        }
        RawOutcome::Http { status: 401, body } => {
            error!(%body, "AirNow rejected the API key");
            return Err(LookupError::InvalidCredential);
        }
        RawOutcome::Http { status: 500, body } => {
            error!(%body, "AirNow returned a server error");
            return Err(LookupError::UpstreamError);
        }
        RawOutcome::Http { status, body } => {
            debug!(status, zip = %query.zip_code, "AirNow responded");
            body
        }
    };

    let parsed: Value = serde_json::from_str(&body).map_err(|e| {
        error!(error = %e, "AirNow body is not valid JSON");
        LookupError::MalformedResponse
    })?;

    let Value::Array(rows) = parsed else {
        error!(%body, "AirNow body is not a list of observations");
        return Err(LookupError::MalformedResponse);
    };

    if rows.is_empty() {
        return Err(LookupError::NoObservations(query.zip_code.clone()));
    }

    let observations = rows
        .into_iter()
        .map(|row| serde_json::from_value::<ApiObservation>(row).map(Observation::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!(error = %e, "AirNow observation has an unexpected shape");
            LookupError::MalformedResponse
        })?;

    ObservationSet::new(observations).ok_or_else(|| LookupError::NoObservations(query.zip_code.clone()))
}

#[cfg(test)]
pub(crate) const CURRENT_FIXTURE: &str = r#"[
  {"DateObserved":"2023-07-04 ","HourObserved":19,"LocalTimeZone":"CST","ReportingArea":"Nashville","StateCode":"TN","Latitude":36.169,"Longitude":-86.778,"ParameterName":"PM2.5","AQI":43,"Category":{"Number":1,"Name":"Good"}},
  {"DateObserved":"2023-07-04 ","HourObserved":19,"LocalTimeZone":"CST","ReportingArea":"Nashville","StateCode":"TN","Latitude":36.169,"Longitude":-86.778,"ParameterName":"O3","AQI":46,"Category":{"Number":1,"Name":"Good"}}
]"#;
