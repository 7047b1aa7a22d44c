use serde::{Deserialize, Serialize};

/// Search radius sent with every lookup.
pub const SEARCH_RADIUS_MILES: u32 = 25;

/// One pollutant's reading at one reporting area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub parameter_name: String,
    pub aqi: i64,
    pub category_name: String,
    pub reporting_area: String,
    pub state_code: String,

    /// Local date of the observation, `YYYY-MM-DD`.
    pub date_observed: Option<String>,
    /// Local hour of the observation, 0-23.
    pub hour_observed: Option<u32>,
    /// US time zone abbreviation, e.g. `CST`.
    pub local_time_zone: Option<String>,
}

/// Observations for one query, highest AQI first.
///
/// Never empty: an empty upstream answer is reported as a failure instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    /// Sort descending by AQI. Equal values keep their upstream order.
    pub fn new(mut observations: Vec<Observation>) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }
        observations.sort_by(|a, b| b.aqi.cmp(&a.aqi));
        Some(Self { observations })
    }

    /// The worst reading; drives headline, color and timestamp.
    pub fn top(&self) -> &Observation {
        &self.observations[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub zip_code: String,
    pub search_radius_miles: u32,
}

impl Query {
    pub fn new(zip_code: impl Into<String>) -> Self {
        Self {
            zip_code: zip_code.into(),
            search_radius_miles: SEARCH_RADIUS_MILES,
        }
    }
}

/// A query that passed the precondition checks, with the credential to send along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub api_key: String,
    pub query: Query,
}

#[cfg(test)]
pub(crate) fn observation(parameter: &str, aqi: i64, category: &str) -> Observation {
    Observation {
        parameter_name: parameter.to_string(),
        aqi,
        category_name: category.to_string(),
        reporting_area: "Nashville".to_string(),
        state_code: "TN".to_string(),
        date_observed: Some("2023-07-04 ".to_string()),
        hour_observed: Some(19),
        local_time_zone: Some("CST".to_string()),
    }
}
