//! Turns an [`ObservationSet`] into something a chat platform can show.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Debug};
use tracing::debug;

use crate::{
    model::{Observation, ObservationSet},
    severity::score_color,
};

const AIRNOW_HOME: &str = "https://www.airnow.gov/";
const AIRNOW_ICON: &str = "https://www.airnow.gov/apple-touch-icon.png";
const AIRNOW_NAME: &str = "AirNow.gov";

/// A chat platform the command can be answered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Slack,
    Shell,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Slack => "slack",
            Platform::Shell => "shell",
        }
    }

    pub const fn all() -> &'static [Platform] {
        &[Platform::Slack, Platform::Shell]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Platform {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "slack" => Ok(Platform::Slack),
            "shell" => Ok(Platform::Shell),
            _ => Err(anyhow::anyhow!(
                "Unknown platform '{value}'. Supported platforms: slack, shell."
            )),
        }
    }
}

/// A message ready to hand to the chat host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Card(RichCard),
}

/// Slack-style attachment message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichCard {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    pub title_link: String,
    pub fallback: String,
    pub author_icon: String,
    pub author_link: String,
    pub author_name: String,
    pub color: String,
    pub fields: Vec<CardField>,
    pub footer: String,
    pub ts: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub short: bool,
    pub title: String,
    pub value: String,
}

impl CardField {
    fn from_observation(obs: &Observation) -> Self {
        Self {
            short: true,
            title: obs.parameter_name.clone(),
            value: reading_value(obs),
        }
    }

    /// Recover `(parameter, aqi, category)` from a rendered field.
    pub fn reading(&self) -> Option<(String, i64, String)> {
        let (aqi, rest) = self.value.split_once(" (")?;
        let category = rest.strip_suffix(')')?;
        Some((self.title.clone(), aqi.parse().ok()?, category.to_string()))
    }
}

/// Rendering strategy, picked by the host for its platform.
pub trait Renderer: Send + Sync + Debug {
    /// `now` is used when the observations carry no usable local time.
    fn render(&self, observations: &ObservationSet, now: DateTime<Utc>) -> Reply;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    fn render(&self, observations: &ObservationSet, _now: DateTime<Utc>) -> Reply {
        Reply::Text(text_summary(observations))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RichCardRenderer;

impl Renderer for RichCardRenderer {
    fn render(&self, observations: &ObservationSet, now: DateTime<Utc>) -> Reply {
        let top = observations.top();

        let attachment = Attachment {
            title: format!("{} Air Quality", location(top)),
            title_link: deep_link(top),
            fallback: text_summary(observations),
            author_icon: AIRNOW_ICON.to_string(),
            author_link: AIRNOW_HOME.to_string(),
            author_name: AIRNOW_NAME.to_string(),
            color: score_color(top.aqi).to_string(),
            fields: observations.iter().map(CardField::from_observation).collect(),
            footer: AIRNOW_NAME.to_string(),
            ts: display_timestamp(top, now),
        };

        Reply::Card(RichCard { attachments: vec![attachment] })
    }
}

pub fn renderer_for(platform: Platform) -> Box<dyn Renderer> {
    match platform {
        Platform::Slack => Box::new(RichCardRenderer),
        Platform::Shell => Box::new(PlainTextRenderer),
    }
}

/// `Nashville, TN - O3: 46 (Good); PM2.5: 43 (Good)`
pub fn text_summary(observations: &ObservationSet) -> String {
    let readings: Vec<String> = observations
        .iter()
        .map(|obs| format!("{}: {}", obs.parameter_name, reading_value(obs)))
        .collect();

    format!("{} - {}", location(observations.top()), readings.join("; "))
}

/// Epoch seconds for the card footer.
pub fn display_timestamp(obs: &Observation, now: DateTime<Utc>) -> i64 {
    match observed_at(obs) {
        Some(at) => at.timestamp(),
        None => {
            debug!(
                date = ?obs.date_observed,
                hour = ?obs.hour_observed,
                zone = ?obs.local_time_zone,
                "no usable observation time, using current time"
            );
            now.timestamp()
        }
    }
}

/// Local observation time from the date, hour and zone abbreviation AirNow reports.
pub fn observed_at(obs: &Observation) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(obs.date_observed.as_deref()?.trim(), "%Y-%m-%d").ok()?;
    let local = date.and_hms_opt(obs.hour_observed?, 0, 0)?;
    let offset = zone_offset(obs.local_time_zone.as_deref()?)?;

    offset.from_local_datetime(&local).single()
}

fn zone_offset(abbreviation: &str) -> Option<FixedOffset> {
    let hours = match abbreviation.trim().to_uppercase().as_str() {
        "UTC" | "GMT" => 0,
        "AST" | "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" | "AKDT" => -8,
        "AKST" | "HADT" => -9,
        "HST" | "HAST" => -10,
        "SST" => -11,
        "CHST" => 10,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

fn reading_value(obs: &Observation) -> String {
    format!("{} ({})", obs.aqi, obs.category_name)
}

fn location(obs: &Observation) -> String {
    format!("{}, {}", obs.reporting_area, obs.state_code)
}

fn deep_link(obs: &Observation) -> String {
    Url::parse_with_params(
        AIRNOW_HOME,
        &[
            ("city", obs.reporting_area.as_str()),
            ("state", obs.state_code.as_str()),
            ("country", "USA"),
        ],
    )
    .map(String::from)
    .unwrap_or_else(|_| AIRNOW_HOME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::observation;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_688_519_184, 0).expect("valid timestamp")
    }

    fn nashville() -> ObservationSet {
        ObservationSet::new(vec![observation("PM2.5", 43, "Good"), observation("O3", 46, "Good")])
            .expect("non-empty")
    }

    fn card(reply: Reply) -> Attachment {
        match reply {
            Reply::Card(mut card) => {
                assert_eq!(card.attachments.len(), 1);
                card.attachments.remove(0)
            }
            Reply::Text(text) => panic!("expected card, got text: {text}"),
        }
    }

    #[test]
    fn summary_leads_with_highest_aqi() {
        assert_eq!(text_summary(&nashville()), "Nashville, TN - O3: 46 (Good); PM2.5: 43 (Good)");
    }

    #[test]
    fn plain_text_renderer_sends_summary() {
        let reply = PlainTextRenderer.render(&nashville(), now());
        assert_eq!(reply, Reply::Text("Nashville, TN - O3: 46 (Good); PM2.5: 43 (Good)".into()));
    }

    #[test]
    fn rich_card_contents() {
        let attachment = card(RichCardRenderer.render(&nashville(), now()));

        assert_eq!(attachment.title, "Nashville, TN Air Quality");
        assert_eq!(
            attachment.title_link,
            "https://www.airnow.gov/?city=Nashville&state=TN&country=USA"
        );
        assert_eq!(attachment.fallback, "Nashville, TN - O3: 46 (Good); PM2.5: 43 (Good)");
        assert_eq!(attachment.author_name, "AirNow.gov");
        assert_eq!(attachment.author_link, "https://www.airnow.gov/");
        assert_eq!(attachment.author_icon, "https://www.airnow.gov/apple-touch-icon.png");
        assert_eq!(attachment.footer, "AirNow.gov");
        assert_eq!(attachment.color, "#00e400");
        assert_eq!(
            attachment.fields,
            vec![
                CardField { short: true, title: "O3".into(), value: "46 (Good)".into() },
                CardField { short: true, title: "PM2.5".into(), value: "43 (Good)".into() },
            ]
        );
        // 2023-07-04 19:00 CST
        assert_eq!(attachment.ts, 1_688_518_800);
    }

    #[test]
    fn card_color_follows_worst_reading() {
        let set = ObservationSet::new(vec![
            observation("O3", 46, "Good"),
            observation("PM2.5", 151, "Unhealthy"),
        ])
        .expect("non-empty");

        assert_eq!(card(RichCardRenderer.render(&set, now())).color, "#ff0000");
    }

    #[test]
    fn card_fields_read_back_in_order() {
        let set = ObservationSet::new(vec![
            observation("PM10", 12, "Good"),
            observation("PM2.5", 104, "Unhealthy for Sensitive Groups"),
            observation("O3", 57, "Moderate"),
        ])
        .expect("non-empty");

        let attachment = card(RichCardRenderer.render(&set, now()));
        let read: Vec<_> = attachment.fields.iter().filter_map(CardField::reading).collect();
        let expected: Vec<_> = set
            .iter()
            .map(|o| (o.parameter_name.clone(), o.aqi, o.category_name.clone()))
            .collect();

        assert_eq!(read, expected);
    }

    #[test]
    fn deep_link_is_encoded() {
        let mut obs = observation("O3", 30, "Good");
        obs.reporting_area = "Los Angeles".into();
        obs.state_code = "CA".into();

        assert_eq!(
            deep_link(&obs),
            "https://www.airnow.gov/?city=Los+Angeles&state=CA&country=USA"
        );
    }

    #[test]
    fn timestamp_uses_zone_abbreviation() {
        let mut obs = observation("O3", 30, "Good");
        obs.date_observed = Some("2023-07-04".into());
        obs.hour_observed = Some(12);
        obs.local_time_zone = Some("EDT".into());

        // 2023-07-04 16:00 UTC
        assert_eq!(display_timestamp(&obs, now()), 1_688_486_400);
    }

    #[test]
    fn timestamp_falls_back_to_now() {
        let mut missing = observation("O3", 30, "Good");
        missing.date_observed = None;
        assert_eq!(display_timestamp(&missing, now()), 1_688_519_184);

        let mut unknown_zone = observation("O3", 30, "Good");
        unknown_zone.local_time_zone = Some("XYZ".into());
        assert_eq!(display_timestamp(&unknown_zone, now()), 1_688_519_184);

        let mut bad_hour = observation("O3", 30, "Good");
        bad_hour.hour_observed = Some(24);
        assert_eq!(display_timestamp(&bad_hour, now()), 1_688_519_184);
    }

    #[test]
    fn serializes_as_slack_attachment() {
        let reply = RichCardRenderer.render(&nashville(), now());
        let json = serde_json::to_value(&reply).expect("serializable");

        assert_eq!(json["attachments"][0]["fields"][0]["title"], "O3");
        assert_eq!(json["attachments"][0]["fields"][0]["short"], true);
        assert_eq!(json["attachments"][0]["ts"], 1_688_518_800);

        let text = serde_json::to_value(Reply::Text("hi".into())).expect("serializable");
        assert_eq!(text, "hi");
    }

    #[test]
    fn platform_parsing() {
        for platform in Platform::all() {
            assert_eq!(Platform::try_from(platform.as_str()).unwrap(), *platform);
        }
        assert_eq!(Platform::try_from("Slack").unwrap(), Platform::Slack);
        assert!(Platform::try_from("irc").unwrap_err().to_string().contains("Unknown platform"));
    }
}
