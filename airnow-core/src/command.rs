use regex::Regex;
use std::sync::LazyLock;

static AQI_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:aqi|air quality|air)\b\s?(\d{4,5})?").expect("static pattern is valid")
});

/// A recognised air-quality request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AqiCommand {
    /// ZIP code given in the message, if any.
    pub zip: Option<String>,
}

/// Match a message addressed to the bot, e.g. `aqi`, `air quality 37206`.
///
/// The trigger word has to open the message; the host strips the bot's name first.
pub fn parse_command(text: &str) -> Option<AqiCommand> {
    let caps = AQI_COMMAND.captures(text)?;
    Some(AqiCommand {
        zip: caps.get(1).map(|m| m.as_str().to_string()),
    })
}
