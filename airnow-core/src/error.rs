use thiserror::Error;

use crate::config::{API_KEY_VAR, DEFAULT_ZIP_VAR};

/// Every way a single lookup can fail. All of them end the command with one reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Missing {}", API_KEY_VAR)]
    MissingCredential,

    #[error("Missing {}", DEFAULT_ZIP_VAR)]
    MissingDefaultLocation,

    #[error("{0}")]
    TransportError(String),

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Received an invalid response from the API.")]
    UpstreamError,

    #[error("Unable to retrieve current air quality.")]
    MalformedResponse,

    #[error("No current observations for {0}")]
    NoObservations(String),
}

impl LookupError {
    /// The exact text sent back to the chat channel.
    pub fn reply_text(&self) -> String {
        match self {
            Self::MalformedResponse | Self::NoObservations(_) => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}
