//! Core library for the `airnow` air-quality chat command.
//!
//! This crate defines:
//! - Configuration (API key, default ZIP code)
//! - Request building and response classification for the AirNow API
//! - Presentation as plain text or a rich card
//! - The lookup pipeline a chat host drives
//!
//! It is used by `airnow-cli`, but can also be embedded in other chat hosts.

pub mod command;
pub mod config;
pub mod error;
pub mod interpret;
pub mod lookup;
pub mod model;
pub mod present;
pub mod provider;
pub mod request;
pub mod severity;

pub use command::{AqiCommand, parse_command};
pub use config::Config;
pub use error::LookupError;
pub use interpret::RawOutcome;
pub use lookup::{AirQualityLookup, ReplySink};
pub use model::{Observation, ObservationSet, PreparedRequest, Query};
pub use present::{Platform, PlainTextRenderer, Renderer, Reply, RichCard, RichCardRenderer, renderer_for};
pub use provider::{ObservationSource, airnow::AirNowProvider, provider_from_config};
