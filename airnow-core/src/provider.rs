use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, interpret::RawOutcome, model::PreparedRequest, provider::airnow::AirNowProvider};

pub mod airnow;

/// Something that can run one current-observation request upstream.
///
/// Implementations only move bytes: classification happens in [`crate::interpret`].
#[async_trait]
pub trait ObservationSource: Send + Sync + Debug {
    async fn fetch(&self, request: &PreparedRequest) -> RawOutcome;
}

/// Construct the AirNow provider from config.
pub fn provider_from_config(config: &Config) -> AirNowProvider {
    AirNowProvider::new(config.base_url())
}
