//! Turns a chat argument plus configuration into a request, or refuses before any network call.

use tracing::debug;

use crate::{
    config::Config,
    error::LookupError,
    model::{PreparedRequest, Query},
};

/// Credential first, then ZIP: with neither configured the user is told about the key.
pub fn build_request(zip_arg: Option<&str>, config: &Config) -> Result<PreparedRequest, LookupError> {
    debug!(default_zip = ?config.default_zip(), argument = ?zip_arg, "resolving zip code");

    let api_key = config.api_key().ok_or(LookupError::MissingCredential)?;

    let zip_code = zip_arg
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .or_else(|| config.default_zip())
        .ok_or(LookupError::MissingDefaultLocation)?;

    Ok(PreparedRequest {
        api_key: api_key.to_string(),
        query: Query::new(zip_code),
    })
}
