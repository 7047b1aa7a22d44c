//! The end-to-end command: request, upstream call, interpretation, presentation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::{
    command::parse_command,
    config::Config,
    error::LookupError,
    interpret::interpret,
    model::ObservationSet,
    present::{Renderer, Reply},
    provider::ObservationSource,
    request::build_request,
};

/// Where replies go. Implemented by the chat host.
#[async_trait]
pub trait ReplySink: Send {
    async fn send(&mut self, reply: Reply) -> Result<()>;
}

/// One configured air-quality command. Holds no state between invocations.
#[derive(Debug)]
pub struct AirQualityLookup<S> {
    config: Config,
    source: S,
}

impl<S: ObservationSource> AirQualityLookup<S> {
    pub fn new(config: Config, source: S) -> Self {
        Self { config, source }
    }

    /// Fetch and interpret observations for `zip_arg`, or the configured default.
    pub async fn lookup(&self, zip_arg: Option<&str>) -> Result<ObservationSet, LookupError> {
        let request = build_request(zip_arg, &self.config)?;
        let outcome = self.source.fetch(&request).await;
        interpret(outcome, &request.query)
    }

    /// Produce exactly one reply: the rendered observations, or the failure text.
    pub async fn respond(&self, zip_arg: Option<&str>, renderer: &dyn Renderer) -> Reply {
        match self.lookup(zip_arg).await {
            Ok(observations) => renderer.render(&observations, Utc::now()),
            Err(err) => Reply::Text(err.reply_text()),
        }
    }

    /// Handle a chat message. Returns `false` without replying if it isn't an AQI command.
    pub async fn handle_message(
        &self,
        text: &str,
        renderer: &dyn Renderer,
        sink: &mut dyn ReplySink,
    ) -> Result<bool> {
        let Some(command) = parse_command(text) else {
            debug!(%text, "message is not an air quality command");
            return Ok(false);
        };

        let reply = self.respond(command.zip.as_deref(), renderer).await;
        sink.send(reply).await?;
        Ok(true)
    }
}
