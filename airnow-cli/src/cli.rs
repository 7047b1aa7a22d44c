use airnow_core::{
    AirQualityLookup, AirNowProvider, Config, Platform, ReplySink, Reply, provider_from_config,
    renderer_for,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "airnow", version, about = "US air quality lookups for chat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the AirNow API key and default ZIP code.
    Configure,

    /// Answer a single chat message, e.g. "aqi 37206".
    Say {
        /// Message text addressed to the bot.
        message: String,

        /// Platform to render for: "slack" sends rich cards, "shell" plain text.
        #[arg(long, default_value = "shell")]
        platform: String,
    },

    /// Answer every line read from stdin as a chat message.
    Listen {
        #[arg(long, default_value = "shell")]
        platform: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Say { message, platform } => {
                let platform = Platform::try_from(platform.as_str())?;
                let lookup = lookup_from_env()?;
                let handled = lookup
                    .handle_message(&message, renderer_for(platform).as_ref(), &mut StdoutSink)
                    .await?;
                if !handled {
                    println!("Not an air quality command. Try `aqi` or `aqi <zip>`.");
                }
                Ok(())
            }
            Command::Listen { platform } => {
                let platform = Platform::try_from(platform.as_str())?;
                let lookup = lookup_from_env()?;
                let renderer = renderer_for(platform);

                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                    lookup.handle_message(&line, renderer.as_ref(), &mut StdoutSink).await?;
                }
                Ok(())
            }
        }
    }
}

fn lookup_from_env() -> Result<AirQualityLookup<AirNowProvider>> {
    let config = Config::load()?.with_env_overrides(|key| std::env::var(key).ok());
    let provider = provider_from_config(&config);
    Ok(AirQualityLookup::new(config, provider))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("AirNow API key:")
        .without_confirmation()
        .with_help_message("Get one at https://docs.airnowapi.org/")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let current_zip = config.default_zip.clone().unwrap_or_default();
    let zip = Text::new("Default ZIP code (blank for none):")
        .with_initial_value(&current_zip)
        .prompt()
        .context("Failed to read default ZIP code")?;
    config.set_default_zip(zip);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Prints replies the way a chat adapter would send them.
struct StdoutSink;

#[async_trait]
impl ReplySink for StdoutSink {
    async fn send(&mut self, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => println!("{text}"),
            Reply::Card(card) => println!(
                "{}",
                serde_json::to_string_pretty(&card).context("Failed to serialize rich card")?
            ),
        }
        Ok(())
    }
}
