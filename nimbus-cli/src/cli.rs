use std::{num::NonZeroU32, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use nimbus_core::{Config, Coordinates, LocationResolver, Refresh, WeatherClient, WeatherError};
use serde::Serialize;
use tracing::{info, warn};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nimbus", version, about = "Weather client")]
pub struct Cli {
    /// Print JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default place.
    Configure,

    /// Current conditions for a place.
    Current {
        /// Place name or "lat,lon"; defaults to the configured place.
        place: Option<String>,
    },

    /// Multi-day forecast for a place.
    Forecast {
        place: Option<String>,

        /// Number of days; the provider may return fewer.
        #[arg(long)]
        days: Option<NonZeroU32>,
    },

    /// Current conditions and forecast together.
    Show {
        place: Option<String>,

        #[arg(long)]
        days: Option<NonZeroU32>,
    },

    /// Look up places by name or "lat,lon".
    Search { query: String },

    /// Resolve device coordinates to a place and show its weather.
    Locate {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        #[arg(long)]
        days: Option<NonZeroU32>,
    },

    /// Refresh current conditions and forecast periodically until Ctrl-C.
    Watch {
        place: Option<String>,

        /// Seconds between refreshes.
        #[arg(long, default_value_t = 300)]
        every: u64,

        #[arg(long)]
        days: Option<NonZeroU32>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let json = self.json;

        match self.command {
            Command::Configure => configure(config)?,
            Command::Current { place } => {
                let client = build_client(&config)?;
                let place = place.unwrap_or_else(|| config.default_place.clone());
                let current = client
                    .get_current(&place)
                    .await
                    .with_context(|| format!("Failed to get current conditions for {place}"))?;
                emit(json, &current, || render::current(&place, &current))?;
            }
            Command::Forecast { place, days } => {
                let client = build_client(&config)?;
                let place = place.unwrap_or_else(|| config.default_place.clone());
                let days = days.unwrap_or(config.forecast_days);
                let forecast = client
                    .get_forecast(&place, days)
                    .await
                    .with_context(|| format!("Failed to get forecast for {place}"))?;
                emit(json, &forecast, || render::forecast(&forecast))?;
            }
            Command::Show { place, days } => {
                let client = build_client(&config)?;
                let place = place.unwrap_or_else(|| config.default_place.clone());
                let days = days.unwrap_or(config.forecast_days);
                let snapshot = client
                    .get_snapshot(&place, days)
                    .await
                    .with_context(|| format!("Failed to get weather for {place}"))?;
                emit(json, &snapshot, || render::snapshot(&snapshot))?;
            }
            Command::Search { query } => {
                let client = build_client(&config)?;
                let places = client
                    .search_places(&query)
                    .await
                    .with_context(|| format!("Failed to search places for {query}"))?;
                emit(json, &places, || render::places(&places))?;
            }
            Command::Locate { lat, lon, days } => {
                let client = build_client(&config)?;
                let resolver = LocationResolver::new(config.resolver.clone());
                let resolution = resolver
                    .resolve(&client, Coordinates::new(lat, lon))
                    .await
                    .context("Failed to resolve location")?;
                info!(place = resolution.name(), "resolved device location");

                let days = days.unwrap_or(config.forecast_days);
                let snapshot = client
                    .get_snapshot(resolution.name(), days)
                    .await
                    .with_context(|| format!("Failed to get weather for {}", resolution.name()))?;
                emit(json, &snapshot, || render::snapshot(&snapshot))?;
            }
            Command::Watch { place, every, days } => {
                let client = build_client(&config)?;
                let place = place.unwrap_or_else(|| config.default_place.clone());
                let days = days.unwrap_or(config.forecast_days);
                watch(client, place, days, Duration::from_secs(every.max(1)), json).await?;
            }
        }

        Ok(())
    }
}

fn build_client(config: &Config) -> Result<WeatherClient> {
    WeatherClient::from_config(config).context("Failed to set up weather client")
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let place = Text::new("Default place:")
        .with_default(&config.default_place)
        .prompt()
        .context("Failed to read default place")?;

    config.set_api_key(api_key.trim().to_string());
    config.default_place = place;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Each tick supersedes a refresh that is still in flight.
async fn watch(
    client: WeatherClient,
    place: String,
    days: NonZeroU32,
    every: Duration,
    json: bool,
) -> Result<()> {
    let refresh = Refresh::new();
    let mut ticker = tokio::time::interval(every);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let ticket = refresh.begin();
                let client = client.clone();
                let place = place.clone();
                tokio::spawn(async move {
                    match ticket.guard(client.get_snapshot(&place, days)).await {
                        Ok(snapshot) => {
                            if let Err(e) = emit(json, &snapshot, || render::snapshot(&snapshot)) {
                                warn!(error = %e, "failed to print snapshot");
                            }
                        }
                        Err(WeatherError::Cancelled) => info!("refresh superseded"),
                        Err(e) => eprintln!("Error: {e}"),
                    }
                });
            }
            _ = &mut ctrl_c => {
                refresh.cancel();
                return Ok(());
            }
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
