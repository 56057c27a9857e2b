//! Core library for the `nimbus` weather client.
//!
//! This crate defines:
//! - Access to the weather provider (current conditions, forecast, place search)
//! - Normalization of partial provider payloads into total, typed records
//! - Resolution of raw coordinates into a single place name
//! - Configuration & credentials handling
//!
//! It is used by `nimbus-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod raw;
pub mod refresh;
pub mod resolver;
pub mod search;

pub use client::WeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use model::{
    AirQuality, Condition, Coordinates, CurrentConditions, Forecast, ForecastDay, HourSample,
    PlaceCandidate, WeatherSnapshot,
};
pub use provider::{RequestConfig, WeatherApiProvider, WeatherProvider};
pub use refresh::{Refresh, RefreshTicket};
pub use resolver::{FallbackReason, LocationResolver, Resolution, ResolverPolicy};
pub use search::PlaceQuery;
