use std::{num::NonZeroU32, sync::Arc};

use tracing::debug;

use crate::{
    WeatherError,
    config::Config,
    forecast,
    model::{CurrentConditions, Forecast, PlaceCandidate, WeatherSnapshot},
    normalize::normalize,
    provider::{WeatherApiProvider, WeatherProvider},
    search,
};

/// Entry point for current conditions, forecasts and place search.
///
/// Cloning is cheap; clones share the underlying provider.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherClient {
    pub fn new(provider: impl WeatherProvider + 'static) -> Self {
        Self { provider: Arc::new(provider) }
    }

    pub fn with_shared(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Build an HTTP-backed client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let request = config.request_config()?;
        Ok(Self::new(WeatherApiProvider::new(request)?))
    }

    pub async fn get_current(&self, place: &str) -> Result<CurrentConditions, WeatherError> {
        debug!(place, "fetching current conditions");
        let raw = self.provider.current(place).await?;

        let current = raw.current.ok_or_else(|| {
            WeatherError::InvalidResponse("payload has no `current` container".to_string())
        })?;

        Ok(normalize(current))
    }

    /// The provider's own day limit decides the length of the result.
    pub async fn get_forecast(
        &self,
        place: &str,
        days: NonZeroU32,
    ) -> Result<Forecast, WeatherError> {
        debug!(place, days = days.get(), "fetching forecast");
        let raw = self.provider.forecast(place, days).await?;
        forecast::validate(raw)
    }

    pub async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, WeatherError> {
        search::search(self.provider.as_ref(), query).await
    }

    /// Current conditions and forecast fetched concurrently. Fails if either does.
    pub async fn get_snapshot(
        &self,
        place: &str,
        days: NonZeroU32,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let (current, forecast) =
            tokio::try_join!(self.get_current(place), self.get_forecast(place, days))?;

        Ok(WeatherSnapshot { place: place.to_string(), current, forecast })
    }
}
