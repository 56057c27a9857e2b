use std::num::NonZeroU32;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    WeatherError,
    raw::{RawCurrentResponse, RawForecastResponse, RawPlace},
};

use super::{RequestConfig, WeatherProvider};

/// HTTP client for api.weatherapi.com.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    config: RequestConfig,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(config: RequestConfig) -> Result<Self, WeatherError> {
        if config.api_key.trim().is_empty() {
            return Err(WeatherError::Config("API key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), name)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = self.endpoint(endpoint);
        debug!(%url, ?params, "requesting weather provider");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Failed to send request to {endpoint}: {e}");
                WeatherError::ProviderUnavailable(msg)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            let msg = format!("Failed to read {endpoint} response body: {e}");
            WeatherError::ProviderUnavailable(msg)
        })?;

        if !status.is_success() {
            warn!(%status, endpoint, "weather provider returned an error status");
            return Err(WeatherError::ProviderUnavailable(format!(
                "{endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::InvalidResponse(format!("Failed to parse {endpoint} JSON: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, place: &str) -> Result<RawCurrentResponse, WeatherError> {
        self.get("current.json", &[("q", place), ("aqi", "yes")]).await
    }

    async fn forecast(
        &self,
        place: &str,
        days: NonZeroU32,
    ) -> Result<RawForecastResponse, WeatherError> {
        let days = days.to_string();
        self.get("forecast.json", &[("q", place), ("days", days.as_str()), ("aqi", "no")]).await
    }

    async fn search(&self, place: &str) -> Result<Vec<RawPlace>, WeatherError> {
        let lang = self.config.search_lang.as_str();
        self.get("search.json", &[("q", place), ("lang", lang)]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
