use std::{fmt::Debug, num::NonZeroU32, time::Duration};

use async_trait::async_trait;

use crate::{
    WeatherError,
    raw::{RawCurrentResponse, RawForecastResponse, RawPlace},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_SEARCH_LANG: &str = "en";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to talk to the provider.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub api_key: String,
    pub base_url: String,
    /// Language forced on place search so that name matching is stable.
    pub search_lang: String,
    pub timeout: Duration,
}

impl RequestConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_lang: DEFAULT_SEARCH_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_search_lang(mut self, lang: impl Into<String>) -> Self {
        self.search_lang = lang.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Raw access to the provider's three endpoints.
///
/// Implementations return payloads untouched; shaping them is left to the
/// client so that a stub can stand in for HTTP.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions, with air quality requested.
    async fn current(&self, place: &str) -> Result<RawCurrentResponse, WeatherError>;

    /// Multi-day forecast, air quality not requested.
    async fn forecast(
        &self,
        place: &str,
        days: NonZeroU32,
    ) -> Result<RawForecastResponse, WeatherError>;

    /// Place lookup for free text or a `"lat,lon"` pair, in provider order.
    async fn search(&self, place: &str) -> Result<Vec<RawPlace>, WeatherError>;
}
