use thiserror::Error;

/// Failures surfaced by the weather client.
///
/// Missing optional fields are never errors: they are defaulted by
/// [`crate::normalize`]. Only missing structure is.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network error, timeout or non-2xx status from the provider.
    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The body reached us but is not usable at all (undecodable, or no `current`).
    #[error("Invalid response from weather provider: {0}")]
    InvalidResponse(String),

    /// The forecast payload lacks its `forecast` container or day list.
    #[error("Malformed forecast response: {0}")]
    MalformedResponse(String),

    /// A newer refresh replaced this request before it completed.
    #[error("Request was superseded by a newer refresh")]
    Cancelled,

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WeatherError::Cancelled)
    }
}
