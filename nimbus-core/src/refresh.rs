use std::future::Future;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::WeatherError;

/// Lets a new refresh replace the one still in flight.
///
/// Each [`Refresh::begin`] cancels the ticket handed out before it, so a slow
/// earlier request resolves to [`WeatherError::Cancelled`] instead of
/// delivering stale data after the newer one started.
#[derive(Debug, Default)]
pub struct Refresh {
    current: Mutex<Option<CancellationToken>>,
}

/// Handle for one refresh attempt.
#[derive(Debug, Clone)]
pub struct RefreshTicket {
    token: CancellationToken,
}

impl Refresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RefreshTicket {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            if !previous.is_cancelled() {
                debug!("superseding in-flight refresh");
            }
            previous.cancel();
        }
        RefreshTicket { token }
    }

    /// Cancel whatever is in flight without starting anything new.
    pub fn cancel(&self) {
        if let Some(previous) = self.current.lock().take() {
            previous.cancel();
        }
    }

    /// Start a refresh and drive `fut` under its ticket.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, WeatherError>
    where
        F: Future<Output = Result<T, WeatherError>>,
    {
        self.begin().guard(fut).await
    }
}

impl RefreshTicket {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` unless this ticket is superseded first; the future is
    /// dropped on cancellation, which aborts its network call.
    pub async fn guard<T, F>(self, fut: F) -> Result<T, WeatherError>
    where
        F: Future<Output = Result<T, WeatherError>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(WeatherError::Cancelled),
            res = fut => res,
        }
    }
}
