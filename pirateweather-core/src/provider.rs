use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{
    error::TransportError,
    model::{Coordinates, ForecastResult, RequestMode, UnitSystem, WeatherRequest},
};

pub mod pirateweather;

pub use pirateweather::PirateWeatherClient;

/// A remote weather service.
///
/// Every failure (HTTP status, timeout, undecodable payload) is reported as
/// one opaque [`TransportError`].
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        coordinates: Coordinates,
        units: UnitSystem,
    ) -> Result<ForecastResult, TransportError>;

    async fn fetch_historical(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
        units: UnitSystem,
    ) -> Result<ForecastResult, TransportError>;

    /// Dispatch a validated request to the matching endpoint.
    async fn fetch(&self, request: &WeatherRequest) -> Result<ForecastResult, TransportError> {
        match request.mode {
            RequestMode::CurrentForecast => {
                self.fetch_current(request.coordinates, request.units).await
            }
            RequestMode::HistoricalAt(date) => {
                self.fetch_historical(request.coordinates, date, request.units).await
            }
        }
    }
}

/// Cap error bodies so a provider's HTML error page doesn't flood the terminal.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
