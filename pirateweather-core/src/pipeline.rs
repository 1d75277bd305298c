//! The per-invocation state machine:
//! resolve location → build request → fetch weather → present.
//!
//! Both entry modes run the same pipeline; they only differ in how the raw
//! inputs were collected, which matters for one policy: a bad historical date
//! is recovered interactively (today's date is used) and fatal otherwise.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::{
    error::{PipelineError, ValidationError},
    geocoding::GeocodingClient,
    location::LocationResolver,
    model::{AddressLookup, Coordinates, WeatherRequest},
    present,
    provider::WeatherClient,
    request::{QueryKind, build_request},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Interactive,
    Flags,
}

/// Raw inputs for one run, exactly as the user supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub location: String,
    pub units: String,
    pub kind: QueryKind,
    pub entry: EntryMode,
}

#[derive(Debug)]
pub struct Pipeline<'a> {
    geocoder: &'a dyn GeocodingClient,
    weather: &'a dyn WeatherClient,
    today: NaiveDate,
}

impl<'a> Pipeline<'a> {
    pub fn new(geocoder: &'a dyn GeocodingClient, weather: &'a dyn WeatherClient) -> Self {
        Self { geocoder, weather, today: Utc::now().date_naive() }
    }

    /// Pin the date used for the interactive bad-date fallback.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run every stage in order; the first failing stage ends the run.
    pub async fn run(&self, invocation: &Invocation) -> Result<Vec<String>, PipelineError> {
        let mut lines = Vec::new();

        let coordinates = LocationResolver::new(self.geocoder)
            .resolve(&invocation.location)
            .await?;

        let request = self.build(coordinates, invocation, &mut lines)?;
        debug!(?request, "Request built");

        let forecast = self.weather.fetch(&request).await?;
        info!(timezone = %forecast.timezone, "Weather data received");

        let address = match self.geocoder.reverse_geocode(forecast.latitude, forecast.longitude).await {
            Ok(info) => AddressLookup::Found(info),
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed; continuing without address");
                AddressLookup::Unavailable(e.to_string())
            }
        };

        lines.extend(present::render(&forecast, Some(&address)));
        Ok(lines)
    }

    fn build(
        &self,
        coordinates: Coordinates,
        invocation: &Invocation,
        notices: &mut Vec<String>,
    ) -> Result<WeatherRequest, ValidationError> {
        match build_request(coordinates, &invocation.kind, &invocation.units) {
            Err(ValidationError::BadTimestamp { input }) if invocation.entry == EntryMode::Interactive => {
                warn!(input = %input, "Invalid date in interactive mode; using current date");
                notices.push("Invalid date format. Using current date.".to_string());

                let today = QueryKind::TimeMachine(self.today.format("%Y-%m-%d").to_string());
                build_request(coordinates, &today, &invocation.units)
            }
            other => other,
        }
    }
}
