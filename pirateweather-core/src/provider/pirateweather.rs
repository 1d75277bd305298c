use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::{
    config::Config,
    error::TransportError,
    model::{Alert, Coordinates, CurrentConditions, DayPoint, ForecastResult, HourPoint, UnitSystem},
};

use super::{WeatherClient, truncate_body};

/// Client for the Pirate Weather forecast and time machine endpoints.
#[derive(Clone)]
pub struct PirateWeatherClient {
    api_key: String,
    forecast_url: String,
    timemachine_url: String,
    http: Client,
}

impl PirateWeatherClient {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            forecast_url: config.forecast_url.clone(),
            timemachine_url: config.timemachine_url.clone(),
            http,
        }
    }

    fn current_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/{}/{},{}",
            self.forecast_url,
            self.api_key,
            coordinates.latitude(),
            coordinates.longitude()
        )
    }

    fn historical_url(&self, coordinates: Coordinates, date: NaiveDate) -> String {
        // Time machine takes a unix timestamp; the day starts at midnight UTC.
        let at = date.and_time(NaiveTime::default()).and_utc().timestamp();
        format!(
            "{}/{}/{},{},{}",
            self.timemachine_url,
            self.api_key,
            coordinates.latitude(),
            coordinates.longitude(),
            at
        )
    }

    // The request URL embeds the API key, so reqwest errors are reported without it.
    async fn get_forecast(
        &self,
        url: &str,
        units: UnitSystem,
        what: &str,
    ) -> Result<ForecastResult, TransportError> {
        let res = self
            .http
            .get(url)
            .query(&[("units", units.as_str())])
            .send()
            .await
            .map_err(|e| {
                TransportError::new(format!(
                    "Failed to send {what} request to Pirate Weather: {}",
                    e.without_url()
                ))
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| {
                TransportError::new(format!(
                    "Failed to read Pirate Weather {what} response body: {}",
                    e.without_url()
                ))
            })?;

        if !status.is_success() {
            return Err(TransportError::new(format!(
                "Pirate Weather {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        parse_forecast(&body, units)
            .map_err(|e| TransportError::new(format!("Failed to parse Pirate Weather {what} JSON: {e}")))
    }
}

impl fmt::Debug for PirateWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PirateWeatherClient")
            .field("api_key", &"<redacted>")
            .field("forecast_url", &self.forecast_url)
            .field("timemachine_url", &self.timemachine_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WeatherClient for PirateWeatherClient {
    async fn fetch_current(
        &self,
        coordinates: Coordinates,
        units: UnitSystem,
    ) -> Result<ForecastResult, TransportError> {
        debug!(%coordinates, %units, "Fetching current forecast");
        self.get_forecast(&self.current_url(coordinates), units, "forecast").await
    }

    async fn fetch_historical(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
        units: UnitSystem,
    ) -> Result<ForecastResult, TransportError> {
        debug!(%coordinates, %date, %units, "Fetching historical weather");
        self.get_forecast(&self.historical_url(coordinates, date), units, "time machine").await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PwCurrently {
    time: i64,
    summary: Option<String>,
    temperature: f64,
    apparent_temperature: f64,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    wind_bearing: f64,
    #[serde(default)]
    cloud_cover: f64,
    #[serde(default)]
    uv_index: f64,
    #[serde(default)]
    visibility: f64,
    #[serde(default)]
    fire_index: f64,
    #[serde(default)]
    smoke: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PwHour {
    time: i64,
    summary: Option<String>,
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PwDay {
    time: i64,
    summary: Option<String>,
    temperature_high: Option<f64>,
    temperature_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PwBlock<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct PwAlert {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct PwResponse {
    latitude: f64,
    longitude: f64,
    timezone: String,
    currently: PwCurrently,
    hourly: Option<PwBlock<PwHour>>,
    daily: Option<PwBlock<PwDay>>,
    #[serde(default)]
    alerts: Vec<PwAlert>,
}

fn parse_forecast(body: &str, units: UnitSystem) -> Result<ForecastResult, String> {
    let parsed: PwResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let c = parsed.currently;

    let currently = CurrentConditions {
        time: unix_to_utc(c.time)?,
        summary: c.summary,
        temperature: c.temperature,
        apparent_temperature: c.apparent_temperature,
        humidity: c.humidity,
        wind_speed: c.wind_speed,
        wind_bearing: c.wind_bearing,
        cloud_cover: c.cloud_cover,
        uv_index: c.uv_index,
        visibility: c.visibility,
        fire_index: c.fire_index,
        smoke: c.smoke,
    };

    let hourly = parsed
        .hourly
        .map(|block| {
            block
                .data
                .into_iter()
                .map(|h| {
                    Ok(HourPoint { time: unix_to_utc(h.time)?, summary: h.summary, temperature: h.temperature })
                })
                .collect::<Result<Vec<_>, String>>()
        })
        .transpose()?;

    let daily = parsed
        .daily
        .map(|block| {
            block
                .data
                .into_iter()
                .map(|d| {
                    Ok(DayPoint {
                        time: unix_to_utc(d.time)?,
                        summary: d.summary,
                        temperature_high: d.temperature_high,
                        temperature_low: d.temperature_low,
                    })
                })
                .collect::<Result<Vec<_>, String>>()
        })
        .transpose()?;

    let alerts = parsed
        .alerts
        .into_iter()
        .map(|a| Alert { title: a.title, description: a.description })
        .collect();

    Ok(ForecastResult {
        latitude: parsed.latitude,
        longitude: parsed.longitude,
        timezone: parsed.timezone,
        units,
        currently,
        hourly,
        daily,
        alerts,
    })
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, String> {
    DateTime::<Utc>::from_timestamp(ts, 0).ok_or_else(|| format!("timestamp {ts} is out of range"))
}
