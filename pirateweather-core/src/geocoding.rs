//! Forward and reverse geocoding.
//!
//! The pipeline only sees the [`GeocodingClient`] trait; [`NominatimClient`]
//! is the OpenStreetMap-backed implementation used by the CLI.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    config::Config,
    error::GeocodingError,
    model::{AddressInfo, GeocodeHit},
    provider::truncate_body,
};

#[async_trait]
pub trait GeocodingClient: Send + Sync + Debug {
    /// Best match for a free-text query.
    async fn forward_geocode(&self, query: &str) -> Result<GeocodeHit, GeocodingError>;

    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressInfo, GeocodingError>;
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    base_url: String,
    http: Client,
}

impl NominatimClient {
    pub fn new(config: &Config, http: Client) -> Self {
        Self { base_url: config.geocoding_url.clone(), http }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, GeocodingError> {
        let url = format!("{}/{path}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| GeocodingError::Request(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| {
                GeocodingError::Request(format!("failed to read response body: {}", e.without_url()))
            })?;

        if !status.is_success() {
            return Err(GeocodingError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NmAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NmReverse {
    display_name: Option<String>,
    address: Option<NmAddress>,
    error: Option<String>,
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    async fn forward_geocode(&self, query: &str) -> Result<GeocodeHit, GeocodingError> {
        debug!(query, "Forward geocoding");

        let body = self
            .get(
                "search",
                &[
                    ("q", query.to_string()),
                    ("format", "json".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        parse_search(query, &body)
    }

    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressInfo, GeocodingError> {
        debug!(latitude, longitude, "Reverse geocoding");

        let body = self
            .get(
                "reverse",
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        parse_reverse(&body)
    }
}

fn parse_search(query: &str, body: &str) -> Result<GeocodeHit, GeocodingError> {
    let places: Vec<NmPlace> =
        serde_json::from_str(body).map_err(|e| GeocodingError::Malformed(e.to_string()))?;

    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| GeocodingError::NoResults(query.to_string()))?;

    Ok(GeocodeHit { lat: place.lat, lon: place.lon, display_name: place.display_name })
}

fn parse_reverse(body: &str) -> Result<AddressInfo, GeocodingError> {
    let parsed: NmReverse =
        serde_json::from_str(body).map_err(|e| GeocodingError::Malformed(e.to_string()))?;

    // Nominatim reports "Unable to geocode" with a 200 status.
    if let Some(error) = parsed.error {
        return Err(GeocodingError::Malformed(error));
    }

    let display_name = parsed
        .display_name
        .ok_or_else(|| GeocodingError::Malformed("missing display_name".to_string()))?;

    let (city, state, country) = match parsed.address {
        Some(a) => (a.city.or(a.town).or(a.village).or(a.hamlet), a.state, a.country),
        None => (None, None, None),
    };

    Ok(AddressInfo { display_name, city, state, country })
}
