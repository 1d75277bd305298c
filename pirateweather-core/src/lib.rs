//! Core library for the `pirateweather` CLI.
//!
//! This crate defines:
//! - Start-up configuration (API key, endpoints, timeout)
//! - Location resolution: literal coordinates or forward geocoding
//! - Validated weather requests and the Pirate Weather client
//! - The pipeline shared by the interactive and flag-driven entry modes
//!
//! Remote services sit behind the [`GeocodingClient`] and [`WeatherClient`]
//! traits, so the pipeline can be driven by any implementation.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod location;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod provider;
pub mod request;

pub use config::Config;
pub use error::{
    ConfigError, GeocodingError, PipelineError, ResolutionError, TransportError, ValidationError,
};
pub use geocoding::{GeocodingClient, NominatimClient};
pub use location::{LocationResolver, parse_coordinates};
pub use model::{
    AddressInfo, AddressLookup, Alert, Coordinates, CurrentConditions, DayPoint, ForecastResult,
    GeocodeHit, HourPoint, RequestMode, UnitSystem, WeatherRequest,
};
pub use pipeline::{EntryMode, Invocation, Pipeline};
pub use provider::{PirateWeatherClient, WeatherClient};
pub use request::{QueryKind, build_request};
