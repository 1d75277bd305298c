use thiserror::Error;

/// Startup failures. Always fatal, raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{var} environment variable is not set.\n\
         Hint: export {var}=<your key> (get one at https://pirateweather.net)."
    )]
    MissingApiKey { var: &'static str },

    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Failure of a single geocoding lookup (forward or reverse).
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("geocoding request failed: {0}")]
    Request(String),

    #[error("geocoding service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no results found for '{0}'")]
    NoResults(String),

    #[error("malformed geocoding response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error(
        "Error geocoding location: {cause}\n\
         Hint: try entering the coordinates directly (latitude,longitude)."
    )]
    GeocodingFailed {
        #[source]
        cause: GeocodingError,
    },

    #[error(
        "Geocoder returned unusable coordinates (lat: '{lat}', lon: '{lon}').\n\
         Hint: try entering the coordinates directly (latitude,longitude)."
    )]
    InvalidGeocodeResult { lat: String, lon: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid time format '{input}': expected a calendar date as YYYY-MM-DD")]
    BadTimestamp { input: String },
}

/// Opaque failure of a weather fetch: HTTP error, timeout, bad payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Terminal outcome of one pipeline run, one variant per failing stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error fetching weather data: {0}")]
    Transport(#[from] TransportError),
}
