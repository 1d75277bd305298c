use std::{fmt, time::Duration};

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "PIRATE_WEATHER_API_KEY";
pub const FORECAST_URL_VAR: &str = "PIRATE_WEATHER_API_URL";
pub const TIMEMACHINE_URL_VAR: &str = "PIRATE_WEATHER_TIMEMACHINE_URL";
pub const GEOCODING_URL_VAR: &str = "PIRATE_WEATHER_GEOCODING_URL";
pub const TIMEOUT_VAR: &str = "PIRATE_WEATHER_TIMEOUT_SECS";

pub const DEFAULT_FORECAST_URL: &str = "https://api.pirateweather.net/forecast";
pub const DEFAULT_TIMEMACHINE_URL: &str = "https://timemachine.pirateweather.net/forecast";
pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide settings, read once at start-up and passed down explicitly.
///
/// Nothing is written back anywhere; every run starts from the environment.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub forecast_url: String,
    pub timemachine_url: String,
    pub geocoding_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Build the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey { var: API_KEY_VAR })?;

        let timeout = match get(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => parse_timeout(&raw)?,
        };

        Ok(Self {
            api_key,
            forecast_url: base_url(get(FORECAST_URL_VAR), DEFAULT_FORECAST_URL),
            timemachine_url: base_url(get(TIMEMACHINE_URL_VAR), DEFAULT_TIMEMACHINE_URL),
            geocoding_url: base_url(get(GEOCODING_URL_VAR), DEFAULT_GEOCODING_URL),
            timeout,
        })
    }

    /// Shared HTTP client for both the weather and geocoding services.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("pirateweather-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("forecast_url", &self.forecast_url)
            .field("timemachine_url", &self.timemachine_url)
            .field("geocoding_url", &self.geocoding_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        var: TIMEOUT_VAR,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = raw.parse().map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("timeout must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
