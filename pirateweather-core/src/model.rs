use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the globe, always within valid latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Returns `None` if either component is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self { latitude, longitude })
        } else {
            None
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Si,
    Us,
    Uk,
    Ca,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Si => "si",
            UnitSystem::Us => "us",
            UnitSystem::Uk => "uk",
            UnitSystem::Ca => "ca",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Si, UnitSystem::Us, UnitSystem::Uk, UnitSystem::Ca]
    }

    /// Lenient normalization: anything unrecognized (or empty) is SI.
    pub fn from_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "us" => UnitSystem::Us,
            "uk" | "uk2" => UnitSystem::Uk,
            "ca" => UnitSystem::Ca,
            _ => UnitSystem::Si,
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            UnitSystem::Us => "°F",
            UnitSystem::Si | UnitSystem::Uk | UnitSystem::Ca => "°C",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Si => "m/s",
            UnitSystem::Ca => "km/h",
            UnitSystem::Us | UnitSystem::Uk => "mph",
        }
    }

    pub fn distance_label(&self) -> &'static str {
        match self {
            UnitSystem::Si | UnitSystem::Ca => "km",
            UnitSystem::Us | UnitSystem::Uk => "mi",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    CurrentForecast,
    HistoricalAt(NaiveDate),
}

/// Fully validated weather request; built once, then only read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    pub coordinates: Coordinates,
    pub mode: RequestMode,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub units: UnitSystem,
    pub currently: CurrentConditions,
    pub hourly: Option<Vec<HourPoint>>,
    pub daily: Option<Vec<DayPoint>>,
    pub alerts: Vec<Alert>,
}

/// Values are expressed in `ForecastResult::units`; humidity and cloud cover are 0–1 fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: DateTime<Utc>,
    pub summary: Option<String>,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_bearing: f64,
    pub cloud_cover: f64,
    pub uv_index: f64,
    pub visibility: f64,
    pub fire_index: f64,
    pub smoke: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourPoint {
    pub time: DateTime<Utc>,
    pub summary: Option<String>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPoint {
    pub time: DateTime<Utc>,
    pub summary: Option<String>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub description: String,
}

/// Raw forward-geocoding hit. Coordinates stay strings until the resolver parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeHit {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub display_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Outcome of the optional reverse-geocoding enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressLookup {
    Found(AddressInfo),
    Unavailable(String),
}
