use chrono::NaiveDate;

use crate::{
    error::ValidationError,
    model::{Coordinates, RequestMode, UnitSystem, WeatherRequest},
};

/// What the user asked for, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    Forecast,
    /// Historical lookup; the date is still the raw user text.
    TimeMachine(String),
}

/// Build a validated request.
///
/// Units are lenient (unknown → SI); the historical date is not.
pub fn build_request(
    coordinates: Coordinates,
    kind: &QueryKind,
    units_raw: &str,
) -> Result<WeatherRequest, ValidationError> {
    let units = UnitSystem::from_lenient(units_raw);

    let mode = match kind {
        QueryKind::Forecast => RequestMode::CurrentForecast,
        QueryKind::TimeMachine(raw) => RequestMode::HistoricalAt(parse_date(raw)?),
    };

    Ok(WeatherRequest { coordinates, mode, units })
}

/// Strict `YYYY-MM-DD`: zero-padded, ten characters, a real calendar day.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    let bad = || ValidationError::BadTimestamp { input: raw.to_string() };

    let well_shaped = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(bad());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| bad())
}
