//! Terminal rendering of a forecast.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::model::{AddressLookup, ForecastResult};

/// Render a forecast as display lines. Pure and infallible.
pub fn render(forecast: &ForecastResult, address: Option<&AddressLookup>) -> Vec<String> {
    let units = forecast.units;
    let c = &forecast.currently;
    let mut lines = Vec::new();

    lines.push(format!("Location: {:.4}, {:.4}", forecast.latitude, forecast.longitude));

    match address {
        Some(AddressLookup::Found(info)) => {
            lines.push(format!("Address: {}", info.display_name));
            let parts = [("City", &info.city), ("State", &info.state), ("Country", &info.country)];
            for (label, value) in parts {
                if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                    lines.push(format!("{label}: {value}"));
                }
            }
        }
        Some(AddressLookup::Unavailable(reason)) => {
            lines.push(format!("Address: unavailable ({reason})"));
        }
        None => {}
    }

    lines.push(format!("Timezone: {}", forecast.timezone));
    lines.push(format!("Time: {}", local_time(c.time, &forecast.timezone)));
    if let Some(summary) = c.summary.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Conditions: {summary}"));
    }

    let temp = units.temperature_label();
    let speed = units.speed_label();
    lines.push(format!("Temperature: {:.2}{temp}", c.temperature));
    lines.push(format!("Feels like: {:.2}{temp}", c.apparent_temperature));
    lines.push(format!("Humidity: {:.2}%", c.humidity * 100.0));
    lines.push(format!("Wind Speed: {:.2} {speed}", c.wind_speed));
    lines.push(format!("Wind Direction: {:.2}°", c.wind_bearing));
    lines.push(format!("Cloud Cover: {:.2}%", c.cloud_cover * 100.0));
    lines.push(format!("UV Index: {:.1}", c.uv_index));
    lines.push(format!("Visibility: {:.2} {}", c.visibility, units.distance_label()));
    lines.push(format!("Fire Index: {:.2}", c.fire_index));
    lines.push(format!("Smoke: {:.2}", c.smoke));

    if !forecast.alerts.is_empty() {
        lines.push(String::new());
        lines.push("Weather Alerts:".to_string());
        for alert in &forecast.alerts {
            lines.push(format!("- {}: {}", alert.title, alert.description));
        }
    }

    if let Some(hours) = forecast.hourly.as_ref().filter(|h| !h.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Hourly forecast available for the next {} hours", hours.len()));
    }

    if let Some(days) = forecast.daily.as_ref().filter(|d| !d.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Daily forecast available for the next {} days", days.len()));
    }

    lines
}

/// Format in the forecast's own timezone; unknown zone names fall back to UTC.
fn local_time(time: DateTime<Utc>, timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => time.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        Err(_) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}
