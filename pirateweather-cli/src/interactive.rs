//! Step-by-step wizard used when no subcommand is given.
//!
//! Failures are printed and the wizard returns normally; only start-up
//! configuration errors (handled before we get here) end the process.

use std::fmt;

use inquire::{InquireError, Select, Text};
use pirateweather_core::{EntryMode, Invocation, Pipeline, QueryKind};
use tracing::debug;

use crate::cli::print_lines;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Forecast,
    History,
}

impl Choice {
    const ALL: [Choice; 2] = [Choice::Forecast, Choice::History];
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Forecast => f.write_str("Get current forecast"),
            Choice::History => f.write_str("Get historical weather data"),
        }
    }
}

/// Source of answers for the wizard.
pub trait Prompter {
    fn choose(&self) -> Result<Choice, InquireError>;

    fn text(&self, message: &str, default: Option<&str>) -> Result<String, InquireError>;
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn choose(&self) -> Result<Choice, InquireError> {
        Select::new("What would you like to do?", Choice::ALL.to_vec()).prompt()
    }

    fn text(&self, message: &str, default: Option<&str>) -> Result<String, InquireError> {
        let mut prompt = Text::new(message);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        prompt.prompt()
    }
}

/// Ask for everything one run needs. Dates are passed through unvalidated.
pub fn collect_invocation(prompter: &dyn Prompter) -> Result<Invocation, InquireError> {
    let choice = prompter.choose()?;

    let location = prompter.text("Enter location (address, city, or latitude,longitude):", None)?;
    let units = prompter.text("Enter units (si, us, uk, ca):", Some("si"))?;

    let kind = match choice {
        Choice::Forecast => QueryKind::Forecast,
        Choice::History => {
            QueryKind::TimeMachine(prompter.text("Enter date for historical data (YYYY-MM-DD):", None)?)
        }
    };

    Ok(Invocation {
        location: location.trim().to_string(),
        units: units.trim().to_string(),
        kind,
        entry: EntryMode::Interactive,
    })
}

pub async fn run(pipeline: &Pipeline<'_>, prompter: &dyn Prompter) -> anyhow::Result<()> {
    println!("Welcome to the PirateWeather CLI!");

    let invocation = match collect_invocation(prompter) {
        Ok(invocation) => invocation,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            debug!("Wizard cancelled");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match pipeline.run(&invocation).await {
        Ok(lines) => print_lines(&lines),
        Err(e) => println!("{e}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pirateweather_core::{
        AddressInfo, Coordinates, ForecastResult, GeocodeHit, GeocodingClient, GeocodingError,
        TransportError, UnitSystem, WeatherClient,
    };
    use std::{
        cell::RefCell,
        collections::VecDeque,
        sync::atomic::{AtomicU32, Ordering},
    };

    /// Never finds anything.
    #[derive(Debug)]
    struct EmptyGeocoder;

    #[async_trait]
    impl GeocodingClient for EmptyGeocoder {
        async fn forward_geocode(&self, query: &str) -> Result<GeocodeHit, GeocodingError> {
            Err(GeocodingError::NoResults(query.to_string()))
        }

        async fn reverse_geocode(&self, _: f64, _: f64) -> Result<AddressInfo, GeocodingError> {
            Err(GeocodingError::Request("offline".to_string()))
        }
    }

    /// Always fails and counts the attempts.
    #[derive(Debug, Default)]
    struct DownWeather {
        calls: AtomicU32,
    }

    #[async_trait]
    impl WeatherClient for DownWeather {
        async fn fetch_current(
            &self,
            _: Coordinates,
            _: UnitSystem,
        ) -> Result<ForecastResult, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::new("status 503"))
        }

        async fn fetch_historical(
            &self,
            _: Coordinates,
            _: NaiveDate,
            _: UnitSystem,
        ) -> Result<ForecastResult, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::new("status 503"))
        }
    }

    /// Replays canned answers; an empty answer takes the prompt's default.
    struct Scripted {
        choice: Choice,
        answers: RefCell<VecDeque<&'static str>>,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(choice: Choice, answers: &[&'static str]) -> Self {
            Self {
                choice,
                answers: RefCell::new(answers.iter().copied().collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for Scripted {
        fn choose(&self) -> Result<Choice, InquireError> {
            Ok(self.choice)
        }

        fn text(&self, message: &str, default: Option<&str>) -> Result<String, InquireError> {
            self.asked.borrow_mut().push(message.to_string());
            let answer = self.answers.borrow_mut().pop_front().ok_or(InquireError::OperationCanceled)?;
            Ok(match (answer, default) {
                ("", Some(default)) => default.to_string(),
                (answer, _) => answer.to_string(),
            })
        }
    }

    #[test]
    fn forecast_wizard_asks_for_location_and_units() {
        let prompter = Scripted::new(Choice::Forecast, &["  Paris  ", ""]);
        let invocation = collect_invocation(&prompter).unwrap();

        assert_eq!(invocation.location, "Paris");
        assert_eq!(invocation.units, "si");
        assert_eq!(invocation.kind, QueryKind::Forecast);
        assert_eq!(invocation.entry, EntryMode::Interactive);
        assert_eq!(prompter.asked.borrow().len(), 2);
    }

    #[test]
    fn history_wizard_also_asks_for_date() {
        let prompter = Scripted::new(Choice::History, &["0,0", "uk", "2023-06-01"]);
        let invocation = collect_invocation(&prompter).unwrap();

        assert_eq!(invocation.units, "uk");
        assert_eq!(invocation.kind, QueryKind::TimeMachine("2023-06-01".into()));
        assert!(prompter.asked.borrow()[2].contains("YYYY-MM-DD"));
    }

    #[test]
    fn cancelling_a_prompt_is_reported() {
        let prompter = Scripted::new(Choice::History, &["0,0"]);
        let err = collect_invocation(&prompter).unwrap_err();
        assert!(matches!(err, InquireError::OperationCanceled));
    }

    #[tokio::test]
    async fn unresolvable_location_is_reported_without_failing() {
        let weather = DownWeather::default();
        let pipeline = Pipeline::new(&EmptyGeocoder, &weather);
        let prompter = Scripted::new(Choice::Forecast, &["Atlantis", ""]);

        run(&pipeline, &prompter).await.expect("wizard returns normally");

        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_without_failing() {
        let weather = DownWeather::default();
        let pipeline = Pipeline::new(&EmptyGeocoder, &weather);
        let prompter = Scripted::new(Choice::Forecast, &["0,0", "si"]);

        run(&pipeline, &prompter).await.expect("wizard returns normally");

        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancelled_wizard_returns_quietly() {
        let weather = DownWeather::default();
        let pipeline = Pipeline::new(&EmptyGeocoder, &weather);
        let prompter = Scripted::new(Choice::Forecast, &[]);

        run(&pipeline, &prompter).await.expect("cancel is not an error");

        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn menu_labels() {
        assert_eq!(Choice::Forecast.to_string(), "Get current forecast");
        assert_eq!(Choice::History.to_string(), "Get historical weather data");
    }
}
