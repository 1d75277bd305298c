use clap::{Parser, Subcommand};
use pirateweather_core::{
    Config, EntryMode, Invocation, NominatimClient, Pipeline, PirateWeatherClient, QueryKind,
};
use tracing::info;

use crate::interactive::{self, InquirePrompter, Prompter};

/// Top-level CLI struct. Without a subcommand the interactive wizard starts.
#[derive(Debug, Parser)]
#[command(
    name = "pirateweather",
    version,
    about = "A CLI for the Pirate Weather API",
    long_about = "Fetch current or historical weather for an address, a place name, or \
                  \"latitude,longitude\" coordinates.\n\n\
                  Requires the PIRATE_WEATHER_API_KEY environment variable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get weather forecast for a location.
    Forecast {
        /// Location (address, city, or latitude,longitude).
        #[arg(short, long, allow_hyphen_values = true)]
        location: String,

        /// Units to use (si, us, uk, ca); anything else means si.
        #[arg(short, long, default_value = "si")]
        units: String,
    },

    /// Get historical weather data for a location.
    Timemachine {
        /// Location (address, city, or latitude,longitude).
        #[arg(short, long, allow_hyphen_values = true)]
        location: String,

        /// Units to use (si, us, uk, ca); anything else means si.
        #[arg(short, long, default_value = "si")]
        units: String,

        /// Date for historical data (format: YYYY-MM-DD).
        #[arg(short, long)]
        time: String,
    },
}

impl Command {
    fn into_invocation(self) -> Invocation {
        let (location, units, kind) = match self {
            Command::Forecast { location, units } => (location, units, QueryKind::Forecast),
            Command::Timemachine { location, units, time } => {
                (location, units, QueryKind::TimeMachine(time))
            }
        };
        Invocation { location, units, kind, entry: EntryMode::Flags }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with(|var| std::env::var(var).ok(), &InquirePrompter).await
    }

    async fn run_with<F>(self, lookup: F, prompter: &dyn Prompter) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Missing credentials end the process here, before any prompt or request.
        let config = Config::from_lookup(lookup)?;
        info!(?config, "Configuration loaded");

        let http = config.http_client()?;
        let weather = PirateWeatherClient::new(&config, http.clone());
        let geocoder = NominatimClient::new(&config, http);
        let pipeline = Pipeline::new(&geocoder, &weather);

        match self.command {
            None => interactive::run(&pipeline, prompter).await,
            Some(command) => {
                let lines = pipeline.run(&command.into_invocation()).await?;
                print_lines(&lines);
                Ok(())
            }
        }
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
