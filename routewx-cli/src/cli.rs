use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use routewx_core::{Config, WeatherSource, generate_weather_summary, source_from_config};
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "routewx", version, about = "Aviation weather briefings for a flight route")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set API endpoints, refresh interval and listen address.
    Configure,

    /// Print a single briefing for a route.
    Show {
        /// Airport codes and waypoints separated by commas, e.g. "KJFK, BUBKO, VABB".
        route: String,
    },

    /// Print a fresh briefing on a fixed interval until interrupted.
    Watch {
        /// Route to brief; prompted for when absent.
        route: Option<String>,

        /// Seconds between refreshes; defaults to the configured interval.
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Serve the route form over HTTP.
    Serve {
        /// Address to bind, e.g. "127.0.0.1:5000"; defaults to the configured address.
        #[arg(long)]
        addr: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { route } => {
                let source = source_from_config(&config);
                println!("{}", generate_weather_summary(source.as_ref(), &route).await);
            }
            Command::Watch { route, interval } => {
                let route = match route {
                    Some(route) => route,
                    None => Text::new("Enter route (airport codes and waypoints separated by commas):")
                        .prompt()
                        .context("Failed to read route")?,
                };
                let period = match interval {
                    Some(0) => return Err(anyhow!("--interval must be greater than zero")),
                    Some(secs) => Duration::from_secs(secs),
                    None => config.refresh_interval()?,
                };
                let source = source_from_config(&config);
                watch(source.as_ref(), &route, period).await;
            }
            Command::Serve { addr } => {
                let addr = addr.unwrap_or_else(|| config.listen_addr.clone());
                crate::web::serve(&addr, source_from_config(&config)).await?;
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.api_base_url = Text::new("API base URL:")
        .with_default(&config.api_base_url)
        .prompt()
        .context("Failed to read API base URL")?;

    config.dataserver_url = Text::new("SIGMET dataserver URL:")
        .with_default(&config.dataserver_url)
        .prompt()
        .context("Failed to read dataserver URL")?;

    config.refresh_interval_secs = CustomType::<u64>::new("Refresh interval (seconds):")
        .with_default(config.refresh_interval_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read refresh interval")?;
    config.refresh_interval()?;

    config.listen_addr = Text::new("Web listen address:")
        .with_default(&config.listen_addr)
        .prompt()
        .context("Failed to read listen address")?;

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Print a new briefing every `period` until Ctrl-C. Ticks never overlap: a slow
/// briefing pushes the next one back instead of queueing a burst.
async fn watch(source: &dyn WeatherSource, route: &str, period: Duration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        let report = tokio::select! {
            _ = &mut shutdown => break,
            report = generate_weather_summary(source, route) => report,
        };

        println!(
            "\n--- Latest Weather Summary ({}) ---",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%SZ")
        );
        println!("{report}");
        println!("\nUpdating in {} seconds...\n", period.as_secs());
    }

    info!("interrupted, stopping refresh loop");
}
