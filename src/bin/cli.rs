//! loadcast CLI - headless dashboard
//!
//! Runs the dashboard core without a GUI: chart redraws and view effects are
//! written to the log instead of the screen.
//!
//! # Usage
//! ```sh
//! cargo run --bin loadcast-cli -- watch
//! cargo run --bin loadcast-cli -- predict --date 2024-05-01 --temperature 30 --humidity 40
//! LOADCAST_MODE=mock cargo run --bin loadcast-cli -- health
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use loadcast::application::dashboard::ChartSurfaces;
use loadcast::application::prediction_controller::PredictionController;
use loadcast::application::system::{Application, probe_health};
use loadcast::config::Config;
use loadcast::domain::forecast::{ForecastForm, PredictionOutcome};
use loadcast::infrastructure::log_view::{LogSurface, LogView};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Headless load forecasting dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll live weather and log every chart update until Ctrl+C
    Watch,
    /// Submit one load prediction and print the result
    Predict {
        /// Forecast date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Temperature in °C
        #[arg(long)]
        temperature: String,

        /// Relative humidity in %
        #[arg(long)]
        humidity: String,

        /// Day type (weekday, weekend)
        #[arg(long, default_value = "weekday")]
        daytype: String,

        /// Season (summer, monsoon, winter)
        #[arg(long, default_value = "summer")]
        season: String,
    },
    /// Check that the forecasting backend is up
    Health,
}

fn log_surfaces() -> ChartSurfaces {
    ChartSurfaces {
        load: Some(Arc::new(LogSurface::new("load", "MW"))),
        temperature: Some(Arc::new(LogSurface::new("temperature", "°C"))),
        humidity: Some(Arc::new(LogSurface::new("humidity", "%"))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let scroll_delay = config.timing.scroll_delay;
    let app = Application::build(config, log_surfaces(), Arc::new(LogView))?;

    match cli.command {
        Commands::Watch => {
            let handle = app.start().await?;
            info!("Watching live weather. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c().await?;
            info!("Shutdown signal received. Exiting...");
            handle.shutdown();
        }
        Commands::Predict {
            date,
            temperature,
            humidity,
            daytype,
            season,
        } => {
            let controller = PredictionController::new(
                app.prediction_service.clone(),
                app.dashboard.clone(),
                scroll_delay,
            );
            let form = ForecastForm {
                date,
                temperature,
                humidity,
                daytype,
                season,
            };

            match controller.submit(&form).await {
                PredictionOutcome::Predicted { load_mw, unit } => {
                    println!("{} {}", load_mw, unit);
                }
                PredictionOutcome::Rejected { message } => {
                    anyhow::bail!("Prediction rejected: {}", message);
                }
                PredictionOutcome::Failed { reason } => {
                    anyhow::bail!("Server error: {}", reason);
                }
            }
        }
        Commands::Health => {
            let status = probe_health(app.health_service.as_ref()).await;
            println!("{}", status);
            if !status.is_online() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
