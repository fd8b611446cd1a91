use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use trip_planner::models::PlanRequest;
use trip_planner::{TripPlanner, TripPlannerConfig, telemetry, web};

#[derive(Debug, Parser)]
#[command(name = "trip-planner", version, about = "Travel planning assistant backend")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Plan a single trip and print the response envelope as JSON
    Plan {
        /// Free-text trip request
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config =
        TripPlannerConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve => {
            info!("trip-planner {} starting", trip_planner::VERSION);
            web::run(&config).await?;
        }
        Command::Plan { prompt } => {
            let planner = TripPlanner::from_config(&config)?;
            let request = PlanRequest {
                prompt,
                history: Vec::new(),
            };
            let envelope = match planner.plan(&request).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    error!("Planning failed: {}", e);
                    bail!(e.user_message());
                }
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}
