use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagecast::models::Cadence;

mod commands;

#[derive(Parser)]
#[command(
    name = "pagecast",
    version,
    about = "Schedule posts and reels from a CSV sheet on a Facebook page",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); PAGECAST_* environment variables are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule every item of the input sheet and write the output sheet
    Run,

    /// Print the publish plan without contacting the API
    Plan {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Spread evenly spaced slots across a daily window
    Window {
        /// Number of slots
        #[arg(short = 'n', long)]
        count: usize,

        /// Window start (HH:MM, 24h)
        #[arg(short, long)]
        start: String,

        /// Window end (HH:MM, 24h); at or before start means the next day
        #[arg(short, long)]
        end: String,

        /// Cadence of the first slot (reel, post)
        #[arg(long, default_value = "reel")]
        start_with: Cadence,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Run => {
            tracing::info!(config = ?cli.config, "Starting run command");
            commands::run(cli.config.as_deref()).await?;
        }

        Commands::Plan { format } => {
            tracing::info!(config = ?cli.config, format = %format, "Starting plan command");
            commands::plan(cli.config.as_deref(), &format)?;
        }

        Commands::Window {
            count,
            start,
            end,
            start_with,
            format,
        } => {
            tracing::info!(
                count = %count,
                start = %start,
                end = %end,
                start_with = %start_with,
                "Starting window command"
            );
            commands::window(count, &start, &end, start_with, &format)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("pagecast=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("pagecast=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
