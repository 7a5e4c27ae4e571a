//! Perfect Date Generator
//!
//! CLI entry point: launches the interactive TUI by default, or generates
//! a single itinerary with the `plan` subcommand.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use perfectdate::cli::{Cli, Command, OutputFormat};
use perfectdate::config::Config;
use perfectdate::itinerary::{DateItinerary, DateRequest};
use perfectdate::llm::OpenAIClient;
use perfectdate::planner::{self, PlanOutcome};
use perfectdate::tui;

/// Directory holding the log file, under the XDG data dir
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("perfectdate")
        .join("logs")
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Level priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    // Log to a file, never stdout - the TUI owns the terminal
    let log_file = fs::File::create(log_dir.join("perfectdate.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config first so its log-level can feed logging setup
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!(model = %config.llm.model, base_url = %config.llm.base_url, "loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            location,
            date,
            time_of_day,
            interests,
            personality,
            format,
        }) => {
            debug!(%location, %date, "main: matched Plan command");
            let request = DateRequest {
                location,
                date,
                time_of_day: time_of_day.into(),
                interests,
                personality,
            };
            cmd_plan(&config, request, format).await
        }
        Some(Command::Logs { lines }) => {
            debug!(lines, "main: matched Logs command");
            cmd_logs(lines)
        }
        Some(Command::Tui) | None => {
            debug!("main: launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Launch the interactive TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let client = Arc::new(OpenAIClient::from_config(&config.llm)?);
    tui::run(client).await
}

/// Generate one itinerary and print it
async fn cmd_plan(config: &Config, request: DateRequest, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_plan: called");

    // Warn early if the key is missing; generation still runs and falls back
    if let Err(e) = config.validate() {
        eprintln!("Warning: {}", e);
    }

    let client = Arc::new(OpenAIClient::from_config(&config.llm)?);
    let outcome = planner::generate(client, &request).await;

    if let PlanOutcome::Fallback(_, reason) = &outcome {
        eprintln!("Warning: generation failed ({}), showing demo itinerary", reason);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome.itinerary())?);
        }
        OutputFormat::Text => {
            print_itinerary(outcome.itinerary());
        }
    }

    Ok(())
}

/// Print an itinerary as readable text
fn print_itinerary(itinerary: &DateItinerary) {
    println!("{}", itinerary.title);
    println!("{}", "=".repeat(itinerary.title.len()));

    for activity in &itinerary.activities {
        println!();
        println!("{} - {}", activity.time, activity.title);
        println!("  Location: {}", activity.location);
        println!("  {}", activity.description);
        println!("  Setting: {} Activity", activity.weather);
        println!("  Transport: {}", activity.transport.join(", "));
        if !activity.tips.is_empty() {
            println!("  Tips:");
            for tip in &activity.tips {
                println!("    - {}", tip);
            }
        }
    }
}

/// Print the tail of the log file
fn cmd_logs(lines: usize) -> Result<()> {
    debug!(lines, "cmd_logs: called");
    let log_path = log_dir().join("perfectdate.log");

    if !log_path.exists() {
        println!("No log file at {}", log_path.display());
        return Ok(());
    }

    let content = fs::read_to_string(&log_path).context("Failed to read log file")?;
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    for line in &all[start..] {
        println!("{}", line);
    }

    Ok(())
}
