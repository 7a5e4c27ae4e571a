//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::itinerary::TimeOfDay;

/// Perfect Date Generator
#[derive(Parser)]
#[command(
    name = "perfectdate",
    about = "AI-assisted date itinerary planner",
    version,
    after_help = "Logs are written to: ~/.local/share/perfectdate/logs/perfectdate.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, help = "Log level override")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default when no subcommand given)
    Tui,

    /// Generate a single itinerary and print it
    Plan {
        /// City or area for the date
        #[arg(short, long, default_value = "")]
        location: String,

        /// Calendar date (free-form, e.g. 2026-02-14)
        #[arg(short, long, default_value = "")]
        date: String,

        /// Time of day: morning, afternoon, or evening
        #[arg(short, long, value_enum, default_value = "evening")]
        time_of_day: TimeOfDayArg,

        /// Partner's interests
        #[arg(short, long, default_value = "")]
        interests: String,

        /// Partner's personality
        #[arg(short, long, default_value = "")]
        personality: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show recent log output
    Logs {
        /// Number of lines to show
        #[arg(short, long, default_value = "50")]
        lines: usize,
    },
}

/// Time-of-day argument wrapper (clap ValueEnum over the domain enum)
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum TimeOfDayArg {
    Morning,
    Afternoon,
    #[default]
    Evening,
}

impl From<TimeOfDayArg> for TimeOfDay {
    fn from(arg: TimeOfDayArg) -> Self {
        match arg {
            TimeOfDayArg::Morning => TimeOfDay::Morning,
            TimeOfDayArg::Afternoon => TimeOfDay::Afternoon,
            TimeOfDayArg::Evening => TimeOfDay::Evening,
        }
    }
}

/// Output format for the plan command
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
