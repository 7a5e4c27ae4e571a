//! Perfect Date Generator
//!
//! An AI-assisted date itinerary planner. Collects five planning inputs
//! (location, date, time of day, interests, personality), asks a
//! chat-completions endpoint for a structured itinerary, and renders it as
//! interactive activity cards in a terminal UI.
//!
//! # Core Behavior
//!
//! - **One request, always an answer**: generation makes a single API call
//!   and substitutes a hardcoded demo itinerary on any failure
//! - **Newest request wins**: a generation counter discards stale responses
//!   so a slow reply can never overwrite a newer one
//! - **Explicit configuration**: the API key env var is named in config and
//!   read once at client construction
//!
//! # Modules
//!
//! - [`itinerary`] - Domain types, fallback itinerary, response parsing
//! - [`prompt`] - System and user prompt construction
//! - [`llm`] - Completion client trait and chat-completions implementation
//! - [`planner`] - Generation pipeline with guaranteed fallback
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Interactive terminal UI

pub mod cli;
pub mod config;
pub mod itinerary;
pub mod llm;
pub mod planner;
pub mod prompt;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use itinerary::{Activity, DateItinerary, DateRequest, TimeOfDay, Weather, parse_itinerary};
pub use llm::{CompletionRequest, CompletionResponse, LlmError, OpenAIClient, PlannerClient};
pub use planner::{FallbackReason, PlanOutcome, generate};
pub use prompt::{SYSTEM_PROMPT, build_user_prompt};
