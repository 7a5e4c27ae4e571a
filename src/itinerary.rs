//! Date itinerary domain types
//!
//! The wire shapes the planning assistant is asked to produce, plus the
//! hardcoded fallback itinerary used whenever generation fails.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Time of day for the planned date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    #[default]
    Evening,
}

impl TimeOfDay {
    /// Lowercase form used in the prompt ("during the evening")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Display label for the form selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    /// Cycle forward through the variants
    pub fn next(self) -> Self {
        match self {
            Self::Morning => Self::Afternoon,
            Self::Afternoon => Self::Evening,
            Self::Evening => Self::Morning,
        }
    }

    /// Cycle backward through the variants
    pub fn prev(self) -> Self {
        match self {
            Self::Morning => Self::Evening,
            Self::Afternoon => Self::Morning,
            Self::Evening => Self::Afternoon,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weather suitability of an activity
///
/// Serialized capitalized - these are the exact strings the model is asked
/// to emit, and anything else fails parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Indoor,
    Outdoor,
    Both,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "Indoor",
            Self::Outdoor => "Outdoor",
            Self::Both => "Both",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single activity within an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub weather: Weather,
    pub transport: Vec<String>,
    pub tips: Vec<String>,
}

/// A complete generated date plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateItinerary {
    pub title: String,
    pub activities: Vec<Activity>,
}

impl DateItinerary {
    /// The demo itinerary shown whenever generation fails
    pub fn fallback() -> Self {
        debug!("DateItinerary::fallback: called");
        Self {
            title: "Perfect Evening Date in London".to_string(),
            activities: vec![
                Activity {
                    title: "Sunset Dinner at Sky Garden".to_string(),
                    time: "6:30 PM".to_string(),
                    location: "20 Fenchurch Street, London".to_string(),
                    description: "Enjoy a romantic dinner with panoramic views of London's skyline".to_string(),
                    weather: Weather::Indoor,
                    transport: vec!["Underground".to_string(), "Bus".to_string()],
                    tips: vec![
                        "Book a table in advance".to_string(),
                        "Smart casual dress code".to_string(),
                        "Arrive 15 minutes early for security check".to_string(),
                    ],
                },
                Activity {
                    title: "Thames River Evening Cruise".to_string(),
                    time: "8:30 PM".to_string(),
                    location: "Tower Pier, London".to_string(),
                    description: "Take a romantic cruise along the Thames with city lights".to_string(),
                    weather: Weather::Both,
                    transport: vec!["Walking".to_string(), "Taxi".to_string()],
                    tips: vec![
                        "Bring a light jacket".to_string(),
                        "Pre-book tickets online".to_string(),
                        "Walking distance from Sky Garden".to_string(),
                    ],
                },
            ],
        }
    }
}

/// The five planning inputs collected from the user
///
/// Every text field may be empty - prompt construction and generation must
/// tolerate that without error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRequest {
    pub location: String,
    pub date: String,
    #[serde(rename = "time-of-day")]
    pub time_of_day: TimeOfDay,
    pub interests: String,
    pub personality: String,
}

/// Parse assistant message content as a [`DateItinerary`]
///
/// Models sometimes wrap the JSON object in a Markdown code fence; strip
/// that before parsing. Everything else is strict serde.
pub fn parse_itinerary(content: &str) -> Result<DateItinerary, serde_json::Error> {
    debug!(content_len = content.len(), "parse_itinerary: called");
    serde_json::from_str(strip_code_fence(content))
}

/// Strip a surrounding ``` or ```json fence, if present
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line
    match inner.split_once('\n') {
        Some((first, body)) if first.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body.trim(),
        _ => inner.trim(),
    }
}
