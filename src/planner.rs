//! Itinerary generation with guaranteed fallback
//!
//! The generation pipeline never surfaces an error to the caller: any
//! failure - network, HTTP status, missing content, bad JSON - produces the
//! hardcoded London fallback itinerary tagged with the reason.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::itinerary::{DateItinerary, DateRequest, parse_itinerary};
use crate::llm::{CompletionRequest, LlmError, PlannerClient};
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt};

/// Token budget for a generation request
const PLAN_MAX_TOKENS: u32 = 1024;

/// Why a generation fell back to the demo itinerary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Request never completed (connect, DNS, timeout)
    Network(String),
    /// Endpoint answered with a non-success status
    HttpStatus(u16),
    /// Response content was not a valid itinerary
    Parse(String),
    /// Response carried no message content
    EmptyResponse,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::HttpStatus(status) => write!(f, "API returned HTTP {}", status),
            Self::Parse(msg) => write!(f, "could not parse response: {}", msg),
            Self::EmptyResponse => write!(f, "response contained no content"),
        }
    }
}

impl From<LlmError> for FallbackReason {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ApiError { status, .. } => Self::HttpStatus(status),
            LlmError::Network(e) => Self::Network(e.to_string()),
            LlmError::InvalidResponse(_) => Self::EmptyResponse,
            LlmError::Json(e) => Self::Parse(e.to_string()),
        }
    }
}

/// Outcome of a generation attempt
///
/// Both arms carry a renderable itinerary, so callers can always display
/// something. `Fallback` additionally names what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// The model produced a valid itinerary
    Success(DateItinerary),
    /// Generation failed; the demo itinerary is substituted
    Fallback(DateItinerary, FallbackReason),
}

impl PlanOutcome {
    /// The itinerary to display, whichever arm this is
    pub fn itinerary(&self) -> &DateItinerary {
        match self {
            Self::Success(itinerary) | Self::Fallback(itinerary, _) => itinerary,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(..))
    }

    /// The fallback reason, if generation failed
    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Fallback(_, reason) => Some(reason),
            Self::Success(_) => None,
        }
    }
}

/// Generate an itinerary for the given request
///
/// Makes exactly one completion call. Infallible by construction: every
/// failure path returns `PlanOutcome::Fallback`.
pub async fn generate(client: Arc<dyn PlannerClient>, request: &DateRequest) -> PlanOutcome {
    debug!(location = %request.location, "generate: called");

    let completion = CompletionRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: build_user_prompt(request),
        max_tokens: PLAN_MAX_TOKENS,
    };

    let content = match client.complete(completion).await {
        Ok(response) => response.content,
        Err(err) => {
            warn!(error = %err, "generate: completion failed, using fallback");
            return PlanOutcome::Fallback(DateItinerary::fallback(), err.into());
        }
    };

    match parse_itinerary(&content) {
        Ok(itinerary) => {
            debug!(activity_count = itinerary.activities.len(), "generate: parsed itinerary");
            PlanOutcome::Success(itinerary)
        }
        Err(err) => {
            warn!(error = %err, "generate: response was not a valid itinerary, using fallback");
            PlanOutcome::Fallback(DateItinerary::fallback(), FallbackReason::Parse(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockPlannerClient;

    const LOUVRE_CONTENT: &str = r#"{
        "title": "Paris After Dark",
        "activities": [
            {
                "title": "Louvre Night Tour",
                "time": "7:00 PM",
                "location": "Rue de Rivoli, Paris",
                "description": "Evening tour of the galleries",
                "weather": "Indoor",
                "transport": ["Metro", "Walking"],
                "tips": ["Buy tickets online", "Friday nights are quietest"]
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_generate_success() {
        let client = Arc::new(MockPlannerClient::with_content(LOUVRE_CONTENT));

        let outcome = generate(client.clone(), &DateRequest::default()).await;

        let PlanOutcome::Success(itinerary) = outcome else {
            panic!("Expected success, got {:?}", outcome);
        };
        assert_eq!(itinerary.title, "Paris After Dark");
        assert_eq!(itinerary.activities.len(), 1);
        assert_eq!(itinerary.activities[0].title, "Louvre Night Tour");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_client_error_falls_back() {
        let client = Arc::new(MockPlannerClient::with_error(|| {
            LlmError::InvalidResponse("connection refused".to_string())
        }));

        let outcome = generate(client, &DateRequest::default()).await;

        assert!(outcome.is_fallback());
        // Fallback must be the literal demo itinerary
        assert_eq!(*outcome.itinerary(), DateItinerary::fallback());
        assert_eq!(outcome.itinerary().title, "Perfect Evening Date in London");
    }

    #[tokio::test]
    async fn test_generate_http_500_falls_back() {
        let client = Arc::new(MockPlannerClient::with_error(|| LlmError::ApiError {
            status: 500,
            message: "internal error".to_string(),
        }));

        let outcome = generate(client, &DateRequest::default()).await;

        assert_eq!(outcome.reason(), Some(&FallbackReason::HttpStatus(500)));
        assert_eq!(outcome.itinerary().title, "Perfect Evening Date in London");
        assert_eq!(outcome.itinerary().activities.len(), 2);
        assert_eq!(outcome.itinerary().activities[0].title, "Sunset Dinner at Sky Garden");
        assert_eq!(outcome.itinerary().activities[0].time, "6:30 PM");
    }

    #[tokio::test]
    async fn test_generate_invalid_json_falls_back() {
        let client = Arc::new(MockPlannerClient::with_content("Sure! Here is a date plan for you..."));

        let outcome = generate(client, &DateRequest::default()).await;

        assert!(matches!(outcome.reason(), Some(FallbackReason::Parse(_))));
        assert_eq!(*outcome.itinerary(), DateItinerary::fallback());
    }

    #[tokio::test]
    async fn test_generate_schema_mismatch_falls_back() {
        // Valid JSON, wrong shape
        let client = Arc::new(MockPlannerClient::with_content(r#"{"plan": "dinner"}"#));

        let outcome = generate(client, &DateRequest::default()).await;
        assert!(matches!(outcome.reason(), Some(FallbackReason::Parse(_))));
    }

    #[tokio::test]
    async fn test_generate_empty_request_never_errors() {
        let client = Arc::new(MockPlannerClient::with_content(LOUVRE_CONTENT));

        // All-empty inputs flow through without panicking or erroring
        let outcome = generate(client, &DateRequest::default()).await;
        assert!(!outcome.is_fallback());
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(FallbackReason::HttpStatus(500).to_string(), "API returned HTTP 500");
        assert_eq!(FallbackReason::EmptyResponse.to_string(), "response contained no content");
        assert!(FallbackReason::Network("timed out".to_string()).to_string().contains("timed out"));
    }
}
