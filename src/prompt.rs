//! Prompt construction for the planning assistant

use tracing::debug;

use crate::itinerary::DateRequest;

/// System prompt sent with every generation request
pub const SYSTEM_PROMPT: &str = "You are a helpful date planning assistant. \
     Generate creative and detailed date ideas based on the provided information.";

/// JSON structure the model is instructed to produce
const RESPONSE_STRUCTURE: &str = r#"{
  "title": "string",
  "activities": [
    {
      "title": "string",
      "time": "string",
      "location": "string",
      "description": "string",
      "weather": "Indoor" | "Outdoor" | "Both",
      "transport": ["string"],
      "tips": ["string"]
    }
  ]
}"#;

/// Build the user prompt from the five planning inputs
///
/// Pure string interpolation - empty fields produce an awkward but valid
/// prompt, never an error.
pub fn build_user_prompt(request: &DateRequest) -> String {
    debug!(location = %request.location, time_of_day = %request.time_of_day, "build_user_prompt: called");
    format!(
        "Plan a date in {} for {} during the {}.\n\
         My partner's interests: {}\n\
         My partner's personality: {}\n\
         Format the response as a JSON object with this structure:\n{}",
        request.location,
        request.date,
        request.time_of_day,
        request.interests,
        request.personality,
        RESPONSE_STRUCTURE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::TimeOfDay;
    use proptest::prelude::*;

    #[test]
    fn test_prompt_interpolates_all_fields() {
        let request = DateRequest {
            location: "Paris".to_string(),
            date: "2026-02-14".to_string(),
            time_of_day: TimeOfDay::Evening,
            interests: "art, wine".to_string(),
            personality: "adventurous".to_string(),
        };

        let prompt = build_user_prompt(&request);

        assert!(prompt.contains("Plan a date in Paris for 2026-02-14 during the evening."));
        assert!(prompt.contains("My partner's interests: art, wine"));
        assert!(prompt.contains("My partner's personality: adventurous"));
        assert!(prompt.contains("\"weather\": \"Indoor\" | \"Outdoor\" | \"Both\""));
    }

    #[test]
    fn test_prompt_with_empty_request() {
        let prompt = build_user_prompt(&DateRequest::default());

        // Empty fields still produce the template and the JSON instruction
        assert!(prompt.contains("Plan a date in  for  during the evening."));
        assert!(prompt.contains("Format the response as a JSON object"));
    }

    proptest! {
        #[test]
        fn test_prompt_never_panics(location in ".*", date in ".*", interests in ".*", personality in ".*") {
            let request = DateRequest {
                location,
                date,
                time_of_day: TimeOfDay::Morning,
                interests,
                personality,
            };
            let prompt = build_user_prompt(&request);
            prop_assert!(prompt.contains(&request.location));
            prop_assert!(prompt.contains("during the morning"));
        }
    }
}
