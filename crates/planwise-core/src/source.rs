//! Suggestion sources
//!
//! The planner does not care where a suggestion comes from. A source may
//! prompt a model and parse its answer, parse text it was handed, or pick
//! at random; all of them implement [`SuggestionSource`] and none of them
//! can fail.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

use crate::parser;
use crate::types::{AudienceType, EventRequest, Suggestion, TechRequirement};

/// Where a suggestion came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionOrigin {
    /// Parsed from model output; `fell_back` is set when the model call
    /// failed and the placeholder text was parsed instead
    Model { model_id: String, fell_back: bool },
    /// Parsed from caller-supplied text
    Text,
    /// Picked at random
    Random,
}

impl SuggestionOrigin {
    pub fn describe(&self) -> String {
        match self {
            SuggestionOrigin::Model {
                model_id,
                fell_back: false,
            } => format!("model {}", model_id),
            SuggestionOrigin::Model {
                model_id,
                fell_back: true,
            } => format!("model {} (unavailable, defaults used)", model_id),
            SuggestionOrigin::Text => "supplied response text".to_string(),
            SuggestionOrigin::Random => "random placeholder".to_string(),
        }
    }
}

/// Suggestion plus the message shown alongside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedSuggestion {
    pub message: String,
    pub suggestion: Suggestion,
    pub origin: SuggestionOrigin,
}

/// Capability that yields a suggestion for an event request
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Produce a suggestion. Never fails; unusable input yields defaults.
    async fn suggest(&self, request: &EventRequest) -> SourcedSuggestion;
}

#[async_trait]
impl<T: SuggestionSource + ?Sized> SuggestionSource for Box<T> {
    async fn suggest(&self, request: &EventRequest) -> SourcedSuggestion {
        (**self).suggest(request).await
    }
}

/// Parses a fixed response text, e.g. a saved model answer
#[derive(Debug, Clone)]
pub struct StaticTextSource {
    text: String,
}

impl StaticTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl SuggestionSource for StaticTextSource {
    async fn suggest(&self, _request: &EventRequest) -> SourcedSuggestion {
        let parsed = parser::parse_response(&self.text);
        SourcedSuggestion {
            message: parsed.message,
            suggestion: parsed.suggestion,
            origin: SuggestionOrigin::Text,
        }
    }
}

/// Picks audience and tech uniformly at random
pub struct RandomSuggestionSource {
    rng: Mutex<StdRng>,
}

impl RandomSuggestionSource {
    /// Random source seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible random source
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self) -> Suggestion {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let audience = AudienceType::all()
            .choose(&mut *rng)
            .copied()
            .unwrap_or_default();
        let tech = TechRequirement::all()
            .choose(&mut *rng)
            .copied()
            .unwrap_or_default();
        Suggestion::new(audience, tech)
    }
}

impl Default for RandomSuggestionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SuggestionSource for RandomSuggestionSource {
    async fn suggest(&self, request: &EventRequest) -> SourcedSuggestion {
        let suggestion = self.pick();
        debug!(?suggestion, "picked random suggestion");

        SourcedSuggestion {
            message: format!(
                "Hello! You are planning a {}-hour {} with a budget of ₹{}{}. \
                 Sounds like a great idea, good luck!",
                request.duration_hours,
                request.event_type,
                request.user_budget,
                if request.catering_required {
                    " and catering"
                } else {
                    ""
                },
            ),
            suggestion,
            origin: SuggestionOrigin::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventType;

    fn request() -> EventRequest {
        EventRequest::new(EventType::Concert, 4, 250_000, true).unwrap()
    }

    #[tokio::test]
    async fn test_static_text_source_parses() {
        let source = StaticTextSource::new(
            "---\nGreeting: Hi\nAudience Type: Public\nTech Requirement: High\n---",
        );
        let sourced = source.suggest(&request()).await;
        assert_eq!(
            sourced.suggestion,
            Suggestion::new(AudienceType::Public, TechRequirement::High)
        );
        assert_eq!(sourced.origin, SuggestionOrigin::Text);
        assert!(sourced.message.starts_with("Greeting: Hi"));
    }

    #[tokio::test]
    async fn test_static_text_source_empty_gives_defaults() {
        let sourced = StaticTextSource::new("").suggest(&request()).await;
        assert_eq!(sourced.suggestion, Suggestion::default());
        assert!(sourced.message.is_empty());
    }

    #[tokio::test]
    async fn test_seeded_random_source_is_reproducible() {
        let first = RandomSuggestionSource::with_seed(7);
        let second = RandomSuggestionSource::with_seed(7);
        for _ in 0..10 {
            assert_eq!(
                first.suggest(&request()).await.suggestion,
                second.suggest(&request()).await.suggestion
            );
        }
    }

    #[tokio::test]
    async fn test_random_source_covers_options() {
        let source = RandomSuggestionSource::with_seed(42);
        let mut audiences = std::collections::HashSet::new();
        let mut techs = std::collections::HashSet::new();
        for _ in 0..200 {
            let sourced = source.suggest(&request()).await;
            assert_eq!(sourced.origin, SuggestionOrigin::Random);
            audiences.insert(sourced.suggestion.audience_type);
            techs.insert(sourced.suggestion.tech_requirement);
        }
        assert_eq!(audiences.len(), AudienceType::all().len());
        assert_eq!(techs.len(), TechRequirement::all().len());
    }

    #[tokio::test]
    async fn test_random_source_message_mentions_request() {
        let sourced = RandomSuggestionSource::with_seed(1).suggest(&request()).await;
        assert!(sourced.message.contains("4-hour Concert"));
        assert!(sourced.message.contains("250000"));
        assert!(sourced.message.contains("catering"));
    }

    #[test]
    fn test_origin_describe() {
        let origin = SuggestionOrigin::Model {
            model_id: "google/flan-t5-small".to_string(),
            fell_back: true,
        };
        assert!(origin.describe().contains("unavailable"));
        assert_eq!(SuggestionOrigin::Random.describe(), "random placeholder");
    }
}
