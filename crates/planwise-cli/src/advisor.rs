//! Model-backed suggestion source

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use planwise_core::{
    parser, Error, EventRequest, GenerationConfig, LLMProvider, Result, SourcedSuggestion,
    SuggestionOrigin, SuggestionSource,
};

/// Text parsed in place of a model answer when the model call fails
pub const FALLBACK_RESPONSE: &str = "AI could not generate structured response.";

/// Asks a text-generation model for a greeting, a summary and the
/// audience/tech prediction for an event
pub struct EventAdvisor<L: LLMProvider> {
    llm: L,
    timeout: Duration,
    max_tokens: u32,
}

impl<L: LLMProvider> EventAdvisor<L> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new advisor
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            timeout: Self::DEFAULT_TIMEOUT,
            max_tokens: 200,
        }
    }

    /// Bound how long a model call may take before defaults are used
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cap the length of the model answer
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Build the planning prompt for a request
    pub fn build_prompt(&self, request: &EventRequest) -> String {
        format!(
            "You are an event planning assistant.\n\
            \n\
            The user has shared:\n\
            - Event Type: {}\n\
            - Duration: {} hours\n\
            - Budget: ₹{}\n\
            - Catering: {}\n\
            \n\
            Your tasks:\n\
            1. Greet the user.\n\
            2. Summarize their input values.\n\
            3. Compliment their idea and wish them luck.\n\
            4. Predict:\n   \
               - Audience Type (choose one: Mixed, Families, Public, Professionals, Students)\n   \
               - Tech Requirement (choose one: Low, Medium, High)\n\
            \n\
            Format response exactly like this:\n\
            ---\n\
            Greeting: <your greeting>\n\
            Summary: <your summary>\n\
            Compliment: <your compliment>\n\
            Audience Type: <one of allowed values>\n\
            Tech Requirement: <one of allowed values>\n\
            ---\n",
            request.event_type,
            request.duration_hours,
            request.user_budget,
            if request.catering_required { "Yes" } else { "No" },
        )
    }

    /// Raw model answer for a request
    pub async fn ask(&self, request: &EventRequest) -> Result<String> {
        let prompt = self.build_prompt(request);
        debug!(prompt = %prompt, "requesting suggestion");

        let config = GenerationConfig {
            model_id: self.llm.model_id().to_string(),
            max_tokens: self.max_tokens,
            timeout: self.timeout,
            ..Default::default()
        };

        // Providers are asked to honour the timeout; enforce it here as well.
        match timeout(self.timeout, self.llm.generate_with_config(&prompt, &config)).await {
            Ok(result) => Ok(result?.text),
            Err(_) => Err(Error::Timeout(format!(
                "no answer from {} within {:?}",
                self.llm.model_id(),
                self.timeout
            ))),
        }
    }
}

#[async_trait]
impl<L: LLMProvider> SuggestionSource for EventAdvisor<L> {
    async fn suggest(&self, request: &EventRequest) -> SourcedSuggestion {
        let (text, fell_back) = match self.ask(request).await {
            Ok(text) => (text, false),
            Err(e) => {
                warn!(error = %e, "model suggestion failed, using defaults");
                (FALLBACK_RESPONSE.to_string(), true)
            }
        };

        let parsed = parser::parse_response(&text);
        debug!(suggestion = ?parsed.suggestion, fell_back, "parsed model suggestion");

        SourcedSuggestion {
            message: parsed.message,
            suggestion: parsed.suggestion,
            origin: SuggestionOrigin::Model {
                model_id: self.llm.model_id().to_string(),
                fell_back,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwise_core::{
        AudienceType, EventType, GenerationResult, Suggestion, TechRequirement,
    };
    use std::sync::Mutex;

    enum Behaviour {
        Reply(&'static str),
        Fail,
        Hang,
    }

    struct MockLLM {
        behaviour: Behaviour,
        last_prompt: Mutex<Option<String>>,
        last_max_tokens: Mutex<Option<u32>>,
    }

    impl MockLLM {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                last_prompt: Mutex::new(None),
                last_max_tokens: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for MockLLM {
        async fn connect(&mut self) -> Result<()> {
            Ok(())
        }

        async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
            self.generate_with_config(prompt, &GenerationConfig::default()).await
        }

        async fn generate_with_config(
            &self,
            prompt: &str,
            config: &GenerationConfig,
        ) -> Result<GenerationResult> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            *self.last_max_tokens.lock().unwrap() = Some(config.max_tokens);
            match self.behaviour {
                Behaviour::Reply(text) => Ok(GenerationResult {
                    text: text.to_string(),
                    model_id: config.model_id.clone(),
                }),
                Behaviour::Fail => Err(Error::Network("connection refused".to_string())),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Err(Error::LLMProvider("should have timed out".to_string()))
                }
            }
        }

        fn model_id(&self) -> &str {
            "mock/model"
        }
    }

    fn request() -> EventRequest {
        EventRequest::new(EventType::Conference, 5, 125_000, true).unwrap()
    }

    #[test]
    fn test_prompt_contains_request_values() {
        let advisor = EventAdvisor::new(MockLLM::new(Behaviour::Fail));
        let prompt = advisor.build_prompt(&request());

        assert!(prompt.contains("- Event Type: Conference"));
        assert!(prompt.contains("- Duration: 5 hours"));
        assert!(prompt.contains("- Budget: ₹125000"));
        assert!(prompt.contains("- Catering: Yes"));
        assert!(prompt.contains("   - Audience Type (choose one: Mixed, Families, Public, Professionals, Students)"));
        assert_eq!(prompt.matches("---").count(), 2);
    }

    #[tokio::test]
    async fn test_suggest_parses_model_answer() {
        let advisor = EventAdvisor::new(MockLLM::new(Behaviour::Reply(
            "---\nGreeting: Hello!\nAudience Type: Professionals\nTech Requirement: High\n---",
        )));

        let sourced = advisor.suggest(&request()).await;

        assert_eq!(
            sourced.suggestion,
            Suggestion::new(AudienceType::Professionals, TechRequirement::High)
        );
        assert!(sourced.message.starts_with("Greeting: Hello!"));
        assert_eq!(
            sourced.origin,
            SuggestionOrigin::Model {
                model_id: "mock/model".to_string(),
                fell_back: false
            }
        );
        let prompt = advisor.llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Conference"));
    }

    #[tokio::test]
    async fn test_max_tokens_reaches_provider() {
        let reply = Behaviour::Reply("Audience Type: Public");

        let advisor = EventAdvisor::new(MockLLM::new(reply));
        advisor.ask(&request()).await.unwrap();
        assert_eq!(*advisor.llm.last_max_tokens.lock().unwrap(), Some(200));

        let advisor = EventAdvisor::new(MockLLM::new(Behaviour::Reply("Audience Type: Public")))
            .with_max_tokens(64);
        advisor.ask(&request()).await.unwrap();
        assert_eq!(*advisor.llm.last_max_tokens.lock().unwrap(), Some(64));
    }

    #[tokio::test]
    async fn test_suggest_falls_back_on_error() {
        let advisor = EventAdvisor::new(MockLLM::new(Behaviour::Fail));

        let sourced = advisor.suggest(&request()).await;

        assert_eq!(sourced.suggestion, Suggestion::default());
        assert_eq!(sourced.message, FALLBACK_RESPONSE);
        assert!(matches!(
            sourced.origin,
            SuggestionOrigin::Model { fell_back: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_suggest_falls_back_on_timeout() {
        let advisor = EventAdvisor::new(MockLLM::new(Behaviour::Hang))
            .with_timeout(Duration::from_millis(20));

        assert!(matches!(advisor.ask(&request()).await, Err(Error::Timeout(_))));

        let sourced = advisor.suggest(&request()).await;
        assert_eq!(sourced.suggestion, Suggestion::default());
        assert!(matches!(
            sourced.origin,
            SuggestionOrigin::Model { fell_back: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_unrecognised_answer_uses_defaults() {
        let advisor = EventAdvisor::new(MockLLM::new(Behaviour::Reply(
            "Audience Type: General\nTech Requirement: Very high",
        )));

        let sourced = advisor.suggest(&request()).await;

        assert_eq!(sourced.suggestion, Suggestion::default());
        assert!(matches!(
            sourced.origin,
            SuggestionOrigin::Model { fell_back: false, .. }
        ));
    }
}
