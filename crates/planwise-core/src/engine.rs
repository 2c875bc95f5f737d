//! Planning engine: one suggestion source plus the deterministic estimators

use tracing::debug;

use crate::confidence;
use crate::estimator;
use crate::source::{SourcedSuggestion, SuggestionSource};
use crate::types::{EventPlan, EventRequest, Suggestion};

/// Runs a request through suggestion, budget estimation and scoring
pub struct PlanningEngine<S: SuggestionSource> {
    source: S,
}

impl<S: SuggestionSource> PlanningEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Ask the configured source for a suggestion
    pub async fn suggest(&self, request: &EventRequest) -> SourcedSuggestion {
        self.source.suggest(request).await
    }

    /// Estimate budget and confidence for a request and a (possibly
    /// user-edited) suggestion
    pub fn evaluate(&self, request: &EventRequest, suggestion: Suggestion) -> EventPlan {
        let predicted_budget = estimator::estimate(
            request.event_type,
            request.duration_hours,
            request.catering_required,
        );
        let confidence = confidence::assess(request.user_budget, predicted_budget);

        debug!(
            predicted_budget,
            score = confidence.score,
            "evaluated {}",
            request.event_type
        );

        EventPlan {
            request: request.clone(),
            suggestion,
            predicted_budget,
            confidence,
        }
    }

    /// Suggest, then evaluate with the suggestion as given
    pub async fn plan(&self, request: &EventRequest) -> (SourcedSuggestion, EventPlan) {
        let sourced = self.suggest(request).await;
        let plan = self.evaluate(request, sourced.suggestion);
        (sourced, plan)
    }
}
