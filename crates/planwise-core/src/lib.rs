//! Core types and logic for PlanWise
//!
//! This crate holds the budget and confidence estimation engine: the
//! response parser, the placeholder budget model and the confidence scorer,
//! together with the capability traits (`LLMProvider`, `SuggestionSource`)
//! that let the front end swap how suggestions are produced.

pub mod confidence;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod llm;
pub mod parser;
pub mod source;
pub mod types;


pub use confidence::ConfidenceAssessment;
pub use engine::PlanningEngine;
pub use error::{Error, Result};
pub use llm::{GenerationConfig, GenerationResult, LLMProvider};
pub use parser::ParsedResponse;
pub use source::{
    RandomSuggestionSource, SourcedSuggestion, StaticTextSource, SuggestionOrigin,
    SuggestionSource,
};
pub use types::*;
