//! Hugging Face inference integration for PlanWise
//!
//! This crate provides the hosted-inference implementation of the LLMProvider trait.

mod client;
mod config;


pub use client::HuggingFaceClient;
pub use config::{
    model_url, HuggingFaceConfig, DEFAULT_API_URL, DEFAULT_MODEL_ID, INFERENCE_API_BASE,
};

// Re-export core types for convenience
pub use planwise_core::{LLMProvider, GenerationConfig, GenerationResult, Error, Result};
