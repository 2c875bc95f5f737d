//! Hugging Face inference configuration

use serde::{Deserialize, Serialize};
use std::env;
use planwise_core::{Error, Result};

/// Base of the serverless inference API; the model id is appended
pub const INFERENCE_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Hosted flan-t5-small endpoint on the serverless inference API
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/google/flan-t5-small";

/// Model id reported when none is configured
pub const DEFAULT_MODEL_ID: &str = "google/flan-t5-small";

/// Serverless inference URL for a model id
pub fn model_url(model_id: &str) -> String {
    format!("{}/{}", INFERENCE_API_BASE, model_id.trim_matches('/'))
}

/// Configuration for the Hugging Face client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    pub api_token: String,
    pub api_url: String,
    pub model_id: String,
}

impl HuggingFaceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_token = env::var("HF_API_TOKEN")
            .or_else(|_| env::var("HUGGINGFACE_API_TOKEN"))
            .map_err(|_| Error::Configuration(
                "HF_API_TOKEN or HUGGINGFACE_API_TOKEN environment variable not found".to_string()
            ))?;

        let model_id = env::var("HF_MODEL_ID")
            .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

        // Without an explicit endpoint, call the configured model itself.
        let api_url = env::var("HF_API_URL")
            .unwrap_or_else(|_| model_url(&model_id));

        Ok(Self {
            api_token,
            api_url,
            model_id,
        })
    }

    /// Create configuration with explicit token and default endpoint
    pub fn new(api_token: String) -> Self {
        Self {
            api_token,
            api_url: DEFAULT_API_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }

    /// Point at a different inference endpoint
    pub fn with_endpoint(mut self, api_url: impl Into<String>, model_id: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.model_id = model_id.into();
        self
    }

    /// Switch to another model. A serverless endpoint follows the model;
    /// a custom endpoint is left alone.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        if self.api_url == model_url(&self.model_id) {
            self.api_url = model_url(&model_id);
        }
        self.model_id = model_id;
        self
    }

    /// Whether a usable token is set (not empty, not the `<YOUR_...>` placeholder)
    pub fn has_token(&self) -> bool {
        let token = self.api_token.trim();
        !token.is_empty() && !(token.starts_with('<') && token.ends_with('>'))
    }
}
