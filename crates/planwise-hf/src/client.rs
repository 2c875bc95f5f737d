//! Hugging Face inference API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use planwise_core::{Error, GenerationConfig, GenerationResult, LLMProvider, Result};

use crate::config::HuggingFaceConfig;

/// Client for a text-generation model behind the Hugging Face inference API
pub struct HuggingFaceClient {
    config: HuggingFaceConfig,
    client: Client,
    connected: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct InferenceParameters {
    pub max_new_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedText {
    generated_text: String,
}

/// Shapes the inference API answers with
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Failure { error: String },
}

impl InferenceResponse {
    pub(crate) fn into_text(self) -> Result<String> {
        match self {
            InferenceResponse::Batch(results) => results
                .into_iter()
                .next()
                .map(|r| r.generated_text)
                .ok_or_else(|| Error::LLMProvider("Inference API returned no results".to_string())),
            InferenceResponse::Single(result) => Ok(result.generated_text),
            InferenceResponse::Failure { error } => {
                Err(Error::LLMProvider(format!("Inference API error: {}", error)))
            }
        }
    }
}

/// Pull the generated text out of a raw response body
pub(crate) fn extract_generated_text(body: &str) -> Result<String> {
    let response: InferenceResponse = serde_json::from_str(body).map_err(|e| {
        Error::Serialization(format!("Unexpected inference response ({}): {}", e, body))
    })?;
    response.into_text()
}

impl HuggingFaceClient {
    /// Create a new client from configuration
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            connected: false,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = HuggingFaceConfig::from_env()?;
        Self::new(config)
    }

    /// Set the model to use for generation
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.config = self.config.with_model(model_id);
        self
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    pub(crate) fn build_request<'a>(
        prompt: &'a str,
        config: &GenerationConfig,
    ) -> InferenceRequest<'a> {
        InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        }
    }

    /// Perform the actual inference request
    async fn perform_generation(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        if !self.connected {
            return Err(Error::Authentication(
                "Not authenticated. Call connect() first.".to_string(),
            ));
        }

        let request_body = Self::build_request(prompt, config);

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_token))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::LLMProvider(format!(
                "Inference API request failed with status {}: {}",
                status, body
            )));
        }

        debug!(bytes = body.len(), "received inference response");
        extract_generated_text(&body)
    }
}

#[async_trait]
impl LLMProvider for HuggingFaceClient {
    async fn connect(&mut self) -> Result<()> {
        if !self.config.has_token() {
            return Err(Error::Authentication(
                "No Hugging Face API token configured".to_string(),
            ));
        }

        self.connected = true;
        Ok(())
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let config = GenerationConfig {
            model_id: self.config.model_id.clone(),
            ..Default::default()
        };
        self.generate_with_config(prompt, &config).await
    }

    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let generation_future = self.perform_generation(prompt, config);

        let text = match timeout(config.timeout, generation_future).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Timeout("Request timed out".to_string())),
        };

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
        })
    }

    fn model_id(&self) -> &str {
        &self.config.model_id
    }
}
