//! Ollama client for indexing and querying test results.
//!
//! Two operations, both against the `/api/generate` endpoint: `push` hands
//! the summary text to the model for later questions, `query` asks a
//! free-text question. Calls are blocking from the user's point of view,
//! made at most once per user action, with no internal retry; transport
//! failures and non-2xx responses surface as-is.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Prompt prefix for indexing parsed results.
const INDEX_PROMPT: &str = "Index the following test results for semantic search:";

/// Prompt prefix for free-text questions.
const QUERY_PROMPT: &str = "Based on the indexed test results, answer this question:";

/// Configuration for the LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub ollama_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model_name: "llama3".to_string(),
            temperature: 0.1,
            timeout_seconds: 300,
        }
    }
}

/// Ollama generate API request.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// Ollama generate API response.
///
/// Only the text field matters here; a response without it means
/// "no answer", not a protocol fault.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Client for the Ollama generate API.
pub struct OllamaClient {
    config: LlmConfig,
    http_client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new client with the given settings.
    pub fn new(config: LlmConfig) -> Self {
        info!(
            "Initializing Ollama client for model {} at {}",
            config.model_name, config.ollama_url
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Push the summary text to the model for indexing.
    pub async fn push(&self, summary: &str) -> Result<()> {
        let prompt = format!("{}\n{}", INDEX_PROMPT, summary);
        self.generate(&prompt).await?;

        info!("Test results pushed to Ollama");
        Ok(())
    }

    /// Ask a free-text question about the indexed results.
    ///
    /// Returns `None` when the model reply carries no text field.
    pub async fn query(&self, question: &str) -> Result<Option<String>> {
        let prompt = format!("{} {}", QUERY_PROMPT, question);
        let response = self.generate(&prompt).await?;

        Ok(response.response)
    }

    /// Send one generate request and parse the reply.
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse> {
        let url = format!("{}/api/generate", self.config.ollama_url);

        let request = GenerateRequest {
            model: self.config.model_name.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        debug!("Sending generate request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!(
                        "Request timed out after {}s",
                        self.config.timeout_seconds
                    )
                } else if e.is_connect() {
                    anyhow::anyhow!(
                        "Cannot connect to Ollama at {}. Is Ollama running?",
                        self.config.ollama_url
                    )
                } else {
                    anyhow::anyhow!("Failed to send request: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Ollama API error {}: {}", status, body));
        }

        response
            .json()
            .await
            .context("Failed to parse Ollama response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model_name, "llama3");
        assert_eq!(config.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateRequest {
            model: "llama3".to_string(),
            prompt: format!("{}\nTest Summary:", INDEX_PROMPT),
            stream: false,
            options: GenerateOptions { temperature: 0.1 },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3");
        assert_eq!(json["stream"], false);
        assert!(json["prompt"]
            .as_str()
            .unwrap()
            .starts_with("Index the following test results"));
    }

    #[test]
    fn test_generate_response_with_text() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"response": "All three tests passed."}"#).unwrap();
        assert_eq!(response.response.as_deref(), Some("All three tests passed."));
    }

    #[test]
    fn test_generate_response_without_text_is_no_answer() {
        let response: GenerateResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(response.response.is_none());
    }
}
