use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use once_cell::sync::Lazy;
use qureplus_common::models::ImageUpload;
use regex::Regex;
use reqwest::Client;

use crate::models::{ModelAssessment, ProviderConfig};
use crate::prompt::build_request;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\n?|\n?```").expect("static regex"));

/// OpenAI-compatible chat-completions provider with image input
pub struct OpenAIVisionProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIVisionProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn name(&self) -> &str {
        "openai"
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// One request, no retries. Any deviation from the expected shape is an error.
    pub async fn assess(&self, image: &ImageUpload) -> anyhow::Result<ModelAssessment> {
        let api_base = self.config.api_base();
        let request_payload = build_request(&self.config, &image.to_data_url());

        tracing::info!(
            "Making vision API call to {}/chat/completions (model={}, image={} bytes)",
            api_base,
            self.config.default_model,
            image.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);

        if !status.is_success() {
            tracing::error!("API Error: {} {}", status, response_text);
            bail!("API request failed: {} - {}", status, response_text);
        }

        let data = match serde_json::from_str::<serde_json::Value>(&response_text) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to parse API response as JSON: {:?}", e);
                return Err(anyhow!("API returned non-JSON response: {}", e));
            }
        };

        let content = data
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| anyhow!("No response content received"))?;

        parse_assessment(content)
    }
}

/// Removes ```` ```json ```` / ```` ``` ```` markers the model sometimes wraps its answer in.
pub fn strip_code_fences(content: &str) -> String {
    CODE_FENCE.replace_all(content.trim(), "").trim().to_string()
}

/// Parses the model's text answer into an assessment.
pub fn parse_assessment(content: &str) -> anyhow::Result<ModelAssessment> {
    let cleaned = strip_code_fences(content);
    serde_json::from_str::<ModelAssessment>(&cleaned)
        .with_context(|| "Invalid response format from AI")
}
