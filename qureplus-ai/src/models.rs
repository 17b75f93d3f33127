use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Configuration for the vision provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL for API requests
    pub api_base: Option<String>,

    /// API key for authentication
    pub api_key: String,

    /// Model to send images to
    pub default_model: String,

    pub max_tokens: u32,

    /// Kept low so repeated submissions of the same image stay stable
    pub temperature: f64,

    /// `detail` hint sent with the image part
    pub image_detail: String,

    pub request_timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: None,
            api_key: api_key.into(),
            default_model: DEFAULT_VISION_MODEL.to_string(),
            max_tokens: 500,
            temperature: 0.1,
            image_detail: "high".to_string(),
            request_timeout_secs: 60,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }
}

/// The JSON object the model is instructed to answer with.
///
/// Deserialization is strict: a missing field or a wrongly typed one
/// (e.g. `"probability": "85"`) fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAssessment {
    pub probability: f64,
    pub stage: String,
    pub reasoning: String,
}
