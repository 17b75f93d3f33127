use once_cell::sync::Lazy;
use qureplus_common::models::Stage;
use serde_json::{Value, json};

use crate::models::ProviderConfig;

pub static SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    let stages: Vec<String> = Stage::ALL
        .iter()
        .map(|s| format!("- {}: {}", s.label(), s.description()))
        .collect();

    format!(
        "You are a medical AI assistant specializing in varicose vein analysis. \
Analyze leg images and provide:\n\
1. Probability percentage (0-100%) of varicose vein presence\n\
2. Stage classification based on medical standards\n\
3. Brief medical reasoning\n\n\
Stages:\n{}\n\n\
Always respond in valid JSON format only.",
        stages.join("\n")
    )
});

pub const USER_PROMPT: &str = r#"Analyze this leg image for varicose veins. Respond only with JSON in this exact format:
{
  "probability": number,
  "stage": "string",
  "reasoning": "string"
}"#;

/// Chat-completions body carrying the instructions and the image as a data URL.
pub fn build_request(config: &ProviderConfig, image_data_url: &str) -> Value {
    json!({
        "model": config.default_model,
        "messages": [
            {
                "role": "system",
                "content": SYSTEM_PROMPT.as_str(),
            },
            {
                "role": "user",
                "content": [
                    { "type": "text", "text": USER_PROMPT },
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": image_data_url,
                            "detail": config.image_detail,
                        }
                    }
                ]
            }
        ],
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
    })
}
