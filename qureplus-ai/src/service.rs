use async_trait::async_trait;
use chrono::Utc;
use qureplus_common::models::{AnalysisResult, AnalysisSource, ImageUpload};
use qureplus_common::traits::ImageAnalyzer;
use tracing::{error, info, warn};

use crate::fallback::simulate_analysis;
use crate::models::{ModelAssessment, ProviderConfig};
use crate::provider::OpenAIVisionProvider;

/// Image analysis with a synthetic fallback.
///
/// Without a provider every call is answered by the fallback; with one, any
/// provider error is logged and replaced by the fallback.
pub struct AnalysisService {
    provider: Option<OpenAIVisionProvider>,
}

impl AnalysisService {
    pub fn new(provider: Option<OpenAIVisionProvider>) -> Self {
        Self { provider }
    }

    /// Builds the service from an optional config. A blank API key counts as missing.
    pub fn from_config(config: Option<ProviderConfig>) -> anyhow::Result<Self> {
        let provider = match config {
            Some(cfg) if !cfg.api_key.trim().is_empty() => {
                info!("Vision analysis enabled (model={})", cfg.default_model);
                Some(OpenAIVisionProvider::new(cfg)?)
            }
            _ => {
                warn!("No vision API key configured, analyses will be simulated");
                None
            }
        };
        Ok(Self { provider })
    }

    /// Fallback-only service.
    pub fn simulated() -> Self {
        Self { provider: None }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn analyze(&self, image: &ImageUpload) -> AnalysisResult {
        let Some(provider) = self.provider.as_ref() else {
            warn!("No API key found, using simulated analysis");
            return simulate_analysis(&mut rand::rng());
        };

        match provider.assess(image).await {
            Ok(assessment) => finalize(assessment),
            Err(e) => {
                error!("AI analysis failed: {:#}", e);
                warn!("Falling back to simulated analysis");
                simulate_analysis(&mut rand::rng())
            }
        }
    }
}

fn finalize(assessment: ModelAssessment) -> AnalysisResult {
    AnalysisResult {
        probability: assessment.probability.clamp(0.0, 100.0),
        stage: assessment.stage,
        reasoning: assessment.reasoning,
        timestamp: Utc::now(),
        source: AnalysisSource::Model,
    }
}

#[async_trait]
impl ImageAnalyzer for AnalysisService {
    async fn analyze_image(&self, image: &ImageUpload) -> AnalysisResult {
        self.analyze(image).await
    }
}
