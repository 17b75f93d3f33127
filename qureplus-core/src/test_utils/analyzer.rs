use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use qureplus_common::models::{AnalysisResult, AnalysisSource, ImageUpload};
use qureplus_common::traits::ImageAnalyzer;
use tokio::sync::Notify;

/// Returns the same assessment every time. With a gate, each call waits for
/// one `release()` before answering.
pub struct FixedAnalyzer {
    probability: f64,
    stage: String,
    reasoning: String,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FixedAnalyzer {
    pub fn new(probability: f64, stage: impl Into<String>) -> Self {
        Self {
            probability,
            stage: stage.into(),
            reasoning: "Fixed test assessment.".to_string(),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageAnalyzer for FixedAnalyzer {
    async fn analyze_image(&self, _image: &ImageUpload) -> AnalysisResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        AnalysisResult {
            probability: self.probability,
            stage: self.stage.clone(),
            reasoning: self.reasoning.clone(),
            timestamp: Utc::now(),
            source: AnalysisSource::Model,
        }
    }
}
