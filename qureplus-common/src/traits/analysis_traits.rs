use async_trait::async_trait;

use crate::models::{AnalysisResult, ImageUpload};

/// Produces exactly one result per image. Implementations absorb their own
/// failures, so there is no error path.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze_image(&self, image: &ImageUpload) -> AnalysisResult;
}
