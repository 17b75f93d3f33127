use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an [`AnalysisResult`] came from. Kept in-process only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisSource {
    #[default]
    Model,
    Fallback,
}

/// The transient outcome of analysing one image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub probability: f64,
    pub stage: String,
    pub reasoning: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub source: AnalysisSource,
}

impl AnalysisResult {
    pub fn is_fallback(&self) -> bool {
        self.source == AnalysisSource::Fallback
    }
}

/// Insert payload for the `analysis_records` table.
///
/// `image_name`/`image_url` are filled in by the repository once the image
/// upload has succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAnalysis {
    pub user_id: Uuid,
    pub probability: f64,
    pub stage: String,
    pub reasoning: String,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewAnalysis {
    pub fn from_result(user_id: Uuid, result: &AnalysisResult) -> Self {
        Self {
            user_id,
            probability: result.probability,
            stage: result.stage.clone(),
            reasoning: result.reasoning.clone(),
            image_name: None,
            image_url: None,
        }
    }
}

/// A row of the `analysis_records` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    pub created_at: DateTime<Utc>,
}
