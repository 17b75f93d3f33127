use qureplus_common::models::{
    AnalysisResult, FieldErrors, ImageUpload, Stage, StageTone, UserRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStep {
    #[default]
    Form,
    Upload,
    Results,
}

/// Mutable session state. Only ever touched under the controller's lock.
#[derive(Debug, Default)]
pub(crate) struct IntakeState {
    pub step: IntakeStep,
    pub user: Option<UserRecord>,
    pub image: Option<ImageUpload>,
    pub result: Option<AnalysisResult>,
    pub field_errors: FieldErrors,
    pub last_error: Option<String>,
    /// Bumped on every reset so in-flight work can tell it is stale.
    pub generation: u64,
}

impl IntakeState {
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = IntakeState {
            generation,
            ..IntakeState::default()
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePreview {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub data_url: String,
}

impl From<&ImageUpload> for ImagePreview {
    fn from(image: &ImageUpload) -> Self {
        Self {
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            size_bytes: image.len(),
            data_url: image.to_data_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultView {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub tone: StageTone,
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            tone: Stage::tone_for_label(&result.stage),
            result: result.clone(),
        }
    }
}

/// Read-only snapshot of an intake, suitable for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeView {
    pub step: IntakeStep,
    pub user: Option<UserRecord>,
    pub image: Option<ImagePreview>,
    pub result: Option<ResultView>,
    pub can_analyze: bool,
    pub is_submitting: bool,
    pub is_analyzing: bool,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
}
