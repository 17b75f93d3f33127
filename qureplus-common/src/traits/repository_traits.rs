use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::{
    AnalysisRecord, ImageUpload, NewAnalysis, NewUser, UserAnalysisSummary, UserDetail, UserRecord,
};

/// The hosted backend that owns users, analysis records and stored images.
///
/// Callers hold it as `Option<Arc<dyn LeadRepository>>`; `None` means the
/// backend is not configured.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, Error>;

    /// Stores an analysis record, uploading `image` first when given.
    /// The owning user must already exist.
    async fn create_analysis(
        &self,
        analysis: &NewAnalysis,
        image: Option<&ImageUpload>,
    ) -> Result<AnalysisRecord, Error>;

    /// Per-user aggregates, most recently created user first.
    async fn list_user_summaries(&self) -> Result<Vec<UserAnalysisSummary>, Error>;

    async fn get_user_detail(&self, user_id: Uuid) -> Result<UserDetail, Error>;
}
