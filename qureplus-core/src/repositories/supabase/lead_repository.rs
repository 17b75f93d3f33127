use async_trait::async_trait;
use qureplus_common::models::{
    AnalysisRecord, ImageUpload, NewAnalysis, NewUser, UserAnalysisSummary, UserDetail, UserRecord,
};
use qureplus_common::traits::LeadRepository;
use tracing::{info, warn};
use uuid::Uuid;

use crate::Error;
use crate::repositories::supabase::client::SupabaseClient;

pub const USERS_TABLE: &str = "users";
pub const ANALYSES_TABLE: &str = "analysis_records";
pub const SUMMARY_VIEW: &str = "user_analysis_summary";

pub struct SupabaseLeadRepository {
    client: SupabaseClient,
}

impl SupabaseLeadRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }

    /// Logs the current user count; used once at startup to confirm connectivity.
    pub async fn check_connection(&self) -> Result<Option<u64>, Error> {
        let count = self.client.count_rows(USERS_TABLE).await?;
        info!(
            "Supabase connected successfully. Users count: {}",
            count.map(|c| c.to_string()).unwrap_or_else(|| "unknown".into())
        );
        Ok(count)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<UserRecord, Error> {
        let mut rows: Vec<UserRecord> = self
            .client
            .select(
                USERS_TABLE,
                &[("select", "*".to_string()), ("id", format!("eq.{user_id}"))],
            )
            .await?;
        if rows.is_empty() {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        Ok(rows.swap_remove(0))
    }

    async fn list_analyses(&self, user_id: Uuid) -> Result<Vec<AnalysisRecord>, Error> {
        self.client
            .select(
                ANALYSES_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("user_id", format!("eq.{user_id}")),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await
    }
}

#[async_trait]
impl LeadRepository for SupabaseLeadRepository {
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, Error> {
        let saved: UserRecord = self.client.insert_one(USERS_TABLE, user).await?;
        info!("User data inserted successfully: {}", saved.id);
        Ok(saved)
    }

    async fn create_analysis(
        &self,
        analysis: &NewAnalysis,
        image: Option<&ImageUpload>,
    ) -> Result<AnalysisRecord, Error> {
        let mut row = analysis.clone();

        if let Some(image) = image {
            match self.client.upload_analysis_image(analysis.user_id, image).await {
                Ok(stored) => {
                    info!("Image uploaded successfully: {}", stored.public_url);
                    row.image_name = Some(stored.name);
                    row.image_url = Some(stored.public_url);
                }
                // the record is still worth keeping without its image
                Err(e) => warn!("Error uploading image: {}", e),
            }
        }

        let saved: AnalysisRecord = self.client.insert_one(ANALYSES_TABLE, &row).await?;
        info!("Analysis record inserted successfully: {}", saved.id);
        Ok(saved)
    }

    async fn list_user_summaries(&self) -> Result<Vec<UserAnalysisSummary>, Error> {
        self.client
            .select(
                SUMMARY_VIEW,
                &[
                    ("select", "*".to_string()),
                    ("order", "user_created_at.desc".to_string()),
                ],
            )
            .await
    }

    async fn get_user_detail(&self, user_id: Uuid) -> Result<UserDetail, Error> {
        let user = self.get_user(user_id).await?;
        let analyses = self.list_analyses(user_id).await?;
        Ok(UserDetail { user, analyses })
    }
}
