// File: qureplus-core/src/test_utils/memory.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use qureplus_common::models::{
    AnalysisRecord, ImageUpload, NewAnalysis, NewUser, UserAnalysisSummary, UserDetail, UserRecord,
};
use qureplus_common::traits::LeadRepository;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::Error;

/// A `LeadRepository` kept entirely in memory, with switches to simulate outages.
#[derive(Default)]
pub struct InMemoryLeadRepository {
    users: DashMap<Uuid, UserRecord>,
    analyses: Mutex<Vec<AnalysisRecord>>,
    fail_users: AtomicBool,
    fail_analyses: AtomicBool,
    fail_reads: AtomicBool,
    analysis_gate: Option<Arc<Notify>>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each `create_analysis` call waits for one `release_analysis()`.
    pub fn with_gated_analyses(mut self) -> Self {
        self.analysis_gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release_analysis(&self) {
        if let Some(gate) = &self.analysis_gate {
            gate.notify_one();
        }
    }

    pub fn set_fail_users(&self, fail: bool) {
        self.fail_users.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_analyses(&self, fail: bool) {
        self.fail_analyses.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Backend("500: simulated failure".into()));
        }
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn analyses(&self) -> Vec<AnalysisRecord> {
        self.analyses.lock().clone()
    }

    /// Inserts a user directly, bypassing the failure switch.
    pub fn seed_user(&self, user: UserRecord) {
        self.users.insert(user.id, user);
    }

    /// Inserts an analysis directly, bypassing the failure switch.
    pub fn seed_analysis(&self, record: AnalysisRecord) {
        self.analyses.lock().push(record);
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn create_user(&self, user: &NewUser) -> Result<UserRecord, Error> {
        if self.fail_users.load(Ordering::SeqCst) {
            return Err(Error::BackendUnavailable("simulated outage".into()));
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            full_name: user.full_name.clone(),
            age: user.age,
            city: user.city.clone(),
            mobile: user.mobile.clone(),
            email: user.email.clone(),
            created_at: Utc::now(),
        };
        self.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn create_analysis(
        &self,
        analysis: &NewAnalysis,
        image: Option<&ImageUpload>,
    ) -> Result<AnalysisRecord, Error> {
        if let Some(gate) = &self.analysis_gate {
            gate.notified().await;
        }
        if self.fail_analyses.load(Ordering::SeqCst) {
            return Err(Error::Backend("500: simulated failure".into()));
        }
        if !self.users.contains_key(&analysis.user_id) {
            return Err(Error::NotFound(format!("user {}", analysis.user_id)));
        }
        let image_name = image.map(|i| format!("{}-{}", Utc::now().timestamp_millis(), i.file_name));
        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            user_id: analysis.user_id,
            image_url: image_name
                .as_ref()
                .map(|n| format!("memory://analysis-images/{}/{}", analysis.user_id, n)),
            image_name,
            probability: Some(analysis.probability),
            stage: Some(analysis.stage.clone()),
            reasoning: Some(analysis.reasoning.clone()),
            created_at: Utc::now(),
        };
        self.analyses.lock().push(record.clone());
        Ok(record)
    }

    async fn list_user_summaries(&self) -> Result<Vec<UserAnalysisSummary>, Error> {
        self.check_reads()?;
        let analyses = self.analyses.lock().clone();
        let mut rows: Vec<UserAnalysisSummary> = self
            .users
            .iter()
            .map(|entry| {
                let user = entry.value();
                let mine: Vec<&AnalysisRecord> =
                    analyses.iter().filter(|a| a.user_id == user.id).collect();
                let probabilities: Vec<f64> = mine.iter().filter_map(|a| a.probability).collect();
                UserAnalysisSummary {
                    id: user.id,
                    full_name: user.full_name.clone(),
                    age: user.age,
                    city: user.city.clone(),
                    mobile: user.mobile.clone(),
                    email: user.email.clone(),
                    user_created_at: user.created_at,
                    total_analyses: mine.len() as i64,
                    last_analysis_date: mine.iter().map(|a| a.created_at).max(),
                    avg_probability: (!probabilities.is_empty())
                        .then(|| probabilities.iter().sum::<f64>() / probabilities.len() as f64),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.user_created_at.cmp(&a.user_created_at));
        Ok(rows)
    }

    async fn get_user_detail(&self, user_id: Uuid) -> Result<UserDetail, Error> {
        self.check_reads()?;
        let user = self
            .users
            .get(&user_id)
            .map(|u| u.value().clone())
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;
        let mut analyses: Vec<AnalysisRecord> = self
            .analyses
            .lock()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        analyses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(UserDetail { user, analyses })
    }
}
