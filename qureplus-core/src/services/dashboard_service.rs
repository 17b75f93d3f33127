use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use qureplus_common::models::{UserAnalysisSummary, UserDetail};
use qureplus_common::traits::LeadRepository;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::Error;
use crate::export::csv::{CsvExport, export_filename, render_summary_csv};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_analyses: i64,
    /// Mean of the per-user averages; users without one count as 0.
    pub avg_probability: f64,
    /// Users whose last analysis falls in the current calendar month.
    pub active_this_month: usize,
}

impl DashboardStats {
    pub fn compute(rows: &[UserAnalysisSummary], now: DateTime<Utc>) -> Self {
        let total_users = rows.len();
        let total_analyses = rows.iter().map(|r| r.total_analyses).sum();
        let avg_probability = if total_users == 0 {
            0.0
        } else {
            rows.iter().map(|r| r.avg_probability.unwrap_or(0.0)).sum::<f64>() / total_users as f64
        };
        let active_this_month = rows
            .iter()
            .filter_map(|r| r.last_analysis_date)
            .filter(|d| d.year() == now.year() && d.month() == now.month())
            .count();

        Self {
            total_users,
            total_analyses,
            avg_probability,
            active_this_month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub users: Vec<UserAnalysisSummary>,
}

/// Read side of the admin dashboard.
pub struct DashboardService {
    repo: Option<Arc<dyn LeadRepository>>,
}

impl DashboardService {
    pub fn new(repo: Option<Arc<dyn LeadRepository>>) -> Self {
        Self { repo }
    }

    fn repo(&self) -> Result<&Arc<dyn LeadRepository>, Error> {
        self.repo
            .as_ref()
            .ok_or_else(|| Error::BackendUnavailable("Database not configured".into()))
    }

    pub async fn overview(&self, now: DateTime<Utc>) -> Result<DashboardOverview, Error> {
        let users = self.repo()?.list_user_summaries().await.map_err(|e| {
            error!("Error loading summary data: {}", e);
            e
        })?;
        Ok(DashboardOverview {
            stats: DashboardStats::compute(&users, now),
            users,
        })
    }

    pub async fn user_detail(&self, user_id: Uuid) -> Result<UserDetail, Error> {
        self.repo()?.get_user_detail(user_id).await.map_err(|e| {
            error!("Error loading user details for {}: {}", user_id, e);
            e
        })
    }

    pub async fn export_csv(&self, now: DateTime<Utc>) -> Result<CsvExport, Error> {
        let users = self.repo()?.list_user_summaries().await?;
        Ok(CsvExport {
            filename: export_filename(now.date_naive()),
            content: render_summary_csv(&users),
        })
    }
}
