use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::analysis::AnalysisRecord;

/// A validated user, ready to be inserted into the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub age: i32,
    pub city: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A row of the `users` table as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub city: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of the `user_analysis_summary` view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAnalysisSummary {
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub city: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub user_created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_analyses: i64,
    #[serde(default)]
    pub last_analysis_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub avg_probability: Option<f64>,
}

/// A user together with their analysis history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDetail {
    pub user: UserRecord,
    pub analyses: Vec<AnalysisRecord>,
}
