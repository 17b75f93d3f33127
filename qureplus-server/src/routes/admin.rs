use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::Utc;
use qureplus_common::models::UserDetail;
use qureplus_core::services::DashboardOverview;
use tracing::info;
use uuid::Uuid;

use crate::context::ServerContext;
use crate::error::ApiError;

pub fn router() -> Router<Arc<ServerContext>> {
    Router::new()
        .route("/api/admin/summary", get(summary))
        .route("/api/admin/users/{id}", get(user_detail))
        .route("/api/admin/export.csv", get(export_csv))
}

async fn summary(
    State(ctx): State<Arc<ServerContext>>,
) -> Result<Json<DashboardOverview>, ApiError> {
    Ok(Json(ctx.dashboard.overview(Utc::now()).await?))
}

async fn user_detail(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDetail>, ApiError> {
    Ok(Json(ctx.dashboard.user_detail(id).await?))
}

async fn export_csv(
    State(ctx): State<Arc<ServerContext>>,
) -> Result<impl IntoResponse, ApiError> {
    let export = ctx.dashboard.export_csv(Utc::now()).await?;
    info!("Exporting summary CSV as {}", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    ))
}
