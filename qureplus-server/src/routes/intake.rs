//! JSON API for one visitor's intake: form, image, analysis, reset.

use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Json, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use qureplus_common::models::{ImageUpload, UserForm};
use qureplus_core::intake::IntakeView;
use qureplus_core::repositories::supabase::storage::MAX_IMAGE_BYTES;
use qureplus_core::{Error, IntakeController};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::context::ServerContext;
use crate::error::ApiError;

/// Upper bound for a multipart image upload body. The image itself is
/// checked against the bucket limit; the rest covers boundaries and headers.
pub const MAX_UPLOAD_BYTES: usize = MAX_IMAGE_BYTES as usize + 64 * 1024;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub id: Uuid,
    pub view: IntakeView,
}

pub fn router() -> Router<Arc<ServerContext>> {
    Router::new()
        .route("/api/intake", post(create_session))
        .route("/api/intake/{id}", get(get_session).delete(end_session))
        .route("/api/intake/{id}/form", post(submit_form))
        .route(
            "/api/intake/{id}/image",
            post(upload_image)
                .delete(remove_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/intake/{id}/analyze", post(analyze))
        .route("/api/intake/{id}/reset", post(reset))
}

pub(crate) fn session(ctx: &ServerContext, id: Uuid) -> Result<Arc<IntakeController>, ApiError> {
    ctx.sessions
        .get(&id)
        .ok_or_else(|| Error::NotFound(format!("intake session {id}")).into())
}

async fn create_session(
    State(ctx): State<Arc<ServerContext>>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let (id, intake) = ctx.sessions.create()?;
    info!("Intake session {} started ({} active)", id, ctx.sessions.len());
    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            id,
            view: intake.view(),
        }),
    ))
}

async fn get_session(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeView>, ApiError> {
    Ok(Json(session(&ctx, id)?.view()))
}

async fn end_session(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if ctx.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound(format!("intake session {id}")).into())
    }
}

async fn submit_form(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
    Json(form): Json<UserForm>,
) -> Result<Json<IntakeView>, ApiError> {
    let intake = session(&ctx, id)?;
    intake.submit_form(form).await?;
    Ok(Json(intake.view()))
}

async fn upload_image(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<IntakeView>, ApiError> {
    let intake = session(&ctx, id)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        upload = Some(ImageUpload::new(file_name, content_type, bytes));
        break;
    }

    let image = upload
        .ok_or_else(|| ApiError::BadRequest(format!("missing multipart field '{IMAGE_FIELD}'")))?;
    intake.select_image(image)?;
    Ok(Json(intake.view()))
}

async fn remove_image(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeView>, ApiError> {
    let intake = session(&ctx, id)?;
    intake.remove_image()?;
    Ok(Json(intake.view()))
}

async fn analyze(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeView>, ApiError> {
    let intake = session(&ctx, id)?;
    intake.analyze().await?;
    Ok(Json(intake.view()))
}

async fn reset(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<Json<IntakeView>, ApiError> {
    let intake = session(&ctx, id)?;
    intake.reset();
    Ok(Json(intake.view()))
}
