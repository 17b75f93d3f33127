use std::sync::Arc;

use axum::Router;
use axum::extract::{Json, Path, State};
use axum::response::Html;
use axum::routing::get;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::context::ServerContext;
use crate::error::ApiError;
use crate::routes::intake::session;
use crate::site;

pub fn router() -> Router<Arc<ServerContext>> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/intake/{id}/report", get(report))
}

async fn home() -> Html<String> {
    Html(site::render_home())
}

async fn health(State(ctx): State<Arc<ServerContext>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "backend_configured": ctx.backend_configured,
        "model_configured": ctx.model_configured,
        "active_sessions": ctx.sessions.len(),
    }))
}

async fn report(
    State(ctx): State<Arc<ServerContext>>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let view = session(&ctx, id)?.view();
    Ok(Html(site::render_report(&view)?))
}
