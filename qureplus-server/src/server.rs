use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use qureplus_ai::AnalysisService;
use qureplus_common::traits::{ImageAnalyzer, LeadRepository};
use qureplus_core::tasks::spawn_session_sweeper;
use qureplus_core::{SupabaseClient, SupabaseLeadRepository};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Args;
use crate::context::ServerContext;
use crate::routes;

pub fn build_router(ctx: Arc<ServerContext>) -> Router {
    Router::new()
        .merge(routes::pages::router())
        .merge(routes::intake::router())
        .merge(routes::admin::router())
        .with_state(ctx)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Connects the backends named in `args` and serves until Ctrl-C.
pub async fn run_server(args: Args) -> anyhow::Result<()> {
    // 1) Persistence backend, if configured
    let repo: Option<Arc<dyn LeadRepository>> = match args.supabase_config()? {
        Some(cfg) => {
            let repo = SupabaseLeadRepository::new(SupabaseClient::new(cfg)?);
            if let Err(e) = repo.check_connection().await {
                error!("Supabase connection test failed: {}", e);
            }
            if args.ensure_bucket {
                if let Err(e) = repo.client().ensure_bucket().await {
                    error!("Could not set up storage bucket: {}", e);
                }
            }
            let repo: Arc<dyn LeadRepository> = Arc::new(repo);
            Some(repo)
        }
        None => {
            warn!("Supabase environment variables not found. Database features will be disabled.");
            None
        }
    };

    // 2) Vision analysis, falling back to simulated results without a key
    let analysis = AnalysisService::from_config(args.provider_config())?;
    let model_configured = analysis.has_provider();
    let analyzer: Arc<dyn ImageAnalyzer> = Arc::new(analysis);

    let ctx = Arc::new(ServerContext::new(repo, analyzer, model_configured));
    ctx.sessions.set_max_sessions(args.max_sessions);

    // 3) Background sweep of abandoned intakes
    let _sweeper = spawn_session_sweeper(
        ctx.sessions.clone(),
        args.sweep_interval(),
        args.session_idle(),
    );

    // 4) Serve
    let app = build_router(ctx);
    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        info!("Ctrl-C received; shutting down.");
        shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    info!("QurePlus listening on http://{}", args.bind_addr);
    axum_server::bind(args.bind_addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("Server shut down.");
    Ok(())
}
