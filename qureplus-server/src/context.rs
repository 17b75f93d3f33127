use std::sync::Arc;

use qureplus_common::traits::{ImageAnalyzer, LeadRepository};
use qureplus_core::SessionStore;
use qureplus_core::services::DashboardService;

/// Everything the handlers share.
pub struct ServerContext {
    pub sessions: Arc<SessionStore>,
    pub dashboard: DashboardService,
    pub backend_configured: bool,
    pub model_configured: bool,
}

impl ServerContext {
    pub fn new(
        repo: Option<Arc<dyn LeadRepository>>,
        analyzer: Arc<dyn ImageAnalyzer>,
        model_configured: bool,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(repo.clone(), analyzer)),
            backend_configured: repo.is_some(),
            dashboard: DashboardService::new(repo),
            model_configured,
        }
    }
}
