use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use qureplus_common::traits::{ImageAnalyzer, LeadRepository};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::Error;
use crate::intake::controller::IntakeController;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// In-memory intake sessions, keyed by a random id handed to the client.
///
/// Nothing here survives a restart; every visitor starts over at the form.
pub struct SessionStore {
    sessions: DashMap<Uuid, Arc<IntakeController>>,
    repo: Option<Arc<dyn LeadRepository>>,
    analyzer: Arc<dyn ImageAnalyzer>,
    max_sessions: AtomicUsize,
}

impl SessionStore {
    pub fn new(repo: Option<Arc<dyn LeadRepository>>, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self {
            sessions: DashMap::new(),
            repo,
            analyzer,
            max_sessions: AtomicUsize::new(DEFAULT_MAX_SESSIONS),
        }
    }

    pub fn set_max_sessions(&self, max: usize) {
        self.max_sessions.store(max, Ordering::Relaxed);
    }

    /// Opens a new session, or fails with [`Error::SessionLimit`] when every
    /// slot is taken.
    pub fn create(&self) -> Result<(Uuid, Arc<IntakeController>), Error> {
        let max = self.max_sessions.load(Ordering::Relaxed);
        if self.sessions.len() >= max {
            warn!("Refusing new intake session: {} active", self.sessions.len());
            return Err(Error::SessionLimit(max));
        }
        let id = Uuid::new_v4();
        let controller = Arc::new(IntakeController::new(
            self.repo.clone(),
            self.analyzer.clone(),
        ));
        self.sessions.insert(id, controller.clone());
        debug!("Created intake session {}", id);
        Ok((id, controller))
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<IntakeController>> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops sessions idle for longer than `max_idle`, skipping any with a
    /// request still in flight. Returns how many were removed.
    pub fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, controller| {
            let keep = controller.is_analyzing()
                || controller.is_submitting()
                || controller.idle_for() <= max_idle;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}
