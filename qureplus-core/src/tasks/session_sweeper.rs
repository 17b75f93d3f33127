// src/tasks/session_sweeper.rs

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::intake::SessionStore;

/// Spawns a background task that periodically drops intake sessions idle
/// for longer than `max_idle`.
pub fn spawn_session_sweeper(
    store: Arc<SessionStore>,
    every: Duration,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = store.sweep_idle(max_idle);
            if removed > 0 {
                info!("Swept {} idle intake session(s); {} remain", removed, store.len());
            } else {
                debug!("Session sweep: nothing idle ({} active)", store.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FixedAnalyzer;

    #[tokio::test]
    async fn sweeper_drops_abandoned_sessions() {
        let store = Arc::new(SessionStore::new(
            None,
            Arc::new(FixedAnalyzer::new(20.0, "No Visible Signs")),
        ));
        store.create().unwrap();
        store.create().unwrap();

        let handle = spawn_session_sweeper(
            store.clone(),
            Duration::from_millis(10),
            Duration::from_millis(1),
        );
        for _ in 0..100 {
            if store.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(store.is_empty());
    }
}
