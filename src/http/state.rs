use crate::progress::ProgressAggregator;
use crate::session::SessionLifecycle;
use crate::store::{IdentityProvider, SessionStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single active lifecycle (one session at a time per user)
    pub lifecycle: Arc<RwLock<SessionLifecycle>>,

    pub progress: ProgressAggregator,

    /// Read access to historical sessions for stats/export
    pub sessions: Arc<dyn SessionStore>,

    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        lifecycle: SessionLifecycle,
        progress: ProgressAggregator,
        sessions: Arc<dyn SessionStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            lifecycle: Arc::new(RwLock::new(lifecycle)),
            progress,
            sessions,
            identity,
        }
    }
}
