//! Per-page gate instance
//!
//! A `MountedGate` lives as long as one mounted page. It owns the session
//! state machine (Loading -> resolved, never back) and deduplicates
//! redirects so repeated evaluations never stack navigations.

use async_trait::async_trait;
use salonsuite_shared::SessionSnapshot;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::policy::{GateDecision, SessionGate, SessionState};

/// Errors a session collaborator may report. The gate treats all of them
/// as "signed out".
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session fetch failed: {0}")]
    Fetch(String),

    #[error("Session token rejected: {0}")]
    Rejected(String),
}

/// Session collaborator: resolves the current auth state
#[async_trait]
pub trait SessionLoader: Send + Sync {
    async fn load(&self) -> Result<Option<SessionSnapshot>, SessionError>;
}

/// Load a session, folding every failure into "no session"
pub async fn load_session<L: SessionLoader + ?Sized>(loader: &L) -> Option<SessionSnapshot> {
    match loader.load().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "Session load failed, treating as signed out");
            None
        }
    }
}

/// Result of one gate evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub decision: GateDecision,
    /// Navigation to perform now. `None` when no redirect is needed or the
    /// same redirect was already issued.
    pub navigate: Option<String>,
}

/// Gate state for one mounted page
#[derive(Debug)]
pub struct MountedGate {
    gate: Arc<SessionGate>,
    state: SessionState,
    pending_redirect: Option<String>,
}

impl MountedGate {
    pub fn new(gate: Arc<SessionGate>) -> Self {
        Self {
            gate,
            state: SessionState::Loading,
            pending_redirect: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Re-evaluate after any change to the session snapshot or the path.
    ///
    /// Once resolved, a later loading snapshot is ignored. Evaluating twice
    /// with the same inputs returns the same decision and navigates once.
    pub fn update(&mut self, snapshot: Option<&SessionSnapshot>, path: &str) -> GateOutcome {
        let observed = SessionState::from_snapshot(snapshot);
        if observed != SessionState::Loading || self.state == SessionState::Loading {
            if observed != self.state {
                tracing::debug!(from = ?self.state, to = ?observed, "Session state changed");
            }
            self.state = observed;
        }

        let decision = self.gate.evaluate(self.state, path);
        let navigate = match &decision {
            GateDecision::Redirect(target) => {
                if self.pending_redirect.as_deref() == Some(target.as_str()) {
                    None
                } else {
                    // Latest target replaces any earlier one
                    self.pending_redirect = Some(target.clone());
                    Some(target.clone())
                }
            }
            GateDecision::Render | GateDecision::ShowLoading => {
                self.pending_redirect = None;
                None
            }
        };

        GateOutcome { decision, navigate }
    }
}

/// Runs a session load in the background for one mounted page.
///
/// Reports a loading snapshot until the loader resolves. Dropping the driver
/// (unmounting) cancels the load.
pub struct GateDriver {
    snapshot: watch::Receiver<Option<SessionSnapshot>>,
    task: JoinHandle<()>,
}

impl GateDriver {
    pub fn spawn<L>(loader: L) -> Self
    where
        L: SessionLoader + 'static,
    {
        let (tx, rx) = watch::channel(Some(SessionSnapshot::loading()));
        let task = tokio::spawn(async move {
            let snapshot = load_session(&loader).await;
            // Receiver gone means the page unmounted
            let _ = tx.send(snapshot);
        });

        Self { snapshot: rx, task }
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        *self.snapshot.borrow()
    }

    /// Wait for the load to resolve. Returns the resolved snapshot.
    pub async fn resolved(&mut self) -> Option<SessionSnapshot> {
        loop {
            let current = *self.snapshot.borrow_and_update();
            if !current.is_some_and(|s| s.is_loading) {
                return current;
            }
            if self.snapshot.changed().await.is_err() {
                // Loader task ended without publishing
                return *self.snapshot.borrow();
            }
        }
    }
}

impl Drop for GateDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}
