//! Bounded-time reachability check of the external store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use crate::database::{ConnectionManager, ConnectionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyState {
    Connected,
    Disconnected,
    Unknown,
}

impl std::fmt::Display for DependencyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyState::Connected => write!(f, "connected"),
            DependencyState::Disconnected => write!(f, "disconnected"),
            DependencyState::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub state: DependencyState,
    pub detail: String,
    pub checked_at: DateTime<Utc>,
}

impl DependencyStatus {
    pub fn is_connected(&self) -> bool {
        self.state == DependencyState::Connected
    }
}

#[derive(Clone)]
pub struct DependencyProbe {
    manager: Arc<dyn ConnectionManager>,
}

impl DependencyProbe {
    pub fn new(manager: Arc<dyn ConnectionManager>) -> Self {
        Self { manager }
    }

    pub fn current_state(&self) -> ConnectionStatus {
        self.manager.connection_status()
    }

    /// Resolves within `timeout` and never panics. The round trip runs on its
    /// own task, which is aborted once the timeout elapses.
    pub async fn check(&self, timeout: Duration) -> DependencyStatus {
        let checked_at = Utc::now();
        let start = Instant::now();

        let manager = Arc::clone(&self.manager);
        let mut round_trip = tokio::spawn(async move { manager.test_connection().await });

        let outcome = tokio::time::timeout(timeout, &mut round_trip).await;
        let last_known = self.current_state().status;

        let status = match outcome {
            Ok(Ok(true)) => DependencyStatus {
                state: DependencyState::Connected,
                detail: last_known.to_string(),
                checked_at,
            },
            Ok(Ok(false)) => DependencyStatus {
                state: DependencyState::Disconnected,
                detail: last_known.to_string(),
                checked_at,
            },
            Ok(Err(e)) => {
                error!("Dependency round trip faulted: {}", e);
                DependencyStatus {
                    state: DependencyState::Unknown,
                    detail: format!("round trip faulted (last known: {})", last_known),
                    checked_at,
                }
            }
            Err(_) => {
                round_trip.abort();
                warn!(
                    "Dependency probe timed out after {}ms (last known state: {})",
                    timeout.as_millis(),
                    last_known
                );
                DependencyStatus {
                    state: DependencyState::Unknown,
                    detail: format!(
                        "probe timed out after {}ms (last known: {})",
                        timeout.as_millis(),
                        last_known
                    ),
                    checked_at,
                }
            }
        };

        debug!("Dependency probe finished in {:?}: {}", start.elapsed(), status.state);
        status
    }
}
