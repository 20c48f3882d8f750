use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Lifecycle of the external store connection as seen by its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Uninitialized,
    Connecting,
    Connected,
    Failed,
    Disconnected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Uninitialized => write!(f, "uninitialized"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Failed => write!(f, "failed"),
            ConnectionState::Disconnected => write!(f, "disconnected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: ConnectionState,
}

/// Owner of the external store session. Probes observe it, they never own it.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    /// Best-effort connect. A `false` return is not fatal to the caller.
    async fn connect(&self) -> bool;

    /// Last-known lifecycle state. Never blocks on I/O.
    fn connection_status(&self) -> ConnectionStatus;

    /// One round trip over the existing session. Callers bound it with a timeout.
    async fn test_connection(&self) -> bool;

    async fn close(&self);
}

/// SQLite-backed connection manager.
pub struct DatabaseManager {
    config: DatabaseConfig,
    state: RwLock<ConnectionState>,
    pool: RwLock<Option<SqlitePool>>,
}

impl DatabaseManager {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            state: RwLock::new(ConnectionState::Uninitialized),
            pool: RwLock::new(None),
        }
    }

    pub fn pool(&self) -> Option<SqlitePool> {
        self.pool.read().clone()
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    fn transition(&self, from: ConnectionState, to: ConnectionState) {
        let mut state = self.state.write();
        if *state == from {
            info!("Database connection state: {} -> {}", from, to);
            *state = to;
        }
    }

    async fn open_pool(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.config.url)?
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(self.config.max_connections)
            .acquire_timeout(self.config.connect_timeout())
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(pool)
    }
}

#[async_trait]
impl ConnectionManager for DatabaseManager {
    async fn connect(&self) -> bool {
        self.set_state(ConnectionState::Connecting);
        info!("Connecting to database: {}", self.config.url);

        let previous = self.pool.write().take();
        if let Some(previous) = previous {
            previous.close().await;
        }

        let attempt = tokio::time::timeout(self.config.connect_timeout(), self.open_pool()).await;

        match attempt {
            Ok(Ok(pool)) => {
                *self.pool.write() = Some(pool);
                self.set_state(ConnectionState::Connected);
                info!("Database connection established");
                true
            }
            Ok(Err(e)) => {
                warn!("Database connection failed: {}", e);
                self.set_state(ConnectionState::Failed);
                false
            }
            Err(_) => {
                warn!(
                    "Database connection timed out after {}s",
                    self.config.connect_timeout_seconds
                );
                self.set_state(ConnectionState::Failed);
                false
            }
        }
    }

    fn connection_status(&self) -> ConnectionStatus {
        ConnectionStatus {
            status: *self.state.read(),
        }
    }

    async fn test_connection(&self) -> bool {
        let Some(pool) = self.pool() else {
            return false;
        };

        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => {
                self.transition(ConnectionState::Disconnected, ConnectionState::Connected);
                true
            }
            Err(e) => {
                warn!("Database ping failed: {}", e);
                self.transition(ConnectionState::Connected, ConnectionState::Disconnected);
                false
            }
        }
    }

    async fn close(&self) {
        let pool = self.pool.write().take();
        if let Some(pool) = pool {
            pool.close().await;
            info!("Database connection closed");
        }
        self.set_state(ConnectionState::Disconnected);
    }
}
