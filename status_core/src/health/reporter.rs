//! Point-in-time process vitals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use sysinfo::{Pid, System};
use tracing::error;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub uptime_seconds: u64,
    pub memory_used_bytes: u64,
    pub platform: String,
    pub runtime_version: String,
    pub captured_at: DateTime<Utc>,
}

/// Reads process vitals at call time. Built once at startup so that an
/// unreadable platform fails there instead of inside a request.
#[derive(Debug, Clone)]
pub struct HealthReporter {
    pid: Pid,
    started: Instant,
    started_at: DateTime<Utc>,
    runtime_version: String,
}

impl HealthReporter {
    pub fn new() -> Result<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(AppError::Environment(
                "process metrics are not supported on this platform".to_string(),
            ));
        }

        let pid = sysinfo::get_current_pid()
            .map_err(|e| AppError::Environment(format!("cannot resolve current pid: {}", e)))?;

        let reporter = Self {
            pid,
            started: Instant::now(),
            started_at: Utc::now(),
            runtime_version: concat!("v", env!("CARGO_PKG_VERSION")).to_string(),
        };

        if reporter.read_memory().is_none() {
            return Err(AppError::Environment(format!(
                "cannot read metrics for process {}",
                pid
            )));
        }

        Ok(reporter)
    }

    pub fn capture(&self) -> SystemSnapshot {
        let elapsed = self.started.elapsed();

        // Anchored to the monotonic clock so wall-clock jumps never move it backwards.
        let captured_at = self.started_at
            + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero());

        let memory_used_bytes = self.read_memory().unwrap_or_else(|| {
            error!("Failed to read memory usage for process {}", self.pid);
            0
        });

        SystemSnapshot {
            uptime_seconds: elapsed.as_secs(),
            memory_used_bytes,
            platform: std::env::consts::OS.to_string(),
            runtime_version: self.runtime_version.clone(),
            captured_at,
        }
    }

    fn read_memory(&self) -> Option<u64> {
        let mut system = System::new();
        if !system.refresh_process(self.pid) {
            return None;
        }
        system.process(self.pid).map(|process| process.memory())
    }
}
