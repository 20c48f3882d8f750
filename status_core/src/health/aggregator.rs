use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::probe::{DependencyProbe, DependencyStatus};
use super::reporter::{HealthReporter, SystemSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub system: SystemSnapshot,
    pub dependency: DependencyStatus,
}

/// Combines process vitals with a dependency probe. A failing dependency
/// only ever degrades the `dependency` half of the report.
#[derive(Clone)]
pub struct StatusAggregator {
    reporter: Arc<HealthReporter>,
    probe: DependencyProbe,
    probe_timeout: Duration,
}

impl StatusAggregator {
    pub fn new(reporter: HealthReporter, probe: DependencyProbe, probe_timeout: Duration) -> Self {
        Self {
            reporter: Arc::new(reporter),
            probe,
            probe_timeout,
        }
    }

    pub fn probe(&self) -> &DependencyProbe {
        &self.probe
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub async fn build_report(&self) -> StatusReport {
        let system = self.reporter.capture();
        let dependency = self.probe.check(self.probe_timeout).await;

        if !dependency.is_connected() {
            warn!("Dependency degraded: {} ({})", dependency.state, dependency.detail);
        }

        StatusReport { system, dependency }
    }
}
