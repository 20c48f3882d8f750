pub mod aggregator;
pub mod probe;
pub mod reporter;


pub use aggregator::{StatusAggregator, StatusReport};
pub use probe::{DependencyProbe, DependencyState, DependencyStatus};
pub use reporter::{HealthReporter, SystemSnapshot};
