use std::sync::Arc;
use std::time::{Instant, SystemTime};

use ivf_algo::SuccessEstimator;

use crate::config::Config;

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    estimator: SuccessEstimator,
    started_at: Instant,
    started_at_system: SystemTime,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            estimator: SuccessEstimator::new(config.max_attempts),
            config: Arc::new(config),
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn estimator(&self) -> SuccessEstimator {
        self.estimator
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }
}
