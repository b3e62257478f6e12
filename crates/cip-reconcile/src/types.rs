use std::time::Duration;

/// Pacing of sink calls during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause after every merge attempt.
    pub throttle: Duration,
    /// Pause after a merge failure other than not-found.
    pub backoff: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(100),
            backoff: Duration::from_secs(10),
        }
    }
}

impl EngineConfig {
    /// No pauses at all; for tests and one-shot tooling.
    pub fn unthrottled() -> Self {
        Self {
            throttle: Duration::ZERO,
            backoff: Duration::ZERO,
        }
    }
}

/// One feature that could not be synced this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFailure {
    /// Upstream id for facilities, fingerprint (or title) for disruptions.
    pub feature: String,
    pub message: String,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub merged: usize,
    pub created: usize,
    pub deleted: usize,
    pub delete_skipped: usize,
    pub ignored: usize,
    pub skipped_seen: usize,
    pub failures: Vec<FeatureFailure>,
}

impl PassReport {
    pub fn fail(&mut self, feature: impl Into<String>, message: impl Into<String>) {
        self.failures.push(FeatureFailure {
            feature: feature.into(),
            message: message.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
