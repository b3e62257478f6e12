//! Shared runtime state handed to Axum handlers as `State<Arc<AppState>>`.

use serde::{Deserialize, Serialize};

/// Static build metadata included in health responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub build: BuildInfo,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
