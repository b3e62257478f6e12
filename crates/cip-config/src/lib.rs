//! cip-config
//!
//! Single source of truth for runtime configuration.
//!
//! # Contract
//! - Everything is read from environment variables, once, at startup.
//! - Callers build a [`ServiceConfig`] and pass the pieces into constructors;
//!   never scatter `std::env::var` calls across the codebase.
//! - `Debug` output redacts the facility API key.
//! - Error messages name the variable, never its value.
//!
//! | variable | default |
//! |----------|---------|
//! | `CONTEXT_BROKER_URL` | required |
//! | `FACILITIES_ENABLED` | `false` |
//! | `FACILITIES_URL`, `FACILITIES_API_KEY` | required when facilities are enabled |
//! | `FACILITIES_POLLING_INTERVAL` | 58 (minutes) |
//! | `CITYWORK_ENABLED` | `false` |
//! | `SDL_KARTA_URL` | required when city work is enabled |
//! | `CITYWORK_POLLING_INTERVAL` | 59 (seconds) |
//! | `SERVICE_PORT` | 8080 |

use std::fmt;
use std::time::Duration;

use anyhow::{bail, Result};

pub const DEFAULT_SERVICE_PORT: u16 = 8080;
pub const DEFAULT_FACILITIES_INTERVAL_MINUTES: u64 = 58;
pub const DEFAULT_CITYWORK_INTERVAL_SECONDS: u64 = 59;

/// Pause before retrying a facility fetch that failed.
pub const FACILITIES_RETRY_INTERVAL: Duration = Duration::from_secs(2 * 60);

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct FacilitiesConfig {
    pub url: String,
    pub api_key: String,
    pub interval: Duration,
    pub retry_interval: Duration,
}

impl fmt::Debug for FacilitiesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacilitiesConfig")
            .field("url", &self.url)
            .field("api_key", &"<REDACTED>")
            .field("interval", &self.interval)
            .field("retry_interval", &self.retry_interval)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityWorkConfig {
    pub url: String,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub context_broker_url: String,
    pub service_port: u16,
    /// `None` when the facilities loop is disabled.
    pub facilities: Option<FacilitiesConfig>,
    /// `None` when the city work loop is disabled.
    pub city_work: Option<CityWorkConfig>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let context_broker_url = env.required("CONTEXT_BROKER_URL")?;
        let service_port = env.number("SERVICE_PORT", DEFAULT_SERVICE_PORT)?;

        let facilities = if env.flag("FACILITIES_ENABLED") {
            let minutes = env.number(
                "FACILITIES_POLLING_INTERVAL",
                DEFAULT_FACILITIES_INTERVAL_MINUTES,
            )?;
            let Some(seconds) = minutes.checked_mul(60) else {
                bail!("CONFIG_INVALID: env var 'FACILITIES_POLLING_INTERVAL' is out of range");
            };
            Some(FacilitiesConfig {
                url: env.required("FACILITIES_URL")?,
                api_key: env.required("FACILITIES_API_KEY")?,
                interval: Duration::from_secs(seconds),
                retry_interval: FACILITIES_RETRY_INTERVAL,
            })
        } else {
            None
        };

        let city_work = if env.flag("CITYWORK_ENABLED") {
            let seconds = env.number(
                "CITYWORK_POLLING_INTERVAL",
                DEFAULT_CITYWORK_INTERVAL_SECONDS,
            )?;
            Some(CityWorkConfig {
                url: env.required("SDL_KARTA_URL")?,
                interval: Duration::from_secs(seconds),
            })
        } else {
            None
        };

        Ok(Self {
            context_broker_url,
            service_port,
            facilities,
            city_work,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value; empty counts as unset.
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        match self.get(name) {
            Some(v) => Ok(v),
            None => bail!("CONFIG_MISSING: required env var '{name}' is not set or empty"),
        }
    }

    /// On only for the exact text `true`.
    fn flag(&self, name: &str) -> bool {
        self.get(name).as_deref() == Some("true")
    }

    fn number<T: std::str::FromStr>(&self, name: &str, default: T) -> Result<T> {
        match self.get(name) {
            None => Ok(default),
            Some(v) => match v.parse::<T>() {
                Ok(n) => Ok(n),
                Err(_) => bail!("CONFIG_INVALID: env var '{name}' must be a non-negative integer"),
            },
        }
    }
}
