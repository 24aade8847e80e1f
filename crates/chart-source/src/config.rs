// File: crates/chart-source/src/config.rs
// Summary: API location and timeout, built explicitly or from the environment.

use std::time::Duration;

use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PREFIX: &str = "/sigerip";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_BASE_URL: &str = "SIGERIP_API_URL";
pub const ENV_PREFIX: &str = "SIGERIP_API_PREFIX";
pub const ENV_TIMEOUT_SECS: &str = "SIGERIP_API_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Path prepended to data endpoints, e.g. `/sigerip`.
    pub prefix: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), prefix: prefix.into(), ..Self::default() }
    }

    /// Defaults overridden by `SIGERIP_API_URL`, `SIGERIP_API_PREFIX` and
    /// `SIGERIP_API_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            cfg.base_url = url.trim().to_string();
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            cfg.prefix = prefix.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got '{secs}'")))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for `endpoint`. A leading `/` addresses the API root
    /// (`/health`); anything else lives under the prefix.
    pub fn resolve(&self, endpoint: &str) -> String {
        let root = self.base_url.trim_end_matches('/');
        if endpoint.starts_with('/') {
            format!("{root}{endpoint}")
        } else {
            let prefix = self.prefix.trim_end_matches('/');
            format!("{root}{prefix}/{endpoint}")
        }
    }
}
