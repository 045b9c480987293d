//! Harness configuration.
//!
//! Loaded from a TOML file; every key is optional:
//!
//! ```toml
//! poll_interval_ms = 100
//! log_level = "debug"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HarnessError, Result};

/// Default sleep between polls while waiting for a screen.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Milliseconds between polls in `await_visible_state`.
    pub poll_interval_ms: u64,

    /// Log level used when none is given on the command line.
    pub log_level: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_level: None,
        }
    }
}

impl HarnessConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HarnessError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(HarnessError::InvalidConfig(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
