//! Deployment configuration: service endpoints, viewport geometry and the
//! active period table.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::period::{PeriodTable, PeriodVariant};
use crate::viewport::ViewportConfig;

// ── Environment ─────────────────────────────────────────────────────────────

/// Which service deployment the page talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Pick the environment from the hosting page's location.
    ///
    /// Loopback host names, an empty host name, and pages opened from disk
    /// (`file:`) are development; everything else is production.
    pub fn detect(hostname: &str, protocol: &str) -> Self {
        let local_host = matches!(hostname, "" | "localhost" | "127.0.0.1");
        if local_host || protocol.trim_end_matches(':') == "file" {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

/// Base URLs of the course service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    pub development: String,
    pub production: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            development: "http://localhost:3000".to_string(),
            production: "https://ncu-courses-select.onrender.com".to_string(),
        }
    }
}

impl ApiEndpoints {
    pub fn base_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Development => &self.development,
            Environment::Production => &self.production,
        }
    }
}

// ── SieveConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    pub api: ApiEndpoints,
    pub viewport: ViewportConfig,
    pub periods: PeriodVariant,
}

impl SieveConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidConfig`] if the JSON is malformed or the
    /// viewport geometry is unusable.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SieveConfig =
            serde_json::from_str(json).map_err(|e| SieveError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        for (name, url) in [
            ("development", &self.api.development),
            ("production", &self.api.production),
        ] {
            if url.trim().is_empty() {
                return Err(SieveError::InvalidConfig(format!("{name} endpoint is empty")));
            }
        }
        Ok(())
    }

    pub fn period_table(&self) -> PeriodTable {
        PeriodTable::new(self.periods)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
