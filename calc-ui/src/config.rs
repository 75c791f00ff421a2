//! Application configuration: an optional TOML file, overlaid by
//! command-line flags.
//!
//! ```toml
//! stale_policy = "latest-only"
//!
//! [endpoint]
//! base_url = "http://127.0.0.1:5000"
//! timeout_secs = 30
//!
//! [endpoint.endpoints]
//! ofdm-systems = "http://127.0.0.1:5001/api/ofdm-systems"
//!
//! [log]
//! level = "debug"
//! file = "toolkit.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use calc_core::{EndpointConfig, StalePolicy};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// EnvFilter directive; `None` keeps RUST_LOG or the INFO default.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub stale_policy: StalePolicy,
    pub log: LogSettings,
}

/// Values given on the command line. Each one that is set wins over the
/// file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub stale_policy: Option<StalePolicy>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `path`, or returns the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn with_overrides(
        mut self,
        overrides: Overrides,
    ) -> Self {
        if let Some(backend) = overrides.backend {
            self.endpoint.backend = backend;
        }
        if let Some(base_url) = overrides.base_url {
            self.endpoint.base_url = base_url;
        }
        if overrides.timeout_secs.is_some() {
            self.endpoint.timeout_secs = overrides.timeout_secs;
        }
        if let Some(policy) = overrides.stale_policy {
            self.stale_policy = policy;
        }
        if overrides.log_level.is_some() {
            self.log.level = overrides.log_level;
        }
        if overrides.log_file.is_some() {
            self.log.file = overrides.log_file;
        }
        self
    }
}
