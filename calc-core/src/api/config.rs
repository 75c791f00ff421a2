use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::CalculatorKind;

pub const DEFAULT_BASE_URL: &str = "https://wireless-project-backend.onrender.com";

/// Where each page sends its form, and how.
///
/// `backend` must match the [`ApiFactory::backend_name`] of a registered
/// factory. Every page posts to `base_url` + `/api/<slug>` unless an entry
/// in `endpoints`, keyed by page slug, overrides its full URL.
///
/// | backend | base_url examples                                |
/// |---------|--------------------------------------------------|
/// | `http`  | `https://wireless-project-backend.onrender.com`  |
/// |         | `http://127.0.0.1:5000`                          |
///
/// [`ApiFactory::backend_name`]: super::ApiFactory::backend_name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointConfig {
    pub backend: String,
    pub base_url: String,
    /// Request timeout in seconds. `None` waits for as long as the
    /// transport does.
    pub timeout_secs: Option<u64>,
    pub endpoints: HashMap<String, String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            endpoints: HashMap::new(),
        }
    }
}

impl EndpointConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Full URL the given page posts to.
    pub fn url_for(
        &self,
        kind: CalculatorKind,
    ) -> String {
        match self.endpoints.get(kind.slug()) {
            Some(url) => url.clone(),
            None => format!("{}{}", self.base_url.trim_end_matches('/'), kind.api_path()),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
