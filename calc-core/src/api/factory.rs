use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::client::{ApiError, CalculationApi};
use super::config::EndpointConfig;

/// Builds a [`CalculationApi`] for one way of reaching the calculation
/// service. `calc-http` provides the `"http"` one.
#[async_trait]
pub trait ApiFactory: Send + Sync {
    /// The value of `EndpointConfig::backend` this factory answers to.
    fn backend_name(&self) -> &'static str;

    /// Checks the endpoint settings and returns a client for them.
    async fn create(
        &self,
        config: &EndpointConfig,
    ) -> Result<Arc<dyn CalculationApi>, ApiError>;
}

/// Maps the configured backend name to the factory that can serve it.
/// The binary fills one at startup and asks it for the page client.
pub struct ApiRegistry {
    factories: HashMap<&'static str, Box<dyn ApiFactory>>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Later registrations under the same name win.
    pub fn register(
        &mut self,
        factory: Box<dyn ApiFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Builds the client for `config.backend`. An unregistered name is a
    /// [`ApiError::Configuration`] that lists what is registered; factory
    /// errors pass through unchanged.
    pub async fn create(
        &self,
        config: &EndpointConfig,
    ) -> Result<Arc<dyn CalculationApi>, ApiError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(ApiError::Configuration(format!(
                "no calculation backend named '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        debug!(backend = factory.backend_name(), url = %config.base_url, "building client");
        factory.create(config).await
    }
}

impl Default for ApiRegistry {
    fn default() -> Self {
        Self::new()
    }
}
