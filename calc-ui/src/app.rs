use std::sync::Arc;

use calc_core::api::ApiRegistry;
use calc_core::{ApiError, CalculationApi, EndpointConfig, StalePolicy};
use calc_http::HttpApiFactory;
use tokio::runtime::Handle;
use tracing::debug;

/// Every backend this binary knows how to build.
pub fn build_registry() -> ApiRegistry {
    let mut registry = ApiRegistry::new();
    registry.register(Box::new(HttpApiFactory));
    registry
}

pub async fn create_api(config: &EndpointConfig) -> Result<Arc<dyn CalculationApi>, ApiError> {
    let registry = build_registry();
    debug!(
        backend = %config.backend,
        base_url = %config.base_url,
        available = ?registry.available_backends(),
        "creating calculation client"
    );
    registry.create(config).await
}

/// What each page needs to reach the service: the client, the runtime that
/// drives its futures, and how to treat overlapping replies.
#[derive(Clone)]
pub struct Backend {
    pub api: Arc<dyn CalculationApi>,
    pub runtime: Handle,
    pub stale_policy: StalePolicy,
}
