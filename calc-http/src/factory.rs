use std::sync::Arc;

use async_trait::async_trait;
use calc_core::api::ApiFactory;
use calc_core::{ApiError, CalculationApi, CalculatorKind, EndpointConfig};

use crate::client::HttpCalculationApi;

/// [`ApiFactory`] for plain HTTP(S) endpoints.
///
/// Register this with a [`calc_core::api::ApiRegistry`] to make the
/// `"http"` backend available:
///
/// ```rust,no_run
/// use calc_core::api::ApiRegistry;
/// use calc_http::HttpApiFactory;
///
/// let mut registry = ApiRegistry::new();
/// registry.register(Box::new(HttpApiFactory));
/// ```
pub struct HttpApiFactory;

#[async_trait]
impl ApiFactory for HttpApiFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    /// Validates the base URL and every override, then builds the client.
    async fn create(
        &self,
        config: &EndpointConfig,
    ) -> Result<Arc<dyn CalculationApi>, ApiError> {
        check_url("base_url", &config.base_url)?;
        for (page, url) in &config.endpoints {
            page.parse::<CalculatorKind>()
                .map_err(|e| ApiError::Configuration(e.to_string()))?;
            check_url(page, url)?;
        }
        Ok(Arc::new(HttpCalculationApi::new(config)?))
    }
}

fn check_url(
    what: &str,
    url: &str,
) -> Result<(), ApiError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ApiError::Configuration(format!("{what} is empty")));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ApiError::Configuration(format!(
            "{what} '{url}' must start with http:// or https://"
        )));
    }
    Ok(())
}
