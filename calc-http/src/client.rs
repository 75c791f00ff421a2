use async_trait::async_trait;
use calc_core::{
    AnalysisResult, ApiError, CalculationApi, CalculatorKind, EndpointConfig, ErrorBody, FormState,
};
use reqwest::Client;
use tracing::{debug, warn};

/// [`CalculationApi`] over HTTP: one JSON POST per submission.
pub struct HttpCalculationApi {
    client: Client,
    config: EndpointConfig,
}

impl HttpCalculationApi {
    pub fn new(config: &EndpointConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

/// Turns a finished exchange into the outcome the page shows.
///
/// A 2xx body that does not decode as results but does carry an `error`
/// string is reported as a rejection with that message.
fn interpret(
    status: u16,
    body: &[u8],
) -> Result<AnalysisResult, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            message: ErrorBody::message_from(body),
        });
    }

    serde_json::from_slice::<AnalysisResult>(body).map_err(|e| match ErrorBody::message_from(body) {
        Some(message) => ApiError::Rejected(message),
        None => ApiError::Decode(e.to_string()),
    })
}

#[async_trait]
impl CalculationApi for HttpCalculationApi {
    async fn calculate(
        &self,
        kind: CalculatorKind,
        form: &FormState,
    ) -> Result<AnalysisResult, ApiError> {
        let url = self.config.url_for(kind);
        debug!(%url, page = kind.slug(), "posting form");

        let response = self
            .client
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "request failed");
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(%url, status, bytes = body.len(), "response received");

        interpret(status, &body)
    }
}
