use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AnalysisResult, CalculatorKind, FormState};

/// Shown when a failure carries no message from the server.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("Undecodable response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server answered successfully but reported a calculation error in
    /// the body instead of results.
    #[error("Calculation rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// The error text supplied by the server, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(m), ..
            } => Some(m.as_str()),
            Self::Rejected(m) => Some(m.as_str()),
            _ => None,
        }
    }

    /// What the user sees: the server's own message when available,
    /// otherwise [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
            .to_string()
    }
}

/// The remote calculation and explanation service.
///
/// Implementations send the form verbatim and decode the reply; they never
/// interpret the metrics.
#[async_trait]
pub trait CalculationApi: Send + Sync {
    async fn calculate(
        &self,
        kind: CalculatorKind,
        form: &FormState,
    ) -> Result<AnalysisResult, ApiError>;
}
