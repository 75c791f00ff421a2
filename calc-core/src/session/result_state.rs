use crate::api::ApiError;
use crate::models::AnalysisResult;

/// How a finished request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(AnalysisResult),
    /// Carries the message meant for the user, not the raw error.
    Failure(String),
}

impl From<Result<AnalysisResult, ApiError>> for Outcome {
    fn from(result: Result<AnalysisResult, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Failure(e.user_message()),
        }
    }
}

/// Request lifecycle of one page. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultState {
    #[default]
    Idle,
    Loading,
    Settled(Outcome),
}

impl ResultState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Settled(Outcome::Success(data)) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Settled(Outcome::Failure(msg)) => Some(msg.as_str()),
            _ => None,
        }
    }
}
