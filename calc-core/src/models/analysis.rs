use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single metric as returned by the calculation service.
///
/// The service pre-formats most values (units included), but nothing here
/// depends on that: any JSON scalar is accepted and shown as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValue(pub Value);

impl fmt::Display for MetricValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            Value::Null => Ok(()),
            other => write!(f, "{other}"),
        }
    }
}

/// Decoded success body: named metrics plus a narrative explanation.
///
/// `numerical_results` keeps the server's key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub numerical_results: Map<String, Value>,
    pub ai_explanation: String,
}

impl AnalysisResult {
    pub fn metrics(&self) -> impl Iterator<Item = (&str, MetricValue)> + '_ {
        self.numerical_results
            .iter()
            .map(|(k, v)| (k.as_str(), MetricValue(v.clone())))
    }

    /// The explanation split into paragraphs, one per line break.
    ///
    /// Empty segments are kept so that the paragraph count always equals
    /// the number of line breaks plus one.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.ai_explanation.split('\n').collect()
    }
}

/// Failure body. The service reports problems as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extracts the `error` string from a raw body, if the body is a JSON
    /// object carrying one.
    pub fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
    }
}
