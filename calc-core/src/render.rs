//! Projection of a page's [`ResultState`] into something displayable.
//!
//! Pure: no state is changed and nothing is fetched. The desktop shell and
//! the headless printer both consume [`ResultsView`].

use std::fmt;

use crate::session::{Outcome, ResultState};

pub const PLACEHOLDER_TEXT: &str = "Results will appear here...";
pub const BUSY_TEXT: &str = "Calculating...";
pub const RESULTS_HEADING: &str = "Analysis Results";
pub const METRICS_HEADING: &str = "Key Metrics";
pub const EXPLANATION_HEADING: &str = "AI-Powered Explanation";

/// One `label: value` line of the metrics list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Placeholder,
    Busy,
    Error(String),
    Report {
        metrics: Vec<MetricLine>,
        paragraphs: Vec<String>,
    },
}

impl ResultsView {
    pub fn from_state(state: &ResultState) -> Self {
        match state {
            ResultState::Idle => Self::Placeholder,
            ResultState::Loading => Self::Busy,
            ResultState::Settled(Outcome::Failure(msg)) => Self::Error(msg.clone()),
            ResultState::Settled(Outcome::Success(data)) => Self::Report {
                metrics: data
                    .metrics()
                    .map(|(label, value)| MetricLine {
                        label: label.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
                paragraphs: data.paragraphs().into_iter().map(String::from).collect(),
            },
        }
    }
}

impl fmt::Display for MetricLine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

impl fmt::Display for ResultsView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Placeholder => writeln!(f, "{PLACEHOLDER_TEXT}"),
            Self::Busy => writeln!(f, "{BUSY_TEXT}"),
            Self::Error(msg) => writeln!(f, "Error: {msg}"),
            Self::Report {
                metrics,
                paragraphs,
            } => {
                writeln!(f, "{RESULTS_HEADING}")?;
                writeln!(f)?;
                writeln!(f, "{METRICS_HEADING}")?;
                for line in metrics {
                    writeln!(f, "  {line}")?;
                }
                writeln!(f)?;
                writeln!(f, "{EXPLANATION_HEADING}")?;
                for paragraph in paragraphs {
                    writeln!(f, "  {paragraph}")?;
                }
                Ok(())
            }
        }
    }
}
