mod analysis;
mod calculator;
mod form_state;

pub use analysis::{AnalysisResult, ErrorBody, MetricValue};
pub use calculator::{CalculatorKind, FieldSpec, ParseCalculatorError};
pub use form_state::{FormError, FormState};
