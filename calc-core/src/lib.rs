pub mod api;
pub mod models;
pub mod navigation;
pub mod render;
pub mod session;

pub use api::{ApiError, CalculationApi, EndpointConfig};
pub use models::*;
pub use render::ResultsView;
pub use session::{CalculatorPage, ResultState, StalePolicy, SubmissionController};
