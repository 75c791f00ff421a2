//! Per-page interaction lifecycle: form edits, submission, and the
//! resulting request state.

mod controller;
mod page;
mod result_state;

pub use controller::{StalePolicy, Submission, SubmissionController, Ticket};
pub use page::CalculatorPage;
pub use result_state::{Outcome, ResultState};
