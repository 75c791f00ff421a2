use super::controller::{StalePolicy, Submission, SubmissionController, Ticket};
use super::result_state::ResultState;
use crate::api::{ApiError, CalculationApi};
use crate::models::{AnalysisResult, CalculatorKind, FormError, FormState};
use crate::render::ResultsView;

/// Everything one calculator page owns. Pages share nothing.
#[derive(Debug)]
pub struct CalculatorPage {
    form: FormState,
    controller: SubmissionController,
}

impl CalculatorPage {
    pub fn new(
        kind: CalculatorKind,
        policy: StalePolicy,
    ) -> Self {
        Self {
            form: FormState::with_defaults(kind),
            controller: SubmissionController::new(kind, policy),
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        self.form.kind()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &ResultState {
        self.controller.state()
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.form.set_field(name, value)
    }

    /// Applies a `name=value` assignment to the form.
    pub fn apply_assignment(
        &mut self,
        assignment: &str,
    ) -> Result<(), FormError> {
        self.form.apply_assignment(assignment)
    }

    pub fn begin_submit(&mut self) -> Submission {
        self.controller.begin(&self.form)
    }

    /// Like [`begin_submit`](Self::begin_submit), but refuses while a
    /// request is already loading. The desktop form submits through this.
    pub fn try_begin_submit(&mut self) -> Option<Submission> {
        if self.is_busy() {
            return None;
        }
        Some(self.begin_submit())
    }

    pub fn complete_submit(
        &mut self,
        ticket: Ticket,
        result: Result<AnalysisResult, ApiError>,
    ) -> bool {
        self.controller.complete(ticket, result)
    }

    pub async fn submit(
        &mut self,
        api: &dyn CalculationApi,
    ) -> &ResultState {
        self.controller.submit(&self.form, api).await
    }

    pub fn view(&self) -> ResultsView {
        ResultsView::from_state(self.controller.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pages_are_isolated() {
        let mut ofdm = CalculatorPage::new(CalculatorKind::Ofdm, StalePolicy::default());
        let link = CalculatorPage::new(CalculatorKind::LinkBudget, StalePolicy::default());

        ofdm.set_field("rbBw", "360").unwrap();
        ofdm.begin_submit();

        assert_eq!(link.form(), &FormState::with_defaults(CalculatorKind::LinkBudget));
        assert_eq!(link.state(), &ResultState::Idle);
        assert!(ofdm.is_busy());
    }

    #[test]
    fn form_stays_editable_after_failure() {
        let mut page = CalculatorPage::new(CalculatorKind::Ofdm, StalePolicy::default());
        let sub = page.begin_submit();
        page.complete_submit(sub.ticket, Err(ApiError::Transport("down".to_string())));

        page.set_field("parallelRbs", "50").unwrap();
        let retry = page.begin_submit();

        assert_eq!(retry.payload.get("parallelRbs"), Some("50"));
        assert!(page.is_busy());
    }

    #[test]
    fn guarded_submit_refuses_while_loading() {
        let mut page = CalculatorPage::new(CalculatorKind::WirelessSystem, StalePolicy::default());
        let first = page.try_begin_submit().expect("idle page accepts a submit");

        assert!(page.try_begin_submit().is_none());
        assert!(page.is_busy());

        page.complete_submit(first.ticket, Err(ApiError::Transport("down".to_string())));
        assert!(page.try_begin_submit().is_some());
    }

    #[test]
    fn unguarded_submit_still_overlaps() {
        let mut page = CalculatorPage::new(CalculatorKind::Ofdm, StalePolicy::default());
        let first = page.begin_submit();
        let second = page.begin_submit();
        assert!(second.ticket > first.ticket);
    }

    #[test]
    fn submission_snapshots_form() {
        let mut page = CalculatorPage::new(CalculatorKind::Ofdm, StalePolicy::default());
        let sub = page.begin_submit();
        page.set_field("rbBw", "1").unwrap();
        assert_eq!(sub.payload.get("rbBw"), Some("180"));
    }
}
