use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::result_state::{Outcome, ResultState};
use crate::api::{ApiError, CalculationApi};
use crate::models::{AnalysisResult, CalculatorKind, FormState};

/// What to do with a response whose request has since been superseded by a
/// newer submission on the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Apply every response as it arrives; whichever completes last is shown.
    #[default]
    LastCompleted,
    /// Apply only the response to the most recent submission.
    LatestOnly,
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-completed" => Ok(Self::LastCompleted),
            "latest-only" => Ok(Self::LatestOnly),
            other => Err(format!(
                "unknown stale policy '{other}'; expected 'last-completed' or 'latest-only'"
            )),
        }
    }
}

impl fmt::Display for StalePolicy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::LastCompleted => f.write_str("last-completed"),
            Self::LatestOnly => f.write_str("latest-only"),
        }
    }
}

/// Identifies one submission. Tickets increase monotonically per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A request ready to be sent: the form snapshot taken at submit time.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub kind: CalculatorKind,
    pub payload: FormState,
}

/// Drives one page's [`ResultState`] through a submission.
///
/// Split into [`begin`](Self::begin) and [`complete`](Self::complete) so a
/// UI can hand the request to another executor and apply the reply later;
/// [`submit`](Self::submit) does both in one call.
#[derive(Debug)]
pub struct SubmissionController {
    kind: CalculatorKind,
    state: ResultState,
    policy: StalePolicy,
    last_ticket: u64,
    in_flight: usize,
}

impl SubmissionController {
    pub fn new(
        kind: CalculatorKind,
        policy: StalePolicy,
    ) -> Self {
        Self {
            kind,
            state: ResultState::Idle,
            policy,
            last_ticket: 0,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_loading()
    }

    /// Requests sent but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Enters `Loading`, dropping any previous result or error, and returns
    /// the request to send.
    pub fn begin(
        &mut self,
        form: &FormState,
    ) -> Submission {
        self.last_ticket += 1;
        self.in_flight += 1;
        if self.in_flight > 1 {
            debug!(
                page = self.kind.slug(),
                in_flight = self.in_flight,
                "submitting while an earlier request is pending"
            );
        }
        self.state = ResultState::Loading;
        info!(page = self.kind.slug(), ticket = self.last_ticket, "submitting");

        Submission {
            ticket: Ticket(self.last_ticket),
            kind: self.kind,
            payload: form.clone(),
        }
    }

    /// Applies the reply for `ticket`.
    ///
    /// Every applied reply leaves the state `Settled`. Returns `false` when
    /// the reply was discarded as stale under [`StalePolicy::LatestOnly`].
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<AnalysisResult, ApiError>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.policy == StalePolicy::LatestOnly && ticket.0 != self.last_ticket {
            debug!(
                page = self.kind.slug(),
                ticket = ticket.0,
                latest = self.last_ticket,
                "discarding superseded response"
            );
            return false;
        }

        match &result {
            Ok(data) => info!(
                page = self.kind.slug(),
                ticket = ticket.0,
                metrics = data.numerical_results.len(),
                "calculation succeeded"
            ),
            Err(error) => warn!(
                page = self.kind.slug(),
                ticket = ticket.0,
                %error,
                "calculation failed"
            ),
        }
        self.state = ResultState::Settled(Outcome::from(result));
        true
    }

    /// Sends the current form through `api` and settles on the reply.
    pub async fn submit(
        &mut self,
        form: &FormState,
        api: &dyn CalculationApi,
    ) -> &ResultState {
        let submission = self.begin(form);
        let result = api.calculate(submission.kind, &submission.payload).await;
        self.complete(submission.ticket, result);
        &self.state
    }
}
