use calc_core::{ApiError, CalculatorKind, CalculatorPage, FieldSpec};
use gpui::{
    AppContext, ClickEvent, Context, Div, Entity, IntoElement, ParentElement, Render, Styled,
    Subscription, Window, div,
};
use gpui_component::{
    Disableable, h_flex,
    input::{Input, InputEvent, InputState, MaskPattern},
    v_flex,
};
use tracing::{debug, warn};

use crate::{
    app::Backend,
    components::{make_button, make_labeled_row, results_panel::results_panel},
    logging::log_task_error,
};

/// One calculator page: its inputs, submit button, and results box.
///
/// Each edit is written straight into the page's form state; the request is
/// driven on the tokio runtime and its reply applied back here.
pub struct CalculatorForm {
    page: CalculatorPage,
    inputs: Vec<(&'static FieldSpec, Entity<InputState>)>,
    backend: Backend,
    _subscriptions: Vec<Subscription>,
}

impl CalculatorForm {
    pub fn new(
        kind: CalculatorKind,
        backend: Backend,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let page = CalculatorPage::new(kind, backend.stale_policy);
        let mut inputs = Vec::with_capacity(kind.fields().len());
        let mut subscriptions = Vec::with_capacity(kind.fields().len());

        for spec in kind.fields() {
            let state = make_input_state(spec, window, cx);
            let name = spec.name;
            subscriptions.push(cx.subscribe_in(
                &state,
                window,
                move |this: &mut Self,
                      state: &Entity<InputState>,
                      event: &InputEvent,
                      _window,
                      cx| {
                    if matches!(event, InputEvent::Change { .. }) {
                        let value = state.read(cx).value().to_string();
                        if let Err(e) = this.page.set_field(name, value) {
                            warn!(%e, "field edit rejected");
                        }
                        cx.notify();
                    } else if matches!(event, InputEvent::PressEnter { .. }) {
                        this.submit(cx);
                    }
                },
            ));
            inputs.push((spec, state));
        }

        Self {
            page,
            inputs,
            backend,
            _subscriptions: subscriptions,
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        self.page.kind()
    }

    /// Sends the current form. The page shows `Loading` immediately; the
    /// reply is applied whenever it arrives. Ignored while a request is
    /// still loading, whether triggered by the button or by Enter.
    pub fn submit(
        &mut self,
        cx: &mut Context<Self>,
    ) {
        let Some(submission) = self.page.try_begin_submit() else {
            debug!(page = self.kind().slug(), "submit ignored while loading");
            return;
        };
        let ticket = submission.ticket;
        cx.notify();

        let api = self.backend.api.clone();
        let request = self
            .backend
            .runtime
            .spawn(async move { api.calculate(submission.kind, &submission.payload).await });

        cx.spawn(async move |this, cx| {
            let result = request.await.unwrap_or_else(|e| {
                Err(ApiError::Transport(format!("request task ended early: {e}")))
            });
            log_task_error(
                "apply-response",
                this.update(cx, |form, cx| {
                    form.page.complete_submit(ticket, result);
                    cx.notify();
                }),
            );
        })
        .detach();
    }
}

impl Render for CalculatorForm {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let busy = self.page.is_busy();
        let label = if busy {
            "Calculating..."
        } else {
            "Calculate & Analyze"
        };

        v_flex()
            .size_full()
            .gap_4()
            .child(div().text_2xl().child(self.kind().title()))
            .child(
                h_flex()
                    .gap_4()
                    .items_start()
                    .size_full()
                    .child(
                        v_flex()
                            .gap_2()
                            .children(
                                self.inputs
                                    .iter()
                                    .map(|(spec, state)| make_input_row(state, spec.label)),
                            )
                            .child(
                                make_button(
                                    "calculate",
                                    label,
                                    cx.listener(|this, _: &ClickEvent, _window, cx| {
                                        this.submit(cx)
                                    }),
                                )
                                .disabled(busy),
                            ),
                    )
                    .child(results_panel(&self.page.view())),
            )
    }
}

fn make_input_state(
    spec: &FieldSpec,
    window: &mut Window,
    cx: &mut Context<CalculatorForm>,
) -> Entity<InputState> {
    cx.new(|closure_cx| {
        InputState::new(window, closure_cx)
            .mask_pattern(number_mask(spec))
            .placeholder(spec.label)
            .default_value(spec.default)
    })
}

/// Numeric mask for a field: no grouping separator, since the text is sent
/// verbatim, and as many decimals as the field's step allows.
fn number_mask(spec: &FieldSpec) -> MaskPattern {
    MaskPattern::Number {
        separator: None,
        fraction: Some(spec.fraction_digits()),
    }
}

fn make_input_row(
    state: &Entity<InputState>,
    input_label: &'static str,
) -> Div {
    make_labeled_row(input_label).child(Input::new(state).flex_grow())
}
