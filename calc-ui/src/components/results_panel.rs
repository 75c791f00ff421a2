use calc_core::ResultsView;
use calc_core::render::{
    BUSY_TEXT, EXPLANATION_HEADING, METRICS_HEADING, PLACEHOLDER_TEXT, RESULTS_HEADING,
};
use gpui::{AnyElement, FontWeight, IntoElement, ParentElement, Styled, div, px, red};
use gpui_component::{h_flex, v_flex};

/// Builds the results box for the current view of a page.
pub fn results_panel(view: &ResultsView) -> AnyElement {
    let body = match view {
        ResultsView::Placeholder => div().child(PLACEHOLDER_TEXT).into_any_element(),
        ResultsView::Busy => div().child(BUSY_TEXT).into_any_element(),
        ResultsView::Error(message) => div()
            .text_color(red())
            .child(message.clone())
            .into_any_element(),
        ResultsView::Report {
            metrics,
            paragraphs,
        } => v_flex()
            .gap_3()
            .child(div().text_xl().child(RESULTS_HEADING))
            .child(
                v_flex()
                    .gap_1()
                    .child(div().text_lg().child(METRICS_HEADING))
                    .children(metrics.iter().map(|line| {
                        h_flex()
                            .gap_2()
                            .child(
                                div()
                                    .font_weight(FontWeight::BOLD)
                                    .child(format!("{}:", line.label)),
                            )
                            .child(line.value.clone())
                    })),
            )
            .child(
                v_flex()
                    .gap_2()
                    .child(div().text_lg().child(EXPLANATION_HEADING))
                    .children(paragraphs.iter().map(|p| div().child(p.clone()))),
            )
            .into_any_element(),
    };

    v_flex()
        .flex_1()
        .min_w(px(320.))
        .p_4()
        .gap_2()
        .rounded_md()
        .border_1()
        .child(body)
        .into_any_element()
}
