pub mod calculator_form;
pub mod results_panel;
pub mod shell;

use gpui::{ClickEvent, Div, ParentElement, Styled, TextAlign, div};
use gpui::{App, SharedString, Window};
use gpui::{Pixels, Size, px};
use gpui_component::Sizable;
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::h_flex;

pub use calculator_form::CalculatorForm;
pub use shell::CalculatorShell;

#[derive(Debug, Clone, Copy)]
pub struct WindowPreferences {
    pub size: Size<Pixels>,
}

impl Default for WindowPreferences {
    fn default() -> Self {
        Self {
            size: Size {
                width: px(1100.0),
                height: px(760.0),
            },
        }
    }
}

/// Creates a primary-styled button with a custom click handler.
pub fn make_button(
    id: impl Into<SharedString>,
    label: impl Into<SharedString>,
    on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> Button {
    Button::new(id.into())
        .primary()
        .large()
        .w(px(200.))
        .label(label.into())
        .on_click(on_click)
}

/// Creates the common outer container and right-aligned label used by every
/// form row.
pub fn make_labeled_row(label: impl Into<SharedString>) -> Div {
    h_flex()
        .items_center()
        .gap_5()
        .p(px(2.))
        .rounded_md()
        .border_1()
        .child(
            div()
                .min_w(px(280.))
                .text_align(TextAlign::Right)
                .child(label.into()),
        )
}
