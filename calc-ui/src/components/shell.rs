use calc_core::CalculatorKind;
use calc_core::navigation::{NavEntry, SHELL_TITLE, nav_entries};
use gpui::{
    AppContext, ClickEvent, Context, Entity, IntoElement, ParentElement, Render, Styled, Window,
    div, px,
};
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::{h_flex, v_flex};
use tracing::info;

use crate::app::Backend;
use crate::components::CalculatorForm;

/// Sidebar plus the page it points at. All four pages are built up front so
/// their form contents survive switching back and forth.
pub struct CalculatorShell {
    active: CalculatorKind,
    pages: Vec<(CalculatorKind, Entity<CalculatorForm>)>,
}

impl CalculatorShell {
    pub fn new(
        start: CalculatorKind,
        backend: Backend,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let pages = CalculatorKind::ALL
            .iter()
            .map(|&kind| {
                let backend = backend.clone();
                let form = cx.new(|form_cx| CalculatorForm::new(kind, backend, window, form_cx));
                (kind, form)
            })
            .collect();

        Self {
            active: start,
            pages,
        }
    }

    pub fn navigate(
        &mut self,
        kind: CalculatorKind,
        cx: &mut Context<Self>,
    ) {
        if self.active == kind {
            return;
        }
        info!(from = %self.active, to = %kind, route = kind.route(), "navigate");
        self.active = kind;
        cx.notify();
    }

    fn nav_button(
        entry: NavEntry,
        cx: &mut Context<Self>,
    ) -> Button {
        let kind = entry.kind;
        let button = Button::new(kind.slug())
            .label(entry.label)
            .w_full()
            .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                this.navigate(kind, cx)
            }));
        if entry.active {
            button.primary()
        } else {
            button.ghost()
        }
    }
}

impl Render for CalculatorShell {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let sidebar = v_flex()
            .w(px(240.))
            .h_full()
            .p_4()
            .gap_2()
            .border_r_1()
            .child(div().text_xl().pb_4().child(SHELL_TITLE))
            .children(
                nav_entries(self.active)
                    .into_iter()
                    .map(|entry| Self::nav_button(entry, cx)),
            );

        let page = self
            .pages
            .iter()
            .find(|(kind, _)| *kind == self.active)
            .map(|(_, form)| form.clone());

        h_flex()
            .size_full()
            .items_start()
            .child(sidebar)
            .child(div().flex_1().h_full().p_5().children(page))
    }
}
