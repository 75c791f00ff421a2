use calc_core::CalculatorKind;
use gpui::{
    AnyView, App, AppContext, Application, Bounds, KeyBinding, Menu, MenuItem, WindowBounds,
    WindowOptions,
};
use gpui_component::Root;
use tracing::{error, info};

use crate::{
    Quit,
    app::Backend,
    components::{CalculatorShell, WindowPreferences},
    quit,
};

pub fn setup_app(app_cx: &mut App) {
    // This must be called before using any GPUI Component features.
    gpui_component::init(app_cx);

    app_cx.activate(true);

    #[cfg(target_os = "macos")]
    app_cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

    #[cfg(not(target_os = "macos"))]
    app_cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
    ]);

    app_cx.on_action(quit);

    app_cx.set_menus(vec![Menu {
        name: "Wireless Toolkit".into(),
        items: vec![MenuItem::action("Quit", Quit)],
    }]);
}

/// Opens the main window on `start` and runs the event loop until quit.
pub fn run_gui(
    start: CalculatorKind,
    backend: Backend,
    prefs: WindowPreferences,
) {
    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx: &mut App| {
            setup_app(cx);

            let bounds = Bounds::centered(None, prefs.size, cx);
            let options = WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                ..Default::default()
            };

            let opened = cx.open_window(options, |window, cx| {
                let shell =
                    cx.new(|shell_cx| CalculatorShell::new(start, backend.clone(), window, shell_cx));
                cx.new(|root_cx| Root::new(AnyView::from(shell), window, root_cx))
            });

            match opened {
                Ok(_) => info!(page = %start, "window opened"),
                Err(e) => {
                    error!(?e, "failed to open window");
                    cx.quit();
                }
            }
        });
}
