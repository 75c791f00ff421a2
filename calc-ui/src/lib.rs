pub mod app;
pub mod components;
pub mod config;
pub mod gui;
pub mod headless;
pub mod logging;

use gpui::{App, actions};
pub use gui::{run_gui, setup_app};
use tracing::info;

actions!(wireless_toolkit, [Quit]);

// Takes a reference to the action (often unused) and mutable app context
pub fn quit(
    _: &Quit,
    cx: &mut App,
) {
    info!("Executing quit handler");
    cx.quit();
}
