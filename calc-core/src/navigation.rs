use crate::models::CalculatorKind;

pub const SHELL_TITLE: &str = "AI Wireless Toolkit";

/// Page shown for the root route.
pub const HOME: CalculatorKind = CalculatorKind::WirelessSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub kind: CalculatorKind,
    pub label: &'static str,
    pub route: String,
    pub active: bool,
}

/// One entry per calculator page, in page order, with `active` highlighted.
pub fn nav_entries(active: CalculatorKind) -> Vec<NavEntry> {
    CalculatorKind::ALL
        .into_iter()
        .map(|kind| NavEntry {
            kind,
            label: kind.nav_label(),
            route: kind.route(),
            active: kind == active,
        })
        .collect()
}

/// Maps a route to its page. The root route redirects to [`HOME`].
pub fn resolve_route(path: &str) -> Option<CalculatorKind> {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Some(HOME);
    }
    trimmed.parse().ok()
}
