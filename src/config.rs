use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose logging when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Viewport width at which the wide (desktop) layouts take over.
pub const DESKTOP_BREAKPOINT_PX: f64 = 1024.0;

/// sessionStorage key marking the next page load as in-app navigation.
pub const CLIENT_NAVIGATION_KEY: &str = "clientNavigation";

// Page loader
pub const LOADER_COUNT_MS: f64 = 3000.0;
pub const LOADER_HOLD_MS: u32 = 500;
pub const LOADER_FADE_MS: f64 = 800.0;
pub const PAGE_LOADING_CLASS: &str = "page-loading";

// Navigation bar
/// Share of the scrollable height after which the bar switches to its logo.
pub const NAV_SCROLLED_PERCENT: f64 = 5.0;
/// The bar hides once the footer top is this far above the viewport bottom.
pub const NAV_FOOTER_CLEARANCE_PX: f64 = 100.0;
