/// Element ids, class names and data attributes shared between the page
/// markup and the front-end.
///
/// Kept free of web-sys types so host-side tests can include this file.
// Root container holding the panels; carries the `data-*` configuration
pub const ROOT_ID: &str = "reel";

// Optional chrome around the reel
pub const PROGRESS_ID: &str = "reel-progress";
pub const PREV_BUTTON_ID: &str = "reel-prev";
pub const NEXT_BUTTON_ID: &str = "reel-next";
pub const COUNTER_ID: &str = "reel-counter";

// Panel markup
pub const PANEL_CLASS: &str = "reel-panel";
pub const IMAGE_CLASS: &str = "reel-image";
pub const REVEALED_CLASS: &str = "revealed";
pub const INDEX_ATTR: &str = "data-index";

// CSS custom property mirrored from the progress value
pub const PROGRESS_VAR: &str = "--reel-progress";

// Global under which an external inertial scroller may be installed
pub const EXTERNAL_SCROLLER_KEY: &str = "reelScroller";

// Configuration attributes read from the root element (without `data-`)
pub const CONFIG_KEYS: [&str; 8] = [
    "panels",
    "policy",
    "profile",
    "asset-base",
    "asset-ext",
    "track-current",
    "skip-px",
    "duration",
];

/// Selector matching every panel section inside the root.
pub fn panel_selector() -> String {
    format!(".{}", PANEL_CLASS)
}

/// Text shown in the counter for the 0-based `current` panel.
pub fn counter_text(current: usize, total: usize) -> String {
    format!("{} / {}", current + 1, total)
}

/// Width of the progress bar, clamped for display only.
pub fn progress_width(percent: f64) -> String {
    let p = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{:.2}%", p)
}

/// CSS transform applied to a panel image for the given scale.
pub fn scale_transform(scale: f64) -> String {
    format!("scale({:.4})", scale)
}
