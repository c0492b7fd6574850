use std::time::Duration;

// Shared tuning constants used by the core and the web frontend.

// Config defaults
pub const DEFAULT_HEIGHT: f64 = 500.0; // px
pub const DEFAULT_SPEED: f64 = 1.0;
pub const SPEED_MIN: f64 = 0.0;
pub const SPEED_MAX: f64 = 1.0;

// Quiet period before resize/load bursts re-measure the media
pub const RESIZE_DEBOUNCE_MS: u64 = 50;

// Media is centered horizontally by shifting it back half its own width
pub const MEDIA_TRANSLATE_X_PERCENT: f64 = -50.0;

// Marker classes that make an ancestor count as a scroll container
pub const SCROLL_MARKER_CLASSES: [&str; 3] = ["scroll", "scroll-y", "overflow-auto"];

#[inline]
pub fn resize_debounce() -> Duration {
    Duration::from_millis(RESIZE_DEBOUNCE_MS)
}
