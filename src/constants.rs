// Markup classes applied by the web frontend (styling lives in the host page)

pub const HOST_CLASS: &str = "q-parallax";
pub const MEDIA_WRAPPER_CLASS: &str = "q-parallax__media absolute-full";
pub const CONTENT_CLASS: &str = "q-parallax__content absolute-full column flex-center";

// Default media element when the caller supplies none
pub const DEFAULT_MEDIA_TAG: &str = "img";

// Console log level for the wasm build
pub const LOG_LEVEL: log::Level = log::Level::Info;

#[inline]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Pull a pixel length out of a computed style value such as `"512.5px"`.
#[inline]
pub fn parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
