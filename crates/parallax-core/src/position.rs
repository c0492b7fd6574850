//! Offset math for the parallax media.
//!
//! `compute` is pure: it never touches the DOM. Applying the result (the media
//! transform and the `scroll` emission) is left to the lifecycle binder.

use crate::config::Config;
use crate::constants::MEDIA_TRANSLATE_X_PERCENT;
use crate::geometry::{ElementGeometry, TargetGeometry};

/// Outcome of one recomputation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// The host does not overlap the target's visible band.
    Hidden,
    Visible { percent: f64, media_offset: f64 },
}

impl Placement {
    #[inline]
    pub fn is_visible(&self) -> bool {
        matches!(self, Placement::Visible { .. })
    }

    #[inline]
    pub fn percent(&self) -> Option<f64> {
        match *self {
            Placement::Visible { percent, .. } => Some(percent),
            Placement::Hidden => None,
        }
    }

    /// Media offset in px; zero while hidden.
    #[inline]
    pub fn media_offset(&self) -> f64 {
        match *self {
            Placement::Visible { media_offset, .. } => media_offset,
            Placement::Hidden => 0.0,
        }
    }
}

/// Progress of the host through the target band and the matching media offset.
///
/// `percent` is 0 when the host's top touches the target's bottom edge and
/// reaches 1 when the host's bottom leaves through the target's top edge. It is
/// deliberately not clamped.
pub fn compute(
    container: TargetGeometry,
    element: ElementGeometry,
    config: &Config,
    media_height: f64,
) -> Placement {
    let height = config.height();
    let top = element.top;
    let bottom = top + height;

    if !(bottom > container.top && top < container.bottom) {
        return Placement::Hidden;
    }

    let percent = (container.bottom - top) / (height + container.height);
    let media_offset = (media_height - height) * percent * config.speed();
    Placement::Visible {
        percent,
        media_offset,
    }
}

/// CSS transform placing the media at `offset` px, centered horizontally.
pub fn media_transform(offset: f64) -> String {
    format!("translate3d({MEDIA_TRANSLATE_X_PERCENT}%, {offset}px, 0)")
}
