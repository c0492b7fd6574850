//! Box metrics of the host element and of its scroll target.
//!
//! All tops are expressed relative to the viewport origin, so the viewport
//! itself always measures as `top = 0`.

use crate::resolver::{Dom, ScrollTarget};

/// Vertical band of a scroll target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetGeometry {
    pub top: f64,
    pub height: f64,
    pub bottom: f64,
}

impl TargetGeometry {
    #[inline]
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            bottom: top + height,
        }
    }

    #[inline]
    pub fn viewport(height: f64) -> Self {
        Self::new(0.0, height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementGeometry {
    pub top: f64,
    pub height: f64,
}

pub trait GeometryProbe: Dom {
    fn viewport_height(&self) -> f64;
    /// Distance from the viewport's top edge to the element's top edge.
    fn offset_top(&self, element: &Self::Element) -> f64;
    fn height(&self, element: &Self::Element) -> f64;

    fn measure_element(&self, element: &Self::Element) -> ElementGeometry {
        ElementGeometry {
            top: self.offset_top(element),
            height: self.height(element),
        }
    }

    fn measure_target(&self, target: &ScrollTarget<Self::Element>) -> TargetGeometry {
        match target {
            ScrollTarget::Viewport => TargetGeometry::viewport(self.viewport_height()),
            ScrollTarget::Element(e) => TargetGeometry::new(self.offset_top(e), self.height(e)),
        }
    }
}
