//! Scroll target resolution.
//!
//! The parallax host is measured against whatever actually scrolls it: the
//! nearest ancestor whose overflow lets it scroll, or the viewport when no such
//! ancestor exists.

use crate::constants::SCROLL_MARKER_CLASSES;

/// A document the core can reason about without touching a real browser.
pub trait Dom {
    type Element: Clone;
}

/// Where scroll events come from and what the host is measured against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollTarget<E> {
    Viewport,
    Element(E),
}

impl<E> ScrollTarget<E> {
    #[inline]
    pub fn is_viewport(&self) -> bool {
        matches!(self, ScrollTarget::Viewport)
    }

    #[inline]
    pub fn element(&self) -> Option<&E> {
        match self {
            ScrollTarget::Viewport => None,
            ScrollTarget::Element(e) => Some(e),
        }
    }
}

/// Computed `overflow-y` of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
    Overlay,
}

impl Overflow {
    /// Parse a computed style value. Unknown values are treated as `visible`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "hidden" => Overflow::Hidden,
            "clip" => Overflow::Clip,
            "auto" => Overflow::Auto,
            "scroll" => Overflow::Scroll,
            "overlay" => Overflow::Overlay,
            _ => Overflow::Visible,
        }
    }

    #[inline]
    pub fn scrolls(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll | Overflow::Overlay)
    }
}

/// Read-only view of the element tree needed by [`resolve`].
pub trait ScrollTree: Dom {
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;
    fn overflow_y(&self, element: &Self::Element) -> Overflow;
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// `<html>` or `<body>`. Their overflow belongs to the viewport, which
    /// is where their scroll events are delivered.
    fn is_document_root(&self, _element: &Self::Element) -> bool {
        false
    }
}

pub fn is_scroll_container<T: ScrollTree + ?Sized>(tree: &T, element: &T::Element) -> bool {
    tree.overflow_y(element).scrolls()
        || SCROLL_MARKER_CLASSES
            .iter()
            .any(|class| tree.has_class(element, class))
}

/// Walk up from `element`'s parent to the first scroll container, falling
/// back to the viewport. The walk stops at the document root.
pub fn resolve<T: ScrollTree + ?Sized>(tree: &T, element: &T::Element) -> ScrollTarget<T::Element> {
    let mut cursor = tree.parent(element);
    while let Some(node) = cursor {
        if tree.is_document_root(&node) {
            break;
        }
        if is_scroll_container(tree, &node) {
            return ScrollTarget::Element(node);
        }
        cursor = tree.parent(&node);
    }
    ScrollTarget::Viewport
}
