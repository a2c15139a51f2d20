//! Scroll geometry — turns container/viewport measurements into a
//! normalized progress value.
//!
//! The scrub page is a virtual strip several viewports tall.  How far the
//! user has scrolled through it (0 = top pinned, 1 = bottom pinned) is the
//! single number the rest of the pipeline consumes.

/// Container geometry captured at the moment of a scroll event.
///
/// `top` is the container's top edge relative to the viewport top, so it
/// goes negative as the user scrolls down.  All fields are in rows (or any
/// consistent length unit — the ratio is what matters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    /// Container top relative to the viewport top (≤ 0 once scrolled).
    pub top: f64,
    /// Total container height.
    pub height: f64,
    /// Visible viewport height.
    pub viewport: f64,
}

impl ContainerGeometry {
    /// Distance the user can scroll before the container bottom pins.
    pub fn scrollable_range(&self) -> f64 {
        self.height - self.viewport
    }
}

/// Normalized scroll progress through the container, clamped to `[0, 1]`.
///
/// Returns `None` when the container is not taller than the viewport
/// (nothing to scroll — scrub is undefined for this layout) or when any
/// input is non-finite.  Never returns NaN.  Called on every scroll event,
/// so it must stay O(1) and allocation-free.
pub fn scroll_progress(geom: &ContainerGeometry) -> Option<f64> {
    let range = geom.scrollable_range();
    if !range.is_finite() || range <= 0.0 || !geom.top.is_finite() {
        return None;
    }
    let distance = -geom.top;
    Some((distance / range).clamp(0.0, 1.0))
}
