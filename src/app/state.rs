//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).

use crate::config::ScrubConfig;
use crate::core::geometry::ContainerGeometry;

/// Top-level application state.
pub struct AppState {
    /// User configuration (easing, epsilon, span, cadence).
    pub config: ScrubConfig,
    /// Rows scrolled into the virtual page, ≥ 0.
    pub scroll_offset: f64,
    /// Current viewport height in rows.
    pub viewport_rows: f64,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ScrubConfig, viewport_rows: u16) -> Self {
        Self {
            config,
            scroll_offset: 0.0,
            viewport_rows: f64::from(viewport_rows),
            should_quit: false,
            status_message: None,
        }
    }

    /// Total height of the virtual page the user scrolls through.
    pub fn page_rows(&self) -> f64 {
        self.viewport_rows * self.config.span_screens
    }

    /// Furthest the page can be scrolled before its bottom pins.
    pub fn max_scroll(&self) -> f64 {
        (self.page_rows() - self.viewport_rows).max(0.0)
    }

    /// Scroll by `delta` rows (negative = up), clamped to the page.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_offset = (self.scroll_offset + delta).clamp(0.0, self.max_scroll());
    }

    /// Jump to an absolute offset, clamped to the page.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
    }

    /// Re-clamp after a terminal resize (the page shrinks with it).
    pub fn handle_resize(&mut self, viewport_rows: u16) {
        self.viewport_rows = f64::from(viewport_rows);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Snapshot the geometry the sampler consumes, as of this instant.
    pub fn geometry(&self) -> ContainerGeometry {
        ContainerGeometry {
            top: -self.scroll_offset,
            height: self.page_rows(),
            viewport: self.viewport_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::scroll_progress;

    fn state() -> AppState {
        // span_screens = 5.0 by default; 40-row viewport → 200-row page.
        AppState::new(ScrubConfig::default(), 40)
    }

    #[test]
    fn scroll_is_clamped_to_page() {
        let mut s = state();
        s.scroll_by(-10.0);
        assert_eq!(s.scroll_offset, 0.0);
        s.scroll_by(10_000.0);
        assert_eq!(s.scroll_offset, s.max_scroll());
    }

    #[test]
    fn geometry_reflects_offset() {
        let mut s = state();
        s.scroll_to(80.0);
        let g = s.geometry();
        assert_eq!(g.top, -80.0);
        assert_eq!(scroll_progress(&g), Some(0.5));
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut s = state();
        s.scroll_to(s.max_scroll());
        s.handle_resize(100); // taller viewport → shorter scrollable range
        assert!(s.scroll_offset <= s.max_scroll());
    }
}
