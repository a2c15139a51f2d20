//! Scrub lifecycle controller.
//!
//! Owns the damper and the frame driver's cancellation handle, and gates
//! both update sources (scroll events, frame ticks) on a single phase
//! machine: `Uninitialized → Loading → Active → TornDown`.  Teardown is
//! one atomic step — the handle is cancelled and the phase flips together,
//! so a frame already queued by the scheduler is dropped by the phase
//! check rather than escaping into a post-teardown write.

use crate::app::event::FrameHandle;
use crate::core::damper::Damper;
use crate::core::geometry::{self, ContainerGeometry};
use crate::core::media::MediaElement;
use crate::core::target;

/// Lifecycle phase.  `TornDown` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    /// Loop running, metadata not yet known — scrolls compute progress but
    /// the target mapper yields nothing, so the damper stays inert.
    Loading,
    Active,
    TornDown,
}

pub struct ScrubController {
    phase: Phase,
    damper: Damper,
    /// Cancellation for the frame driver; present only while running.
    frame_handle: Option<FrameHandle>,
}

impl ScrubController {
    pub fn new(easing: f64, epsilon: f64) -> Self {
        Self {
            phase: Phase::Uninitialized,
            damper: Damper::new(easing, epsilon),
            frame_handle: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True until metadata arrives, then permanently false.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Uninitialized | Phase::Loading)
    }

    /// Current target time (exposed for the UI readout).
    pub fn target(&self) -> f64 {
        self.damper.target()
    }

    /// Mount: take ownership of the frame driver's cancellation handle and
    /// go live.  Scroll handling is active from here on; the damper loop
    /// runs but stays inert until metadata arrives.  A second `start` (or
    /// one after teardown) is a no-op.
    pub fn start(&mut self, frame_handle: FrameHandle) {
        if self.phase != Phase::Uninitialized {
            tracing::debug!("start ignored in phase {:?}", self.phase);
            return;
        }
        self.frame_handle = Some(frame_handle);
        self.phase = Phase::Loading;
    }

    /// One-shot metadata signal from the media backend.  No change to the
    /// loop cadence — it was already running.
    pub fn on_metadata_loaded(&mut self) {
        if self.phase == Phase::Loading {
            self.phase = Phase::Active;
        }
    }

    /// Scroll event: geometry → progress → target.  Degenerate geometry or
    /// unknown duration leaves the previous target in place.
    pub fn on_scroll(&mut self, geom: ContainerGeometry, media: &dyn MediaElement) {
        if matches!(self.phase, Phase::Uninitialized | Phase::TornDown) {
            return;
        }
        let Some(progress) = geometry::scroll_progress(&geom) else {
            return;
        };
        let Some(target) = target::map_target(progress, media.duration()) else {
            return;
        };
        self.damper.set_target(target);
    }

    /// Frame tick: one step of damped convergence.  Returns whether the
    /// playhead moved.  A tick delivered after teardown is a no-op.
    pub fn on_frame(&mut self, media: &mut dyn MediaElement) -> bool {
        if matches!(self.phase, Phase::Uninitialized | Phase::TornDown) {
            return false;
        }
        self.damper.tick(media)
    }

    /// Unmount: cancel the frame cadence and enter the terminal phase in
    /// one step.  Re-entrant calls are no-ops.
    pub fn stop(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        if let Some(handle) = self.frame_handle.take() {
            handle.cancel();
        }
        self.phase = Phase::TornDown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::SimClip;

    const EASING: f64 = 0.15;
    const EPSILON: f64 = 0.01;

    fn geom_at(progress: f64) -> ContainerGeometry {
        // 5-viewport page: height 200, viewport 40, range 160.
        ContainerGeometry {
            top: -progress * 160.0,
            height: 200.0,
            viewport: 40.0,
        }
    }

    fn started_controller() -> ScrubController {
        let mut c = ScrubController::new(EASING, EPSILON);
        c.start(FrameHandle::new());
        c
    }

    fn loaded_clip(duration: f64) -> SimClip {
        let mut clip = SimClip::new("test", duration, 0, 0).unwrap();
        clip.poll();
        clip
    }

    #[test]
    fn half_scroll_of_five_viewport_page_targets_midpoint() {
        let mut c = started_controller();
        let clip = loaded_clip(100.0);
        c.on_metadata_loaded();

        c.on_scroll(geom_at(0.5), &clip);
        assert_eq!(c.target(), 50.0);
    }

    #[test]
    fn pending_metadata_keeps_target_unchanged() {
        let mut c = started_controller();
        // Metadata never polled: duration reads NaN.
        let mut clip = SimClip::new("test", 100.0, 10, 0).unwrap();

        c.on_scroll(geom_at(0.7), &clip);
        assert_eq!(c.target(), 0.0, "target must be retained while loading");
        assert!(!c.on_frame(&mut clip), "inert damper must not write");
        assert_eq!(clip.current_time(), 0.0);
    }

    #[test]
    fn degenerate_geometry_keeps_target_unchanged() {
        let mut c = started_controller();
        let clip = loaded_clip(100.0);
        c.on_metadata_loaded();
        c.on_scroll(geom_at(0.25), &clip);
        let before = c.target();

        // Container no taller than the viewport.
        let flat = ContainerGeometry {
            top: -10.0,
            height: 40.0,
            viewport: 40.0,
        };
        c.on_scroll(flat, &clip);
        assert_eq!(c.target(), before);
    }

    #[test]
    fn loading_flag_clears_once_and_stays_clear() {
        let mut c = ScrubController::new(EASING, EPSILON);
        assert!(c.is_loading());
        c.start(FrameHandle::new());
        assert!(c.is_loading());
        c.on_metadata_loaded();
        assert!(!c.is_loading());
        // Stray duplicate signal changes nothing.
        c.on_metadata_loaded();
        assert_eq!(c.phase(), Phase::Active);
    }

    #[test]
    fn frames_converge_on_scrolled_target() {
        let mut c = started_controller();
        let mut clip = loaded_clip(100.0);
        c.on_metadata_loaded();
        c.on_scroll(geom_at(0.1), &clip);

        for _ in 0..43 {
            clip.poll();
            c.on_frame(&mut clip);
        }
        assert!((clip.current_time() - 10.0).abs() <= EPSILON);
    }

    #[test]
    fn teardown_freezes_playhead_and_target() {
        let mut c = started_controller();
        let mut clip = loaded_clip(100.0);
        c.on_metadata_loaded();
        c.on_scroll(geom_at(0.5), &clip);
        c.on_frame(&mut clip);

        c.stop();
        let time_at_teardown = clip.current_time();
        let target_at_teardown = c.target();

        // Frames already queued plus fresh scrolls — all must be inert.
        for _ in 0..10 {
            clip.poll();
            assert!(!c.on_frame(&mut clip));
        }
        for i in 0..5 {
            c.on_scroll(geom_at(0.1 + 0.1 * f64::from(i)), &clip);
        }
        assert_eq!(clip.current_time(), time_at_teardown);
        assert_eq!(c.target(), target_at_teardown);
    }

    #[test]
    fn stop_cancels_frame_handle_and_is_reentrant() {
        let mut c = ScrubController::new(EASING, EPSILON);
        let handle = FrameHandle::new();
        c.start(handle.clone());
        assert!(!handle.is_cancelled());

        c.stop();
        assert!(handle.is_cancelled());
        assert_eq!(c.phase(), Phase::TornDown);
        // Second stop is a no-op, not a panic or a state change.
        c.stop();
        assert_eq!(c.phase(), Phase::TornDown);
    }

    #[test]
    fn start_after_teardown_is_rejected() {
        let mut c = started_controller();
        c.stop();
        c.start(FrameHandle::new());
        assert_eq!(c.phase(), Phase::TornDown);
    }

    #[test]
    fn scroll_before_start_is_dropped() {
        let mut c = ScrubController::new(EASING, EPSILON);
        let clip = loaded_clip(100.0);
        c.on_scroll(geom_at(1.0), &clip);
        assert_eq!(c.target(), 0.0);
    }
}
