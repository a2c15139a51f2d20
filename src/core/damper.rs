//! Playback damper — per-frame exponential ease of the playhead toward
//! the scroll-derived target.
//!
//! Each tick closes a fixed fraction of the remaining gap (a first-order
//! low-pass filter), so the gap after n unobstructed ticks is
//! `diff0 * (1 - easing)^n` — smooth deceleration instead of the playhead
//! snapping to wherever the last scroll event pointed.

use super::media::MediaElement;

/// Whether a playhead write is safe to issue right now.
///
/// A write while the backend is still decoding the previous seek would
/// queue up and stall visible updates, so the damper skips the tick and
/// retries on the next one.  Pure read of backend state.
pub fn can_seek(media: &dyn MediaElement) -> bool {
    !media.seeking()
}

/// Target-time cell plus the easing loop that drains toward it.
///
/// One instance per mounted scrubber: scroll events call [`set_target`],
/// the frame loop calls [`tick`].  Both run to completion on the same
/// loop, so no synchronization is needed — a tick that observes a stale
/// target is corrected by the next scroll event.
///
/// [`set_target`]: Damper::set_target
/// [`tick`]: Damper::tick
#[derive(Debug, Clone)]
pub struct Damper {
    /// Playback time the playhead is eased toward.
    target: f64,
    /// Fraction of the remaining gap closed per tick.  Higher = snappier.
    /// Tied to tick cadence: halving the frame rate halves convergence.
    easing: f64,
    /// Dead-zone radius.  Inside it no write is issued, which avoids
    /// oscillating around the target on floating-point residue.
    epsilon: f64,
}

impl Damper {
    pub fn new(easing: f64, epsilon: f64) -> Self {
        Self {
            target: 0.0,
            easing: easing.clamp(0.01, 0.95),
            epsilon: epsilon.max(f64::EPSILON),
        }
    }

    /// Overwrite the shared target.  Called from scroll handling.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// One frame of convergence.  Returns whether the playhead was moved.
    ///
    /// Skips the write (and reports `false`) when already inside the
    /// epsilon dead-zone, or when the seek guard says a previous write is
    /// still decoding — the latter is retried automatically next tick, no
    /// backoff, bounded only by loop cancellation.
    pub fn tick(&mut self, media: &mut dyn MediaElement) -> bool {
        let diff = self.target - media.current_time();
        if diff.abs() <= self.epsilon {
            return false;
        }
        if !can_seek(media) {
            return false;
        }
        media.set_current_time(media.current_time() + diff * self.easing);
        true
    }
}
