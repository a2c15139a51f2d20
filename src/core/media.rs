//! The media seam — the minimal surface the scrub loop needs from a
//! playback backend, plus a simulated clip used by the TUI and tests.
//!
//! Real decoders expose exactly this shape: a duration that is unknown
//! until metadata arrives, a read/write playhead, and a `seeking` flag
//! that stays up while a position write is still decoding.

use thiserror::Error;

/// Errors from constructing a media backend.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("clip duration must be a finite non-negative number, got {0}")]
    InvalidDuration(f64),
    #[error("empty media source identifier")]
    EmptySource,
}

/// What the control loop reads from / writes to a media backend.
///
/// The loop only ever reads `duration` and `seeking` and writes
/// `current_time`; everything else about the backend is its own business.
pub trait MediaElement {
    /// Total length in seconds.  NaN until metadata has loaded.
    fn duration(&self) -> f64;
    /// Current playhead position in seconds.
    fn current_time(&self) -> f64;
    /// Move the playhead.  May start an asynchronous decode — `seeking()`
    /// reports whether one is still in flight.
    fn set_current_time(&mut self, t: f64);
    /// True while a previous position write is still resolving.
    fn seeking(&self) -> bool;
}

/// A simulated clip with frame-granular metadata delay and seek latency.
///
/// Stands in for a real decoder: for `metadata_delay` frames the duration
/// reads as NaN, and every position write holds `seeking` up for
/// `seek_latency` frames.  Drive it by calling [`SimClip::poll`] once per
/// frame.
#[derive(Debug)]
pub struct SimClip {
    source: String,
    duration: f64,
    current_time: f64,
    /// Frames until metadata is considered loaded.
    metadata_delay: u32,
    /// Frames a seek keeps the decoder busy.
    seek_latency: u32,
    /// Frames remaining on the in-flight seek (0 = idle).
    seek_remaining: u32,
    metadata_loaded: bool,
}

impl SimClip {
    pub fn new(
        source: &str,
        duration: f64,
        metadata_delay: u32,
        seek_latency: u32,
    ) -> Result<Self, MediaError> {
        if source.trim().is_empty() {
            return Err(MediaError::EmptySource);
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(MediaError::InvalidDuration(duration));
        }
        Ok(Self {
            source: source.to_string(),
            duration,
            current_time: 0.0,
            metadata_delay,
            seek_latency,
            seek_remaining: 0,
            metadata_loaded: false,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Advance the simulation by one frame.  Returns `true` exactly once,
    /// on the frame metadata finishes loading (the one-shot signal the
    /// lifecycle controller listens for).
    pub fn poll(&mut self) -> bool {
        if self.seek_remaining > 0 {
            self.seek_remaining -= 1;
        }
        if !self.metadata_loaded {
            if self.metadata_delay == 0 {
                self.metadata_loaded = true;
                return true;
            }
            self.metadata_delay -= 1;
        }
        false
    }
}

impl MediaElement for SimClip {
    fn duration(&self) -> f64 {
        if self.metadata_loaded {
            self.duration
        } else {
            f64::NAN
        }
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, t: f64) {
        self.current_time = t;
        self.seek_remaining = self.seek_latency;
    }

    fn seeking(&self) -> bool {
        self.seek_remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_nan_until_metadata_loads() {
        let mut clip = SimClip::new("demo", 60.0, 2, 0).unwrap();
        assert!(clip.duration().is_nan());
        assert!(!clip.poll());
        assert!(!clip.poll());
        assert!(clip.poll(), "third poll should fire the metadata signal");
        assert_eq!(clip.duration(), 60.0);
    }

    #[test]
    fn metadata_signal_fires_exactly_once() {
        let mut clip = SimClip::new("demo", 60.0, 0, 0).unwrap();
        let fired: usize = (0..10).filter(|_| clip.poll()).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn seek_holds_seeking_for_latency_frames() {
        let mut clip = SimClip::new("demo", 60.0, 0, 3).unwrap();
        clip.set_current_time(10.0);
        assert!(clip.seeking());
        clip.poll();
        clip.poll();
        assert!(clip.seeking());
        clip.poll();
        assert!(!clip.seeking());
        assert_eq!(clip.current_time(), 10.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            SimClip::new("demo", f64::NAN, 0, 0),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            SimClip::new("  ", 10.0, 0, 0),
            Err(MediaError::EmptySource)
        ));
    }
}
