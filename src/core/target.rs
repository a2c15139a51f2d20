//! Progress → playback-time mapping.

/// Map scroll progress onto a playback target in seconds.
///
/// Returns `None` while `duration` is unknown (NaN before the media
/// reports metadata) — the caller keeps its previous target rather than
/// writing garbage.  For a known duration the mapping is linear, so it is
/// monotonic non-decreasing in `progress`.
pub fn map_target(progress: f64, duration: f64) -> Option<f64> {
    if !duration.is_finite() || duration < 0.0 {
        return None;
    }
    Some(progress * duration)
}
