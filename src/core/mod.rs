//! Core algorithms – scroll geometry, target mapping, and the playback
//! damper.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod damper;
pub mod geometry;
pub mod media;
pub mod target;
