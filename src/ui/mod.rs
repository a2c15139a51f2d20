//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* numbers (playhead, target, progress) and
//! turns them into pixels on the terminal.  No control-loop logic here.

pub mod layout;
pub mod spinner;
pub mod theme;
pub mod timeline;
