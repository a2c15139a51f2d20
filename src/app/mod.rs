//! Application orchestration — state management, event loop, lifecycle
//! control, and input handling.

pub mod controller;
pub mod event;
pub mod handler;
pub mod state;
