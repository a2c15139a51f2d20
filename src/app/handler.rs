//! Input handling — translate key / mouse events into scroll motion.
//!
//! Every offset change is followed by one controller `on_scroll`, so the
//! shared target always reflects the geometry the user last produced.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use crate::app::controller::ScrubController;
use crate::app::state::AppState;
use crate::core::media::MediaElement;

pub fn handle_key(
    state: &mut AppState,
    controller: &mut ScrubController,
    media: &dyn MediaElement,
    key: KeyEvent,
) {
    // Ignore key-release events (kitty protocol terminals emit both).
    if key.kind == KeyEventKind::Release {
        return;
    }

    let step = state.config.wheel_step;
    let page = state.viewport_rows;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            return;
        }
        KeyCode::Up | KeyCode::Char('k') => state.scroll_by(-step),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_by(step),
        KeyCode::PageUp => state.scroll_by(-page),
        KeyCode::PageDown => state.scroll_by(page),
        KeyCode::Home | KeyCode::Char('g') => state.scroll_to(0.0),
        KeyCode::End | KeyCode::Char('G') => state.scroll_to(f64::MAX),
        _ => return,
    }

    state.status_message = None;
    controller.on_scroll(state.geometry(), media);
}

pub fn handle_mouse(
    state: &mut AppState,
    controller: &mut ScrubController,
    media: &dyn MediaElement,
    mouse: MouseEvent,
) {
    let step = state.config.wheel_step;
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_by(-step),
        MouseEventKind::ScrollDown => state.scroll_by(step),
        _ => return,
    }

    state.status_message = None;
    controller.on_scroll(state.geometry(), media);
}
