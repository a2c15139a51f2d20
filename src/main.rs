//! A scroll-driven media scrubber for the terminal.
//!
//! Scrolling moves through a virtual page several viewports tall; the
//! scroll position maps to a playback target and a per-frame damper eases
//! the playhead toward it.  Wall-clock playback never runs — scrolling
//! *is* the transport.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    controller::ScrubController,
    event::{spawn_event_reader, spawn_frame_driver, AppEvent},
    handler,
    state::AppState,
};
use crate::core::geometry;
use crate::core::media::{MediaElement, SimClip};
use crate::ui::{
    layout::AppLayout,
    spinner::LoadIndicator,
    theme::Theme,
    timeline::{self, TimelineView},
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven media scrubber")]
struct Cli {
    /// Media source identifier (label for the simulated clip).
    #[arg(default_value = "demo-clip")]
    source: String,

    /// Clip duration in seconds.
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// Frames before clip metadata becomes available.
    #[arg(long, default_value_t = 30)]
    metadata_delay: u32,

    /// Frames each seek keeps the decoder busy.
    #[arg(long, default_value_t = 2)]
    seek_latency: u32,

    /// Scrollable span in viewport heights (overrides config).
    #[arg(long)]
    span: Option<f64>,

    /// Damper easing factor, fraction of gap per frame (overrides config).
    #[arg(long)]
    easing: Option<f64>,

    /// Damper dead-zone in seconds (overrides config).
    #[arg(long)]
    epsilon: Option<f64>,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── configuration ─────────────────────────────────────────
    let mut user_config = config::ScrubConfig::load();
    let tuning_overridden = cli.span.is_some() || cli.easing.is_some() || cli.epsilon.is_some();
    if let Some(span) = cli.span {
        user_config.span_screens = span.clamp(1.0, 100.0);
    }
    if let Some(easing) = cli.easing {
        user_config.easing = easing.clamp(0.01, 0.95);
    }
    if let Some(epsilon) = cli.epsilon {
        if epsilon.is_finite() && epsilon > 0.0 {
            user_config.epsilon = epsilon;
        }
    }

    let mut clip = SimClip::new(&cli.source, cli.duration, cli.metadata_delay, cli.seek_latency)?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let viewport_rows = terminal.size()?.height;
    let mut state = AppState::new(user_config, viewport_rows);

    // ── async channels + lifecycle start ──────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (mut frames, frame_handle) = spawn_frame_driver(state.config.frame_rate);

    let mut controller = ScrubController::new(state.config.easing, state.config.epsilon);
    controller.start(frame_handle);

    let mut frame_count: u64 = 0;

    // ── event loop ────────────────────────────────────────────
    loop {
        // ── draw first ─────────────────────────────────────────
        // Always render before processing the next event so the UI stays
        // current even while the decoder is busy seeking.
        let progress = geometry::scroll_progress(&state.geometry()).unwrap_or(0.0);
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            let block = Block::default()
                .title(format!(" {} ", clip.source()))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let inner = block.inner(layout.timeline_area);
            frame.render_widget(block, layout.timeline_area);

            frame.render_widget(
                TimelineView {
                    source: clip.source().to_string(),
                    current_time: clip.current_time(),
                    target: controller.target(),
                    duration: clip.duration(),
                    seeking: clip.seeking(),
                },
                inner,
            );

            frame.render_widget(
                LoadIndicator {
                    visible: controller.is_loading(),
                    frame: frame_count,
                },
                layout.timeline_area,
            );

            let hint = timeline::status_line(progress);
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, &mut controller, &clip, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, &mut controller, &clip, m),
                    AppEvent::Resize(_, h) => {
                        state.handle_resize(h);
                        controller.on_scroll(state.geometry(), &clip);
                    }
                }
            }

            Some(()) = frames.recv() => {
                frame_count = frame_count.wrapping_add(1);
                // Drain queued frames down to one tick: a stalled terminal
                // must not trigger a convergence burst when it catches up.
                while frames.try_recv().is_ok() {}

                if clip.poll() {
                    tracing::debug!("metadata loaded: duration={}", clip.duration());
                    controller.on_metadata_loaded();
                    state.status_message =
                        Some(format!("{}: {:.1}s loaded", clip.source(), clip.duration()));
                    // Map whatever scroll position accumulated while loading.
                    controller.on_scroll(state.geometry(), &clip);
                }
                controller.on_frame(&mut clip);
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    // Stop the loop before restoring the terminal: no tick or scroll may
    // mutate the playhead once teardown begins.
    controller.stop();

    // Tuning passed on the command line becomes the new default.
    if tuning_overridden {
        let _ = state.config.save();
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
