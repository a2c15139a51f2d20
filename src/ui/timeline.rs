//! Timeline widget — playhead track, timecode readout, and scroll gauge.
//!
//! Purely declarative: reads a snapshot of the numbers and paints them.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::theme::Theme;

/// Everything the timeline needs to draw one frame.
pub struct TimelineView {
    /// Media source identifier, shown as context.
    pub source: String,
    /// Current playhead position in seconds.
    pub current_time: f64,
    /// Target time the damper is converging toward.
    pub target: f64,
    /// Media duration; NaN while metadata is pending.
    pub duration: f64,
    /// Whether the backend is mid-seek.
    pub seeking: bool,
}

/// Format seconds as `m:ss.t` (tenths are enough at scrub granularity).
fn timecode(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-:--.-".to_string();
    }
    let total_tenths = (seconds.max(0.0) * 10.0).round() as u64;
    let minutes = total_tenths / 600;
    let rest = total_tenths % 600;
    format!("{}:{:02}.{}", minutes, rest / 10, rest % 10)
}

impl Widget for TimelineView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 4 {
            return;
        }

        let inner_w = usize::from(area.width.saturating_sub(4));
        let mid_y = area.y + area.height / 2;

        // ── playhead track ─────────────────────────────────────
        // `━` up to the playhead, `─` beyond it, `▼` at the target.
        let frac = if self.duration.is_finite() && self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target_frac = if self.duration.is_finite() && self.duration > 0.0 {
            (self.target / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (frac * inner_w as f64).round() as usize;
        let target_col = ((target_frac * inner_w.saturating_sub(1) as f64).round() as usize)
            .min(inner_w.saturating_sub(1));

        let mut spans = Vec::with_capacity(inner_w);
        for col in 0..inner_w {
            let (glyph, style) = if col == target_col {
                ("▼", Theme::target_style())
            } else if col < filled {
                ("━", Theme::playhead_style())
            } else {
                ("─", Theme::track_style())
            };
            spans.push(Span::styled(glyph, style));
        }
        buf.set_line(area.x + 2, mid_y, &Line::from(spans), area.width - 4);

        // ── timecode readout ───────────────────────────────────
        let mut readout = vec![
            Span::styled(timecode(self.current_time), Theme::timecode_style()),
            Span::raw(" / "),
            Span::raw(timecode(self.duration)),
            Span::raw("   → "),
            Span::styled(timecode(self.target), Theme::target_style()),
        ];
        if self.seeking {
            readout.push(Span::styled("   seeking…", Theme::seeking_style()));
        }
        if mid_y + 2 < area.y + area.height {
            buf.set_line(area.x + 2, mid_y + 2, &Line::from(readout), area.width - 4);
        }

        // ── source line ────────────────────────────────────────
        if mid_y >= area.y + 2 {
            let src = Line::from(Span::styled(
                self.source.clone(),
                Theme::title_style(),
            ));
            buf.set_line(area.x + 2, mid_y - 2, &src, area.width - 4);
        }
    }
}

/// One-line scroll hint for the status bar.
pub fn status_line(scroll_progress: f64) -> String {
    format!(
        "scroll {:>3.0}% | wheel/j/k: scrub | PgUp/PgDn: page | g/G: ends | q: quit",
        scroll_progress * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timecode_formats_minutes_and_tenths() {
        assert_eq!(timecode(0.0), "0:00.0");
        assert_eq!(timecode(65.43), "1:05.4");
        assert_eq!(timecode(600.0), "10:00.0");
    }

    #[test]
    fn timecode_handles_unknown_duration() {
        assert_eq!(timecode(f64::NAN), "-:--.-");
        assert_eq!(timecode(f64::INFINITY), "-:--.-");
    }

    #[test]
    fn timecode_clamps_negatives() {
        assert_eq!(timecode(-3.0), "0:00.0");
    }
}
