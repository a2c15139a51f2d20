//! User configuration — scrub tuning knobs and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scrub-tui/config.toml` (default
//! `~/.config/scrub-tui/config.toml`).

use std::path::PathBuf;

/// Tunable scrub parameters.
///
/// `easing` and `epsilon` are defined per frame tick, so their effect
/// scales with `frame_rate`: a faster cadence converges faster.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubConfig {
    /// Fraction of the remaining gap the damper closes each tick.
    /// Higher = snappier scrubbing; good range 0.1–0.3 at 60 fps.
    pub easing: f64,
    /// Dead-zone radius in seconds.  Once the playhead is within this
    /// distance of the target, no further writes are issued.
    pub epsilon: f64,
    /// Height of the scrollable page as a multiple of the viewport.
    /// A full traversal of the page maps to the full media duration.
    pub span_screens: f64,
    /// Frame driver cadence in ticks per second.
    pub frame_rate: u32,
    /// Rows moved per mouse-wheel notch.
    pub wheel_step: f64,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            easing: 0.15,
            epsilon: 0.01,
            span_screens: 5.0,
            frame_rate: 60,
            wheel_step: 3.0,
        }
    }
}

impl ScrubConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    /// Parse the key-value format, clamping every field to a usable range
    /// so a hand-edited file cannot wedge the control loop.
    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "easing" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.easing = v.clamp(0.01, 0.95);
                    }
                }
                "epsilon" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() && v > 0.0 {
                            config.epsilon = v;
                        }
                    }
                }
                "span_screens" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.span_screens = v.clamp(1.0, 100.0);
                        }
                    }
                }
                "frame_rate" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.frame_rate = v.clamp(10, 240);
                    }
                }
                "wheel_step" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.wheel_step = v.clamp(1.0, 50.0);
                        }
                    }
                }
                _ => {}
            }
        }

        config
    }

    fn serialise(&self) -> String {
        [
            "# scrub-tui configuration".to_string(),
            String::new(),
            "# Fraction of the remaining gap closed per frame (0.01-0.95)".to_string(),
            format!("easing = {}", self.easing),
            "# Dead-zone radius in seconds before writes stop".to_string(),
            format!("epsilon = {}", self.epsilon),
            "# Scrollable page height, in viewport heights (1-100)".to_string(),
            format!("span_screens = {}", self.span_screens),
            "# Frame driver cadence, ticks per second (10-240)".to_string(),
            format!("frame_rate = {}", self.frame_rate),
            "# Rows per mouse-wheel notch (1-50)".to_string(),
            format!("wheel_step = {}", self.wheel_step),
            String::new(),
        ]
        .join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scrub-tui/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scrub-tui").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_serialised_config() {
        let config = ScrubConfig {
            easing: 0.3,
            epsilon: 0.05,
            span_screens: 8.0,
            frame_rate: 120,
            wheel_step: 5.0,
        };
        assert_eq!(ScrubConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn parse_clamps_hostile_values() {
        let config = ScrubConfig::parse(
            "easing = 99\nepsilon = -1\nspan_screens = 0\nframe_rate = 100000\nwheel_step = NaN\n",
        );
        assert_eq!(config.easing, 0.95);
        assert_eq!(config.epsilon, ScrubConfig::default().epsilon);
        assert_eq!(config.span_screens, 1.0);
        assert_eq!(config.frame_rate, 240);
        assert_eq!(config.wheel_step, ScrubConfig::default().wheel_step);
    }

    #[test]
    fn save_round_trips_through_disk() {
        let dir = std::env::temp_dir().join("scrub-tui-config-test");
        let _ = std::fs::remove_dir_all(&dir);
        std::env::set_var("XDG_CONFIG_HOME", &dir);

        let config = ScrubConfig {
            easing: 0.25,
            span_screens: 7.0,
            ..ScrubConfig::default()
        };
        config.save().unwrap();
        assert_eq!(ScrubConfig::load(), config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn parse_ignores_comments_and_junk() {
        let config = ScrubConfig::parse("# comment\n[section]\ngarbage\neasing = 0.2\n");
        assert_eq!(config.easing, 0.2);
        assert_eq!(config.frame_rate, ScrubConfig::default().frame_rate);
    }
}
