use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Geometry used by [`crate::layout::layout`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical distance between two depth levels.
    pub row_height: f32,
    /// Distance from the canvas top to the root row.
    pub top_margin: f32,
    /// Width of the band a ternary node reserves for its middle child.
    pub middle_band_width: f32,
    /// Radius the renderer draws nodes with.
    pub node_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 80.0,
            top_margin: 40.0,
            middle_band_width: 80.0,
            node_radius: 20.0,
        }
    }
}

/// Tick cadence for [`crate::playback::PlaybackController`], in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub build_interval: f64,
    /// Delay between the last insertion and clearing its highlight.
    pub settle_delay: f64,
    pub traversal_interval: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            build_interval: 1.0,
            settle_delay: 1.0,
            traversal_interval: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub playback: PlaybackConfig,
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.playback;
        for (name, secs) in [
            ("playback.build_interval", p.build_interval),
            ("playback.settle_delay", p.settle_delay),
            ("playback.traversal_interval", p.traversal_interval),
        ] {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number of seconds, got {secs}"
                )));
            }
        }

        let l = &self.layout;
        for (name, v) in [
            ("layout.row_height", l.row_height),
            ("layout.top_margin", l.top_margin),
            ("layout.middle_band_width", l.middle_band_width),
            ("layout.node_radius", l.node_radius),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
        Ok(())
    }
}
