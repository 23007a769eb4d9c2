use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::movement::DEFAULT_MOVEMENT_SPEED;
use crate::segment::Point;
use crate::viewer::{Viewer, DEFAULT_HALF_EXTENT};
use crate::visibility::{VisibilityParams, DEFAULT_PROBE_OFFSET, DEFAULT_RAY_LENGTH};
use crate::world::Playfield;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playfield: PlayfieldConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct PlayfieldConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

#[derive(Debug, Deserialize)]
pub struct ViewerConfig {
    /// Starting position, playfield centre when unset
    #[serde(default)]
    pub start_x: Option<f64>,
    #[serde(default)]
    pub start_y: Option<f64>,
    #[serde(default = "default_half_extent")]
    pub half_extent: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct VisibilityConfig {
    #[serde(default = "default_probe_offset")]
    pub probe_offset: f64,
    #[serde(default = "default_ray_length")]
    pub ray_length: f64,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default)]
    pub shadow: [u8; 3],
    #[serde(default = "default_shadow_alpha")]
    pub shadow_alpha: f32,
    #[serde(default)]
    pub show_rays: bool,
    /// Radius of the light falloff around the viewer
    #[serde(default = "default_falloff_radius")]
    pub falloff_radius: f32,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_width() -> f64 { 640.0 }
fn default_height() -> f64 { 480.0 }
fn default_padding() -> f64 { 20.0 }
fn default_half_extent() -> f64 { DEFAULT_HALF_EXTENT }
fn default_speed() -> f64 { DEFAULT_MOVEMENT_SPEED }
fn default_probe_offset() -> f64 { DEFAULT_PROBE_OFFSET }
fn default_ray_length() -> f64 { DEFAULT_RAY_LENGTH }
fn default_window_title() -> String { "Shadowcast 2D".to_string() }
fn default_background() -> [u8; 3] { [0, 0, 139] }
fn default_shadow_alpha() -> f32 { 0.7 }
fn default_falloff_radius() -> f32 { 64.0 }
fn default_log_level() -> String { "info".to_string() }

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            start_x: None,
            start_y: None,
            half_extent: default_half_extent(),
            speed: default_speed(),
        }
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            probe_offset: default_probe_offset(),
            ray_length: default_ray_length(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background: default_background(),
            shadow: [0, 0, 0],
            shadow_alpha: default_shadow_alpha(),
            show_rays: false,
            falloff_radius: default_falloff_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or broken
    pub fn load() -> Self {
        let path = Path::new(CONFIG_PATH);
        if !path.exists() {
            info!("No {} found, using default configuration", CONFIG_PATH);
            return Config::default();
        }
        match Self::try_load(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.playfield.width,
            height: self.playfield.height,
            padding: self.playfield.padding,
        }
    }

    pub fn visibility_params(&self) -> VisibilityParams {
        VisibilityParams {
            probe_offset: self.visibility.probe_offset,
            ray_length: self.visibility.ray_length,
        }
    }

    /// Viewer at the configured start, or the playfield centre
    pub fn viewer(&self) -> Viewer {
        let center = self.playfield().center();
        let start = Point::new(
            self.viewer.start_x.unwrap_or(center.x),
            self.viewer.start_y.unwrap_or(center.y),
        );
        Viewer::new(start.x, start.y, self.viewer.half_extent, self.viewer.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.playfield(), Playfield::default());
        assert_eq!(config.visibility_params(), VisibilityParams::default());
        assert_eq!(config.viewer(), Viewer::at(320.0, 240.0));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section() {
        let config = Config::from_toml_str(
            r#"
            [viewer]
            start_x = 100.0
            speed = 2.5

            [visual]
            show_rays = true
            "#,
        )
        .unwrap();
        let viewer = config.viewer();
        assert_eq!(viewer.px, 100.0);
        assert_eq!(viewer.py, 240.0);
        assert_eq!(viewer.speed, 2.5);
        assert_eq!(viewer.half_extent, DEFAULT_HALF_EXTENT);
        assert!(config.visual.show_rays);
        assert_eq!(config.visual.background, [0, 0, 139]);
    }

    #[test]
    fn test_bad_toml_is_error() {
        let result = Config::from_toml_str("[playfield]\nwidth = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::try_load(Path::new("definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
