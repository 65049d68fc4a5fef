use serde::Deserialize;
use std::fmt;

use super::easing::Easing;
use super::geometry::{Bounds, compute_center};
use super::tween::Timing;

const TRAILER_JSON: &str = include_str!("../../assets/trailer.json");

/// Environment variable naming a JSON file that replaces the embedded config
pub const CONFIG_ENV: &str = "TRAILER_CONFIG";

/// Error types for loading the trailer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Cannot read config {}: {}", path, message)
            }
            ConfigError::Parse(msg) => write!(f, "Malformed config: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Durations (ms) and multipliers driving every animation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Lead follower's free-roam move duration
    pub move_duration_ms: u32,
    /// Extra lag the shadow gets on free-roam moves
    pub shadow_backdrop_ms: u32,
    pub long_ms: u32,
    pub medium_ms: u32,
    pub short_ms: u32,
    /// Color/transform snap-back when leaving a region (short by default)
    pub release_ms: u32,
    /// Shadow size relative to the lead while hovering
    pub shadow_scale: f32,
    /// Shadow offset relative to the lead on leaving steps
    pub shadow_exit_mul: f32,
    /// Lead overshoot on entering steps
    pub lead_enter_mul: f32,
    /// Max displacement as a fraction of region radius
    pub influence: f32,
    /// Follower width/height outside any region
    pub default_radius: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_duration_ms: 100,
            shadow_backdrop_ms: 30,
            long_ms: 300,
            medium_ms: 200,
            short_ms: 100,
            release_ms: 100,
            shadow_scale: 0.85,
            shadow_exit_mul: 0.6,
            lead_enter_mul: 1.2,
            influence: 0.4,
            default_radius: 20,
        }
    }
}

impl MotionConfig {
    pub fn long(&self) -> Timing {
        Timing::from_millis(self.long_ms)
    }

    pub fn medium(&self) -> Timing {
        Timing::from_millis(self.medium_ms)
    }

    pub fn short(&self) -> Timing {
        Timing::from_millis(self.short_ms)
    }

    pub fn lead_move(&self) -> Timing {
        Timing::from_millis(self.move_duration_ms)
    }

    pub fn shadow_move(&self) -> Timing {
        Timing::from_millis(self.move_duration_ms + self.shadow_backdrop_ms)
    }

    /// Region snap-back: overshooting back-out curve
    pub fn release(&self) -> Timing {
        Timing::from_millis(self.release_ms).with_easing(Easing::BACK_OUT)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let multipliers = [
            ("shadow_scale", self.shadow_scale),
            ("shadow_exit_mul", self.shadow_exit_mul),
            ("lead_enter_mul", self.lead_enter_mul),
            ("influence", self.influence),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn override_path() -> Option<String> {
    std::env::var(CONFIG_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn override_path() -> Option<String> {
    None
}

fn default_font_size() -> f32 {
    48.0
}

/// One hover-enabled element of the demo page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionSpec {
    pub label: String,
    /// Layout rectangle, screen space
    pub rect: Bounds,
    /// Declared follower width while hovering
    pub width: u32,
    /// Declared follower height while hovering
    pub height: u32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

/// Top-level trailer configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TrailerConfig {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

impl TrailerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: TrailerConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The config compiled into the binary
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(TRAILER_JSON)
    }

    /// Embedded config, or the file named by `TRAILER_CONFIG` on native builds
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = override_path() {
            let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            log::debug!("Loading trailer config from {}", path);
            return Self::from_json(&text);
        }

        Self::embedded()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion.validate()?;

        for region in &self.regions {
            let rect = region.rect;
            let finite = [rect.x, rect.y, rect.width, rect.height]
                .iter()
                .all(|v| v.is_finite());
            if !finite || rect.width <= 0.0 || rect.height <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "region '{}' needs a positive, finite rect",
                    region.label
                )));
            }
            // Proximity math divides by the rounded radius
            if compute_center(&rect).radius < 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "region '{}' is too narrow: width {} rounds to a zero radius",
                    region.label, rect.width
                )));
            }
            if !region.font_size.is_finite() || region.font_size <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "region '{}' has font_size {}",
                    region.label, region.font_size
                )));
            }
        }
        Ok(())
    }
}
