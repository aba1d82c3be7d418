//! Engine configuration
//!
//! Loaded from TOML; every field has a default so partial files work.

use crate::error::{Result, VoiceDotsError};
use crate::geometry::GridGeometry;
use crate::state::AnimationStateKind;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Base dot color per state, as RGB triples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub idle: [u8; 3],
    pub listening: [u8; 3],
    pub processing: [u8; 3],
    pub speaking: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: [80, 80, 100],        // Soft blue-gray
            listening: [220, 220, 220], // White
            processing: [180, 200, 240], // Light blue
            speaking: [60, 180, 255],   // Vibrant blue
        }
    }
}

impl Palette {
    pub fn color_for(&self, state: AnimationStateKind) -> Rgb<u8> {
        Rgb(match state {
            AnimationStateKind::Idle => self.idle,
            AnimationStateKind::Listening => self.listening,
            AnimationStateKind::Processing => self.processing,
            AnimationStateKind::Speaking => self.speaking,
        })
    }
}

/// Configuration for a [`VoiceWidget`](crate::widget::VoiceWidget)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Initial surface width in pixels
    pub width: u32,
    /// Initial surface height in pixels
    pub height: u32,
    /// Frame clock advance per frame
    pub animation_speed: f32,
    /// Length of a state transition in frames
    pub transition_frames: u32,
    /// Update rate the host is expected to drive
    pub target_fps: u32,
    /// Seed for sparkle and particles; random when absent
    pub seed: Option<u64>,
    /// State the widget starts in
    pub initial_state: AnimationStateKind,
    pub palette: Palette,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            animation_speed: 0.05,
            transition_frames: 45, // About 1.5 seconds at 30 FPS
            target_fps: 30,
            seed: None,
            initial_state: AnimationStateKind::Listening,
            palette: Palette::default(),
        }
    }
}

impl AnimationConfig {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            VoiceDotsError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| VoiceDotsError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnimationConfig = toml::from_str(content)
            .map_err(|e| VoiceDotsError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the initial surface size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Use a fixed random seed for reproducible frames
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_transition_frames(mut self, frames: u32) -> Self {
        self.transition_frames = frames;
        self
    }

    pub fn with_initial_state(mut self, state: AnimationStateKind) -> Self {
        self.initial_state = state;
        self
    }

    /// Time between frames at the target rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.animation_speed.is_finite() || self.animation_speed <= 0.0 {
            return Err(VoiceDotsError::ConfigError(format!(
                "animation_speed must be positive, got {}",
                self.animation_speed
            )));
        }
        if self.target_fps == 0 {
            return Err(VoiceDotsError::ConfigError(
                "target_fps must be at least 1".to_string(),
            ));
        }
        GridGeometry::compute(self.width, self.height).map_err(|e| {
            VoiceDotsError::ConfigError(format!("initial size rejected: {}", e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnimationConfig::default();
        assert_eq!(config.animation_speed, 0.05);
        assert_eq!(config.transition_frames, 45);
        assert_eq!(config.target_fps, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnimationConfig::from_toml_str(
            r#"
            width = 400
            height = 300
            seed = 7

            [palette]
            speaking = [0, 128, 255]
            "#,
        )
        .unwrap();

        assert_eq!((config.width, config.height), (400, 300));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.palette.speaking, [0, 128, 255]);
        assert_eq!(config.palette.listening, [220, 220, 220]);
        assert_eq!(config.transition_frames, 45);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AnimationConfig::from_toml_str("animation_speed = 0.0"),
            Err(VoiceDotsError::ConfigError(_))
        ));
        assert!(AnimationConfig::from_toml_str("target_fps = 0").is_err());
        assert!(AnimationConfig::from_toml_str("width = 10").is_err());
        assert!(AnimationConfig::from_toml_str("width = \"wide\"").is_err());
    }

    #[test]
    fn test_palette_lookup() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(AnimationStateKind::Idle), Rgb([80, 80, 100]));
        assert_eq!(
            palette.color_for(AnimationStateKind::Speaking),
            Rgb([60, 180, 255])
        );
    }

    #[test]
    fn test_builder() {
        let config = AnimationConfig::default()
            .with_size(300, 200)
            .with_seed(3)
            .with_transition_frames(10)
            .with_initial_state(AnimationStateKind::Idle);
        assert_eq!(config.width, 300);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.transition_frames, 10);
        assert_eq!(config.initial_state, AnimationStateKind::Idle);
    }
}
