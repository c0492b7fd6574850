//! Parallax configuration and its validation.
//!
//! `Config` only ever holds valid values: setters reject out-of-range input and
//! keep whatever was there before. `Options` is the loose, user-facing shape
//! (every field optional) that the web frontend deserializes from a JS object.

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_SPEED, SPEED_MAX, SPEED_MIN};
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("speed must be within [0, 1], got {0}")]
    SpeedOutOfRange(f64),
    #[error("height must be a positive number of pixels, got {0}")]
    InvalidHeight(f64),
}

pub fn validate_speed(speed: f64) -> Result<f64, ConfigError> {
    if speed.is_finite() && (SPEED_MIN..=SPEED_MAX).contains(&speed) {
        Ok(speed)
    } else {
        Err(ConfigError::SpeedOutOfRange(speed))
    }
}

pub fn validate_height(height: f64) -> Result<f64, ConfigError> {
    if height.is_finite() && height > 0.0 {
        Ok(height)
    } else {
        Err(ConfigError::InvalidHeight(height))
    }
}

/// Validated container height and scroll speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    height: f64,
    speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            speed: DEFAULT_SPEED,
        }
    }
}

impl Config {
    pub fn new(height: f64, speed: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            height: validate_height(height)?,
            speed: validate_speed(speed)?,
        })
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Replace the height. On error the previous height is kept.
    pub fn set_height(&mut self, height: f64) -> Result<(), ConfigError> {
        self.height = validate_height(height)?;
        Ok(())
    }

    /// Replace the speed. On error the previous speed is kept.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        self.speed = validate_speed(speed)?;
        Ok(())
    }
}

/// Recognized user options; anything missing takes its default.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Options {
    pub height: Option<f64>,
    pub speed: Option<f64>,
    pub src: Option<String>,
}

impl Options {
    /// Build a `Config`, falling back to the default for any rejected field.
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(height) = self.height {
            if let Err(e) = config.set_height(height) {
                log::warn!("[config] {e}; using {DEFAULT_HEIGHT}");
            }
        }
        if let Some(speed) = self.speed {
            if let Err(e) = config.set_speed(speed) {
                log::warn!("[config] {e}; using {DEFAULT_SPEED}");
            }
        }
        config
    }
}
