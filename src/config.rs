use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::step::StepSize;
use crate::{Error, Result};

/// Construction-time settings for a [`crate::TicController`].
///
/// Fields missing from a TOML file fall back to [`ControllerConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Exclusive lower bound on the logical position.
    pub min_position: i32,
    /// Exclusive upper bound on the logical position.
    pub max_position: i32,
    /// Default continuous speed, microsteps per 10,000 s.
    pub velocity: i32,
    /// Increment used by `move_up` / `move_down`.
    pub move_size: i32,
    /// Step size assumed at startup.
    pub step_size: StepSize,
    /// Energize before and de-energize after each motion command.
    pub power_up_down: bool,
    /// Exit safe start before and re-enter it after each motion command.
    pub safe_start: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            min_position: -2000,
            max_position: 2000,
            velocity: 10000,
            move_size: 200,
            step_size: StepSize::Half,
            power_up_down: true,
            safe_start: true,
        }
    }
}

impl ControllerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ControllerConfig> {
        let content = fs::read_to_string(path)?;
        ControllerConfig::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<ControllerConfig> {
        let config: ControllerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result {
        if self.min_position >= self.max_position {
            return Err(Error::InvalidBounds {
                min: self.min_position,
                max: self.max_position,
            });
        }
        Ok(())
    }

    /// Strict on both sides.
    pub fn in_bounds(&self, position: i32) -> bool {
        self.min_position < position && position < self.max_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ControllerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let config = ControllerConfig::from_toml_str(
            r#"
min_position = -500
max_position = 500
step_size = "sixteenth"
safe_start = false
"#,
        )
        .unwrap();
        assert_eq!(config.min_position, -500);
        assert_eq!(config.max_position, 500);
        assert_eq!(config.step_size, StepSize::Sixteenth);
        assert!(!config.safe_start);
        assert!(config.power_up_down);
        assert_eq!(config.move_size, 200);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = ControllerConfig::from_toml_str("min_position = 10\nmax_position = 10").unwrap_err();
        assert!(matches!(err, Error::InvalidBounds { min: 10, max: 10 }));
    }

    #[test]
    fn unknown_step_size_is_a_parse_error() {
        let err = ControllerConfig::from_toml_str(r#"step_size = "third""#).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ControllerConfig::load("/nonexistent/tic.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn bounds_are_exclusive() {
        let config = ControllerConfig::default();
        assert!(config.in_bounds(0));
        assert!(config.in_bounds(1999));
        assert!(!config.in_bounds(2000));
        assert!(!config.in_bounds(-2000));
    }
}
