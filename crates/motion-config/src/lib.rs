//! Motion configuration system
//!
//! This crate provides configuration for the motion animator, loading defaults
//! from `motion.toml` and letting environment variables override them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MotionConfig {
    /// Animator behavior
    pub animator: AnimatorConfig,
    /// Timing used when a call does not specify its own
    pub defaults: DefaultsConfig,
}

/// Animator behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Multiplier applied to every duration and delay (0 disables animation)
    pub time_scale_factor: f64,
    /// Compose additive-eligible properties with relative animations
    pub additive: bool,
    /// Start interrupting animations from the on-screen value
    pub begin_from_current_state: bool,
    /// Swap start and end values of every change
    pub reverse_values: bool,
    /// Let springs run for their settling duration instead of the declared one
    pub spring_settling_duration: bool,
}

/// Named timing curves available from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveName {
    #[default]
    EaseInOut,
    EaseIn,
    EaseOut,
    Linear,
    Instant,
}

/// Default timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Duration of implicit and transaction animations in milliseconds
    pub duration_ms: u64,
    /// Timing curve of implicit and transaction animations
    pub curve: CurveName,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            time_scale_factor: 1.0,
            additive: true,
            begin_from_current_state: false,
            reverse_values: false,
            spring_settling_duration: true,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250,
            curve: CurveName::EaseInOut,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl MotionConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location (motion.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("motion.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("MOTION_TIME_SCALE") {
            if let Ok(scale) = val.parse::<f64>() {
                self.animator.time_scale_factor = scale;
            }
        }
        if let Ok(val) = std::env::var("MOTION_ADDITIVE") {
            self.animator.additive = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("MOTION_BEGIN_FROM_CURRENT_STATE") {
            self.animator.begin_from_current_state = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("MOTION_REVERSE_VALUES") {
            self.animator.reverse_values = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("MOTION_DEFAULT_DURATION_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.defaults.duration_ms = ms;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from motion.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.animator.time_scale_factor, 1.0);
        assert!(config.animator.additive);
        assert!(!config.animator.begin_from_current_state);
        assert!(config.animator.spring_settling_duration);
        assert_eq!(config.defaults.duration_ms, 250);
        assert_eq!(config.defaults.curve, CurveName::EaseInOut);
    }

    #[test]
    fn test_toml_serialization() {
        let config = MotionConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MotionConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: MotionConfig = toml::from_str(
            r#"
            [animator]
            begin_from_current_state = true

            [defaults]
            curve = "linear"
            "#,
        )
        .unwrap();
        assert!(parsed.animator.begin_from_current_state);
        assert!(parsed.animator.additive);
        assert_eq!(parsed.defaults.curve, CurveName::Linear);
        assert_eq!(parsed.defaults.duration_ms, 250);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = MotionConfig::load_from_file("does-not-exist/motion.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let path = std::env::temp_dir().join(format!("motion-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[animator]\nadditive = \"maybe\"\n").unwrap();
        let err = MotionConfig::load_from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if motion.toml doesn't exist
        let config = MotionConfig::load_or_default();
        assert!(config.animator.time_scale_factor >= 0.0);
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("MOTION_TIME_SCALE", "0.5");
            std::env::set_var("MOTION_ADDITIVE", "false");
            std::env::set_var("MOTION_DEFAULT_DURATION_MS", "not-a-number");
        }

        let mut config = MotionConfig::default();
        config.merge_with_env();

        assert_eq!(config.animator.time_scale_factor, 0.5);
        assert!(!config.animator.additive);
        assert_eq!(config.defaults.duration_ms, 250);

        unsafe {
            std::env::remove_var("MOTION_TIME_SCALE");
            std::env::remove_var("MOTION_ADDITIVE");
            std::env::remove_var("MOTION_DEFAULT_DURATION_MS");
        }
    }
}
