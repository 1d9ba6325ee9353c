//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PathGenError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    #[serde(default)]
    pub services: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub response: ResponseConfig,
}

/// Trajectory generation configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TrajectoryConfig {
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    #[serde(default = "default_output_path")]
    pub output_path: String,

    #[serde(default)]
    pub per_request_files: bool,
}

/// Collaborator service configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub map_filename: String,

    #[serde(default)]
    pub waypoint_file: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub obstacle_ids: Vec<i16>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_dir: String,
}

/// Response configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResponseConfig {
    #[serde(default = "default_report_failures")]
    pub report_failures: bool,
}

// Default value functions
fn default_step_size() -> f64 { 0.001 }
fn default_output_path() -> String { "./traj/trajectory.txt".to_string() }

fn default_timeout_ms() -> u64 { 5000 }

fn default_log_level() -> String { "info".to_string() }

fn default_report_failures() -> bool { true }

/// Largest accepted step size in meters
const MAX_STEP_SIZE: f64 = 10.0;

/// Accepted `logging.level` values
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            step_size: default_step_size(),
            output_path: default_output_path(),
            per_request_files: false,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            map_filename: String::new(),
            waypoint_file: String::new(),
            timeout_ms: default_timeout_ms(),
            obstacle_ids: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            report_failures: default_report_failures(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use path_gen::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Destination of the trajectory file
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.trajectory.output_path)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        let step = self.trajectory.step_size;
        if !step.is_finite() || step <= 0.0 || step > MAX_STEP_SIZE {
            return Err(invalid(format!(
                "step_size must be greater than 0 and at most {}",
                MAX_STEP_SIZE
            )));
        }

        if self.trajectory.output_path.is_empty() {
            return Err(invalid("output_path cannot be empty"));
        }

        if self.services.timeout_ms == 0 || self.services.timeout_ms > 60000 {
            return Err(invalid("timeout_ms must be between 1 and 60000"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(format!(
                "log level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

fn invalid(msg: impl std::fmt::Display) -> PathGenError {
    PathGenError::Config(toml::de::Error::custom(msg))
}
