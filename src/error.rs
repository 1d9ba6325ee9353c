//! # Error Types
//!
//! Custom error types for Path Gen using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Path Gen
#[derive(Debug, Error)]
pub enum PathGenError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Waypoint file could not be parsed
    #[error("Waypoint file error: {0}")]
    Waypoints(#[from] serde_json::Error),

    /// Planner returned no poses
    #[error("no valid plan: planner returned an empty path")]
    EmptyPlan,

    /// Map generation request failed
    #[error("Map service unavailable: {0}")]
    MapServiceUnavailable(String),

    /// Plan request failed
    #[error("Planner service unavailable: {0}")]
    PlannerServiceUnavailable(String),

    /// Trajectory destination could not be written
    #[error("Failed to write trajectory file {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Step size must be finite and strictly positive
    #[error("Invalid step size: {0}")]
    InvalidStep(f64),

    /// Request or planner waypoint holds a NaN or infinite coordinate
    #[error("Non-finite {0}")]
    NonFinite(String),

    /// Segment needs more samples than one segment may hold
    #[error("Segment {start:?} -> {goal:?} needs more than {limit} samples")]
    SegmentTooLong {
        start: (f64, f64, f64),
        goal: (f64, f64, f64),
        limit: usize,
    },

    /// Collaborator did not answer in time
    #[error("{service} service timed out after {timeout_ms} ms")]
    ServiceTimeout {
        service: &'static str,
        timeout_ms: u64,
    },
}

/// Result type alias for Path Gen
pub type Result<T> = std::result::Result<T, PathGenError>;
