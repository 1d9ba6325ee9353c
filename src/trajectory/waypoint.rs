//! # Waypoint Types
//!
//! Points exchanged between the planner and the trajectory stages.

use serde::{Deserialize, Serialize};

/// A 3D point the vehicle is intended to pass through
///
/// `z` defaults to ground level when deserializing 2D planner output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Ordered sequence of waypoints in traversal order
///
/// An empty path signals a planning failure.
pub type Path = Vec<Waypoint>;

impl Waypoint {
    /// Create a waypoint from its three coordinates
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinates as an `[x, y, z]` array, for per-axis iteration
    pub fn axes(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Whether no coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.axes().iter().all(|v| v.is_finite())
    }

    /// Copy of this waypoint with `z` replaced
    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y, 0.0)
    }
}

impl From<Waypoint> for (f64, f64, f64) {
    fn from(w: Waypoint) -> Self {
        (w.x, w.y, w.z)
    }
}
