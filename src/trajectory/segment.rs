//! # Segments
//!
//! Sample count derivation for the straight interval between two waypoints.

use super::waypoint::Waypoint;
use crate::error::{PathGenError, Result};

/// Maximum per-axis coordinate change between two consecutive samples
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StepSize(f64);

impl StepSize {
    /// Validate a raw step size
    ///
    /// # Errors
    ///
    /// Returns `InvalidStep` if `step` is zero, negative, NaN or infinite
    pub fn new(step: f64) -> Result<Self> {
        if step.is_finite() && step > 0.0 {
            Ok(Self(step))
        } else {
            Err(PathGenError::InvalidStep(step))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Straight interval from `start` to `goal`, subdivided into samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Waypoint,
    pub goal: Waypoint,
}

impl Segment {
    pub fn new(start: Waypoint, goal: Waypoint) -> Self {
        Self { start, goal }
    }

    /// Number of samples this segment needs at the given step size
    pub fn step_count(&self, step: StepSize) -> Result<usize> {
        step_count(self.start, self.goal, step)
    }
}

/// Most samples a single segment may produce
///
/// At the default 1 mm step this is a 10 km leg.
pub const MAX_SEGMENT_SAMPLES: usize = 10_000_000;

/// Number of samples needed to go from `start` to `goal`
///
/// Each axis needs `ceil(|goal - start| / step)` samples; the segment takes the
/// largest of the three. Identical endpoints yield 0, which callers treat as
/// "nothing to interpolate".
///
/// # Errors
///
/// Returns `NonFinite` if an endpoint has a NaN or infinite coordinate and
/// `SegmentTooLong` if any axis needs more than [`MAX_SEGMENT_SAMPLES`]
pub fn step_count(start: Waypoint, goal: Waypoint, step: StepSize) -> Result<usize> {
    for point in [start, goal] {
        if !point.is_finite() {
            return Err(PathGenError::NonFinite(format!("segment endpoint {:?}", point)));
        }
    }

    let mut n = 0;
    for (a, b) in start.axes().iter().zip(goal.axes().iter()) {
        let samples = ((b - a).abs() / step.get()).ceil();
        // the difference of two finite coordinates can still overflow to infinity
        if samples > MAX_SEGMENT_SAMPLES as f64 {
            return Err(PathGenError::SegmentTooLong {
                start: start.into(),
                goal: goal.into(),
                limit: MAX_SEGMENT_SAMPLES,
            });
        }
        n = n.max(samples as usize);
    }

    Ok(n)
}
