//! # Waypoint Preprocessing
//!
//! Turns raw planner output into the sequence the trajectory is built from:
//!
//! ```text
//! takeoff (first.x, first.y, 0.0)      implicit, seeds the cursor
//!   -> every planner point at `height`
//!   -> landing (last.x, last.y, 0.15)
//! ```

use super::segment::Segment;
use super::waypoint::Waypoint;
use crate::error::{PathGenError, Result};

/// Altitude of the implicit takeoff pose below the first waypoint
pub const GROUND_ALTITUDE: f64 = 0.0;

/// Altitude of the synthetic landing waypoint above the last waypoint
pub const LANDING_ALTITUDE: f64 = 0.15;

/// Planner path after height normalization and takeoff/landing insertion
///
/// Holds one more waypoint than the planner path (the landing point). The
/// takeoff pose is kept apart: it is the starting cursor, not a target.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedPath {
    takeoff: Waypoint,
    waypoints: Vec<Waypoint>,
}

impl AugmentedPath {
    /// Ground-level pose the first segment starts from
    pub fn takeoff(&self) -> Waypoint {
        self.takeoff
    }

    /// Interpolation targets in traversal order, landing point last
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Consecutive segments, starting from the takeoff pose
    ///
    /// Each segment starts where the previous one ended, so the cursor is the
    /// goal of the segment before it.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        std::iter::once(self.takeoff)
            .chain(self.waypoints.iter().copied())
            .zip(self.waypoints.iter().copied())
            .map(|(start, goal)| Segment::new(start, goal))
    }
}

/// Build the augmented path flown for a planner `path` at `height`
///
/// Every planner point has its `z` forced to `height`.
///
/// # Errors
///
/// Returns `EmptyPlan` if `path` has no points and `NonFinite` if `height` or
/// any planner coordinate is NaN or infinite
///
/// # Examples
///
/// ```
/// use path_gen::trajectory::{prepare, Waypoint};
///
/// let path = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(1.0, 0.0, 0.0)];
/// let augmented = prepare(&path, 0.3)?;
/// assert_eq!(augmented.takeoff(), Waypoint::new(0.0, 0.0, 0.0));
/// assert_eq!(augmented.waypoints().last(), Some(&Waypoint::new(1.0, 0.0, 0.15)));
/// # Ok::<(), path_gen::error::PathGenError>(())
/// ```
pub fn prepare(path: &[Waypoint], height: f64) -> Result<AugmentedPath> {
    let (first, last) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(PathGenError::EmptyPlan),
    };

    if !height.is_finite() {
        return Err(PathGenError::NonFinite(format!("flight height {}", height)));
    }
    if let Some(bad) = path.iter().find(|w| !w.is_finite()) {
        return Err(PathGenError::NonFinite(format!("planner waypoint {:?}", bad)));
    }

    let mut waypoints: Vec<Waypoint> = Vec::with_capacity(path.len() + 1);
    waypoints.extend(path.iter().map(|w| w.with_z(height)));
    waypoints.push(last.with_z(LANDING_ALTITUDE));

    Ok(AugmentedPath {
        takeoff: first.with_z(GROUND_ALTITUDE),
        waypoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_rejected() {
        match prepare(&[], 1.0) {
            Err(PathGenError::EmptyPlan) => {}
            other => panic!("Expected EmptyPlan, got: {:?}", other),
        }
    }

    #[test]
    fn test_two_point_path() {
        let path = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(1.0, 0.0, 0.0)];
        let augmented = prepare(&path, 0.3).unwrap();

        assert_eq!(augmented.takeoff(), Waypoint::new(0.0, 0.0, 0.0));
        assert_eq!(
            augmented.waypoints(),
            &[
                Waypoint::new(0.0, 0.0, 0.3),
                Waypoint::new(1.0, 0.0, 0.3),
                Waypoint::new(1.0, 0.0, 0.15),
            ]
        );
    }

    #[test]
    fn test_length_is_original_plus_landing() {
        for n in 1..6 {
            let path: Vec<Waypoint> = (0..n).map(|i| Waypoint::new(i as f64, 0.0, 0.0)).collect();
            let augmented = prepare(&path, 2.0).unwrap();
            assert_eq!(augmented.len(), n + 1);
            assert!(!augmented.is_empty());
        }
    }

    #[test]
    fn test_every_planner_point_forced_to_height() {
        let path = vec![
            Waypoint::new(0.0, 0.0, 5.0),
            Waypoint::new(1.0, 1.0, -2.0),
            Waypoint::new(2.0, 1.0, 9.0),
        ];
        let augmented = prepare(&path, 0.8).unwrap();

        let (planner_points, landing) = augmented.waypoints().split_at(path.len());
        assert!(planner_points.iter().all(|w| w.z == 0.8));
        assert_eq!(landing, &[Waypoint::new(2.0, 1.0, LANDING_ALTITUDE)]);
    }

    #[test]
    fn test_takeoff_below_first_point() {
        let path = vec![Waypoint::new(-4.0, 2.5, 3.0), Waypoint::new(0.0, 0.0, 0.0)];
        let augmented = prepare(&path, 1.0).unwrap();
        assert_eq!(augmented.takeoff(), Waypoint::new(-4.0, 2.5, GROUND_ALTITUDE));
    }

    #[test]
    fn test_single_point_path() {
        let path = vec![Waypoint::new(3.0, 4.0, 0.0)];
        let augmented = prepare(&path, 1.0).unwrap();

        assert_eq!(augmented.takeoff(), Waypoint::new(3.0, 4.0, 0.0));
        assert_eq!(
            augmented.waypoints(),
            &[Waypoint::new(3.0, 4.0, 1.0), Waypoint::new(3.0, 4.0, 0.15)]
        );
    }

    #[test]
    fn test_segments_chain_from_takeoff() {
        let path = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(1.0, 0.0, 0.0)];
        let augmented = prepare(&path, 0.3).unwrap();
        let segments: Vec<Segment> = augmented.segments().collect();

        assert_eq!(segments.len(), augmented.len());
        assert_eq!(segments[0].start, augmented.takeoff());
        for (segment, target) in segments.iter().zip(augmented.waypoints()) {
            assert_eq!(segment.goal, *target);
        }
        for pair in segments.windows(2) {
            assert_eq!(pair[1].start, pair[0].goal);
        }
    }

    #[test]
    fn test_non_finite_height_rejected() {
        let path = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(1.0, 0.0, 0.0)];
        for height in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match prepare(&path, height) {
                Err(PathGenError::NonFinite(msg)) => assert!(msg.contains("height")),
                other => panic!("Expected NonFinite for {}, got: {:?}", height, other),
            }
        }
    }

    #[test]
    fn test_non_finite_waypoint_rejected() {
        let path = vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(f64::NAN, 1.0, 0.0)];
        assert!(matches!(prepare(&path, 1.0), Err(PathGenError::NonFinite(_))));
    }

    #[test]
    fn test_nan_planner_z_rejected() {
        // z is overwritten by the height, but a NaN anywhere means a broken planner point
        let path = vec![Waypoint::new(0.0, 0.0, f64::NAN)];
        assert!(prepare(&path, 1.0).is_err());
    }
}
