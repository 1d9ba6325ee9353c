//! # Local Planners
//!
//! Planner implementations that do not need a remote planning service:
//! - [`StraightLinePlanner`]: direct start-to-goal path
//! - [`WaypointFilePlanner`]: replays a path stored as a JSON array of points

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{PlanQuery, PlannerService};
use crate::error::{PathGenError, Result};
use crate::trajectory::Path;

/// Planner that flies straight from start to goal
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLinePlanner;

#[async_trait]
impl PlannerService for StraightLinePlanner {
    async fn plan(&self, query: PlanQuery) -> Result<Path> {
        if !query.obstacle_ids.is_empty() {
            debug!("Straight-line planner ignores {} obstacle ids", query.obstacle_ids.len());
        }
        Ok(vec![query.start, query.goal])
    }
}

/// Planner that returns a path recorded in a JSON file
///
/// The file holds an array of `{"x": .., "y": ..}` objects (`z` optional).
/// The file is read on every request so it can be replaced between plans.
#[derive(Debug, Clone)]
pub struct WaypointFilePlanner {
    path: PathBuf,
}

impl WaypointFilePlanner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }
}

/// Read a JSON waypoint file
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `Waypoints` if it is not a
/// JSON array of points
pub fn load_waypoints<P: AsRef<FsPath>>(path: P) -> Result<Path> {
    let contents = fs::read_to_string(path)?;
    let waypoints: Path = serde_json::from_str(&contents)?;
    Ok(waypoints)
}

#[async_trait]
impl PlannerService for WaypointFilePlanner {
    async fn plan(&self, query: PlanQuery) -> Result<Path> {
        debug!(
            "Loading plan from {} (map '{}')",
            self.path.display(),
            query.map_id
        );

        load_waypoints(&self.path).map_err(|e| {
            warn!("Failed to load waypoint file {}: {}", self.path.display(), e);
            PathGenError::PlannerServiceUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::Waypoint;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn query() -> PlanQuery {
        PlanQuery {
            start: Waypoint::new(0.0, 0.0, 0.0),
            goal: Waypoint::new(3.0, 4.0, 0.0),
            obstacle_ids: vec![],
            map_id: String::new(),
        }
    }

    fn waypoint_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_straight_line_plan() {
        let mut q = query();
        q.obstacle_ids = vec![3, 7];
        let path = StraightLinePlanner.plan(q).await.unwrap();
        assert_eq!(path, vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(3.0, 4.0, 0.0)]);
    }

    #[test]
    fn test_load_waypoints() {
        let file = waypoint_file(r#"[{"x": 0.0, "y": 0.0}, {"x": 1.5, "y": -2.0, "z": 0.4}]"#);
        let path = load_waypoints(file.path()).unwrap();
        assert_eq!(path, vec![Waypoint::new(0.0, 0.0, 0.0), Waypoint::new(1.5, -2.0, 0.4)]);
    }

    #[test]
    fn test_load_waypoints_invalid_json() {
        let file = waypoint_file("not json");
        match load_waypoints(file.path()) {
            Err(PathGenError::Waypoints(_)) => {}
            other => panic!("Expected Waypoints error, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_waypoints_missing_file() {
        match load_waypoints("/nonexistent/waypoints.json") {
            Err(PathGenError::Io(_)) => {}
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_planner_returns_file_contents() {
        let file = waypoint_file(r#"[{"x": 1.0, "y": 1.0}, {"x": 2.0, "y": 1.0}, {"x": 2.0, "y": 3.0}]"#);
        let planner = WaypointFilePlanner::new(file.path());
        assert_eq!(planner.path(), file.path());

        let path = planner.plan(query()).await.unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[2], Waypoint::new(2.0, 3.0, 0.0));
    }

    #[tokio::test]
    async fn test_file_planner_empty_array_is_empty_plan() {
        let file = waypoint_file("[]");
        let path = WaypointFilePlanner::new(file.path()).plan(query()).await.unwrap();
        assert!(path.is_empty());
    }

    #[tokio::test]
    async fn test_file_planner_missing_file_is_unavailable() {
        let planner = WaypointFilePlanner::new("/nonexistent/waypoints.json");
        match planner.plan(query()).await {
            Err(PathGenError::PlannerServiceUnavailable(msg)) => {
                assert!(msg.contains("/nonexistent/waypoints.json"));
            }
            other => panic!("Expected PlannerServiceUnavailable, got: {:?}", other),
        }
    }
}
