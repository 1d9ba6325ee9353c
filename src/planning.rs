//! # Planning Facade
//!
//! Orchestrates one planning request end to end:
//!
//! ```text
//! Idle -> MapRequested -> PlanRequested -> Interpolating -> Done
//!                                      \-> Failed
//! ```
//!
//! A failed map request does not abort the plan: the planner is called with an
//! empty map identifier. A failed or empty plan stops before the trajectory file
//! is touched.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{PathGenError, Result};
use crate::services::{
    MapService, PlanQuery, PlannerService, StaticMapService, StraightLinePlanner,
    WaypointFilePlanner,
};
use crate::trajectory::{prepare, TrajectoryWriter, Waypoint};

/// Acknowledgment sent when failures are not reported to the caller
pub const LEGACY_ACKNOWLEDGMENT: &str = "Success!";

/// Inbound planning request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub start: (f64, f64),
    pub goal: (f64, f64),
    /// Cruise height applied to every planner waypoint
    pub height: f64,
}

/// Outcome of a planning request, one variant per failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Trajectory written
    Success,
    /// Trajectory written, but map generation failed and the planner ran without a map id
    MapServiceUnavailable,
    /// Planner returned no poses; nothing written
    EmptyPlan,
    /// Planner could not be reached; nothing written
    PlannerServiceUnavailable,
    /// Trajectory file could not be written
    FileWriteFailure,
    /// Request or plan holds non-finite values or a leg too long to sample; nothing written
    InvalidRequest,
}

impl PlanRequest {
    /// Whether every coordinate and the height are finite numbers
    pub fn is_finite(&self) -> bool {
        [self.start.0, self.start.1, self.goal.0, self.goal.1, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl PlanStatus {
    /// Whether a trajectory file was produced
    pub fn is_success(&self) -> bool {
        matches!(self, PlanStatus::Success | PlanStatus::MapServiceUnavailable)
    }

    pub fn description(&self) -> &'static str {
        match self {
            PlanStatus::Success => LEGACY_ACKNOWLEDGMENT,
            PlanStatus::MapServiceUnavailable => "Trajectory generated without a map",
            PlanStatus::EmptyPlan => "Failed to retrieve a valid plan",
            PlanStatus::PlannerServiceUnavailable => "Planner service unavailable",
            PlanStatus::FileWriteFailure => "Failed to write trajectory file",
            PlanStatus::InvalidRequest => "Request cannot be turned into a trajectory",
        }
    }
}

/// Response returned for every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResponse {
    pub status: PlanStatus,
    pub result: String,
    pub rows_written: usize,
    pub destination: Option<PathBuf>,
}

/// Request processing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Idle,
    MapRequested,
    PlanRequested,
    Interpolating,
    Done,
    Failed,
}

/// Runs planning requests against a map service and a planner
///
/// Requests are handled one at a time; `&mut self` keeps a single writer on
/// the destination file.
pub struct PlanningFacade {
    map: Box<dyn MapService>,
    planner: Box<dyn PlannerService>,
    writer: TrajectoryWriter,
    output_path: PathBuf,
    per_request_files: bool,
    timeout: Duration,
    obstacle_ids: Vec<i16>,
    report_failures: bool,
    state: PlanState,
}

impl std::fmt::Debug for PlanningFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningFacade")
            .field("output_path", &self.output_path)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PlanningFacade {
    /// Create a facade over the given services
    ///
    /// # Errors
    ///
    /// Returns `InvalidStep` if the configured step size is unusable
    pub fn new(
        map: Box<dyn MapService>,
        planner: Box<dyn PlannerService>,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self {
            map,
            planner,
            writer: TrajectoryWriter::new(config.trajectory.step_size)?,
            output_path: config.output_path(),
            per_request_files: config.trajectory.per_request_files,
            timeout: Duration::from_millis(config.services.timeout_ms),
            obstacle_ids: config.services.obstacle_ids.clone(),
            report_failures: config.response.report_failures,
            state: PlanState::Idle,
        })
    }

    /// Create a facade with the local services selected by `config`
    ///
    /// Uses the waypoint file planner when `services.waypoint_file` is set,
    /// the straight-line planner otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let map = Box::new(StaticMapService::new(config.services.map_filename.clone()));
        let planner: Box<dyn PlannerService> = if config.services.waypoint_file.is_empty() {
            Box::new(StraightLinePlanner)
        } else {
            Box::new(WaypointFilePlanner::new(&config.services.waypoint_file))
        };
        Self::new(map, planner, config)
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    /// Handle one planning request from start to finish
    pub async fn handle(&mut self, request: PlanRequest) -> PlanResponse {
        self.state = PlanState::Idle;
        if !request.is_finite() {
            error!("Rejecting request with non-finite values: {:?}", request);
            return self.fail(PlanStatus::InvalidRequest, None);
        }

        info!(
            "Planning from ({}, {}) to ({}, {}) at height {}",
            request.start.0, request.start.1, request.goal.0, request.goal.1, request.height
        );

        self.transition(PlanState::MapRequested);
        let map_result = with_timeout("map", self.timeout, self.map.generate_map()).await;
        let (map_id, map_available) = match map_result {
            Ok(id) => (id, true),
            Err(e) => {
                error!("Failed to call map service: {}", e);
                (String::new(), false)
            }
        };

        self.transition(PlanState::PlanRequested);
        let query = PlanQuery {
            start: Waypoint::from(request.start),
            goal: Waypoint::from(request.goal),
            obstacle_ids: self.obstacle_ids.clone(),
            map_id,
        };
        let path = match with_timeout("planner", self.timeout, self.planner.plan(query)).await {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to call planner service: {}", e);
                return self.fail(PlanStatus::PlannerServiceUnavailable, None);
            }
        };

        if path.is_empty() {
            warn!("{}", PlanStatus::EmptyPlan.description());
            return self.fail(PlanStatus::EmptyPlan, None);
        }

        for pose in &path {
            info!("X: {}, Y: {}", pose.x, pose.y);
        }

        self.transition(PlanState::Interpolating);
        let augmented = match prepare(&path, request.height) {
            Ok(augmented) => augmented,
            Err(PathGenError::EmptyPlan) => return self.fail(PlanStatus::EmptyPlan, None),
            Err(e) => {
                error!("Cannot build trajectory from plan: {}", e);
                return self.fail(PlanStatus::InvalidRequest, None);
            }
        };

        let destination = if self.per_request_files {
            per_request_destination(&self.output_path, Utc::now())
        } else {
            self.output_path.clone()
        };

        match self.writer.write_to_file(&augmented, &destination) {
            Ok(summary) => {
                self.transition(PlanState::Done);
                let status = if map_available {
                    PlanStatus::Success
                } else {
                    PlanStatus::MapServiceUnavailable
                };
                self.respond(status, summary.rows, Some(destination))
            }
            Err(PathGenError::FileWrite { .. }) => {
                self.fail(PlanStatus::FileWriteFailure, Some(destination))
            }
            Err(e) => {
                error!("Cannot build trajectory from plan: {}", e);
                self.fail(PlanStatus::InvalidRequest, None)
            }
        }
    }

    fn transition(&mut self, next: PlanState) {
        debug!("Planning state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, status: PlanStatus, destination: Option<PathBuf>) -> PlanResponse {
        self.transition(PlanState::Failed);
        self.respond(status, 0, destination)
    }

    fn respond(
        &self,
        status: PlanStatus,
        rows_written: usize,
        destination: Option<PathBuf>,
    ) -> PlanResponse {
        let result = if self.report_failures {
            status.description()
        } else {
            LEGACY_ACKNOWLEDGMENT
        };

        PlanResponse {
            status,
            result: result.to_string(),
            rows_written,
            destination,
        }
    }
}

/// Await a service call, failing with `ServiceTimeout` after `timeout`
async fn with_timeout<T, F>(service: &'static str, timeout: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| PathGenError::ServiceTimeout {
            service,
            timeout_ms: timeout.as_millis() as u64,
        })?
}

/// Timestamped sibling of `base` for one request
///
/// `traj/trajectory.txt` becomes `traj/trajectory_20261018_123005_042.txt`.
pub fn per_request_destination(base: &Path, now: DateTime<Utc>) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trajectory".to_string());
    let mut name = format!("{}_{}", stem, now.format("%Y%m%d_%H%M%S_%3f"));
    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    base.with_file_name(name)
}
