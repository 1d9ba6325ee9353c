//! # Collaborator Services
//!
//! Trait seams for the two remote collaborators of a planning request:
//! - [`MapService`]: produces the opaque map identifier the planner works on
//! - [`PlannerService`]: turns a start/goal query into an ordered path
//!
//! The transport behind them is out of scope; the implementations shipped here
//! are local stand-ins selected from configuration.

use async_trait::async_trait;

use crate::error::Result;
use crate::trajectory::{Path, Waypoint};

pub mod map;
pub mod planner;

pub use map::StaticMapService;
pub use planner::{StraightLinePlanner, WaypointFilePlanner};

/// One plan request as sent to the planner
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanQuery {
    pub start: Waypoint,
    pub goal: Waypoint,
    /// Obstacles the planner should ignore (empty by default)
    pub obstacle_ids: Vec<i16>,
    /// Map identifier, possibly empty when map generation failed
    pub map_id: String,
}

/// Map generation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MapService: Send + Sync {
    /// Trigger map generation and return the resulting map identifier
    async fn generate_map(&self) -> Result<String>;
}

/// Path planning service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlannerService: Send + Sync {
    /// Plan a path for `query`
    ///
    /// An empty path means no plan was found.
    async fn plan(&self, query: PlanQuery) -> Result<Path>;
}
