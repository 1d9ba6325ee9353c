//! # Trajectory Module
//!
//! Conversion of sparse planner waypoints into dense flight setpoints.
//!
//! This module handles:
//! - Height normalization and takeoff/landing point insertion
//! - Per-segment sample count derivation from a maximum step size
//! - Independent linear interpolation of each axis
//! - Fixed-point rendering of setpoint rows and writing them to a file

pub mod waypoint;
pub mod linspace;
pub mod segment;
pub mod preprocess;
pub mod record;
pub mod writer;

pub use preprocess::{prepare, AugmentedPath};
pub use waypoint::{Path, Waypoint};
pub use writer::{TrajectoryWriter, WriteSummary};
