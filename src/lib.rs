//! # Path Gen Library
//!
//! Turn sparse planner waypoints into dense flight setpoint trajectories.
//!
//! This library provides the core functionality for taking the path returned by
//! a motion planner, adding takeoff and landing legs, interpolating it at a fixed
//! step size and writing the setpoint file consumed by the flight controller.

pub mod config;
pub mod error;
pub mod planning;
pub mod services;
pub mod trajectory;
