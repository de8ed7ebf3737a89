//! Camera system for the box scene.
//!
//! Provides a perspective camera, an orbit-style drag controller with
//! damping, and the fly-to flights that move the camera in front of or
//! to the left of the box.

/// Fly-to flights toward targets computed from the box.
pub mod approach;
/// Orbit drag controller managing rotation, pan and zoom.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
