//! Shared math and timing helpers for the camera pipeline.
//!
//! Vector and rotation helpers, frame-rate independent damping, and the
//! fixed-timestep frame clock.

pub mod damping;
pub mod frame_timing;
pub mod vector;
