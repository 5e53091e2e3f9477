//! Tracked transforms and update-clock inference.

/// Generational store of world poses written by the host.
pub mod transform;
/// Normal-vs-Fixed clock heuristic for tracked transforms.
pub mod update_tracker;

pub use transform::{Pose, TransformId, TransformStore};
pub use update_tracker::{UpdateClock, UpdateTracker, WINDOW_SIZE};
