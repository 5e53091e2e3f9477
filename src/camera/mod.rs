//! Camera state, lens and blending.
//!
//! [`CameraState`] is the value every pipeline stage mutates and the brain
//! outputs; [`CameraBlend`] interpolates between two of them over time.

/// Blend curves and running blends.
pub mod blend;
/// Projection parameters.
pub mod lens;
/// The per-frame camera snapshot.
pub mod state;

pub use blend::{BlendDefinition, BlendStyle, CameraBlend};
pub use lens::LensSettings;
pub use state::{BlendHint, CameraState};
