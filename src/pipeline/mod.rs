//! The staged camera pipeline.
//!
//! A virtual camera owns at most one component per [`Stage`]. Each tick the
//! stages run in order (Body, Aim, Noise), each receiving the same
//! [`CameraState`] by `&mut` and the read-only [`StageContext`] describing
//! the camera's environment. Order matters: Noise perturbs whatever
//! orientation Aim produced, so the stages do not commute.
//!
//! # Adding a component
//!
//! 1. Implement [`CinemachineComponent`] in the module for its stage.
//! 2. Add a variant to the matching options enum in
//!    [`options::camera`](crate::options::camera).

use std::any::Any;
use std::fmt::Debug;

use glam::{Quat, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::axis::AxisInputProvider;
use crate::camera::{BlendHint, CameraState};
use crate::tracking::Pose;

/// Aim stage components.
pub mod aim;
/// Body stage components.
pub mod body;
/// Procedural noise.
pub mod noise;
/// Player-controlled pan/tilt aim.
pub mod pov;

pub use aim::{HardLookAt, SameAsFollowTarget};
pub use body::{BindingMode, HardLockToTarget, Transposer};
pub use noise::{BasicMultiChannelPerlin, NoiseParams, NoiseProfile};
pub use pov::Pov;

/// Pipeline slot, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Positions the camera.
    Body,
    /// Orients the camera.
    Aim,
    /// Adds procedural perturbation.
    Noise,
}

impl Stage {
    /// All stages in evaluation order.
    pub const ALL: [Self; 3] = [Self::Body, Self::Aim, Self::Noise];

    /// Slot index in evaluation order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Body => 0,
            Self::Aim => 1,
            Self::Noise => 2,
        }
    }
}

/// How a camera behaves when it becomes live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TransitionParams {
    /// Start from the outgoing camera's pose instead of the camera's own.
    pub inherit_position: bool,
    /// Preferred position blend.
    pub blend_hint: BlendHintOption,
}

/// Serializable form of the position blend hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlendHintOption {
    /// Linear position blend.
    #[default]
    None,
    /// Spherical blend around the look-at point.
    Spherical,
    /// Cylindrical blend around the look-at point.
    Cylindrical,
}

impl TransitionParams {
    /// Hint bits to stamp on the camera's state.
    #[must_use]
    pub fn blend_hint(&self) -> BlendHint {
        let mut hint = match self.blend_hint {
            BlendHintOption::None => BlendHint::NONE,
            BlendHintOption::Spherical => BlendHint::SPHERICAL_POSITION,
            BlendHintOption::Cylindrical => BlendHint::CYLINDRICAL_POSITION,
        };
        if self.inherit_position {
            hint |= BlendHint::INHERIT_POSITION;
        }
        hint
    }
}

/// Read-only view of the owning camera's environment for one tick.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    /// Whether the owning camera is live (or part of a live blend).
    pub is_live: bool,
    /// World rotation of the camera's parent transform, if it has one.
    pub parent_rotation: Option<Quat>,
    /// Current pose of the follow target.
    pub follow: Option<Pose>,
    /// Current pose of the look-at target.
    pub look_at: Option<Pose>,
    /// Named input axes for this tick.
    pub input: &'a dyn AxisInputProvider,
}

impl Debug for StageContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageContext")
            .field("is_live", &self.is_live)
            .field("parent_rotation", &self.parent_rotation)
            .field("follow", &self.follow)
            .field("look_at", &self.look_at)
            .finish_non_exhaustive()
    }
}

/// A camera becoming live, as seen by its components.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEvent<'a> {
    /// Final state of the outgoing camera, if there was one.
    pub from: Option<&'a CameraState>,
    /// World up supplied by the brain.
    pub world_up: Vec3,
    /// Reference up of the incoming camera's last state.
    pub reference_up: Vec3,
    /// Tick delta; negative means "no history".
    pub delta_time: f32,
    /// The incoming camera's transition settings.
    pub params: &'a TransitionParams,
}

/// A pipeline stage behavior.
///
/// Implementations must tolerate being called with `delta_time < 0`, which
/// means "no valid history: snap, don't damp".
pub trait CinemachineComponent: Send + Sync + Debug {
    /// The slot this component occupies.
    fn stage(&self) -> Stage;

    /// Whether the component can contribute this tick. Invalid components
    /// are skipped.
    fn is_valid(&self, _ctx: &StageContext<'_>) -> bool {
        true
    }

    /// Apply this stage to `state`.
    fn mutate_camera_state(
        &mut self,
        state: &mut CameraState,
        ctx: &StageContext<'_>,
        delta_time: f32,
    );

    /// Notification that the owning camera is going live.
    ///
    /// Returns true if the camera should run an extra internal update.
    fn on_transition_from_camera(
        &mut self,
        _event: &TransitionEvent<'_>,
        _ctx: &StageContext<'_>,
    ) -> bool {
        false
    }

    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Boxed component, as stored in a camera's pipeline.
pub type BoxedComponent = Box<dyn CinemachineComponent>;
