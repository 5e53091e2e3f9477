//! Body stage: where the camera is.

use std::any::Any;

use glam::{Quat, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CinemachineComponent, Stage, StageContext};
use crate::camera::CameraState;
use crate::util::damping::{damp, damp_vec3};
use crate::util::vector::{almost_zero, from_to_rotation, look_rotation, project_onto_plane};

/// Places the camera exactly on the follow target, optionally lagging
/// behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HardLockToTarget {
    /// Seconds to catch up with the target; zero locks rigidly.
    #[schemars(range(min = 0.0))]
    pub damping: f32,
    #[serde(skip)]
    #[schemars(skip)]
    previous_position: Option<Vec3>,
}

impl Default for HardLockToTarget {
    fn default() -> Self {
        Self {
            damping: 0.0,
            previous_position: None,
        }
    }
}

impl HardLockToTarget {
    /// Lock with the given damping time.
    #[must_use]
    pub fn new(damping: f32) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }
}

impl CinemachineComponent for HardLockToTarget {
    fn stage(&self) -> Stage {
        Stage::Body
    }

    fn is_valid(&self, ctx: &StageContext<'_>) -> bool {
        ctx.follow.is_some()
    }

    fn mutate_camera_state(
        &mut self,
        state: &mut CameraState,
        ctx: &StageContext<'_>,
        delta_time: f32,
    ) {
        let Some(follow) = ctx.follow else {
            return;
        };
        let mut position = follow.position;
        if let Some(previous) = self.previous_position.filter(|_| delta_time >= 0.0) {
            position = previous
                + damp_vec3(position - previous, Vec3::splat(self.damping), delta_time);
        }
        self.previous_position = Some(position);
        state.raw_position = position;
    }

    fn name(&self) -> &'static str {
        "hard_lock_to_target"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Frame in which a [`Transposer`] offset and damping are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    /// World axes; the target's rotation is ignored.
    WorldSpace,
    /// The target's full rotation.
    LockToTarget,
    /// The target's heading about the reference up; pitch and roll ignored.
    #[default]
    LockToTargetWithWorldUp,
    /// The target's heading and pitch; roll ignored.
    LockToTargetNoRoll,
}

/// Keeps the camera at a fixed offset from the follow target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Transposer {
    /// Frame the offset is expressed in.
    pub binding_mode: BindingMode,
    /// Desired camera position relative to the target.
    #[schemars(with = "[f32; 3]")]
    pub follow_offset: Vec3,
    /// Per-axis catch-up time in the binding frame.
    #[schemars(with = "[f32; 3]")]
    pub damping: Vec3,
    /// Catch-up time for changes of the binding frame's rotation.
    #[schemars(range(min = 0.0))]
    pub angular_damping: f32,
    #[serde(skip)]
    #[schemars(skip)]
    previous_position: Option<Vec3>,
    #[serde(skip)]
    #[schemars(skip)]
    previous_frame: Option<Quat>,
}

impl Default for Transposer {
    fn default() -> Self {
        Self {
            binding_mode: BindingMode::LockToTargetWithWorldUp,
            follow_offset: Vec3::new(0.0, 0.0, -10.0),
            damping: Vec3::ONE,
            angular_damping: 0.0,
            previous_position: None,
            previous_frame: None,
        }
    }
}

impl Transposer {
    /// Transposer at `offset` in the given frame, with no damping.
    #[must_use]
    pub fn new(binding_mode: BindingMode, follow_offset: Vec3) -> Self {
        Self {
            binding_mode,
            follow_offset,
            damping: Vec3::ZERO,
            ..Self::default()
        }
    }

    /// Builder: per-axis damping.
    #[must_use]
    pub fn with_damping(mut self, damping: Vec3) -> Self {
        self.damping = damping.max(Vec3::ZERO);
        self
    }

    /// Correct invalid settings in place.
    pub fn validate(&mut self) {
        self.damping = self.damping.max(Vec3::ZERO);
        self.angular_damping = self.angular_damping.max(0.0);
    }

    /// Rotation of the binding frame for a target rotation.
    #[must_use]
    pub fn binding_frame(&self, target_rotation: Quat, up: Vec3) -> Quat {
        match self.binding_mode {
            BindingMode::WorldSpace => Quat::IDENTITY,
            BindingMode::LockToTarget => target_rotation,
            BindingMode::LockToTargetNoRoll => look_rotation(target_rotation * Vec3::Z, up),
            BindingMode::LockToTargetWithWorldUp => {
                let heading = project_onto_plane(target_rotation * Vec3::Z, up);
                if almost_zero(heading) {
                    from_to_rotation(Vec3::Y, up)
                } else {
                    look_rotation(heading, up)
                }
            }
        }
    }
}

impl CinemachineComponent for Transposer {
    fn stage(&self) -> Stage {
        Stage::Body
    }

    fn is_valid(&self, ctx: &StageContext<'_>) -> bool {
        ctx.follow.is_some()
    }

    fn mutate_camera_state(
        &mut self,
        state: &mut CameraState,
        ctx: &StageContext<'_>,
        delta_time: f32,
    ) {
        let Some(follow) = ctx.follow else {
            return;
        };
        let has_history = delta_time >= 0.0;
        let mut frame = self.binding_frame(follow.rotation, state.reference_up);
        if let Some(previous) = self.previous_frame.filter(|_| has_history) {
            let t = damp(1.0, self.angular_damping, delta_time);
            frame = previous.slerp(frame, t);
        }
        let desired = follow.position + frame * self.follow_offset;

        let position = match self.previous_position.filter(|_| has_history) {
            Some(previous) => {
                let local = frame.inverse() * (desired - previous);
                previous + frame * damp_vec3(local, self.damping, delta_time)
            }
            None => desired,
        };

        self.previous_frame = Some(frame);
        self.previous_position = Some(position);
        state.raw_position = position;
    }

    fn name(&self) -> &'static str {
        "transposer"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
