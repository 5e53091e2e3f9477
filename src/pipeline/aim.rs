//! Aim stage: where the camera points.

use std::any::Any;

use glam::Quat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CinemachineComponent, Stage, StageContext};
use crate::camera::CameraState;
use crate::util::damping::damp;
use crate::util::vector::{almost_zero, look_rotation};

/// Points the camera straight at the look-at target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardLookAt;

impl CinemachineComponent for HardLookAt {
    fn stage(&self) -> Stage {
        Stage::Aim
    }

    fn is_valid(&self, ctx: &StageContext<'_>) -> bool {
        ctx.look_at.is_some()
    }

    fn mutate_camera_state(
        &mut self,
        state: &mut CameraState,
        ctx: &StageContext<'_>,
        _delta_time: f32,
    ) {
        let Some(target) = state
            .reference_look_at
            .or_else(|| ctx.look_at.map(|pose| pose.position))
        else {
            return;
        };
        let dir = target - state.corrected_position();
        if !almost_zero(dir) {
            state.raw_orientation = look_rotation(dir, state.reference_up);
        }
    }

    fn name(&self) -> &'static str {
        "hard_look_at"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Copies the follow target's rotation, optionally lagging behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SameAsFollowTarget {
    /// Seconds to catch up with the target's rotation; zero copies it.
    #[schemars(range(min = 0.0))]
    pub damping: f32,
    #[serde(skip)]
    #[schemars(skip)]
    previous_orientation: Option<Quat>,
}

impl Default for SameAsFollowTarget {
    fn default() -> Self {
        Self {
            damping: 0.0,
            previous_orientation: None,
        }
    }
}

impl SameAsFollowTarget {
    /// Copy with the given damping time.
    #[must_use]
    pub fn new(damping: f32) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }
}

impl CinemachineComponent for SameAsFollowTarget {
    fn stage(&self) -> Stage {
        Stage::Aim
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
        let mut orientation = follow.rotation;
        if let Some(previous) = self.previous_orientation.filter(|_| delta_time >= 0.0) {
            let t = damp(1.0, self.damping, delta_time);
            orientation = previous.slerp(orientation, t);
        }
        self.previous_orientation = Some(orientation);
        state.raw_orientation = orientation;
    }

    fn name(&self) -> &'static str {
        "same_as_follow_target"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
