//! Pan/tilt aim driven by two input axes.

use std::any::Any;

use glam::{EulerRot, Quat, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CinemachineComponent, Stage, StageContext, TransitionEvent};
use crate::axis::{AxisState, Recentering};
use crate::camera::CameraState;
use crate::util::vector::{almost_zero, from_to_rotation, project_onto_plane, signed_angle};

/// Aims the camera from a vertical (tilt) and horizontal (pan) axis, each
/// with its own recentering.
///
/// Orientation is `yaw(horizontal) * pitch(vertical)`, expressed in the
/// parent's space when the camera has a parent and rotated onto the state's
/// reference up otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Pov {
    /// Tilt in degrees; positive looks down.
    pub vertical_axis: AxisState,
    /// Returns the tilt to 0 after idle.
    pub vertical_recentering: Recentering,
    /// Pan in degrees; positive turns right.
    pub horizontal_axis: AxisState,
    /// Returns the pan to 0 after idle.
    pub horizontal_recentering: Recentering,
}

impl Default for Pov {
    fn default() -> Self {
        Self {
            vertical_axis: AxisState::new(-70.0, 70.0, false, 300.0, "Mouse Y").inverted(),
            vertical_recentering: Recentering::new(false, 1.0, 2.0),
            horizontal_axis: AxisState::new(-180.0, 180.0, true, 300.0, "Mouse X"),
            horizontal_recentering: Recentering::new(false, 1.0, 2.0),
        }
    }
}

impl Pov {
    /// Correct invalid settings on both axes.
    pub fn validate(&mut self) {
        self.vertical_axis.validate();
        self.vertical_recentering.validate();
        self.horizontal_axis.validate();
        self.horizontal_recentering.validate();
    }

    /// Rotation produced by the current axis values, before the parent or
    /// reference-up frame is applied.
    #[must_use]
    pub fn local_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.horizontal_axis.value.to_radians(),
            self.vertical_axis.value.to_radians(),
            0.0,
        )
    }

    fn recenter(&mut self, delta_time: f32) {
        self.horizontal_axis.value = self.horizontal_recentering.do_recentering(
            self.horizontal_axis.range(),
            self.horizontal_axis.value,
            delta_time,
            0.0,
        );
        self.vertical_axis.value = self.vertical_recentering.do_recentering(
            self.vertical_axis.range(),
            self.vertical_axis.value,
            delta_time,
            0.0,
        );
    }
}

impl CinemachineComponent for Pov {
    fn stage(&self) -> Stage {
        Stage::Aim
    }

    fn mutate_camera_state(
        &mut self,
        state: &mut CameraState,
        ctx: &StageContext<'_>,
        delta_time: f32,
    ) {
        if delta_time >= 0.0 && ctx.is_live {
            if self.horizontal_axis.update(delta_time, ctx.input) {
                self.horizontal_recentering.cancel_recentering();
            }
            if self.vertical_axis.update(delta_time, ctx.input) {
                self.vertical_recentering.cancel_recentering();
            }
        }
        // Recentering runs even while the camera is on standby.
        self.recenter(delta_time);

        let local = self.local_rotation();
        state.raw_orientation = match ctx.parent_rotation {
            Some(parent) => parent * local,
            None => local * from_to_rotation(Vec3::Y, state.reference_up),
        };
    }

    fn on_transition_from_camera(
        &mut self,
        event: &TransitionEvent<'_>,
        ctx: &StageContext<'_>,
    ) -> bool {
        self.recenter(-1.0);
        self.horizontal_recentering.cancel_recentering();
        self.vertical_recentering.cancel_recentering();

        let Some(from) = event.from.filter(|_| event.params.inherit_position) else {
            return false;
        };

        let up = event.reference_up;
        let mut fwd = Vec3::Z;
        if let Some(parent) = ctx.parent_rotation {
            fwd = parent * fwd;
        }
        let target_fwd = from.raw_orientation * Vec3::Z;

        self.horizontal_axis.reset();
        let a = project_onto_plane(fwd, up);
        let b = project_onto_plane(target_fwd, up);
        if !almost_zero(a) && !almost_zero(b) {
            self.horizontal_axis.value = signed_angle(a, b, up);
        }

        self.vertical_axis.reset();
        let fwd = Quat::from_axis_angle(
            up.normalize_or_zero(),
            self.horizontal_axis.value.to_radians(),
        ) * fwd;
        let right = up.cross(fwd);
        if !almost_zero(right) {
            self.vertical_axis.value = signed_angle(fwd, target_fwd, right);
        }
        log::debug!(
            "pov inherited pan {:.2} tilt {:.2}",
            self.horizontal_axis.value,
            self.vertical_axis.value
        );
        true
    }

    fn name(&self) -> &'static str {
        "pov"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
