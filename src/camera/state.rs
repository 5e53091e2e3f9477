//! The per-frame camera snapshot composed by the pipeline stages.

use std::ops::{BitOr, BitOrAssign};

use glam::{Mat4, Quat, Vec3};

use super::lens::LensSettings;
use crate::util::vector::{project_onto_plane, slerp_vector, EPSILON};

/// Hints controlling how a state is blended with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendHint(u8);

impl BlendHint {
    /// Plain linear position blend.
    pub const NONE: Self = Self(0);
    /// Blend position on a sphere around the look-at point.
    pub const SPHERICAL_POSITION: Self = Self(1);
    /// Blend position on a cylinder around the look-at point's up axis.
    pub const CYLINDRICAL_POSITION: Self = Self(1 << 1);
    /// The incoming camera starts from the outgoing camera's pose.
    pub const INHERIT_POSITION: Self = Self(1 << 2);

    /// Whether every bit of `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for BlendHint {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BlendHint {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Position, orientation and lens of a camera for one evaluation.
///
/// Built fresh every tick from the vcam's own pose and lens, then handed by
/// `&mut` through Body, Aim and Noise. Stages write the `raw_*` fields;
/// procedural effects that should not feed back into the next frame write
/// the corrections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Projection parameters.
    pub lens: LensSettings,
    /// World up used for aiming and blending.
    pub reference_up: Vec3,
    /// Point the camera is looking at, if any.
    pub reference_look_at: Option<Vec3>,
    /// Position before corrections.
    pub raw_position: Vec3,
    /// Orientation before corrections.
    pub raw_orientation: Quat,
    /// Offset added to the raw position.
    pub position_correction: Vec3,
    /// Rotation applied after the raw orientation.
    pub orientation_correction: Quat,
    /// How this state prefers to be blended.
    pub blend_hint: BlendHint,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            lens: LensSettings::default(),
            reference_up: Vec3::Y,
            reference_look_at: None,
            raw_position: Vec3::ZERO,
            raw_orientation: Quat::IDENTITY,
            position_correction: Vec3::ZERO,
            orientation_correction: Quat::IDENTITY,
            blend_hint: BlendHint::NONE,
        }
    }
}

impl CameraState {
    /// Raw position plus correction.
    #[inline]
    #[must_use]
    pub fn corrected_position(&self) -> Vec3 {
        self.raw_position + self.position_correction
    }

    /// Raw orientation followed by correction.
    #[inline]
    #[must_use]
    pub fn corrected_orientation(&self) -> Quat {
        self.raw_orientation * self.orientation_correction
    }

    /// Position the physical camera should take.
    #[inline]
    #[must_use]
    pub fn final_position(&self) -> Vec3 {
        self.corrected_position()
    }

    /// Orientation the physical camera should take, including dutch.
    #[must_use]
    pub fn final_orientation(&self) -> Quat {
        let q = self.corrected_orientation();
        if self.lens.dutch.abs() > EPSILON {
            q * Quat::from_axis_angle(Vec3::Z, self.lens.dutch.to_radians())
        } else {
            q
        }
    }

    /// Final forward direction (`+Z`).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.final_orientation() * Vec3::Z
    }

    /// World-to-view matrix for the final pose.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.final_orientation(), self.final_position())
            .inverse()
    }

    /// Interpolate between two states.
    ///
    /// Positions travel on a sphere (or cylinder) around the blended look-at
    /// point when either state asks for it and both have a look-at point;
    /// otherwise linearly. Orientations slerp.
    #[must_use]
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let hint = a.blend_hint | b.blend_hint;

        let reference_look_at = match (a.reference_look_at, b.reference_look_at) {
            (Some(la), Some(lb)) => Some(la.lerp(lb, t)),
            (la, lb) => {
                if t < 0.5 {
                    la
                } else {
                    lb
                }
            }
        };
        let reference_up = slerp_vector(a.reference_up, b.reference_up, t)
            .try_normalize()
            .unwrap_or(b.reference_up);

        let raw_position = match (a.reference_look_at, b.reference_look_at, reference_look_at) {
            (Some(la), Some(lb), Some(pivot)) if hint.contains(BlendHint::SPHERICAL_POSITION) => {
                pivot + slerp_vector(a.raw_position - la, b.raw_position - lb, t)
            }
            (Some(la), Some(lb), Some(pivot)) if hint.contains(BlendHint::CYLINDRICAL_POSITION) => {
                let da = a.raw_position - la;
                let db = b.raw_position - lb;
                let flat_a = project_onto_plane(da, reference_up);
                let flat_b = project_onto_plane(db, reference_up);
                let height = (da - flat_a).lerp(db - flat_b, t);
                pivot + slerp_vector(flat_a, flat_b, t) + height
            }
            _ => a.raw_position.lerp(b.raw_position, t),
        };

        Self {
            lens: LensSettings::lerp(&a.lens, &b.lens, t),
            reference_up,
            reference_look_at,
            raw_position,
            raw_orientation: a.raw_orientation.slerp(b.raw_orientation, t),
            position_correction: a.position_correction.lerp(b.position_correction, t),
            orientation_correction: a
                .orientation_correction
                .slerp(b.orientation_correction, t),
            blend_hint: hint,
        }
    }
}
