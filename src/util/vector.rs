//! Vector and rotation helpers shared by the pipeline stages.
//!
//! Angles returned here are in degrees, matching the axis values that the
//! stages feed them into. Camera forward is `+Z` and up is `+Y`.

use glam::{Mat3, Quat, Vec3};

/// Tolerance under which lengths and speeds are treated as zero.
pub const EPSILON: f32 = 1e-4;

/// Whether a vector is short enough to be treated as zero.
#[inline]
#[must_use]
pub fn almost_zero(v: Vec3) -> bool {
    v.length_squared() < EPSILON * EPSILON
}

/// Remove the component of `v` along `normal`.
///
/// `normal` does not need to be unit length; a zero normal returns `v`.
#[inline]
#[must_use]
pub fn project_onto_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    v - v.dot(n) * n
}

/// Unsigned angle between two vectors, in degrees.
///
/// Returns 0 when either vector is degenerate.
#[must_use]
pub fn angle(from: Vec3, to: Vec3) -> f32 {
    let denominator = (from.length_squared() * to.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    let cos = (from.dot(to) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Signed angle from `from` to `to` about `axis`, in degrees.
///
/// Positive when the rotation is counter-clockwise looking down `axis`
/// (right-hand rule). Exactly opposite vectors give `+180`.
#[must_use]
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let unsigned = angle(from, to);
    let s = axis.dot(from.cross(to));
    if s < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Rotation whose `+Z` points along `forward` and whose `+Y` is as close to
/// `up` as possible.
///
/// Falls back to the shortest arc from `+Z` when `forward` is parallel to
/// `up`, and to identity when `forward` is degenerate.
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let x = up.cross(z);
    if almost_zero(x) {
        return Quat::from_rotation_arc(Vec3::Z, z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Rotation taking `from` onto `to`; identity for degenerate input.
#[must_use]
pub fn from_to_rotation(from: Vec3, to: Vec3) -> Quat {
    let a = from.normalize_or_zero();
    let b = to.normalize_or_zero();
    if a == Vec3::ZERO || b == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(a, b)
}

/// Spherical interpolation between two vectors, interpolating length
/// linearly.
#[must_use]
pub fn slerp_vector(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    let len_a = a.length();
    let len_b = b.length();
    if len_a < EPSILON || len_b < EPSILON {
        return a.lerp(b, t);
    }
    let dir_a = a / len_a;
    let dir_b = b / len_b;
    let length = len_a + (len_b - len_a) * t;
    if dir_a.dot(dir_b) < -1.0 + EPSILON {
        // Opposite directions: pick any perpendicular axis for the arc.
        let axis = dir_a.any_orthonormal_vector();
        let rot = Quat::from_axis_angle(axis, std::f32::consts::PI * t);
        return rot * dir_a * length;
    }
    let arc = Quat::from_rotation_arc(dir_a, dir_b);
    let rot = Quat::IDENTITY.slerp(arc, t);
    rot * dir_a * length
}
