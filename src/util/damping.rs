//! Frame-rate independent damping.
//!
//! [`damp`] is the exponential "fraction of remaining distance" damper used
//! by follow stages and the input-gain axis mode. [`smooth_damp`] is a
//! critically damped spring used by recentering.

use glam::Vec3;

use super::vector::EPSILON;

/// ln(0.01): after `damp_time` seconds only 1% of the distance remains.
const LOG_NEGLIGIBLE_RESIDUAL: f32 = -4.605_170_2;

/// Portion of `initial` to cover this frame so that 99% of it is covered
/// after `damp_time` seconds.
///
/// Returns `initial` unchanged when damping is disabled or the distance is
/// negligible, and zero for a zero-length frame.
#[must_use]
pub fn damp(initial: f32, damp_time: f32, delta_time: f32) -> f32 {
    if damp_time < EPSILON || initial.abs() < EPSILON {
        return initial;
    }
    if delta_time < EPSILON {
        return 0.0;
    }
    let k = -LOG_NEGLIGIBLE_RESIDUAL / damp_time;
    initial * (1.0 - (-k * delta_time).exp())
}

/// Per-component [`damp`].
#[must_use]
pub fn damp_vec3(
    initial: Vec3,
    damp_time: Vec3,
    delta_time: f32,
) -> Vec3 {
    Vec3::new(
        damp(initial.x, damp_time.x, delta_time),
        damp(initial.y, damp_time.y, delta_time),
        damp(initial.z, damp_time.z, delta_time),
    )
}

/// Critically damped spring toward `target`.
///
/// `velocity` carries state between calls. `smooth_time` is roughly the time
/// needed to reach the target; `max_speed` caps the rate of change. Never
/// overshoots.
#[must_use]
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    delta_time: f32,
) -> f32 {
    if delta_time <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(EPSILON);
    let omega = 2.0 / smooth_time;
    let x = omega * delta_time;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * delta_time;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = clamped_target + (change + temp) * exp;

    // Prevent overshooting the original target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}
