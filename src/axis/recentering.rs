//! Automatic return of an axis to a target value after input goes idle.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::state::AxisRange;
use crate::util::damping::smooth_damp;
use crate::util::vector::EPSILON;

/// Recentering settings plus the idle clock that gates them.
///
/// Recentering is dormant until `wait_time` seconds have accumulated
/// without a [`cancel_recentering`](Self::cancel_recentering), then springs
/// the value toward the target with time constant `recentering_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Recentering {
    /// Whether recentering happens at all.
    pub enabled: bool,
    /// Idle seconds before recentering starts.
    #[schemars(range(min = 0.0))]
    pub wait_time: f32,
    /// Approximate seconds the recentering takes; zero snaps.
    #[schemars(range(min = 0.0))]
    pub recentering_time: f32,
    #[serde(skip)]
    #[schemars(skip)]
    idle_time: f32,
    #[serde(skip)]
    #[schemars(skip)]
    velocity: f32,
}

impl Default for Recentering {
    fn default() -> Self {
        Self::new(false, 1.0, 2.0)
    }
}

impl Recentering {
    /// New recentering settings with a fresh idle clock.
    #[must_use]
    pub fn new(enabled: bool, wait_time: f32, recentering_time: f32) -> Self {
        Self {
            enabled,
            wait_time,
            recentering_time,
            idle_time: 0.0,
            velocity: 0.0,
        }
    }

    /// Correct invalid settings in place.
    pub fn validate(&mut self) {
        self.wait_time = self.wait_time.max(0.0);
        self.recentering_time = self.recentering_time.max(0.0);
    }

    /// Restart the idle clock and stop any recentering in progress.
    pub fn cancel_recentering(&mut self) {
        self.idle_time = 0.0;
        self.velocity = 0.0;
    }

    /// Seconds since the last cancel.
    #[must_use]
    pub fn idle_time(&self) -> f32 {
        self.idle_time
    }

    /// Whether the wait has elapsed and recentering is moving the value.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.idle_time >= self.wait_time
    }

    /// Advance recentering by `delta_time` and return the new axis value.
    ///
    /// A negative `delta_time` forces completion: the (range-clamped)
    /// target is returned at once and the idle clock restarts. Disabled
    /// recentering returns `current_value` unchanged.
    #[must_use]
    pub fn do_recentering(
        &mut self,
        range: AxisRange,
        current_value: f32,
        delta_time: f32,
        recenter_target: f32,
    ) -> f32 {
        if !self.enabled {
            return current_value;
        }
        let target = range.clamp_value(recenter_target);
        if delta_time < 0.0 {
            self.cancel_recentering();
            return target;
        }

        self.idle_time += delta_time;
        if self.idle_time < self.wait_time {
            return current_value;
        }

        let mut v = range.clamp_value(current_value);
        let delta = target - v;
        if delta.abs() < EPSILON {
            self.velocity = 0.0;
            return target;
        }

        // Go the short way around a wrapping axis.
        let r = range.span();
        if range.wrap && delta.abs() > r * 0.5 {
            v += delta.signum() * r;
        }

        let next = if self.recentering_time < 0.001 {
            target
        } else {
            smooth_damp(
                v,
                target,
                &mut self.velocity,
                self.recentering_time,
                9999.0,
                delta_time,
            )
        };
        if (next - target).abs() < EPSILON {
            self.velocity = 0.0;
            return target;
        }
        range.clamp_value(next)
    }
}
