//! Damped scalar input channel.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::input::AxisInputProvider;
use crate::util::damping::damp;
use crate::util::vector::EPSILON;

/// How input values drive the axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SpeedMode {
    /// Input is a fraction of `max_speed`, in units per second.
    #[default]
    MaxSpeed,
    /// Input is multiplied by `max_speed` and added to the value directly.
    InputValueGain,
}

/// Bounds and wrap behavior of an axis, detached from its runtime state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Whether values leaving one end re-enter at the other.
    pub wrap: bool,
}

impl AxisRange {
    /// Width of the range.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Bring `v` into range: wrapped into `(min, max]` on a wrapping axis
    /// when it lies outside, clamped otherwise.
    #[must_use]
    pub fn clamp_value(&self, v: f32) -> f32 {
        let r = self.span();
        if self.wrap && r > EPSILON && (v < self.min || v > self.max) {
            let w = (v - self.min).rem_euclid(r);
            return if w <= 0.0 { self.max } else { self.min + w };
        }
        v.clamp(self.min, self.max.max(self.min))
    }
}

/// A damped, range-limited value driven by a named input axis.
///
/// The configuration fields serialize; speed and the last raw input are
/// runtime state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AxisState {
    /// Current value of the axis.
    pub value: f32,
    /// How input is turned into motion.
    pub speed_mode: SpeedMode,
    /// Maximum speed (MaxSpeed mode) or input gain (InputValueGain mode).
    #[schemars(range(min = 0.0))]
    pub max_speed: f32,
    /// Acceleration time constant in seconds.
    #[schemars(range(min = 0.0))]
    pub accel_time: f32,
    /// Deceleration time constant in seconds.
    #[schemars(range(min = 0.0))]
    pub decel_time: f32,
    /// Name of the input axis to read. Empty means `input_axis_value` is
    /// written directly by the owner.
    pub input_axis_name: String,
    /// Last raw input value.
    #[serde(skip)]
    #[schemars(skip)]
    pub input_axis_value: f32,
    /// Negate the raw input.
    pub invert_input: bool,
    /// Lower bound of `value`.
    pub min_value: f32,
    /// Upper bound of `value`.
    pub max_value: f32,
    /// Whether the value wraps between the bounds.
    pub wrap: bool,
    #[serde(skip)]
    #[schemars(skip)]
    current_speed: f32,
}

impl Default for AxisState {
    fn default() -> Self {
        Self::new(-180.0, 180.0, true, 300.0, "")
    }
}

impl AxisState {
    /// A new axis with 0.1 s acceleration and deceleration.
    #[must_use]
    pub fn new(
        min_value: f32,
        max_value: f32,
        wrap: bool,
        max_speed: f32,
        input_axis_name: &str,
    ) -> Self {
        Self {
            value: 0.0,
            speed_mode: SpeedMode::MaxSpeed,
            max_speed,
            accel_time: 0.1,
            decel_time: 0.1,
            input_axis_name: input_axis_name.to_owned(),
            input_axis_value: 0.0,
            invert_input: false,
            min_value,
            max_value,
            wrap,
            current_speed: 0.0,
        }
    }

    /// Set acceleration and deceleration times.
    #[must_use]
    pub fn with_accel_decel(mut self, accel_time: f32, decel_time: f32) -> Self {
        self.accel_time = accel_time;
        self.decel_time = decel_time;
        self
    }

    /// Invert the input.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert_input = true;
        self
    }

    /// Use the given speed mode.
    #[must_use]
    pub fn with_speed_mode(mut self, mode: SpeedMode) -> Self {
        self.speed_mode = mode;
        self
    }

    /// Start at the given value.
    #[must_use]
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Bounds and wrap flag.
    #[must_use]
    pub fn range(&self) -> AxisRange {
        AxisRange {
            min: self.min_value,
            max: self.max_value,
            wrap: self.wrap,
        }
    }

    /// Current speed in units per second.
    #[must_use]
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Correct invalid settings in place.
    pub fn validate(&mut self) {
        self.max_speed = self.max_speed.max(0.0);
        self.accel_time = self.accel_time.max(0.0);
        self.decel_time = self.decel_time.max(0.0);
        if self.max_value < self.min_value {
            self.max_value = self.min_value;
        }
        self.value = self.range().clamp_value(self.value);
    }

    /// Drop any motion in progress: zero the speed and the raw input, and
    /// put the value at zero (clamped into range). Bounds are untouched.
    pub fn reset(&mut self) {
        self.input_axis_value = 0.0;
        self.current_speed = 0.0;
        self.value = self.range().clamp_value(0.0);
    }

    /// Advance the axis by `delta_time` seconds.
    ///
    /// Returns true if non-negligible input was read this tick.
    pub fn update(
        &mut self,
        delta_time: f32,
        input: &dyn AxisInputProvider,
    ) -> bool {
        if !self.input_axis_name.is_empty() {
            self.input_axis_value = input.axis_value(&self.input_axis_name);
        }
        let raw = self.input_axis_value;
        let signed = if self.invert_input { -raw } else { raw };

        match self.speed_mode {
            SpeedMode::MaxSpeed => self.max_speed_update(signed, delta_time),
            SpeedMode::InputValueGain => self.gain_update(signed, delta_time),
        }
        raw.abs() > EPSILON
    }

    fn max_speed_update(&mut self, input: f32, delta_time: f32) {
        if self.max_speed > EPSILON {
            let target_speed = input * self.max_speed;
            let slowing = target_speed.abs() < EPSILON
                || (self.current_speed.signum() == target_speed.signum()
                    && target_speed.abs() < self.current_speed.abs());
            if slowing {
                let a = (target_speed - self.current_speed).abs()
                    / self.decel_time.max(EPSILON);
                let delta = (a * delta_time).min(self.current_speed.abs());
                self.current_speed -= self.current_speed.signum() * delta;
            } else {
                let a = (target_speed - self.current_speed).abs()
                    / self.accel_time.max(EPSILON);
                self.current_speed += target_speed.signum() * a * delta_time;
                if self.current_speed.signum() == target_speed.signum()
                    && self.current_speed.abs() > target_speed.abs()
                {
                    self.current_speed = target_speed;
                }
            }
        }

        let limit = self.speed_limit().max(0.0);
        self.current_speed = self.current_speed.clamp(-limit, limit);
        self.apply_motion(self.current_speed * delta_time);
    }

    fn gain_update(&mut self, input: f32, delta_time: f32) {
        let mut step = input * self.max_speed;
        if delta_time < EPSILON {
            self.current_speed = 0.0;
        } else {
            let wanted = step / delta_time;
            let damp_time = if wanted.abs() < self.current_speed.abs() {
                self.decel_time
            } else {
                self.accel_time
            };
            let mut speed = self.current_speed
                + damp(wanted - self.current_speed, damp_time, delta_time);
            self.current_speed = speed;

            // Ease into the end stops of a bounded axis.
            let range = self.range();
            let r = range.span();
            if !self.wrap && self.decel_time > EPSILON && r > EPSILON {
                let v0 = range.clamp_value(self.value);
                let v = range.clamp_value(v0 + speed * delta_time);
                let room = if speed > 0.0 {
                    self.max_value - v
                } else {
                    v - self.min_value
                };
                if room < 0.1 * r && speed.abs() > EPSILON {
                    speed = damp(v - v0, self.decel_time, delta_time) / delta_time;
                }
            }
            step = speed * delta_time;
        }
        self.apply_motion(step);
    }

    /// Speed allowed at the current value: ramps to zero over the last tenth
    /// of a bounded range in the direction of travel.
    fn speed_limit(&self) -> f32 {
        let r = self.range().span();
        if !self.wrap && r > 0.0 {
            let threshold = r / 10.0;
            if self.current_speed > 0.0 && (self.max_value - self.value) < threshold {
                let t = ((self.max_value - self.value) / threshold).clamp(0.0, 1.0);
                return self.max_speed * t;
            }
            if self.current_speed < 0.0 && (self.value - self.min_value) < threshold {
                let t = ((self.value - self.min_value) / threshold).clamp(0.0, 1.0);
                return self.max_speed * t;
            }
        }
        self.max_speed
    }

    fn apply_motion(&mut self, step: f32) {
        let v = self.value + step;
        let range = self.range();
        if v < self.min_value || v > self.max_value {
            if !self.wrap {
                self.current_speed = 0.0;
            }
            self.value = range.clamp_value(v);
        } else {
            self.value = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::axis::input::{InputAxisMap, NoInput};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn input_moves_value_and_reports_movement() {
        let mut axis = AxisState::new(-180.0, 180.0, true, 300.0, "Mouse X");
        let input = InputAxisMap::new().with("Mouse X", 1.0);
        let moved = axis.update(DT, &input);
        assert!(moved);
        assert!(axis.value > 0.0);
    }

    #[test]
    fn no_input_reports_no_movement() {
        let mut axis = AxisState::new(-180.0, 180.0, true, 300.0, "Mouse X");
        assert!(!axis.update(DT, &NoInput));
        assert_eq!(axis.value, 0.0);
    }

    #[test]
    fn inverted_input_moves_the_other_way() {
        let mut axis =
            AxisState::new(-180.0, 180.0, true, 300.0, "Mouse Y").inverted();
        let input = InputAxisMap::new().with("Mouse Y", 1.0);
        assert!(axis.update(DT, &input));
        assert!(axis.value < 0.0);
    }

    #[test]
    fn speed_converges_to_target() {
        let mut axis = AxisState::new(-1000.0, 1000.0, false, 100.0, "x")
            .with_accel_decel(0.1, 0.1);
        let input = InputAxisMap::new().with("x", 1.0);
        for _ in 0..200 {
            let _ = axis.update(0.01, &input);
        }
        assert!((axis.current_speed() - 100.0).abs() < 1e-3);
        assert!(axis.current_speed() <= 100.0);
    }

    #[test]
    fn decelerates_to_rest_without_input() {
        let mut axis = AxisState::new(-1000.0, 1000.0, false, 100.0, "x")
            .with_accel_decel(0.1, 0.2);
        let mut input = InputAxisMap::new().with("x", 1.0);
        for _ in 0..20 {
            let _ = axis.update(0.01, &input);
        }
        input.zero_all();
        for _ in 0..200 {
            let _ = axis.update(0.01, &input);
        }
        assert!(axis.current_speed().abs() < 0.01);
        assert!(axis.current_speed() >= 0.0);
    }

    #[test]
    fn bounded_axis_stops_at_limit() {
        let mut axis = AxisState::new(-70.0, 70.0, false, 300.0, "y");
        let input = InputAxisMap::new().with("y", 1.0);
        for _ in 0..600 {
            let _ = axis.update(DT, &input);
        }
        assert!(axis.value <= 70.0);
        assert!(axis.value > 60.0);
    }

    #[test]
    fn wrapping_axis_wraps() {
        let mut axis = AxisState::new(-180.0, 180.0, true, 300.0, "").with_value(179.0);
        axis.input_axis_value = 1.0;
        for _ in 0..10 {
            let _ = axis.update(DT, &NoInput);
        }
        assert!(axis.value < 0.0, "expected wrap, got {}", axis.value);
        assert!(axis.value > -180.0);
    }

    #[test]
    fn direct_input_value_without_axis_name() {
        let mut axis = AxisState::new(-180.0, 180.0, true, 300.0, "");
        axis.input_axis_value = 0.5;
        assert!(axis.update(DT, &InputAxisMap::new().with("", 1.0)));
        assert!(axis.value > 0.0);
    }

    #[test]
    fn gain_mode_adds_scaled_input() {
        let mut axis = AxisState::new(-180.0, 180.0, true, 2.0, "x")
            .with_speed_mode(SpeedMode::InputValueGain)
            .with_accel_decel(0.0, 0.0);
        let input = InputAxisMap::new().with("x", 3.0);
        assert!(axis.update(DT, &input));
        assert!((axis.value - 6.0).abs() < 1e-3);
    }

    #[test]
    fn validate_raises_max_to_min() {
        let mut axis = AxisState::new(10.0, -10.0, false, -5.0, "");
        axis.accel_time = -1.0;
        axis.validate();
        assert_eq!(axis.max_value, 10.0);
        assert_eq!(axis.min_value, 10.0);
        assert_eq!(axis.max_speed, 0.0);
        assert_eq!(axis.accel_time, 0.0);
        assert_eq!(axis.value, 10.0);
    }

    #[test]
    fn reset_keeps_bounds() {
        let mut axis = AxisState::new(-70.0, 70.0, false, 300.0, "y").with_value(40.0);
        let input = InputAxisMap::new().with("y", 1.0);
        let _ = axis.update(DT, &input);
        axis.reset();
        assert_eq!(axis.value, 0.0);
        assert_eq!(axis.current_speed(), 0.0);
        assert_eq!(axis.input_axis_value, 0.0);
        assert_eq!((axis.min_value, axis.max_value), (-70.0, 70.0));
    }

    #[test]
    fn range_wraps_into_half_open_interval() {
        let r = AxisRange { min: -180.0, max: 180.0, wrap: true };
        assert_eq!(r.clamp_value(-180.0), -180.0);
        assert!((r.clamp_value(190.0) + 170.0).abs() < 1e-4);
        assert!((r.clamp_value(-190.0) - 170.0).abs() < 1e-4);
        assert_eq!(r.clamp_value(540.0), 180.0);
        let bounded = AxisRange { wrap: false, ..r };
        assert_eq!(bounded.clamp_value(190.0), 180.0);
    }

    proptest! {
        #[test]
        fn bounded_value_stays_in_range(
            min in -500.0_f32..0.0,
            width in 1.0_f32..500.0,
            speed in 0.0_f32..2000.0,
            gain_mode in any::<bool>(),
            steps in prop::collection::vec((-3.0_f32..3.0, 0.0_f32..0.2), 1..80),
        ) {
            let mode = if gain_mode { SpeedMode::InputValueGain } else { SpeedMode::MaxSpeed };
            let mut axis = AxisState::new(min, min + width, false, speed, "")
                .with_speed_mode(mode);
            for (input, dt) in steps {
                axis.input_axis_value = input;
                let _ = axis.update(dt, &NoInput);
                prop_assert!(axis.value >= axis.min_value && axis.value <= axis.max_value,
                    "value {} outside [{}, {}]", axis.value, axis.min_value, axis.max_value);
            }
        }

        #[test]
        fn wrapped_value_stays_in_half_open_range(
            start in -180.0_f32..180.0,
            speed in 10.0_f32..5000.0,
            steps in prop::collection::vec((-1.0_f32..1.0, 0.001_f32..0.5), 1..80),
        ) {
            let mut axis = AxisState::new(-180.0, 180.0, true, speed, "").with_value(start);
            for (input, dt) in steps {
                axis.input_axis_value = input;
                let _ = axis.update(dt, &NoInput);
                prop_assert!(axis.value >= -180.0 && axis.value <= 180.0,
                    "value {} escaped the wrap range", axis.value);
            }
        }
    }
}
