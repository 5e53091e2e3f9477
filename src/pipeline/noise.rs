//! Procedural camera shake.
//!
//! Noise never touches the raw pose. It writes the position and orientation
//! corrections, so the shake does not feed back into damping or into the
//! next frame's Body and Aim.

use std::any::Any;
use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CinemachineComponent, Stage, StageContext};
use crate::camera::CameraState;

/// Range of the random per-axis time offsets.
const OFFSET_RANGE: f32 = 1000.0;

/// One noise layer on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NoiseParams {
    /// Cycles per second.
    #[schemars(range(min = 0.0))]
    pub frequency: f32,
    /// Peak deflection (world units for position, degrees for rotation).
    pub amplitude: f32,
    /// Smooth cosine wave instead of Perlin noise.
    pub constant: bool,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            frequency: 0.5,
            amplitude: 0.0,
            constant: false,
        }
    }
}

impl NoiseParams {
    /// Signal value at `time` with the axis' random `offset`.
    #[must_use]
    pub fn value(&self, time: f32, offset: f32) -> f32 {
        let t = self.frequency * time + offset;
        if self.constant {
            (t * TAU).cos() * self.amplitude * 0.5
        } else {
            perlin(t) * self.amplitude
        }
    }
}

/// Layered noise for each of three axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NoiseChannels {
    /// Layers summed on X.
    pub x: Vec<NoiseParams>,
    /// Layers summed on Y.
    pub y: Vec<NoiseParams>,
    /// Layers summed on Z.
    pub z: Vec<NoiseParams>,
}

impl NoiseChannels {
    /// Sum of every layer on each axis.
    #[must_use]
    pub fn combined(&self, time: f32, offsets: Vec3) -> Vec3 {
        let sum = |layers: &[NoiseParams], offset: f32| -> f32 {
            layers.iter().map(|p| p.value(time, offset)).sum()
        };
        Vec3::new(
            sum(&self.x, offsets.x),
            sum(&self.y, offsets.y),
            sum(&self.z, offsets.z),
        )
    }

    /// Whether no layer is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }
}

/// Position and rotation noise definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NoiseProfile {
    /// Position shake in camera-local axes.
    pub position: NoiseChannels,
    /// Rotation shake in degrees: pitch (X), yaw (Y), roll (Z).
    pub orientation: NoiseChannels,
}

impl NoiseProfile {
    /// A gentle handheld-camera wobble.
    #[must_use]
    pub fn handheld() -> Self {
        let layer = |frequency, amplitude| NoiseParams {
            frequency,
            amplitude,
            constant: false,
        };
        Self {
            position: NoiseChannels::default(),
            orientation: NoiseChannels {
                x: vec![layer(0.6, 0.8), layer(2.1, 0.2)],
                y: vec![layer(0.5, 1.0), layer(1.9, 0.25)],
                z: vec![layer(0.4, 0.3)],
            },
        }
    }
}

/// Multi-channel Perlin shake with global amplitude and frequency gains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BasicMultiChannelPerlin {
    /// Noise definition.
    pub profile: NoiseProfile,
    /// Multiplier on every amplitude.
    pub amplitude_gain: f32,
    /// Multiplier on the passage of noise time.
    pub frequency_gain: f32,
    /// Seed for the per-axis time offsets; random when unset.
    pub seed: Option<u64>,
    #[serde(skip)]
    #[schemars(skip)]
    noise_time: f32,
    #[serde(skip)]
    #[schemars(skip)]
    noise_offsets: Option<Vec3>,
}

impl Default for BasicMultiChannelPerlin {
    fn default() -> Self {
        Self {
            profile: NoiseProfile::default(),
            amplitude_gain: 1.0,
            frequency_gain: 1.0,
            seed: None,
            noise_time: 0.0,
            noise_offsets: None,
        }
    }
}

impl BasicMultiChannelPerlin {
    /// Noise with the given profile and unit gains.
    #[must_use]
    pub fn new(profile: NoiseProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Builder: deterministic offsets.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the per-axis time offsets.
    pub fn set_noise_offsets(&mut self, offsets: Vec3) {
        self.noise_offsets = Some(offsets);
    }

    /// Current per-axis time offsets, if initialized.
    #[must_use]
    pub fn noise_offsets(&self) -> Option<Vec3> {
        self.noise_offsets
    }

    /// Seconds of noise time elapsed.
    #[must_use]
    pub fn noise_time(&self) -> f32 {
        self.noise_time
    }

    /// Forget offsets and restart noise time.
    pub fn reset(&mut self) {
        self.noise_time = 0.0;
        self.noise_offsets = None;
    }

    fn offsets(&mut self) -> Vec3 {
        if let Some(offsets) = self.noise_offsets {
            return offsets;
        }
        let offsets = match self.seed {
            Some(seed) => random_offsets(&mut StdRng::seed_from_u64(seed)),
            None => random_offsets(&mut rand::rng()),
        };
        log::trace!("noise offsets initialized to {offsets}");
        self.noise_offsets = Some(offsets);
        offsets
    }
}

fn random_offsets<R: Rng>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
        rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
        rng.random_range(-OFFSET_RANGE..OFFSET_RANGE),
    )
}

impl CinemachineComponent for BasicMultiChannelPerlin {
    fn stage(&self) -> Stage {
        Stage::Noise
    }

    fn is_valid(&self, _ctx: &StageContext<'_>) -> bool {
        !(self.profile.position.is_empty() && self.profile.orientation.is_empty())
    }

    fn mutate_camera_state(
        &mut self,
        state: &mut CameraState,
        ctx: &StageContext<'_>,
        delta_time: f32,
    ) {
        if !self.is_valid(ctx) || delta_time < 0.0 {
            self.reset();
            return;
        }
        let offsets = self.offsets();
        self.noise_time += delta_time * self.frequency_gain;

        let gain = self.amplitude_gain;
        let position = self.profile.position.combined(self.noise_time, offsets) * gain;
        state.position_correction += state.corrected_orientation() * position;

        let degrees = self.profile.orientation.combined(self.noise_time, offsets) * gain;
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            degrees.y.to_radians(),
            degrees.x.to_radians(),
            degrees.z.to_radians(),
        );
        state.orientation_correction *= rotation;
    }

    fn name(&self) -> &'static str {
        "basic_multi_channel_perlin"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Gradient of the integer lattice point `i`, in `[-1, 1]`.
fn gradient(i: i32) -> f32 {
    let mut h = i as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    f32::from(h as u16) / 32_767.5 - 1.0
}

/// One-dimensional gradient noise, roughly in `[-0.5, 0.5]`, zero at
/// integers.
fn perlin(x: f32) -> f32 {
    let x0 = x.floor();
    let f = x - x0;
    let i = x0 as i32;
    let a = gradient(i) * f;
    let b = gradient(i.wrapping_add(1)) * (f - 1.0);
    let u = f * f * f * (f * (f * 6.0 - 15.0) + 10.0);
    a + (b - a) * u
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::ctx_with_targets;
    use crate::pipeline::HardLookAt;
    use crate::tracking::Pose;

    fn steady_x(amplitude: f32) -> NoiseProfile {
        NoiseProfile {
            position: NoiseChannels {
                x: vec![NoiseParams {
                    frequency: 0.0,
                    amplitude,
                    constant: true,
                }],
                ..NoiseChannels::default()
            },
            ..NoiseProfile::default()
        }
    }

    #[test]
    fn perlin_is_bounded_and_continuous() {
        let mut prev = perlin(0.0);
        assert_eq!(prev, 0.0);
        for i in 1..2000 {
            let v = perlin(i as f32 * 0.01 - 7.3);
            assert!(v.abs() <= 0.5 + 1e-4, "{v}");
            assert!((v - prev).abs() < 0.05);
            prev = v;
        }
    }

    #[test]
    fn constant_channel_is_a_cosine() {
        let p = NoiseParams {
            frequency: 1.0,
            amplitude: 2.0,
            constant: true,
        };
        assert!((p.value(0.0, 0.0) - 1.0).abs() < 1e-6);
        assert!((p.value(0.5, 0.0) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn writes_corrections_only() {
        let mut noise = BasicMultiChannelPerlin::new(NoiseProfile::handheld()).with_seed(7);
        let mut state = CameraState::default();
        let ctx = ctx_with_targets(None, None);
        for _ in 0..30 {
            noise.mutate_camera_state(&mut state, &ctx, 0.033);
        }
        assert_eq!(state.raw_orientation, Quat::IDENTITY);
        assert_eq!(state.raw_position, Vec3::ZERO);
        assert!(state.orientation_correction.angle_between(Quat::IDENTITY) > 0.0);
    }

    #[test]
    fn seeded_offsets_repeat() {
        let mut a = BasicMultiChannelPerlin::new(NoiseProfile::handheld()).with_seed(42);
        let mut b = a.clone();
        let ctx = ctx_with_targets(None, None);
        let mut sa = CameraState::default();
        let mut sb = CameraState::default();
        a.mutate_camera_state(&mut sa, &ctx, 0.1);
        b.mutate_camera_state(&mut sb, &ctx, 0.1);
        assert_eq!(a.noise_offsets(), b.noise_offsets());
        let offsets = a.noise_offsets().unwrap_or_default();
        assert!(offsets.abs().max_element() <= OFFSET_RANGE);
        assert_eq!(sa, sb);
    }

    #[test]
    fn negative_delta_resets() {
        let mut noise = BasicMultiChannelPerlin::new(NoiseProfile::handheld()).with_seed(1);
        let ctx = ctx_with_targets(None, None);
        let mut state = CameraState::default();
        noise.mutate_camera_state(&mut state, &ctx, 0.1);
        assert!(noise.noise_time() > 0.0);
        let before = state;
        noise.mutate_camera_state(&mut state, &ctx, -1.0);
        assert_eq!(noise.noise_time(), 0.0);
        assert!(noise.noise_offsets().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn empty_profile_is_invalid() {
        let noise = BasicMultiChannelPerlin::default();
        assert!(!noise.is_valid(&ctx_with_targets(None, None)));
    }

    #[test]
    fn gains_scale_output() {
        let mut noise = BasicMultiChannelPerlin::new(steady_x(2.0));
        noise.amplitude_gain = 3.0;
        noise.set_noise_offsets(Vec3::ZERO);
        let mut state = CameraState::default();
        noise.mutate_camera_state(&mut state, &ctx_with_targets(None, None), 0.1);
        assert!((state.position_correction - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn aim_and_noise_do_not_commute() {
        let target = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
        let ctx = ctx_with_targets(None, Some(target));

        let run = |noise_first: bool| {
            let mut aim = HardLookAt;
            let mut noise = BasicMultiChannelPerlin::new(steady_x(2.0));
            noise.set_noise_offsets(Vec3::ZERO);
            let mut state = CameraState::default();
            if noise_first {
                noise.mutate_camera_state(&mut state, &ctx, 0.1);
                aim.mutate_camera_state(&mut state, &ctx, 0.1);
            } else {
                aim.mutate_camera_state(&mut state, &ctx, 0.1);
                noise.mutate_camera_state(&mut state, &ctx, 0.1);
            }
            state
        };

        let aim_then_noise = run(false);
        let noise_then_aim = run(true);
        // Aim first: the shake is applied along the aimed camera's right.
        assert!((aim_then_noise.position_correction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        // Noise first: the shake is along world X, then Aim compensates.
        assert!((noise_then_aim.position_correction - Vec3::X).length() < 1e-4);
        assert!((aim_then_noise.final_position() - noise_then_aim.final_position()).length() > 1.0);
    }
}
