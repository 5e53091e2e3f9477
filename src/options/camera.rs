//! Virtual camera presets and the per-stage component selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::LensSettings;
use crate::pipeline::{
    BasicMultiChannelPerlin, BoxedComponent, HardLockToTarget, HardLookAt, Pov,
    SameAsFollowTarget, Stage, TransitionParams, Transposer,
};
use crate::vcam::StandbyUpdate;

/// Body stage selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyOptions {
    /// Sit on the follow target.
    HardLockToTarget(HardLockToTarget),
    /// Keep an offset from the follow target.
    Transposer(Transposer),
}

impl BodyOptions {
    /// Build the component.
    #[must_use]
    pub fn into_component(self) -> BoxedComponent {
        match self {
            Self::HardLockToTarget(c) => Box::new(c),
            Self::Transposer(mut c) => {
                c.validate();
                Box::new(c)
            }
        }
    }
}

/// Aim stage selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AimOptions {
    /// Look straight at the look-at target.
    HardLookAt,
    /// Copy the follow target's rotation.
    SameAsFollowTarget(SameAsFollowTarget),
    /// Player-controlled pan and tilt.
    Pov(Pov),
}

impl AimOptions {
    /// Build the component.
    #[must_use]
    pub fn into_component(self) -> BoxedComponent {
        match self {
            Self::HardLookAt => Box::new(HardLookAt),
            Self::SameAsFollowTarget(c) => Box::new(c),
            Self::Pov(mut c) => {
                c.validate();
                Box::new(c)
            }
        }
    }
}

/// Noise stage selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoiseOptions {
    /// Multi-channel Perlin shake.
    BasicMultiChannelPerlin(BasicMultiChannelPerlin),
}

impl NoiseOptions {
    /// Build the component.
    #[must_use]
    pub fn into_component(self) -> BoxedComponent {
        match self {
            Self::BasicMultiChannelPerlin(c) => Box::new(c),
        }
    }
}

/// Per-stage switches. A switched-off stage keeps its settings but does
/// not run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(default)]
pub struct StageToggles {
    /// Run the Body stage.
    pub body: bool,
    /// Run the Aim stage.
    pub aim: bool,
    /// Run the Noise stage.
    pub noise: bool,
}

impl Default for StageToggles {
    fn default() -> Self {
        Self {
            body: true,
            aim: true,
            noise: true,
        }
    }
}

impl StageToggles {
    /// Switch for `stage`.
    #[must_use]
    pub const fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Body => self.body,
            Stage::Aim => self.aim,
            Stage::Noise => self.noise,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Virtual Camera")]
#[serde(default)]
/// Declarative description of one virtual camera.
///
/// Targets are referred to by name and resolved by the host when the rig
/// is assembled.
pub struct VirtualCameraOptions {
    /// Unique camera name, used by custom blends and events.
    pub name: String,
    /// Higher priority wins the live slot.
    pub priority: i32,
    /// Disabled cameras never go live.
    pub enabled: bool,
    /// Name of the transform the Body stage follows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow: Option<String>,
    /// Name of the transform the Aim stage looks at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub look_at: Option<String>,
    /// Name of the transform the camera is parented to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Initial world position.
    pub position: [f32; 3],
    /// Initial rotation as Euler degrees (pitch, yaw, roll).
    pub rotation: [f32; 3],
    /// Projection parameters.
    pub lens: LensSettings,
    /// Behavior when going live.
    pub transitions: TransitionParams,
    /// Whether the camera updates while not live.
    pub standby_update: StandbyUpdate,
    /// Body stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyOptions>,
    /// Aim stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aim: Option<AimOptions>,
    /// Noise stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseOptions>,
    /// Which stages run.
    pub stages: StageToggles,
}

impl Default for VirtualCameraOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            priority: 10,
            enabled: true,
            follow: None,
            look_at: None,
            parent: None,
            position: [0.0; 3],
            rotation: [0.0; 3],
            lens: LensSettings::default(),
            transitions: TransitionParams::default(),
            standby_update: StandbyUpdate::default(),
            body: None,
            aim: None,
            noise: None,
            stages: StageToggles::default(),
        }
    }
}
