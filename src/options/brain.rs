//! Brain settings and custom blend lookup.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::BlendDefinition;

/// Wildcard camera name in [`CustomBlend`] entries.
pub const ANY_CAMERA: &str = "*";

/// Which clock drives camera updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMethod {
    /// Everything runs on fixed ticks.
    FixedUpdate,
    /// Everything runs on normal (per-frame) ticks.
    LateUpdate,
    /// Each camera runs on the clock its target moves on.
    #[default]
    SmartUpdate,
}

/// Blend override for a specific pair of cameras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CustomBlend {
    /// Outgoing camera name, or `*`.
    pub from: String,
    /// Incoming camera name, or `*`.
    pub to: String,
    /// Blend to use.
    pub blend: BlendDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Brain", inline)]
#[serde(default)]
/// Settings for the camera brain.
pub struct BrainOptions {
    /// Default world up direction.
    #[schemars(title = "World Up")]
    pub world_up: [f32; 3],
    /// Which clock drives camera updates.
    #[schemars(title = "Update Method")]
    pub update_method: UpdateMethod,
    /// Blend used when no custom blend matches.
    #[schemars(title = "Default Blend")]
    pub default_blend: BlendDefinition,
    /// Per-pair blend overrides.
    #[schemars(skip)]
    pub custom_blends: Vec<CustomBlend>,
}

impl Default for BrainOptions {
    fn default() -> Self {
        Self {
            world_up: [0.0, 1.0, 0.0],
            update_method: UpdateMethod::SmartUpdate,
            default_blend: BlendDefinition::default(),
            custom_blends: Vec::new(),
        }
    }
}

impl BrainOptions {
    /// World up as a unit vector; `+Y` if the setting is degenerate.
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        Vec3::from_array(self.world_up).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Blend for a transition from `from` (if any) to `to`.
    ///
    /// Lookup order: an exact pair, then `* -> to`, then `from -> *`, then
    /// `* -> *`, then the default.
    #[must_use]
    pub fn blend_for(&self, from: Option<&str>, to: &str) -> BlendDefinition {
        let mut any_to_me = None;
        let mut me_to_any = None;
        let mut any_to_any = None;
        for entry in &self.custom_blends {
            let from_matches = from == Some(entry.from.as_str());
            if from_matches && entry.to == to {
                return entry.blend;
            }
            if entry.from == ANY_CAMERA {
                if entry.to == to {
                    any_to_me = any_to_me.or(Some(entry.blend));
                } else if entry.to == ANY_CAMERA {
                    any_to_any = any_to_any.or(Some(entry.blend));
                }
            } else if from_matches && entry.to == ANY_CAMERA {
                me_to_any = me_to_any.or(Some(entry.blend));
            }
        }
        any_to_me
            .or(me_to_any)
            .or(any_to_any)
            .unwrap_or(self.default_blend)
    }
}
