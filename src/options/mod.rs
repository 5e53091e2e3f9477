//! Rig configuration with TOML preset support.
//!
//! A rig is the brain settings plus a list of virtual cameras. Options
//! serialize to/from TOML so rigs can be stored as presets in `presets/`.

pub mod brain;
pub mod camera;

use std::path::Path;

pub use brain::{BrainOptions, CustomBlend, UpdateMethod, ANY_CAMERA};
pub use camera::{AimOptions, BodyOptions, NoiseOptions, StageToggles, VirtualCameraOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CinemachineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[brain]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Brain settings.
    pub brain: BrainOptions,
    /// Virtual cameras, one `[[cameras]]` table each.
    pub cameras: Vec<VirtualCameraOptions>,
}

impl Options {
    /// Generate JSON Schema describing the rig options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, CinemachineError> {
        toml::from_str(content).map_err(|e| CinemachineError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CinemachineError> {
        let content = std::fs::read_to_string(path).map_err(CinemachineError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CinemachineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CinemachineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CinemachineError::Io)?;
        }
        std::fs::write(path, content).map_err(CinemachineError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Every target name the cameras refer to, deduplicated, in first-use
    /// order.
    #[must_use]
    pub fn target_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for cam in &self.cameras {
            for name in [&cam.follow, &cam.look_at, &cam.parent].into_iter().flatten() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::BlendStyle;

    const RIG: &str = r#"
[brain]
update_method = "late_update"

[brain.default_blend]
style = "linear"
time = 0.5

[[brain.custom_blends]]
from = "*"
to = "closeup"
blend = { style = "cut", time = 0.0 }

[[cameras]]
name = "wide"
priority = 10
look_at = "player"
position = [0.0, 5.0, -20.0]
aim = { type = "hard_look_at" }

[[cameras]]
name = "closeup"
priority = 5
follow = "player"
look_at = "player"
body = { type = "transposer", follow_offset = [0.0, 1.5, -3.0] }
aim = { type = "hard_look_at" }
"#;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn rig_round_trips_through_toml() {
        let opts = Options::from_toml(RIG).unwrap();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        assert_eq!(Options::from_toml(&toml_str).unwrap(), opts);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let opts = Options::from_toml(RIG).unwrap();
        assert_eq!(opts.brain.update_method, UpdateMethod::LateUpdate);
        assert_eq!(opts.brain.default_blend.style, BlendStyle::Linear);
        assert_eq!(opts.brain.world_up, [0.0, 1.0, 0.0]);
        assert_eq!(opts.cameras.len(), 2);
        assert_eq!(opts.cameras[1].lens.field_of_view, 40.0);
        assert!(opts.cameras[0].enabled);
        assert!(opts.brain.blend_for(Some("wide"), "closeup").is_cut());
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = Options::from_toml("[brain]\nupdate_method = \"sometimes\"").unwrap_err();
        assert!(matches!(err, CinemachineError::OptionsParse(_)));
    }

    #[test]
    fn target_names_are_deduplicated() {
        let opts = Options::from_toml(RIG).unwrap();
        assert_eq!(opts.target_names(), vec!["player".to_owned()]);
    }

    #[test]
    fn save_load_and_list() {
        let dir = std::env::temp_dir().join(format!("cinemachine-presets-{}", std::process::id()));
        let opts = Options::from_toml(RIG).unwrap();
        opts.save(&dir.join("chase.toml")).unwrap();
        opts.save(&dir.join("arena.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["arena", "chase"]);
        assert_eq!(Options::load(&dir.join("chase.toml")).unwrap(), opts);
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(CinemachineError::Io(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bundled_demo_preset_parses() {
        let opts = Options::from_toml(include_str!("../../presets/demo.toml")).unwrap();
        let names: Vec<&str> = opts.cameras.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["overview", "orbit", "first_person"]);
        assert!(matches!(opts.cameras[1].noise, Some(NoiseOptions::BasicMultiChannelPerlin(_))));
        let Some(AimOptions::Pov(pov)) = &opts.cameras[1].aim else {
            panic!("orbit camera should aim with pov");
        };
        assert!(pov.horizontal_recentering.enabled);
        assert_eq!(pov.horizontal_axis.input_axis_name, "Mouse X");
        assert!(opts.brain.blend_for(Some("orbit"), "first_person").is_cut());
        assert_eq!(opts.target_names(), vec!["player".to_owned()]);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value = serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("brain"));
        assert!(props.contains_key("cameras"));

        // Custom blends are not exposed for editing.
        let brain = &props["brain"]["properties"];
        assert!(brain.get("update_method").is_some());
        assert!(brain.get("custom_blends").is_none());
    }
}
