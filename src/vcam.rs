//! Virtual cameras: a pose, a lens and a three-stage pipeline.

use std::fmt;

use glam::{EulerRot, Quat, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::axis::AxisInputProvider;
use crate::camera::{CameraState, LensSettings};
use crate::error::CinemachineError;
use crate::options::VirtualCameraOptions;
use crate::pipeline::{
    BoxedComponent, CinemachineComponent, Stage, StageContext, TransitionEvent,
    TransitionParams,
};
use crate::tracking::{TransformId, TransformStore};

/// Whether a camera keeps updating while it is not live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StandbyUpdate {
    /// Only update while live.
    Never,
    /// Update every tick, live or not.
    #[default]
    Always,
}

/// Everything outside the camera that one evaluation reads.
#[derive(Clone, Copy)]
pub struct CameraEnv<'a> {
    /// Poses of targets and parents.
    pub transforms: &'a TransformStore,
    /// Named input axes for this tick.
    pub input: &'a dyn AxisInputProvider,
    /// Whether the camera is live (or part of a live blend).
    pub is_live: bool,
}

impl fmt::Debug for CameraEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraEnv")
            .field("transforms", &self.transforms.len())
            .field("is_live", &self.is_live)
            .finish_non_exhaustive()
    }
}

/// A procedural camera.
///
/// Holds its own pose, which the pipeline overwrites every update, plus at
/// most one component per [`Stage`].
#[derive(Debug)]
pub struct VirtualCamera {
    name: String,
    /// Higher priority wins the live slot.
    pub priority: i32,
    /// Disabled cameras never go live and never update.
    pub enabled: bool,
    /// Transform the Body stage follows.
    pub follow: Option<TransformId>,
    /// Transform the Aim stage looks at.
    pub look_at: Option<TransformId>,
    /// Transform the camera is parented to.
    pub parent: Option<TransformId>,
    /// Projection parameters.
    pub lens: LensSettings,
    /// Behavior when going live.
    pub transitions: TransitionParams,
    /// Whether to update while not live.
    pub standby_update: StandbyUpdate,
    /// World position; written back by every update.
    pub position: Vec3,
    /// World rotation; written back by every update.
    pub rotation: Quat,
    components: [Option<BoxedComponent>; 3],
    stage_enabled: [bool; 3],
    state: CameraState,
    previous_state_valid: bool,
}

impl VirtualCamera {
    /// A camera at the origin with no components.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: 10,
            enabled: true,
            follow: None,
            look_at: None,
            parent: None,
            lens: LensSettings::default(),
            transitions: TransitionParams::default(),
            standby_update: StandbyUpdate::default(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            components: [None, None, None],
            stage_enabled: [true; 3],
            state: CameraState::default(),
            previous_state_valid: false,
        }
    }

    /// Assemble a camera from options, resolving target names through
    /// `resolve`.
    pub fn from_options(
        options: VirtualCameraOptions,
        resolve: &dyn Fn(&str) -> Option<TransformId>,
    ) -> Result<Self, CinemachineError> {
        let lookup = |name: Option<&String>| -> Result<Option<TransformId>, CinemachineError> {
            name.map(|n| {
                resolve(n.as_str()).ok_or_else(|| CinemachineError::UnknownTarget(n.clone()))
            })
            .transpose()
        };
        let follow = lookup(options.follow.as_ref())?;
        let look_at = lookup(options.look_at.as_ref())?;
        let parent = lookup(options.parent.as_ref())?;

        let [pitch, yaw, roll] = options.rotation;
        let mut lens = options.lens;
        lens.validate();

        let mut cam = Self::new(options.name);
        cam.priority = options.priority;
        cam.enabled = options.enabled;
        cam.follow = follow;
        cam.look_at = look_at;
        cam.parent = parent;
        cam.lens = lens;
        cam.transitions = options.transitions;
        cam.standby_update = options.standby_update;
        cam.position = Vec3::from_array(options.position);
        cam.rotation = Quat::from_euler(
            EulerRot::YXZ,
            yaw.to_radians(),
            pitch.to_radians(),
            roll.to_radians(),
        );
        if let Some(body) = options.body {
            let _ = cam.set_component(body.into_component());
        }
        if let Some(aim) = options.aim {
            let _ = cam.set_component(aim.into_component());
        }
        if let Some(noise) = options.noise {
            let _ = cam.set_component(noise.into_component());
        }
        for stage in Stage::ALL {
            cam.set_stage_enabled(stage, options.stages.is_enabled(stage));
        }
        log::debug!(
            "assembled camera {:?} with stages [{}]",
            cam.name,
            cam.component_names().join(", ")
        );
        Ok(cam)
    }

    /// Builder: add a component.
    #[must_use]
    pub fn with_component(mut self, component: impl CinemachineComponent + 'static) -> Self {
        let _ = self.set_component(Box::new(component));
        self
    }

    /// Builder: set the follow target.
    #[must_use]
    pub fn with_follow(mut self, target: TransformId) -> Self {
        self.follow = Some(target);
        self
    }

    /// Builder: set the look-at target.
    #[must_use]
    pub fn with_look_at(mut self, target: TransformId) -> Self {
        self.look_at = Some(target);
        self
    }

    /// Builder: set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builder: set the transition behavior.
    #[must_use]
    pub fn with_transitions(mut self, transitions: TransitionParams) -> Self {
        self.transitions = transitions;
        self
    }

    /// Camera name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Put `component` in its stage's slot, returning the one it replaces.
    pub fn set_component(&mut self, component: BoxedComponent) -> Option<BoxedComponent> {
        let slot = component.stage().index();
        self.components[slot].replace(component)
    }

    /// Empty a stage's slot.
    pub fn remove_component(&mut self, stage: Stage) -> Option<BoxedComponent> {
        self.components[stage.index()].take()
    }

    /// Switch a stage on or off. A disabled stage keeps its component and
    /// that component's state, but is skipped by updates and transitions.
    pub fn set_stage_enabled(&mut self, stage: Stage, enabled: bool) {
        self.stage_enabled[stage.index()] = enabled;
    }

    /// Whether a stage takes part in updates.
    #[must_use]
    pub fn is_stage_enabled(&self, stage: Stage) -> bool {
        self.stage_enabled[stage.index()]
    }

    /// The component in a stage's slot.
    #[must_use]
    pub fn component(&self, stage: Stage) -> Option<&dyn CinemachineComponent> {
        self.components[stage.index()].as_deref()
    }

    /// First component of concrete type `T`.
    #[must_use]
    pub fn get<T: CinemachineComponent + 'static>(&self) -> Option<&T> {
        self.components
            .iter()
            .flatten()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    /// First component of concrete type `T`, mutably.
    pub fn get_mut<T: CinemachineComponent + 'static>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .flatten()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Names of the installed components in stage order.
    #[must_use]
    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().flatten().map(|c| c.name()).collect()
    }

    /// Result of the last update.
    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Whether the last state may be used as history for damping.
    #[must_use]
    pub fn previous_state_valid(&self) -> bool {
        self.previous_state_valid
    }

    /// Forget history: the next update snaps instead of damping.
    pub fn invalidate_state(&mut self) {
        self.previous_state_valid = false;
    }

    /// The transform whose motion decides this camera's update clock.
    #[must_use]
    pub fn update_target(&self) -> Option<TransformId> {
        self.follow.or(self.look_at)
    }

    fn active_components(&mut self) -> impl Iterator<Item = &mut BoxedComponent> {
        self.components
            .iter_mut()
            .zip(self.stage_enabled)
            .filter_map(|(slot, enabled)| slot.as_mut().filter(|_| enabled))
    }

    fn stage_context<'a>(&self, env: &CameraEnv<'a>) -> StageContext<'a> {
        let pose = |id: Option<TransformId>| id.and_then(|id| env.transforms.get(id).copied());
        StageContext {
            is_live: env.is_live,
            parent_rotation: pose(self.parent).map(|p| p.rotation),
            follow: pose(self.follow),
            look_at: pose(self.look_at),
            input: env.input,
        }
    }

    /// Run the pipeline and store the resulting state.
    ///
    /// Without a valid previous state the stages see `delta_time = -1`.
    pub fn update_camera_state(&mut self, world_up: Vec3, delta_time: f32, env: &CameraEnv<'_>) {
        let delta_time = if self.previous_state_valid {
            delta_time
        } else {
            -1.0
        };
        let ctx = self.stage_context(env);
        let mut state = CameraState {
            lens: self.lens,
            reference_up: world_up,
            reference_look_at: ctx.look_at.map(|p| p.position),
            raw_position: self.position,
            raw_orientation: self.rotation,
            ..CameraState::default()
        };
        for component in self.active_components() {
            if component.is_valid(&ctx) {
                component.mutate_camera_state(&mut state, &ctx, delta_time);
            }
        }
        state.blend_hint |= self.transitions.blend_hint();

        self.position = state.raw_position;
        self.rotation = state.raw_orientation;
        self.state = state;
        self.previous_state_valid = true;
    }

    /// Notification that this camera is going live, replacing `from`.
    ///
    /// Returns true when a component asked for (and got) an extra update.
    pub fn on_transition_from_camera(
        &mut self,
        from: Option<&CameraState>,
        world_up: Vec3,
        delta_time: f32,
        env: &CameraEnv<'_>,
    ) -> bool {
        let params = self.transitions;
        if let Some(source) = from.filter(|_| params.inherit_position) {
            self.position = source.raw_position;
            self.rotation = source.raw_orientation;
            self.previous_state_valid = false;
        }

        let ctx = self.stage_context(env);
        let event = TransitionEvent {
            from,
            world_up,
            reference_up: self.state.reference_up,
            delta_time,
            params: &params,
        };
        let mut force_update = false;
        for component in self.active_components() {
            if component.is_valid(&ctx) && component.on_transition_from_camera(&event, &ctx) {
                force_update = true;
            }
        }

        self.update_camera_state(world_up, delta_time, env);
        if force_update {
            // Settle on the new history without advancing time twice.
            self.update_camera_state(world_up, 0.0, env);
        }
        log::debug!("camera {:?} went live (forced update: {force_update})", self.name);
        force_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{InputAxisMap, NoInput};
    use crate::options::{AimOptions, BodyOptions, StageToggles};
    use crate::pipeline::{BindingMode, HardLockToTarget, HardLookAt, Pov, Transposer};
    use crate::tracking::Pose;

    fn env(transforms: &TransformStore) -> CameraEnv<'_> {
        CameraEnv {
            transforms,
            input: &NoInput,
            is_live: true,
        }
    }

    #[test]
    fn pipeline_runs_body_then_aim() {
        let mut transforms = TransformStore::new();
        let target = transforms.create(Pose::from_position(Vec3::new(0.0, 0.0, 10.0)));
        let mut cam = VirtualCamera::new("cam")
            .with_follow(target)
            .with_look_at(target)
            .with_component(HardLookAt)
            .with_component(Transposer::new(BindingMode::WorldSpace, Vec3::new(0.0, 0.0, -10.0)));
        cam.update_camera_state(Vec3::Y, 0.016, &env(&transforms));
        let state = cam.state();
        assert!(state.raw_position.length() < 1e-5);
        assert!((state.forward() - Vec3::Z).length() < 1e-5);
        assert_eq!(cam.position, state.raw_position);
        assert!(cam.previous_state_valid());
    }

    #[test]
    fn first_update_snaps() {
        let mut transforms = TransformStore::new();
        let target = transforms.create(Pose::from_position(Vec3::X * 5.0));
        let mut cam = VirtualCamera::new("cam")
            .with_follow(target)
            .with_component(HardLockToTarget::new(10.0));
        cam.update_camera_state(Vec3::Y, 0.016, &env(&transforms));
        assert_eq!(cam.state().raw_position, Vec3::X * 5.0);
    }

    #[test]
    fn invalid_components_are_skipped() {
        let transforms = TransformStore::new();
        let mut cam = VirtualCamera::new("cam").with_component(HardLockToTarget::default());
        cam.position = Vec3::new(1.0, 2.0, 3.0);
        cam.update_camera_state(Vec3::Y, 0.016, &env(&transforms));
        assert_eq!(cam.state().raw_position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn set_component_replaces_same_stage() {
        let mut cam = VirtualCamera::new("cam").with_component(HardLookAt);
        let old = cam.set_component(Box::new(Pov::default()));
        assert_eq!(old.map(|c| c.name()), Some("hard_look_at"));
        assert!(cam.get::<Pov>().is_some());
        assert_eq!(cam.component_names(), vec!["pov"]);
        assert!(cam.remove_component(Stage::Aim).is_some());
        assert!(cam.component(Stage::Aim).is_none());
    }

    #[test]
    fn inherit_position_copies_source_pose() {
        let transforms = TransformStore::new();
        let mut cam = VirtualCamera::new("cam").with_transitions(TransitionParams {
            inherit_position: true,
            ..TransitionParams::default()
        });
        let source = CameraState {
            raw_position: Vec3::new(3.0, 4.0, 5.0),
            raw_orientation: Quat::from_rotation_y(0.5),
            ..CameraState::default()
        };
        let forced =
            cam.on_transition_from_camera(Some(&source), Vec3::Y, 0.016, &env(&transforms));
        assert!(!forced);
        assert_eq!(cam.state().raw_position, source.raw_position);
        assert!(cam.state().raw_orientation.abs_diff_eq(source.raw_orientation, 1e-6));
    }

    #[test]
    fn pov_transition_forces_update() {
        let transforms = TransformStore::new();
        let mut cam = VirtualCamera::new("cam")
            .with_component(Pov::default())
            .with_transitions(TransitionParams {
                inherit_position: true,
                ..TransitionParams::default()
            });
        let source = CameraState {
            raw_orientation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..CameraState::default()
        };
        let forced =
            cam.on_transition_from_camera(Some(&source), Vec3::Y, 0.016, &env(&transforms));
        assert!(forced);
        let pov = cam.get::<Pov>().map(|p| p.horizontal_axis.value);
        assert!((pov.unwrap_or_default() - 90.0).abs() < 1e-3);
        assert!((cam.state().forward() - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn disabled_stage_is_inert_and_keeps_its_state() {
        let transforms = TransformStore::new();
        let input = InputAxisMap::new().with("Mouse X", 1.0);
        let env = CameraEnv {
            transforms: &transforms,
            input: &input,
            is_live: true,
        };
        let mut pov = Pov::default();
        pov.horizontal_axis.value = 30.0;
        let mut cam = VirtualCamera::new("cam").with_component(pov);
        cam.rotation = Quat::from_rotation_y(-0.25);

        cam.set_stage_enabled(Stage::Aim, false);
        assert!(!cam.is_stage_enabled(Stage::Aim));
        for _ in 0..5 {
            cam.update_camera_state(Vec3::Y, 0.016, &env);
        }
        let rotation = Quat::from_rotation_y(-0.25);
        assert!(cam.state().raw_orientation.abs_diff_eq(rotation, 1e-6));
        assert_eq!(cam.get::<Pov>().map(|p| p.horizontal_axis.value), Some(30.0));

        let params = TransitionParams {
            inherit_position: true,
            ..TransitionParams::default()
        };
        cam.transitions = params;
        let source = CameraState {
            raw_orientation: Quat::from_rotation_y(1.0),
            ..CameraState::default()
        };
        assert!(!cam.on_transition_from_camera(Some(&source), Vec3::Y, 0.016, &env));
        assert_eq!(cam.get::<Pov>().map(|p| p.horizontal_axis.value), Some(30.0));

        cam.set_stage_enabled(Stage::Aim, true);
        cam.update_camera_state(Vec3::Y, 0.016, &env);
        let pan = cam.get::<Pov>().map_or(0.0, |p| p.horizontal_axis.value);
        assert!(pan > 30.0, "resumed from the kept value: {pan}");
        assert!(pan < 35.0, "{pan}");
    }

    #[test]
    fn from_options_resolves_targets() {
        let mut transforms = TransformStore::new();
        let player = transforms.create(Pose::IDENTITY);
        let options = VirtualCameraOptions {
            name: "follow".to_owned(),
            follow: Some("player".to_owned()),
            body: Some(BodyOptions::Transposer(Transposer::default())),
            aim: Some(AimOptions::HardLookAt),
            stages: StageToggles {
                noise: false,
                ..StageToggles::default()
            },
            ..VirtualCameraOptions::default()
        };
        let resolve = |name: &str| (name == "player").then_some(player);
        let cam = VirtualCamera::from_options(options, &resolve).unwrap();
        assert_eq!(cam.follow, Some(player));
        assert!(cam.is_stage_enabled(Stage::Aim));
        assert!(!cam.is_stage_enabled(Stage::Noise));
        assert_eq!(cam.component_names(), vec!["transposer", "hard_look_at"]);

        let bad = VirtualCameraOptions {
            look_at: Some("ghost".to_owned()),
            ..VirtualCameraOptions::default()
        };
        let err = VirtualCamera::from_options(bad, &resolve).unwrap_err();
        assert!(matches!(err, CinemachineError::UnknownTarget(name) if name == "ghost"));
    }
}
