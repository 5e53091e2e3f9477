//! The camera brain: picks the live camera, drives updates on the right
//! clock, and blends between cameras.
//!
//! The host owns a [`TransformStore`] and an input source. Each frame it
//! turns its frame delta into [`FrameTick`]s (see
//! [`FrameClock`](crate::util::frame_timing::FrameClock)) and hands every
//! tick to [`CinemachineBrain::tick`], then reads
//! [`output`](CinemachineBrain::output) and drains events.

use glam::Vec3;

use crate::axis::AxisInputProvider;
use crate::camera::{CameraBlend, CameraState};
use crate::error::CinemachineError;
use crate::options::{BrainOptions, Options, UpdateMethod};
use crate::tracking::{TransformId, TransformStore, UpdateClock, UpdateTracker};
use crate::util::frame_timing::FrameTick;
use crate::vcam::{CameraEnv, StandbyUpdate, VirtualCamera};

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrainEvent {
    /// A camera became the live camera.
    CameraActivated {
        /// The new live camera.
        incoming: String,
        /// The previous live camera, if any.
        outgoing: Option<String>,
    },
    /// The output jumped without blending.
    CameraCut {
        /// The camera cut to.
        camera: String,
    },
}

#[derive(Debug)]
struct CameraSlot {
    camera: VirtualCamera,
    activated_at: u64,
    /// Tick of the last pipeline run, as `(clock, frame, time)`.
    updated_on: Option<(UpdateClock, u64, f64)>,
}

fn tick_stamp(tick: FrameTick) -> (UpdateClock, u64, f64) {
    (tick.clock, tick.frame, tick.time)
}

/// Owns the virtual cameras and produces the final camera state.
#[derive(Debug)]
pub struct CinemachineBrain {
    options: BrainOptions,
    cameras: Vec<CameraSlot>,
    active: Option<String>,
    blend: Option<CameraBlend>,
    output: CameraState,
    tracker: UpdateTracker,
    events: Vec<BrainEvent>,
    activation_counter: u64,
}

impl Default for CinemachineBrain {
    fn default() -> Self {
        Self::new(BrainOptions::default())
    }
}

impl CinemachineBrain {
    /// A brain with no cameras.
    #[must_use]
    pub fn new(options: BrainOptions) -> Self {
        Self {
            options,
            cameras: Vec::new(),
            active: None,
            blend: None,
            output: CameraState::default(),
            tracker: UpdateTracker::new(),
            events: Vec::new(),
            activation_counter: 0,
        }
    }

    /// Build a brain and its cameras from options, resolving target names
    /// through `resolve`.
    pub fn from_options(
        options: Options,
        resolve: &dyn Fn(&str) -> Option<TransformId>,
    ) -> Result<Self, CinemachineError> {
        let mut brain = Self::new(options.brain);
        for cam in options.cameras {
            brain.add_camera(VirtualCamera::from_options(cam, resolve)?)?;
        }
        log::debug!("brain ready with {} camera(s)", brain.cameras.len());
        Ok(brain)
    }

    /// Brain settings.
    #[must_use]
    pub fn options(&self) -> &BrainOptions {
        &self.options
    }

    /// Brain settings, mutably. Takes effect on the next tick.
    pub fn options_mut(&mut self) -> &mut BrainOptions {
        &mut self.options
    }

    /// Register a camera. Names must be unique.
    pub fn add_camera(&mut self, camera: VirtualCamera) -> Result<(), CinemachineError> {
        if self.index_of(camera.name()).is_some() {
            return Err(CinemachineError::DuplicateCamera(camera.name().to_owned()));
        }
        log::debug!("adding camera {:?} (priority {})", camera.name(), camera.priority);
        let activated_at = self.next_activation();
        self.cameras.push(CameraSlot {
            camera,
            activated_at,
            updated_on: None,
        });
        Ok(())
    }

    /// Unregister a camera. A blend away from it freezes at its last state.
    pub fn remove_camera(&mut self, name: &str) -> Option<VirtualCamera> {
        let index = self.index_of(name)?;
        let slot = self.cameras.remove(index);
        if let Some(blend) = &mut self.blend {
            if blend.from_camera.as_deref() == Some(name) {
                blend.from_camera = None;
            }
        }
        log::debug!("removed camera {name:?}");
        Some(slot.camera)
    }

    /// Look up a camera by name.
    #[must_use]
    pub fn camera(&self, name: &str) -> Option<&VirtualCamera> {
        self.index_of(name).map(|i| &self.cameras[i].camera)
    }

    /// Look up a camera by name, mutably.
    pub fn camera_mut(&mut self, name: &str) -> Option<&mut VirtualCamera> {
        let index = self.index_of(name)?;
        Some(&mut self.cameras[index].camera)
    }

    /// All cameras in registration order.
    pub fn cameras(&self) -> impl Iterator<Item = &VirtualCamera> {
        self.cameras.iter().map(|slot| &slot.camera)
    }

    /// Change a camera's priority. Returns false for an unknown camera.
    pub fn set_priority(&mut self, name: &str, priority: i32) -> bool {
        self.camera_mut(name).map(|cam| cam.priority = priority).is_some()
    }

    /// Enable or disable a camera. Enabling counts as a fresh activation
    /// for tie-breaking among equal priorities.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        let stamp = self.next_activation();
        let slot = &mut self.cameras[index];
        if enabled && !slot.camera.enabled {
            slot.activated_at = stamp;
        }
        slot.camera.enabled = enabled;
        if !enabled {
            slot.camera.invalidate_state();
        }
        true
    }

    /// Make a camera the most recently activated among its priority peers.
    pub fn move_to_top_of_priority_subqueue(&mut self, name: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        self.cameras[index].activated_at = self.next_activation();
        true
    }

    /// Name of the live camera.
    #[must_use]
    pub fn active_camera(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether `name` is live or being blended away from.
    #[must_use]
    pub fn is_live(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
            || self
                .blend
                .as_ref()
                .is_some_and(|b| b.from_camera.as_deref() == Some(name))
    }

    /// The blend in progress, if any.
    #[must_use]
    pub fn active_blend(&self) -> Option<&CameraBlend> {
        self.blend.as_ref()
    }

    /// Whether a blend is in progress.
    #[must_use]
    pub fn is_blending(&self) -> bool {
        self.blend.is_some()
    }

    /// The final camera state for the host camera.
    #[must_use]
    pub fn output(&self) -> &CameraState {
        &self.output
    }

    /// Update-clock tracker for camera targets.
    #[must_use]
    pub fn tracker(&self) -> &UpdateTracker {
        &self.tracker
    }

    /// Take all events raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<BrainEvent> {
        std::mem::take(&mut self.events)
    }

    /// The clock the brain itself (activation, blending, output) runs on.
    #[must_use]
    pub fn brain_clock(&self) -> UpdateClock {
        match self.options.update_method {
            UpdateMethod::FixedUpdate => UpdateClock::Fixed,
            UpdateMethod::LateUpdate | UpdateMethod::SmartUpdate => UpdateClock::Normal,
        }
    }

    /// World up used this tick.
    #[must_use]
    pub fn world_up(&self) -> Vec3 {
        self.options.world_up()
    }

    /// Process one clock tick.
    pub fn tick(
        &mut self,
        tick: FrameTick,
        transforms: &TransformStore,
        input: &dyn AxisInputProvider,
    ) {
        let _ = self
            .tracker
            .on_update(tick.clock, tick.frame, tick.time, transforms);

        let brain_tick = tick.clock == self.brain_clock();
        if brain_tick {
            self.process_activation(tick, transforms, input);
        }
        self.update_cameras(tick, transforms, input);
        if brain_tick {
            self.advance_blend(tick.delta_time);
            self.compute_output();
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.cameras.iter().position(|slot| slot.camera.name() == name)
    }

    fn next_activation(&mut self) -> u64 {
        self.activation_counter += 1;
        self.activation_counter
    }

    /// Highest-priority enabled camera, most recent activation first.
    fn select_live(&self) -> Option<usize> {
        self.cameras
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.camera.enabled)
            .max_by_key(|(_, slot)| (slot.camera.priority, slot.activated_at))
            .map(|(i, _)| i)
    }

    fn process_activation(
        &mut self,
        tick: FrameTick,
        transforms: &TransformStore,
        input: &dyn AxisInputProvider,
    ) {
        let incoming = self.select_live();
        let incoming_name = incoming.map(|i| self.cameras[i].camera.name().to_owned());
        if incoming_name == self.active {
            return;
        }
        let outgoing_name = self.active.take();
        let Some((index, name)) = incoming.zip(incoming_name) else {
            log::debug!("no live camera");
            self.blend = None;
            return;
        };

        // Blend from the outgoing camera, or from a snapshot of the current
        // output when interrupting a blend.
        let outgoing_index = outgoing_name.as_deref().and_then(|n| self.index_of(n));
        let (from_state, from_camera) = match (&self.blend, outgoing_index) {
            (Some(_), _) => (Some(self.output), None),
            (None, Some(i)) => (
                Some(*self.cameras[i].camera.state()),
                outgoing_name.clone(),
            ),
            (None, None) => (None, None),
        };

        let definition = self.options.blend_for(outgoing_name.as_deref(), &name);
        let delta_time = tick.delta_time;
        let cut = definition.is_cut() || from_state.is_none() || delta_time < 0.0;

        let world_up = self.options.world_up();
        let env = CameraEnv {
            transforms,
            input,
            is_live: true,
        };
        let slot = &mut self.cameras[index];
        let _ = slot.camera.on_transition_from_camera(
            from_state.as_ref(),
            world_up,
            delta_time,
            &env,
        );
        // The transition already ran this tick's update.
        slot.updated_on = Some(tick_stamp(tick));

        log::debug!("camera {name:?} activated (from {outgoing_name:?}, cut: {cut})");
        self.events.push(BrainEvent::CameraActivated {
            incoming: name.clone(),
            outgoing: outgoing_name,
        });
        self.blend = match from_state {
            Some(from) if !cut => Some(CameraBlend::new(from, from_camera, definition)),
            _ => {
                self.events.push(BrainEvent::CameraCut {
                    camera: name.clone(),
                });
                None
            }
        };
        self.active = Some(name);
    }

    fn update_cameras(
        &mut self,
        tick: FrameTick,
        transforms: &TransformStore,
        input: &dyn AxisInputProvider,
    ) {
        let world_up = self.options.world_up();
        let method = self.options.update_method;
        let live: Vec<bool> = self
            .cameras
            .iter()
            .map(|slot| self.is_live(slot.camera.name()))
            .collect();

        for (slot, is_live) in self.cameras.iter_mut().zip(live) {
            if slot.updated_on == Some(tick_stamp(tick)) {
                continue;
            }
            let cam = &mut slot.camera;
            if !is_live && (!cam.enabled || cam.standby_update == StandbyUpdate::Never) {
                continue;
            }
            let clock = match method {
                UpdateMethod::FixedUpdate => UpdateClock::Fixed,
                UpdateMethod::LateUpdate => UpdateClock::Normal,
                UpdateMethod::SmartUpdate => cam.update_target().map_or(UpdateClock::Normal, |t| {
                    self.tracker.preferred_update(t, transforms, tick.frame)
                }),
            };
            if clock != tick.clock {
                continue;
            }
            let env = CameraEnv {
                transforms,
                input,
                is_live,
            };
            cam.update_camera_state(world_up, tick.delta_time, &env);
            slot.updated_on = Some(tick_stamp(tick));
        }
    }

    fn advance_blend(&mut self, delta_time: f32) {
        let Some(blend) = &mut self.blend else {
            return;
        };
        if let Some(name) = blend.from_camera.as_deref() {
            if let Some(slot) = self.cameras.iter().find(|s| s.camera.name() == name) {
                blend.from = *slot.camera.state();
            }
        }
        blend.advance(delta_time);
        if blend.is_complete() {
            log::debug!("blend complete");
            self.blend = None;
        }
    }

    fn compute_output(&mut self) {
        let Some(index) = self.active.as_deref().and_then(|n| self.index_of(n)) else {
            return;
        };
        let live = *self.cameras[index].camera.state();
        self.output = match &self.blend {
            Some(blend) => blend.blend(&live),
            None => live,
        };
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::axis::{InputAxisMap, NoInput};
    use crate::camera::{BlendDefinition, BlendStyle};
    use crate::options::CustomBlend;
    use crate::pipeline::{HardLockToTarget, HardLookAt, Pov};
    use crate::tracking::Pose;
    use crate::util::frame_timing::FrameClock;

    const DT: f32 = 1.0 / 60.0;

    fn linear(time: f32) -> BlendDefinition {
        BlendDefinition {
            style: BlendStyle::Linear,
            time,
        }
    }

    fn brain(update_method: UpdateMethod) -> CinemachineBrain {
        CinemachineBrain::new(BrainOptions {
            update_method,
            default_blend: linear(1.0),
            ..BrainOptions::default()
        })
    }

    fn normal_tick(frame: u64) -> FrameTick {
        FrameTick {
            clock: UpdateClock::Normal,
            frame,
            time: frame as f64 * f64::from(DT),
            delta_time: DT,
        }
    }

    fn static_cam(name: &str, priority: i32, position: Vec3) -> VirtualCamera {
        let mut cam = VirtualCamera::new(name).with_priority(priority);
        cam.position = position;
        cam
    }

    #[test]
    fn highest_priority_goes_live_with_cut() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("low", 5, Vec3::X)).unwrap();
        brain.add_camera(static_cam("high", 20, Vec3::Y)).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), Some("high"));
        assert_eq!(brain.output().raw_position, Vec3::Y);
        assert_eq!(
            brain.drain_events(),
            vec![
                BrainEvent::CameraActivated {
                    incoming: "high".to_owned(),
                    outgoing: None
                },
                BrainEvent::CameraCut {
                    camera: "high".to_owned()
                },
            ]
        );
        assert!(brain.drain_events().is_empty());
    }

    #[test]
    fn ties_go_to_most_recent_activation() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::X)).unwrap();
        brain.add_camera(static_cam("b", 10, Vec3::Y)).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), Some("b"));
        assert!(brain.move_to_top_of_priority_subqueue("a"));
        brain.tick(normal_tick(2), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), Some("a"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(VirtualCamera::new("a")).unwrap();
        let err = brain.add_camera(VirtualCamera::new("a")).unwrap_err();
        assert!(matches!(err, CinemachineError::DuplicateCamera(_)));
    }

    #[test]
    fn priority_change_blends() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::ZERO)).unwrap();
        brain.add_camera(static_cam("b", 5, Vec3::new(10.0, 0.0, 0.0))).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        let _ = brain.drain_events();

        assert!(brain.set_priority("b", 20));
        brain.tick(normal_tick(2), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), Some("b"));
        assert!(brain.is_blending());
        assert!(brain.is_live("a"));
        assert_eq!(
            brain.drain_events(),
            vec![BrainEvent::CameraActivated {
                incoming: "b".to_owned(),
                outgoing: Some("a".to_owned())
            }]
        );
        let x = brain.output().raw_position.x;
        assert!(x > 0.0 && x < 1.0, "one tick into a 1s blend: {x}");

        for frame in 3..70 {
            brain.tick(normal_tick(frame), &transforms, &NoInput);
        }
        assert!(!brain.is_blending());
        assert!(!brain.is_live("a"));
        assert!((brain.output().raw_position.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn incoming_camera_runs_once_on_the_activation_tick() {
        let transforms = TransformStore::new();
        let input = InputAxisMap::new().with("Mouse X", 1.0);
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::ZERO)).unwrap();
        brain
            .add_camera(static_cam("b", 5, Vec3::X).with_component(Pov::default()))
            .unwrap();
        brain.tick(normal_tick(1), &transforms, &input);
        assert_eq!(brain.active_camera(), Some("a"));

        let pan = |brain: &CinemachineBrain| {
            brain
                .camera("b")
                .and_then(VirtualCamera::get::<Pov>)
                .map(|pov| pov.horizontal_axis.clone())
        };
        let mut expected = pan(&brain).unwrap();
        assert_eq!(expected.value, 0.0, "standby camera ignores input");
        let _ = expected.update(DT, &input);

        assert!(brain.set_priority("b", 20));
        brain.tick(normal_tick(2), &transforms, &input);
        assert_eq!(brain.active_camera(), Some("b"));
        let got = pan(&brain).unwrap();
        assert!(
            (got.value - expected.value).abs() < 1e-4,
            "pan {} after one tick, want {}",
            got.value,
            expected.value
        );

        let _ = expected.update(DT, &input);
        brain.tick(normal_tick(3), &transforms, &input);
        let got = pan(&brain).unwrap();
        assert!((got.value - expected.value).abs() < 1e-4);
    }

    #[test]
    fn custom_cut_blend() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.options_mut().custom_blends.push(CustomBlend {
            from: "*".to_owned(),
            to: "b".to_owned(),
            blend: BlendDefinition::CUT,
        });
        brain.add_camera(static_cam("a", 10, Vec3::ZERO)).unwrap();
        brain.add_camera(static_cam("b", 5, Vec3::X)).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert!(brain.set_priority("b", 20));
        let _ = brain.drain_events();
        brain.tick(normal_tick(2), &transforms, &NoInput);
        assert!(!brain.is_blending());
        assert_eq!(brain.output().raw_position, Vec3::X);
        assert!(brain
            .drain_events()
            .contains(&BrainEvent::CameraCut { camera: "b".to_owned() }));
    }

    #[test]
    fn interrupted_blend_starts_from_snapshot() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::ZERO)).unwrap();
        brain.add_camera(static_cam("b", 5, Vec3::new(10.0, 0.0, 0.0))).unwrap();
        brain.add_camera(static_cam("c", 1, Vec3::new(0.0, 10.0, 0.0))).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert!(brain.set_priority("b", 20));
        for frame in 2..32 {
            brain.tick(normal_tick(frame), &transforms, &NoInput);
        }
        let snapshot = *brain.output();
        assert!(snapshot.raw_position.x > 1.0);

        assert!(brain.set_priority("c", 30));
        brain.tick(normal_tick(32), &transforms, &NoInput);
        let blend = brain.active_blend().map(|b| (b.from, b.from_camera.clone()));
        let (from, from_camera) = blend.unwrap();
        assert_eq!(from.raw_position, snapshot.raw_position);
        assert!(from_camera.is_none());
        assert!(!brain.is_live("b"));
    }

    #[test]
    fn disabling_live_camera_falls_back() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::ZERO)).unwrap();
        brain.add_camera(static_cam("b", 20, Vec3::X)).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert!(brain.set_enabled("b", false));
        brain.tick(normal_tick(2), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), Some("a"));
        assert!(brain.set_enabled("b", true));
        brain.tick(normal_tick(3), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), Some("b"));
    }

    #[test]
    fn standby_never_skips_inactive_cameras() {
        let mut transforms = TransformStore::new();
        let target = transforms.create(Pose::from_position(Vec3::new(5.0, 0.0, 0.0)));
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("live", 20, Vec3::ZERO)).unwrap();
        let mut sleeper = VirtualCamera::new("sleeper")
            .with_priority(1)
            .with_follow(target)
            .with_component(HardLockToTarget::default());
        sleeper.standby_update = StandbyUpdate::Never;
        brain.add_camera(sleeper).unwrap();
        let mut watcher = VirtualCamera::new("watcher")
            .with_priority(2)
            .with_follow(target)
            .with_component(HardLockToTarget::default());
        watcher.standby_update = StandbyUpdate::Always;
        brain.add_camera(watcher).unwrap();

        brain.tick(normal_tick(1), &transforms, &NoInput);
        let pos = |name: &str| brain.camera(name).map(|c| c.state().raw_position);
        assert_eq!(pos("sleeper"), Some(Vec3::ZERO));
        assert_eq!(pos("watcher"), Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn smart_update_follows_target_clock() {
        let mut transforms = TransformStore::new();
        let target = transforms.create(Pose::IDENTITY);
        let mut brain = brain(UpdateMethod::SmartUpdate);
        brain
            .add_camera(
                VirtualCamera::new("cam")
                    .with_follow(target)
                    .with_look_at(target)
                    .with_component(HardLockToTarget::default()),
            )
            .unwrap();

        let mut clock = FrameClock::new(1.0 / 50.0);
        let mut x = 0.0;
        for _ in 0..120 {
            for tick in clock.advance(DT) {
                if tick.clock == UpdateClock::Fixed {
                    x += 0.1;
                    let _ = transforms.set_position(target, Vec3::new(x, 0.0, 0.0));
                }
                brain.tick(tick, &transforms, &NoInput);
            }
        }
        assert_eq!(
            brain.tracker().preferred_update_of(target),
            Some(UpdateClock::Fixed)
        );
        // Updated on the fixed tick that moved the target, so it is exact.
        assert!((brain.camera("cam").map_or(0.0, |c| c.state().raw_position.x) - x).abs() < 1e-4);
    }

    #[test]
    fn fixed_update_method_ignores_normal_ticks() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::FixedUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::X)).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert_eq!(brain.active_camera(), None);
        brain.tick(
            FrameTick {
                clock: UpdateClock::Fixed,
                ..normal_tick(1)
            },
            &transforms,
            &NoInput,
        );
        assert_eq!(brain.active_camera(), Some("a"));
    }

    #[test]
    fn look_at_camera_output_faces_target() {
        let mut transforms = TransformStore::new();
        let target = transforms.create(Pose::new(Vec3::new(0.0, 0.0, 10.0), Quat::IDENTITY));
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain
            .add_camera(VirtualCamera::new("cam").with_look_at(target).with_component(HardLookAt))
            .unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert!((brain.output().forward() - Vec3::Z).length() < 1e-5);
        assert_eq!(brain.output().reference_look_at, Some(Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn removing_blend_source_freezes_it() {
        let transforms = TransformStore::new();
        let mut brain = brain(UpdateMethod::LateUpdate);
        brain.add_camera(static_cam("a", 10, Vec3::ZERO)).unwrap();
        brain.add_camera(static_cam("b", 5, Vec3::X)).unwrap();
        brain.tick(normal_tick(1), &transforms, &NoInput);
        assert!(brain.set_priority("b", 20));
        brain.tick(normal_tick(2), &transforms, &NoInput);
        assert!(brain.remove_camera("a").is_some());
        assert!(brain.active_blend().is_some_and(|b| b.from_camera.is_none()));
        brain.tick(normal_tick(3), &transforms, &NoInput);
        assert!(brain.is_blending());
    }
}
