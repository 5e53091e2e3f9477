//! Generational storage for the world poses of tracked objects.
//!
//! The host owns a [`TransformStore`] and writes the world pose of every
//! object the cameras follow or look at. Handles carry a generation so that
//! a handle to a destroyed transform is detected instead of aliasing a
//! recycled slot.

use std::fmt;

use glam::{Mat4, Quat, Vec3};

/// A handle to a transform in a [`TransformStore`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId {
    idx: u32,
    generation: u32,
}

impl TransformId {
    /// Raw slot index (diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Generation counter of the slot when this handle was issued.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TransformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransformId({}@gen{})", self.idx, self.generation)
    }
}

/// World-space pose of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quat,
    /// World scale.
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Unit-scale pose.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Pose at `position` with no rotation.
    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Local-to-world matrix.
    #[must_use]
    pub fn local_to_world(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        )
    }
}

/// Slot storage for tracked transforms with a free list.
#[derive(Debug, Default)]
pub struct TransformStore {
    poses: Vec<Pose>,
    generation: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
}

impl TransformStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform with the given pose.
    pub fn create(&mut self, pose: Pose) -> TransformId {
        if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] = self.generation[i].wrapping_add(1);
            self.poses[i] = pose;
            self.alive[i] = true;
            return TransformId {
                idx,
                generation: self.generation[i],
            };
        }
        let idx = self.poses.len() as u32;
        self.poses.push(pose);
        self.generation.push(0);
        self.alive.push(true);
        TransformId { idx, generation: 0 }
    }

    /// Destroys a transform. Returns false for stale handles.
    pub fn destroy(&mut self, id: TransformId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.alive[id.idx as usize] = false;
        self.free_list.push(id.idx);
        true
    }

    /// Whether the handle refers to a live transform.
    #[must_use]
    pub fn is_alive(&self, id: TransformId) -> bool {
        let i = id.idx as usize;
        i < self.alive.len() && self.alive[i] && self.generation[i] == id.generation
    }

    /// Current pose, or `None` for a stale handle.
    #[must_use]
    pub fn get(&self, id: TransformId) -> Option<&Pose> {
        if self.is_alive(id) {
            self.poses.get(id.idx as usize)
        } else {
            None
        }
    }

    /// Overwrites a pose. Returns false for stale handles.
    pub fn set(&mut self, id: TransformId, pose: Pose) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.poses[id.idx as usize] = pose;
        true
    }

    /// Moves a transform, keeping rotation and scale.
    pub fn set_position(&mut self, id: TransformId, position: Vec3) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.poses[id.idx as usize].position = position;
        true
    }

    /// Local-to-world matrix, or `None` for a stale handle.
    #[must_use]
    pub fn local_to_world(&self, id: TransformId) -> Option<Mat4> {
        self.get(id).map(Pose::local_to_world)
    }

    /// Number of live transforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    /// Whether no transform is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
