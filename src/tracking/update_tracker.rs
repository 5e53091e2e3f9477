//! Infers which clock a tracked transform is actually moved on.
//!
//! Game objects may be moved from the per-frame callback or from the
//! fixed-timestep (physics) callback. Cameras following them must update on
//! the same clock, or they jitter against their target. [`UpdateTracker`]
//! watches each tracked transform's world matrix at every sweep and counts
//! under which clock the changes show up, over windows of
//! [`WINDOW_SIZE`] frames.
//!
//! The tracker is advisory: it never blocks, it only answers
//! [`UpdateTracker::preferred_update`].

use glam::Mat4;
use rustc_hash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::transform::{TransformId, TransformStore};

/// Frames per observation window.
pub const WINDOW_SIZE: u64 = 30;

/// Scheduler context a tick runs under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UpdateClock {
    /// Once per rendered frame.
    #[default]
    Normal,
    /// Fixed timestep; zero or more times per frame.
    Fixed,
}

#[derive(Debug, Clone)]
struct UpdateStatus {
    window_start: u64,
    normal_moves: u32,
    fixed_moves: u32,
    num_windows: u32,
    last_frame_updated: u64,
    last_matrix: Mat4,
    preferred: UpdateClock,
}

impl UpdateStatus {
    fn new(frame: u64, matrix: Mat4) -> Self {
        Self {
            window_start: frame,
            normal_moves: 0,
            fixed_moves: 0,
            num_windows: 0,
            last_frame_updated: frame,
            last_matrix: matrix,
            preferred: UpdateClock::Normal,
        }
    }

    fn tentative_choice(&self) -> UpdateClock {
        if self.fixed_moves > 2 && self.fixed_moves > self.normal_moves / 2 {
            UpdateClock::Fixed
        } else {
            UpdateClock::Normal
        }
    }

    fn on_update(&mut self, frame: u64, clock: UpdateClock, matrix: Mat4) {
        if self.last_matrix != matrix {
            match clock {
                UpdateClock::Normal => self.normal_moves += 1,
                // Physics may step several times per frame; count the frame.
                UpdateClock::Fixed => {
                    if self.last_frame_updated != frame {
                        self.fixed_moves += 1;
                        self.last_frame_updated = frame;
                    }
                }
            }
            self.last_matrix = matrix;
            if self.num_windows == 0 {
                self.preferred = self.tentative_choice();
            }
        }

        if self.window_start + WINDOW_SIZE <= frame {
            self.preferred = self.tentative_choice();
            log::debug!(
                "update window {} closed: normal={} fixed={} -> {:?}",
                self.num_windows,
                self.normal_moves,
                self.fixed_moves,
                self.preferred
            );
            self.num_windows += 1;
            self.window_start = frame;
            self.normal_moves = u32::from(self.preferred == UpdateClock::Normal);
            self.fixed_moves = u32::from(self.preferred == UpdateClock::Fixed);
        }
    }
}

/// Registry of tracked transforms and their inferred update clocks.
///
/// Owned by the orchestrator and passed the host's [`TransformStore`] on
/// every call. Entries are created lazily by
/// [`preferred_update`](Self::preferred_update), swept by
/// [`on_update`](Self::on_update), and dropped either explicitly with
/// [`unregister`](Self::unregister) or during a sweep once their transform
/// no longer exists.
#[derive(Debug, Default)]
pub struct UpdateTracker {
    statuses: FxHashMap<TransformId, UpdateStatus>,
    last_sweep: Option<(UpdateClock, f64)>,
}

impl UpdateTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The clock `target` appears to be moved on.
    ///
    /// Unknown targets are registered and report [`UpdateClock::Normal`]
    /// until enough movement has been observed. Stale handles are never
    /// registered.
    pub fn preferred_update(
        &mut self,
        target: TransformId,
        transforms: &TransformStore,
        frame: u64,
    ) -> UpdateClock {
        if let Some(status) = self.statuses.get(&target) {
            return status.preferred;
        }
        if let Some(matrix) = transforms.local_to_world(target) {
            let _ = self
                .statuses
                .insert(target, UpdateStatus::new(frame, matrix));
        }
        UpdateClock::Normal
    }

    /// Sweep every tracked transform for the tick at `time`.
    ///
    /// Only the first call per distinct `(clock, time)` does anything, so
    /// several controllers can report the same tick. A Normal tick that
    /// shares its timestamp with the last Fixed step still sweeps. Returns
    /// whether a sweep ran.
    pub fn on_update(
        &mut self,
        clock: UpdateClock,
        frame: u64,
        time: f64,
        transforms: &TransformStore,
    ) -> bool {
        if self.last_sweep == Some((clock, time)) {
            return false;
        }
        self.last_sweep = Some((clock, time));

        let before = self.statuses.len();
        self.statuses
            .retain(|id, status| match transforms.local_to_world(*id) {
                Some(matrix) => {
                    status.on_update(frame, clock, matrix);
                    true
                }
                None => false,
            });
        let pruned = before - self.statuses.len();
        if pruned > 0 {
            log::debug!("update tracker pruned {pruned} destroyed transform(s)");
        }
        true
    }

    /// Stored preference for `target`, without registering it.
    #[must_use]
    pub fn preferred_update_of(&self, target: TransformId) -> Option<UpdateClock> {
        self.statuses.get(&target).map(|status| status.preferred)
    }

    /// Stop tracking `target`. Returns whether it was tracked.
    pub fn unregister(&mut self, target: TransformId) -> bool {
        self.statuses.remove(&target).is_some()
    }

    /// Whether `target` currently has an entry.
    #[must_use]
    pub fn is_tracking(&self, target: TransformId) -> bool {
        self.statuses.contains_key(&target)
    }

    /// Number of tracked transforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Forget every entry and the last sweep time.
    pub fn clear(&mut self) {
        self.statuses.clear();
        self.last_sweep = None;
    }
}
