//! Blend curves and the running blend between two camera states.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::state::CameraState;

/// Shape of a camera blend.
///
/// Every curved style is a cubic Bezier from 0 to 1 with two inner control
/// values: `c1·3t(1-t)² + c2·3(1-t)t² + t³`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlendStyle {
    /// Jump straight to the incoming camera.
    Cut,
    /// Slow start and slow end.
    #[default]
    EaseInOut,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Very slow start, abrupt end.
    HardIn,
    /// Abrupt start, very slow end.
    HardOut,
    /// Constant rate.
    Linear,
    /// Bezier with custom inner control values.
    Custom {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl BlendStyle {
    /// Blend weight at normalized time `t`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let (c1, c2) = match *self {
            Self::Cut => return 1.0,
            Self::Linear => return t,
            Self::EaseInOut => (0.0, 1.0),
            Self::EaseIn => (0.0, 2.0 / 3.0),
            Self::EaseOut => (1.0 / 3.0, 1.0),
            Self::HardIn => (0.0, 0.0),
            Self::HardOut => (1.0, 1.0),
            Self::Custom { c1, c2 } => (c1, c2),
        };
        let omt = 1.0 - t;
        c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
    }
}

/// How to blend into a camera: curve and duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BlendDefinition {
    /// Curve shape.
    pub style: BlendStyle,
    /// Duration in seconds.
    #[schemars(range(min = 0.0))]
    pub time: f32,
}

impl Default for BlendDefinition {
    fn default() -> Self {
        Self {
            style: BlendStyle::EaseInOut,
            time: 2.0,
        }
    }
}

impl BlendDefinition {
    /// A cut.
    pub const CUT: Self = Self {
        style: BlendStyle::Cut,
        time: 0.0,
    };

    /// Whether this definition switches cameras instantly.
    #[must_use]
    pub fn is_cut(&self) -> bool {
        matches!(self.style, BlendStyle::Cut) || self.time <= 0.0
    }
}

/// A blend in progress from a fixed outgoing state toward a live camera.
#[derive(Debug, Clone)]
pub struct CameraBlend {
    /// State being blended away from.
    pub from: CameraState,
    /// Name of the outgoing camera, if it was a camera and not a snapshot.
    pub from_camera: Option<String>,
    /// Curve and duration.
    pub definition: BlendDefinition,
    /// Seconds elapsed.
    pub elapsed: f32,
}

impl CameraBlend {
    /// Start a blend from `from`.
    #[must_use]
    pub fn new(
        from: CameraState,
        from_camera: Option<String>,
        definition: BlendDefinition,
    ) -> Self {
        Self {
            from,
            from_camera,
            definition,
            elapsed: 0.0,
        }
    }

    /// Advance the blend clock.
    pub fn advance(&mut self, delta_time: f32) {
        if delta_time > 0.0 {
            self.elapsed += delta_time;
        }
    }

    /// Normalized progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.definition.time <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.definition.time).clamp(0.0, 1.0)
        }
    }

    /// Current blend weight of the incoming camera.
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.definition.style.evaluate(self.progress())
    }

    /// Whether the incoming camera is fully in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.definition.time
    }

    /// Blend the outgoing state with the incoming camera's state.
    #[must_use]
    pub fn blend(&self, to: &CameraState) -> CameraState {
        CameraState::lerp(&self.from, to, self.weight())
    }
}
