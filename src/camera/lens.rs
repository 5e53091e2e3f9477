use glam::Mat4;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Projection parameters carried by every camera state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lens", inline)]
#[serde(default)]
pub struct LensSettings {
    /// Vertical field of view in degrees (perspective).
    #[schemars(title = "Field of View", range(min = 1.0, max = 179.0), extend("step" = 1.0))]
    pub field_of_view: f32,
    /// Half-height of the view volume in world units (orthographic).
    #[schemars(title = "Orthographic Size", range(min = 0.01))]
    pub orthographic_size: f32,
    /// Near clipping plane distance.
    pub near_clip_plane: f32,
    /// Far clipping plane distance.
    pub far_clip_plane: f32,
    /// Roll about the view axis, in degrees.
    #[schemars(title = "Dutch", range(min = -180.0, max = 180.0))]
    pub dutch: f32,
    /// Orthographic instead of perspective projection.
    pub orthographic: bool,
}

impl Default for LensSettings {
    fn default() -> Self {
        Self {
            field_of_view: 40.0,
            orthographic_size: 10.0,
            near_clip_plane: 0.1,
            far_clip_plane: 5000.0,
            dutch: 0.0,
            orthographic: false,
        }
    }
}

impl LensSettings {
    /// Clamp settings into usable ranges.
    pub fn validate(&mut self) {
        let min_near = if self.orthographic { 0.0 } else { 0.001 };
        self.near_clip_plane = self.near_clip_plane.max(min_near);
        self.far_clip_plane = self.far_clip_plane.max(self.near_clip_plane + 0.001);
        self.field_of_view = self.field_of_view.clamp(0.01, 179.0);
        self.orthographic_size = self.orthographic_size.max(0.01);
    }

    /// Blend two lenses. The projection kind switches halfway.
    #[must_use]
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: f32, y: f32| x + (y - x) * t;
        Self {
            field_of_view: mix(a.field_of_view, b.field_of_view),
            orthographic_size: mix(a.orthographic_size, b.orthographic_size),
            near_clip_plane: mix(a.near_clip_plane, b.near_clip_plane),
            far_clip_plane: mix(a.far_clip_plane, b.far_clip_plane),
            dutch: mix(a.dutch, b.dutch),
            orthographic: if t < 0.5 { a.orthographic } else { b.orthographic },
        }
    }

    /// Projection matrix for the given viewport aspect (width / height),
    /// `[0, 1]` depth range.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        if self.orthographic {
            let h = self.orthographic_size;
            let w = h * aspect;
            Mat4::orthographic_rh(-w, w, -h, h, self.near_clip_plane, self.far_clip_plane)
        } else {
            Mat4::perspective_rh(
                self.field_of_view.to_radians(),
                aspect,
                self.near_clip_plane,
                self.far_clip_plane,
            )
        }
    }
}
