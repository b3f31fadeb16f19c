//! Render surface abstraction.
//!
//! The controller never touches a rendering API. It owns a boxed
//! [`RenderSurface`] created by the host's [`SurfaceProvider`] and feeds
//! it viewport changes, particle counts and per-frame poses; what those
//! mean in GPU terms is entirely the host's business.

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::probe::CapabilityReport;

/// Size of the scene's container, in CSS-ish host units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Host device pixel ratio, already capped by the adapter.
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Projection aspect ratio. A degenerate zero-height container maps
    /// to 1.0 rather than infinity.
    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            return 1.0;
        }
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

/// Camera and primary-group pose for one frame. The camera looks at the
/// world origin; the surface applies that orientation itself.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenePose {
    /// Rotation of the primary group about the vertical axis, radians.
    pub yaw: f32,
    /// Oscillating tilt of the primary group, radians.
    pub pitch: f32,
    /// World-space camera position after parallax damping.
    pub camera_position: [f32; 3],
}

/// One constructed interactive scene, sized to its container.
pub trait RenderSurface {
    /// Apply a new container size. Only projection and output size
    /// change; scene content is untouched.
    fn resize(&mut self, viewport: Viewport);

    /// Replace the particle field with one of `count` particles.
    fn set_particle_count(&mut self, count: u32);

    /// Draw one frame at the given pose.
    fn render(&mut self, pose: &ScenePose);
}

/// Builds the render surface once the probe has passed.
pub trait SurfaceProvider {
    /// Construct a surface for the probed device. Failure here (context
    /// loss between probe and construction, exhausted GPU memory) is
    /// recovered by the controller, which falls back to `Disabled`.
    fn create(
        &mut self,
        config: &SceneConfig,
        report: &CapabilityReport,
        viewport: Viewport,
    ) -> Result<Box<dyn RenderSurface>, SceneError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_guards_degenerate_height() {
        assert_eq!(Viewport::new(800.0, 0.0, 1.0).aspect(), 1.0);
        assert_eq!(Viewport::new(1920.0, 1080.0, 2.0).aspect(), 1920.0 / 1080.0);
    }
}
