//! Tunables for the hero scene controller.

use serde::{Deserialize, Serialize};

use crate::time::SceneTime;

/// Delay between construction and the one-shot particle upgrade.
pub const DEFAULT_UPGRADE_DELAY_MS: f64 = 1200.0;
/// Particle count the scene starts with.
pub const DEFAULT_BASE_PARTICLES: u32 = 300;
/// Particle count after the upgrade on full-power devices.
pub const DEFAULT_UPGRADED_PARTICLES: u32 = 900;
/// Particle count after the upgrade on low-power devices.
pub const DEFAULT_LOW_POWER_PARTICLES: u32 = 400;

/// Configuration for scene quality and motion.
///
/// Defaults reproduce the shipped hero look; hosts may deserialize an
/// override from JSON, with missing fields falling back per-field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Particle count at construction.
    pub base_particle_count: u32,
    /// Particle count after the one-shot upgrade.
    pub upgraded_particle_count: u32,
    /// Upgrade count used instead when the device is classified low-power.
    pub low_power_particle_count: u32,
    /// Idle delay before the one-shot upgrade fires.
    pub upgrade_delay: SceneTime,

    /// Continuous yaw spin, radians per second of elapsed scene time.
    pub spin_rate: f32,
    /// Frequency of the pitch oscillation, radians per second.
    pub tilt_rate: f32,
    /// Peak pitch of the oscillating tilt, radians.
    pub tilt_amplitude: f32,

    /// Horizontal parallax reach of the camera, world units per unit of
    /// normalized pointer deflection.
    pub parallax_gain_x: f32,
    /// Vertical parallax reach. Applied inverted: pointer toward the
    /// bottom of the viewport pushes the camera down.
    pub parallax_gain_y: f32,
    /// Fraction of the remaining distance to the parallax target covered
    /// each frame.
    pub camera_smoothing: f32,
    /// Camera position before any parallax drift takes hold.
    pub camera_rest: [f32; 3],

    /// Vertical field of view, degrees.
    pub camera_fov: f32,
    /// Near clip plane distance.
    pub camera_near: f32,
    /// Far clip plane distance.
    pub camera_far: f32,
    /// Cap applied to the host's device pixel ratio.
    pub max_pixel_ratio: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base_particle_count: DEFAULT_BASE_PARTICLES,
            upgraded_particle_count: DEFAULT_UPGRADED_PARTICLES,
            low_power_particle_count: DEFAULT_LOW_POWER_PARTICLES,
            upgrade_delay: SceneTime::from_nanos((DEFAULT_UPGRADE_DELAY_MS * 1e6) as u64),
            spin_rate: 0.25,
            tilt_rate: 0.2,
            tilt_amplitude: 0.1,
            parallax_gain_x: 0.5,
            parallax_gain_y: 0.3,
            camera_smoothing: 0.05,
            camera_rest: [0.0, 0.6, 3.0],
            camera_fov: 50.0,
            camera_near: 0.1,
            camera_far: 100.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl SceneConfig {
    /// Particle count the one-shot upgrade should apply for the probed
    /// device class.
    #[inline]
    pub fn upgrade_count(&self, low_power: bool) -> u32 {
        if low_power {
            self.low_power_particle_count
        } else {
            self.upgraded_particle_count
        }
    }
}
