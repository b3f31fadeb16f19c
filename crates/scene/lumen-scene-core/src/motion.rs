//! Pure motion math for the hero scene.
//!
//! Model:
//! - The primary group spins continuously about Y and tilts with a small
//!   sine oscillation about X; both are functions of elapsed scene time
//!   alone, so replaying the same timestamps reproduces the same pose.
//! - The camera drifts toward a pointer-derived parallax target with
//!   exponential smoothing: each frame covers a fixed fraction of the
//!   remaining distance, never snapping. Depth is left untouched.
//!
//! Everything here is a pure function; the controller owns the state.

use nalgebra::{Vector2, Vector3};

use crate::config::SceneConfig;

/// Normalize host pointer coordinates to [-1, 1] per axis, with the
/// viewport centre at the origin. Degenerate window sizes map to the
/// centre rather than dividing by zero.
#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vector2<f32> {
    if width <= 0.0 || height <= 0.0 {
        return Vector2::zeros();
    }
    Vector2::new(
        (client_x / width) * 2.0 - 1.0,
        (client_y / height) * 2.0 - 1.0,
    )
}

/// Primary-group rotation for an elapsed time: a slow continuous yaw
/// spin plus a small oscillating pitch tilt. Computed in f64 so long
/// sessions do not accumulate single-precision drift before the cast.
#[inline]
pub fn spin_angles(config: &SceneConfig, elapsed_seconds: f64) -> (f32, f32) {
    let yaw = config.spin_rate as f64 * elapsed_seconds;
    let pitch = (elapsed_seconds * config.tilt_rate as f64).sin() * config.tilt_amplitude as f64;
    (yaw as f32, pitch as f32)
}

/// Camera offset the pointer is asking for. The vertical axis inverts so
/// a pointer toward the bottom of the viewport pushes the camera down.
#[inline]
pub fn parallax_target(config: &SceneConfig, pointer: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(
        pointer.x * config.parallax_gain_x,
        -pointer.y * config.parallax_gain_y,
    )
}

/// One exponential-smoothing step toward the parallax target. Covers
/// `smoothing` of the remaining distance on X and Y; Z is fixed.
#[inline]
pub fn damp_camera(camera: Vector3<f32>, target: Vector2<f32>, smoothing: f32) -> Vector3<f32> {
    Vector3::new(
        camera.x + (target.x - camera.x) * smoothing,
        camera.y + (target.y - camera.y) * smoothing,
        camera.z,
    )
}
