//! Error types for the hero scene controller

use serde::{Deserialize, Serialize};

/// Error type for scene lifecycle operations.
///
/// The controller recovers from capability and surface failures on its
/// own (the page falls back to its static visual), so these mostly show
/// up in logs and in `Disabled` events rather than as propagated errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SceneError {
    /// No accelerated rendering capability on this device
    #[error("Rendering capability unavailable: {reason}")]
    CapabilityUnavailable { reason: String },

    /// Render surface construction failed after a positive probe
    #[error("Render surface creation failed: {reason}")]
    SurfaceCreation { reason: String },

    /// Invalid time value
    #[error("Invalid time value: {seconds}")]
    InvalidTime { seconds: f64 },
}

impl SceneError {
    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CapabilityUnavailable { .. } | Self::SurfaceCreation { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::CapabilityUnavailable { .. } => "capability",
            Self::SurfaceCreation { .. } => "surface",
            Self::InvalidTime { .. } => "validation",
        }
    }
}
