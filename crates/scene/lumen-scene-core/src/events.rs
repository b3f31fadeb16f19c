//! Semantic events emitted during lifecycle transitions.
//!
//! Events accumulate in a buffer the host drains with
//! [`SceneController::take_events`]; adapters transport them to logging,
//! analytics or tests. Per-frame rendering emits no events.
//!
//! [`SceneController::take_events`]: crate::controller::SceneController::take_events

use serde::{Deserialize, Serialize};

use crate::state::ScenePhase;

/// Discrete lifecycle signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SceneEvent {
    /// Construction finished and the frame loop is running.
    Initialized { phase: ScenePhase, particle_count: u32 },
    /// The scene will never run; the static fallback stays visible.
    Disabled { reason: String },
    /// The one-shot particle upgrade applied.
    Upgraded { particle_count: u32 },
    Paused,
    Resumed,
    /// Teardown completed; the controller is back to idle.
    ShutDown,
}

/// Event buffer owned by the controller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneEvents {
    events: Vec<SceneEvent>,
}

impl SceneEvents {
    #[inline]
    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Drain everything buffered so far, oldest first.
    #[inline]
    pub fn take(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
