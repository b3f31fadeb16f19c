//! Elapsed-time tracking that freezes across pauses.

use serde::{Deserialize, Serialize};

use crate::time::SceneTime;

/// Tracks elapsed scene time from injected host timestamps.
///
/// Pausing banks the elapsed time accumulated so far; resuming re-bases
/// on the resume timestamp. Elapsed time therefore never jumps across a
/// pause, so motion picks up exactly where it stopped rather than
/// leaping ahead by however long the page was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneClock {
    /// Timestamp the current running stretch started at, if running.
    basis: Option<SceneTime>,
    /// Elapsed time accumulated before the current running stretch.
    banked: SceneTime,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin measuring from zero at `now`.
    pub fn start(&mut self, now: SceneTime) {
        self.basis = Some(now);
        self.banked = SceneTime::zero();
    }

    /// Freeze the clock, banking time accumulated up to `now`.
    /// No-op when already frozen.
    pub fn pause(&mut self, now: SceneTime) {
        if let Some(basis) = self.basis.take() {
            self.banked += now.saturating_since(basis);
        }
    }

    /// Continue measuring from `now`. No-op when already running.
    pub fn resume(&mut self, now: SceneTime) {
        if self.basis.is_none() {
            self.basis = Some(now);
        }
    }

    /// Total unfrozen time since `start`.
    pub fn elapsed(&self, now: SceneTime) -> SceneTime {
        match self.basis {
            Some(basis) => self.banked + now.saturating_since(basis),
            None => self.banked,
        }
    }

    pub fn is_running(&self) -> bool {
        self.basis.is_some()
    }
}
