//! Scene lifecycle phases.

use serde::{Deserialize, Serialize};

/// Where the scene is in its lifecycle.
///
/// `Idle -> Disabled` when the capability probe fails (terminal; the
/// page's static fallback stays visible), or `Idle -> Basic -> Upgraded`
/// on capable devices. Pausing is tracked separately by the controller
/// and is orthogonal to the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScenePhase {
    /// Not yet constructed.
    #[default]
    Idle,
    /// Probe failed; no surface exists and none ever will.
    Disabled,
    /// Running with the initial low particle density.
    Basic,
    /// Running with the post-upgrade particle density.
    Upgraded,
}

impl ScenePhase {
    /// Stable lowercase name for logs and host-facing events.
    pub fn name(&self) -> &'static str {
        match self {
            ScenePhase::Idle => "idle",
            ScenePhase::Disabled => "disabled",
            ScenePhase::Basic => "basic",
            ScenePhase::Upgraded => "upgraded",
        }
    }

    /// Whether a surface exists and frames may run.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, ScenePhase::Basic | ScenePhase::Upgraded)
    }

    /// Whether the phase has no way forward. Capability is probed once
    /// per lifecycle and not revisited; only a full shutdown leaves this
    /// phase, by starting the lifecycle over.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScenePhase::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_and_terminality() {
        assert!(!ScenePhase::Idle.is_active());
        assert!(!ScenePhase::Disabled.is_active());
        assert!(ScenePhase::Basic.is_active());
        assert!(ScenePhase::Upgraded.is_active());

        assert!(ScenePhase::Disabled.is_terminal());
        assert!(!ScenePhase::Basic.is_terminal());
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(ScenePhase::Basic.name(), "basic");
        assert_eq!(ScenePhase::Upgraded.name(), "upgraded");
    }
}
