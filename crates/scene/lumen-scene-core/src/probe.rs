//! Rendering capability probing.

use serde::{Deserialize, Serialize};

/// Outcome of the one-shot capability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityReport {
    /// Whether an accelerated interactive scene is viable at all.
    pub supported: bool,
    /// Device passed the probe but is classified low-power; the upgrade
    /// keeps a reduced particle density.
    pub low_power: bool,
    /// Human-readable explanation when `supported` is false.
    pub reason: Option<String>,
}

impl CapabilityReport {
    /// Report for a device that can run the full scene.
    pub fn supported() -> Self {
        Self {
            supported: true,
            low_power: false,
            reason: None,
        }
    }

    /// Report for a capable but low-power device.
    pub fn low_power() -> Self {
        Self {
            supported: true,
            low_power: true,
            reason: None,
        }
    }

    /// Report for a device that cannot run the scene.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self {
            supported: false,
            low_power: false,
            reason: Some(reason.into()),
        }
    }
}

/// Decides once, before construction, whether the device can carry an
/// accelerated interactive scene.
///
/// Implementations must not fail: any error obtaining a throwaway probe
/// context is folded into an unsupported report. Handheld form factors
/// report unsupported; desktop hardware that passes but looks weak
/// reports `low_power` so the upgrade stays at a reduced density.
///
/// The controller calls this exactly once per lifecycle, and never again
/// after entering `Disabled`.
pub trait CapabilityProbe {
    fn probe(&mut self) -> CapabilityReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_carries_reason() {
        let report = CapabilityReport::unsupported("no accelerated context");
        assert!(!report.supported);
        assert_eq!(report.reason.as_deref(), Some("no accelerated context"));
    }

    #[test]
    fn low_power_is_still_supported() {
        let report = CapabilityReport::low_power();
        assert!(report.supported);
        assert!(report.low_power);
        assert!(report.reason.is_none());
    }
}
