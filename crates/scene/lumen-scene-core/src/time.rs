use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// A moment on (or a span of) the scene timeline, stored as whole
/// nanoseconds so ordering and equality are exact.
///
/// Hosts feed timestamps in (from `performance.now()` or a monotonic
/// clock); the controller never reads wall time itself, which keeps every
/// motion computation reproducible from the timestamps alone.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Default)]
pub struct SceneTime(u64);

impl SceneTime {
    /// Create a scene time from nanoseconds
    #[inline]
    pub fn from_nanos(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Create a scene time from milliseconds
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Result<Self, SceneError> {
        Self::from_seconds(milliseconds / 1000.0)
    }

    /// Create a scene time from seconds
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, SceneError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(SceneError::InvalidTime { seconds });
        }
        let nanos = (seconds * 1_000_000_000.0) as u64;
        Ok(Self(nanos))
    }

    /// Zero time
    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get time in seconds
    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Get time in milliseconds
    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Get time in nanoseconds
    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Get the difference between two times. Errors when `earlier` is in
    /// fact later, which usually means a host delivered timestamps out of
    /// order.
    #[inline]
    pub fn duration_since(&self, earlier: SceneTime) -> Result<SceneTime, SceneError> {
        if self.0 < earlier.0 {
            return Err(SceneError::InvalidTime {
                seconds: (self.0 as f64 - earlier.0 as f64) / 1_000_000_000.0,
            });
        }
        Ok(SceneTime(self.0 - earlier.0))
    }

    /// Difference between two times, clamped to zero when `earlier` is
    /// actually later.
    #[inline]
    pub fn saturating_since(&self, earlier: SceneTime) -> SceneTime {
        SceneTime(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add for SceneTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::ops::AddAssign for SceneTime {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::Sub for SceneTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::ops::SubAssign for SceneTime {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

// Easier conversions
impl From<u64> for SceneTime {
    fn from(nanos: u64) -> Self {
        Self::from_nanos(nanos)
    }
}

impl From<SceneTime> for u64 {
    fn from(time: SceneTime) -> u64 {
        time.0
    }
}

impl From<Duration> for SceneTime {
    fn from(duration: Duration) -> Self {
        SceneTime::from_nanos(duration.as_nanos() as u64)
    }
}

impl From<SceneTime> for Duration {
    fn from(time: SceneTime) -> Duration {
        Duration::from_nanos(time.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_time() {
        let time1 = SceneTime::from_seconds(1.5).unwrap();
        let time2 = SceneTime::from_seconds(2.0).unwrap();

        assert_eq!(time1.as_seconds(), 1.5);
        assert_eq!(time1.as_millis(), 1500.0);

        let sum = time1 + time2;
        assert_eq!(sum.as_seconds(), 3.5);

        let diff = time2.duration_since(time1).unwrap();
        assert_eq!(diff.as_seconds(), 0.5);
    }

    #[test]
    fn test_invalid_time() {
        assert!(SceneTime::from_seconds(-1.0).is_err());
        assert!(SceneTime::from_seconds(f64::NAN).is_err());
        assert!(SceneTime::from_seconds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_out_of_order_timestamps() {
        let earlier = SceneTime::from_seconds(1.0).unwrap();
        let later = SceneTime::from_seconds(4.0).unwrap();

        assert!(earlier.duration_since(later).is_err());
        assert_eq!(earlier.saturating_since(later), SceneTime::zero());
        assert_eq!(later.saturating_since(earlier).as_seconds(), 3.0);
    }

    #[test]
    fn test_millis_round_trip() {
        let time = SceneTime::from_millis(1200.0).unwrap();
        assert_eq!(time.as_millis(), 1200.0);
        assert_eq!(time.as_seconds(), 1.2);
    }
}
