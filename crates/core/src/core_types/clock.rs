//! Global animation clock
//!
//! Hosts hand the field a monotonically increasing millisecond reading once per
//! frame. Every periodic term derives its angle from that reading, so phase
//! reduction happens in `f64` before narrowing: a clock that has been running
//! for days must not lose the sub-radian detail the motion depends on.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::Deref;
use std::time::Duration;

/// Clock reading in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct FrameClock(f64);

impl Deref for FrameClock {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl FrameClock {
    /// Create a clock reading. Asserts a finite, non-negative value.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn from_millis(millis: f64) -> Self {
        assert!(
            millis.is_finite() && millis >= 0.0,
            "FrameClock::from_millis: reading must be finite and non-negative, got {millis}"
        );
        Self(millis)
    }

    /// Clock reading for time elapsed since the host started its animation
    #[inline]
    #[must_use]
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self(elapsed.as_secs_f64() * 1000.0)
    }

    /// Reading `millis` later than this one
    #[inline]
    #[must_use]
    pub fn advanced_by(self, millis: f64) -> Self {
        Self::from_millis(self.0 + millis)
    }

    #[inline]
    pub fn millis(self) -> f64 {
        self.0
    }

    /// Angle `millis × rate` reduced into `[0, 2π)`.
    #[inline]
    pub fn phase(self, rate: f64) -> f32 {
        (self.0 * rate).rem_euclid(TAU) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phase_wraps_into_one_turn() {
        let clock = FrameClock::from_millis(1_000.0);
        assert_relative_eq!(clock.phase(0.001), 1.0, epsilon = 1e-6);

        let late = FrameClock::from_millis(1.7e12);
        let phase = late.phase(0.0055);
        assert!((0.0..std::f32::consts::TAU).contains(&phase));
    }

    #[test]
    fn test_phase_keeps_precision_on_large_readings() {
        // Two readings one frame apart must still produce distinct angles.
        let a = FrameClock::from_millis(1.7e12);
        let b = a.advanced_by(16.0);
        let delta = (b.phase(0.0055) - a.phase(0.0055)).rem_euclid(std::f32::consts::TAU);
        assert_relative_eq!(delta, 0.088, epsilon = 1e-3);
    }

    #[test]
    fn test_from_elapsed() {
        let clock = FrameClock::from_elapsed(Duration::from_millis(250));
        assert_relative_eq!(clock.millis(), 250.0);
    }

    #[test]
    #[should_panic(expected = "finite and non-negative")]
    fn test_negative_reading_is_rejected() {
        let _ = FrameClock::from_millis(-1.0);
    }
}
