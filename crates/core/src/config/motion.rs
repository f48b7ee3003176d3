//! Integrator weights
//!
//! These are visual feel parameters, not physical constants: the integrator
//! superposes periodic signals and these numbers only decide how they mix.

use super::span::{validate_finite, validate_positive, Span};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Per-axis weights applied to each motion term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermWeights {
    pub drift: f32,
    pub swirl: f32,
    pub burst: f32,
    pub flicker: f32,
    pub orbit: f32,
}

impl TermWeights {
    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        match [self.drift, self.swirl, self.burst, self.flicker, self.orbit]
            .into_iter()
            .find(|w| !w.is_finite())
        {
            Some(value) => Err(ConfigError::NonFinite { name, value }),
            None => Ok(()),
        }
    }
}

/// Frequencies, gains and per-axis weights for the per-frame integrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Radians per millisecond of the global flame clock
    pub clock_rate: f64,
    /// Orbital radius breathing amplitude
    pub orbit_breathing: f32,
    /// Phase multiplier of the vertical breathing term
    pub orbit_breathing_y_freq: f32,
    pub swirl_gain: f32,
    pub burst_time_freq: f32,
    pub burst_phase_freq: f32,
    pub burst_origin_freq: f32,
    pub burst_gain: f32,
    pub flicker_phase_freq: f32,
    pub flicker_time_freq: f32,
    pub flicker_x_freq: f32,
    pub flicker_gain: f32,
    /// Origin multipliers of the slow per-axis drift
    pub drift_x_origin_freq: f32,
    pub drift_y_origin_freq: f32,
    /// Upward displacement per frame for lifting particles
    pub lift: Span,
    pub x_weights: TermWeights,
    pub y_weights: TermWeights,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            clock_rate: 0.0055,
            orbit_breathing: 0.2,
            orbit_breathing_y_freq: 1.3,
            swirl_gain: 0.75,
            burst_time_freq: 1.7,
            burst_phase_freq: 2.7,
            burst_origin_freq: 0.012,
            burst_gain: 0.31,
            flicker_phase_freq: 9.0,
            flicker_time_freq: 3.0,
            flicker_x_freq: 0.017,
            flicker_gain: 0.63,
            drift_x_origin_freq: 0.013,
            drift_y_origin_freq: 1.0,
            lift: Span::new(0.07, 0.23),
            x_weights: TermWeights {
                drift: 0.17,
                swirl: 1.0,
                burst: 1.0,
                flicker: 0.10,
                orbit: 0.31,
            },
            y_weights: TermWeights {
                drift: 0.19,
                swirl: 0.32,
                burst: 0.16,
                flicker: 0.09,
                orbit: 0.31,
            },
        }
    }
}

impl MotionTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("motion.clock_rate", self.clock_rate)?;
        for (name, value) in [
            ("motion.orbit_breathing", self.orbit_breathing),
            ("motion.orbit_breathing_y_freq", self.orbit_breathing_y_freq),
            ("motion.swirl_gain", self.swirl_gain),
            ("motion.burst_time_freq", self.burst_time_freq),
            ("motion.burst_phase_freq", self.burst_phase_freq),
            ("motion.burst_origin_freq", self.burst_origin_freq),
            ("motion.burst_gain", self.burst_gain),
            ("motion.flicker_phase_freq", self.flicker_phase_freq),
            ("motion.flicker_time_freq", self.flicker_time_freq),
            ("motion.flicker_x_freq", self.flicker_x_freq),
            ("motion.flicker_gain", self.flicker_gain),
            ("motion.drift_x_origin_freq", self.drift_x_origin_freq),
            ("motion.drift_y_origin_freq", self.drift_y_origin_freq),
        ] {
            validate_finite(name, value)?;
        }
        self.x_weights.validate("motion.x_weights")?;
        self.y_weights.validate("motion.y_weights")?;
        self.lift.validate("motion.lift")
    }
}
