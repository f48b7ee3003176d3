//! Skeleton outline layout and flicker

use super::span::{validate_finite, validate_positive, Span};
use crate::core_types::Rgb;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Static outline population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonTuning {
    pub count: usize,
    pub radius_divisor: f32,
    pub shape_base: f32,
    pub shape_cos: f32,
    /// Vertical bias for the first half-turn of the parametrization
    pub upper_bias: f32,
    pub lower_bias: f32,
    pub height_base: f32,
    pub height_gain: f32,
    pub radius: Span,
    pub alpha: Span,
    pub glow: Span,
    pub flicker_phase: Span,
    /// Radians per millisecond of the flicker clock
    pub clock_rate: f64,
    pub flicker_primary_gain: f32,
    pub flicker_secondary_gain: f32,
    pub flicker_secondary_time_freq: f32,
    pub flicker_secondary_phase_freq: f32,
    /// How much flicker moves the drawn radius and opacity
    pub flicker_radius_gain: f32,
    pub flicker_alpha_gain: f32,
    pub blur_base: f32,
    pub blur_gain: f32,
    pub color: Rgb,
}

impl Default for SkeletonTuning {
    fn default() -> Self {
        Self {
            count: 95,
            radius_divisor: 2.04,
            shape_base: 0.98,
            shape_cos: 0.26,
            upper_bias: 1.46,
            lower_bias: 1.26,
            height_base: 0.92,
            height_gain: 0.13,
            radius: Span::new(0.19, 0.32),
            alpha: Span::new(0.38, 0.67),
            glow: Span::new(0.6, 1.0),
            flicker_phase: Span::new(0.0, std::f32::consts::TAU),
            clock_rate: 0.0015,
            flicker_primary_gain: 0.2,
            flicker_secondary_gain: 0.11,
            flicker_secondary_time_freq: 0.7,
            flicker_secondary_phase_freq: 1.13,
            flicker_radius_gain: 0.18,
            flicker_alpha_gain: 0.3,
            blur_base: 11.0,
            blur_gain: 13.0,
            color: Rgb::BASE,
        }
    }
}

impl SkeletonTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount {
                name: "skeleton.count",
                value: self.count,
            });
        }
        validate_positive("skeleton.clock_rate", self.clock_rate)?;
        validate_positive("skeleton.radius_divisor", f64::from(self.radius_divisor))?;
        for (name, value) in [
            ("skeleton.shape_base", self.shape_base),
            ("skeleton.shape_cos", self.shape_cos),
            ("skeleton.upper_bias", self.upper_bias),
            ("skeleton.lower_bias", self.lower_bias),
            ("skeleton.height_base", self.height_base),
            ("skeleton.height_gain", self.height_gain),
            ("skeleton.flicker_primary_gain", self.flicker_primary_gain),
            ("skeleton.flicker_secondary_gain", self.flicker_secondary_gain),
            ("skeleton.flicker_secondary_time_freq", self.flicker_secondary_time_freq),
            ("skeleton.flicker_secondary_phase_freq", self.flicker_secondary_phase_freq),
            ("skeleton.flicker_radius_gain", self.flicker_radius_gain),
            ("skeleton.flicker_alpha_gain", self.flicker_alpha_gain),
            ("skeleton.blur_base", self.blur_base),
            ("skeleton.blur_gain", self.blur_gain),
        ] {
            validate_finite(name, value)?;
        }
        self.radius.validate("skeleton.radius")?;
        self.alpha.validate("skeleton.alpha")?;
        self.glow.validate("skeleton.glow")?;
        self.flicker_phase.validate("skeleton.flicker_phase")
    }
}
