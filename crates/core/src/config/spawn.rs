//! Spawn distribution for flame particles
//!
//! Describes the teardrop silhouette and the per-particle parameter draws. The
//! same distribution serves initial creation and every respawn.

use super::span::{validate_finite, validate_probability, Span};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Teardrop shape and per-particle parameter spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Anchor of the silhouette as a fraction of canvas height (bottom-center)
    pub anchor_y_fraction: f32,
    /// Base radius is `width / radius_divisor`
    pub radius_divisor: f32,
    /// Chance a sample uses the flatter `flare_exponent`
    pub flare_probability: f32,
    pub flare_exponent: f32,
    pub base_exponent: f32,
    /// Angular narrowing: radius factor `shape_base - shape_cos·cos(t)`
    pub shape_base: f32,
    pub shape_cos: f32,
    /// Horizontal stretch applied to every sample
    pub horizontal_stretch: Span,
    /// Chance a sample uses `tall_bias` instead of `base_bias`
    pub tall_probability: f32,
    pub tall_bias: f32,
    pub base_bias: f32,
    /// Width of the vertical bias draw above the chosen bias
    pub bias_spread: f32,
    /// Height factor `height_base + (r / r_max)² · height_gain`
    pub height_base: f32,
    pub height_gain: f32,
    /// Chance of an extra boundary jitter offset
    pub jitter_probability: f32,
    pub jitter_x: Span,
    pub jitter_y: Span,

    /// Core anchor below the canvas as a fraction of height
    pub core_anchor_y_fraction: f32,
    /// Core threshold radius as a fraction of canvas width
    pub core_radius_fraction: f32,

    /// Chance a particle is a large ember
    pub ember_probability: f32,
    pub ember_radius: Span,
    pub radius: Span,
    /// Chance a particle carries a bright glow
    pub bright_glow_probability: f32,
    pub bright_glow: Span,
    pub glow: Span,
    pub core_alpha: Span,
    pub outer_alpha: Span,

    pub phase: Span,
    pub speed: Span,
    pub swirl: Span,
    pub chaos: Span,
    pub burst: Span,
    pub orbit_radius: Span,
    pub orbit_angle: Span,
    pub orbit_speed: Span,
    /// Chance a particle drifts upwards
    pub lift_probability: f32,
    /// Lifetime in frames
    pub life: Span,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        use std::f32::consts::TAU;
        Self {
            anchor_y_fraction: 0.99,
            radius_divisor: 2.02,
            flare_probability: 0.22,
            flare_exponent: 1.04,
            base_exponent: 1.22,
            shape_base: 1.17,
            shape_cos: 0.33,
            horizontal_stretch: Span::new(0.96, 1.15),
            tall_probability: 0.22,
            tall_bias: 1.54,
            base_bias: 1.26,
            bias_spread: 0.14,
            height_base: 0.93,
            height_gain: 0.17,
            jitter_probability: 0.13,
            jitter_x: Span::new(-12.0, 12.0),
            jitter_y: Span::new(-8.0, 14.0),

            core_anchor_y_fraction: 1.03,
            core_radius_fraction: 0.22,

            ember_probability: 1.0 / 61.0,
            ember_radius: Span::new(1.17, 1.8),
            radius: Span::new(0.10, 0.21),
            bright_glow_probability: 1.0 / 81.0,
            bright_glow: Span::new(0.59, 1.11),
            glow: Span::new(0.09, 0.17),
            core_alpha: Span::new(0.22, 0.48),
            outer_alpha: Span::new(0.15, 0.24),

            phase: Span::new(0.0, TAU),
            speed: Span::new(0.12, 0.22),
            swirl: Span::new(2.05, 3.5),
            chaos: Span::new(1.13, 2.48),
            burst: Span::new(1.31, 3.1),
            orbit_radius: Span::new(2.0, 16.0),
            orbit_angle: Span::new(0.0, TAU),
            orbit_speed: Span::new(0.002, 0.018),
            lift_probability: 0.33,
            life: Span::new(170.0, 690.0),
        }
    }
}

impl SpawnTuning {
    /// Span the vertical stretch is drawn from for a sample using `bias`
    #[inline]
    pub fn vertical_bias(&self, bias: f32) -> Span {
        Span::new(bias, bias + self.bias_spread)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("spawn.flare_probability", self.flare_probability),
            ("spawn.tall_probability", self.tall_probability),
            ("spawn.jitter_probability", self.jitter_probability),
            ("spawn.ember_probability", self.ember_probability),
            ("spawn.bright_glow_probability", self.bright_glow_probability),
            ("spawn.lift_probability", self.lift_probability),
        ] {
            validate_probability(name, value)?;
        }
        for (name, value) in [
            ("spawn.anchor_y_fraction", self.anchor_y_fraction),
            ("spawn.flare_exponent", self.flare_exponent),
            ("spawn.base_exponent", self.base_exponent),
            ("spawn.shape_base", self.shape_base),
            ("spawn.shape_cos", self.shape_cos),
            ("spawn.tall_bias", self.tall_bias),
            ("spawn.base_bias", self.base_bias),
            ("spawn.height_base", self.height_base),
            ("spawn.height_gain", self.height_gain),
            ("spawn.core_anchor_y_fraction", self.core_anchor_y_fraction),
            ("spawn.core_radius_fraction", self.core_radius_fraction),
        ] {
            validate_finite(name, value)?;
        }
        if !(self.bias_spread.is_finite() && self.bias_spread >= 0.0) {
            return Err(ConfigError::InvalidRange {
                name: "spawn.bias_spread",
                min: 0.0,
                max: self.bias_spread,
            });
        }
        for (name, span) in [
            ("spawn.tall_bias", self.vertical_bias(self.tall_bias)),
            ("spawn.base_bias", self.vertical_bias(self.base_bias)),
            ("spawn.horizontal_stretch", self.horizontal_stretch),
            ("spawn.jitter_x", self.jitter_x),
            ("spawn.jitter_y", self.jitter_y),
            ("spawn.ember_radius", self.ember_radius),
            ("spawn.radius", self.radius),
            ("spawn.bright_glow", self.bright_glow),
            ("spawn.glow", self.glow),
            ("spawn.core_alpha", self.core_alpha),
            ("spawn.outer_alpha", self.outer_alpha),
            ("spawn.phase", self.phase),
            ("spawn.speed", self.speed),
            ("spawn.swirl", self.swirl),
            ("spawn.chaos", self.chaos),
            ("spawn.burst", self.burst),
            ("spawn.orbit_radius", self.orbit_radius),
            ("spawn.orbit_angle", self.orbit_angle),
            ("spawn.orbit_speed", self.orbit_speed),
        ] {
            span.validate(name)?;
        }
        // Respawn relies on a fresh particle having life left to spend.
        self.life.validate("spawn.life")?;
        if self.life.min < 1.0 {
            return Err(ConfigError::InvalidRange {
                name: "spawn.life",
                min: self.life.min,
                max: self.life.max,
            });
        }
        if !(self.radius_divisor.is_finite() && self.radius_divisor > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "spawn.radius_divisor",
                value: f64::from(self.radius_divisor),
            });
        }
        Ok(())
    }
}
