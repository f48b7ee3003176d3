//! Render tiers and haze rules for flame particles

use super::span::{validate_finite, validate_probability};
use crate::core_types::Rgb;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Glow treatment for one class of flame particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowTier {
    pub shadow: Rgb,
    pub blur_base: f32,
    pub blur_gain: f32,
    pub alpha_base: f32,
    pub alpha_gain: f32,
}

impl GlowTier {
    /// Shadow blur radius for a particle with `glow`
    #[inline]
    pub fn blur(&self, glow: f32) -> f32 {
        self.blur_base + glow * self.blur_gain
    }

    /// Draw opacity before clamping; `alpha` is the particle's own opacity
    #[inline]
    pub fn alpha(&self, glow: f32, alpha: f32) -> f32 {
        self.alpha_base + glow * self.alpha_gain + alpha
    }
}

/// Soft bloom occasionally drawn behind small particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazeRule {
    /// Only particles strictly smaller than this qualify
    pub max_radius: f32,
    /// Per-frame chance for a qualifying particle
    pub chance: f32,
    pub radius_scale: f32,
    pub alpha: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTuning {
    pub core: GlowTier,
    pub bright: GlowTier,
    pub dim: GlowTier,
    /// Core particles larger than this use `hot_fill`, others `mid_fill`
    pub hot_radius_threshold: f32,
    /// Non-core particles above either threshold use the bright tier
    pub bright_radius_threshold: f32,
    pub bright_glow_threshold: f32,
    pub hot_fill: Rgb,
    pub mid_fill: Rgb,
    pub base_fill: Rgb,
    pub core_haze: HazeRule,
    pub outer_haze: HazeRule,
}

impl Default for RenderTuning {
    fn default() -> Self {
        Self {
            core: GlowTier {
                shadow: Rgb::CORE,
                blur_base: 28.0,
                blur_gain: 56.0,
                alpha_base: 0.44,
                alpha_gain: 1.7,
            },
            bright: GlowTier {
                shadow: Rgb::GLOW,
                blur_base: 10.0,
                blur_gain: 17.0,
                alpha_base: 0.23,
                alpha_gain: 1.4,
            },
            dim: GlowTier {
                shadow: Rgb::GLOW,
                blur_base: 6.0,
                blur_gain: 7.0,
                alpha_base: 0.16,
                alpha_gain: 1.1,
            },
            hot_radius_threshold: 1.0,
            bright_radius_threshold: 1.10,
            bright_glow_threshold: 0.13,
            hot_fill: Rgb::HOT,
            mid_fill: Rgb::MID,
            base_fill: Rgb::BASE,
            core_haze: HazeRule {
                max_radius: 0.16,
                chance: 0.08,
                radius_scale: 12.4,
                alpha: 0.10,
                color: Rgb::CORE,
            },
            outer_haze: HazeRule {
                max_radius: 0.13,
                chance: 0.05,
                radius_scale: 8.2,
                alpha: 0.05,
                color: Rgb::BASE,
            },
        }
    }
}

impl RenderTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, tier) in [
            ("render.core", &self.core),
            ("render.bright", &self.bright),
            ("render.dim", &self.dim),
        ] {
            for value in [tier.blur_base, tier.blur_gain, tier.alpha_base, tier.alpha_gain] {
                validate_finite(name, value)?;
            }
        }
        for (name, value) in [
            ("render.hot_radius_threshold", self.hot_radius_threshold),
            ("render.bright_radius_threshold", self.bright_radius_threshold),
            ("render.bright_glow_threshold", self.bright_glow_threshold),
        ] {
            validate_finite(name, value)?;
        }
        for (name, haze) in [
            ("render.core_haze", &self.core_haze),
            ("render.outer_haze", &self.outer_haze),
        ] {
            validate_probability(name, haze.chance)?;
            for value in [haze.max_radius, haze.radius_scale, haze.alpha] {
                validate_finite(name, value)?;
            }
        }
        Ok(())
    }
}
