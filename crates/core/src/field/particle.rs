//! Particle records for the two populations

use crate::config::SkeletonTuning;
use crate::core_types::{FrameClock, Vec2};
use serde::{Deserialize, Serialize};

/// One animated ember of the teardrop flame
///
/// Every field is drawn at spawn and redrawn wholesale at respawn. Only
/// `position`, `phase`, `orbit_angle` and `life` change in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlameParticle {
    pub(crate) position: Vec2,
    pub(crate) origin: Vec2,
    pub(crate) is_core: bool,
    pub(crate) radius: f32,
    pub(crate) alpha: f32,
    pub(crate) glow: f32,
    pub(crate) phase: f32,
    pub(crate) speed: f32,
    pub(crate) swirl: f32,
    pub(crate) chaos: f32,
    pub(crate) burst: f32,
    pub(crate) orbit_radius: f32,
    pub(crate) orbit_angle: f32,
    pub(crate) orbit_speed: f32,
    pub(crate) lift: bool,
    /// Remaining lifetime in frames
    pub(crate) life: f32,
}

impl FlameParticle {
    /// Current draw position
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position at the last (re)spawn
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Whether the particle belongs to the hot inner region
    #[inline]
    pub fn is_core(&self) -> bool {
        self.is_core
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn glow(&self) -> f32 {
        self.glow
    }

    /// Remaining lifetime in frames
    #[inline]
    pub fn life(&self) -> f32 {
        self.life
    }
}

/// One fixed point of the flickering outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonParticle {
    pub(crate) position: Vec2,
    pub(crate) radius: f32,
    pub(crate) alpha: f32,
    pub(crate) glow: f32,
    pub(crate) flicker_phase: f32,
}

impl SkeletonParticle {
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn glow(&self) -> f32 {
        self.glow
    }

    /// Flicker value at `clock`: two slow superposed waves offset by this
    /// particle's own phase. Bounded by the sum of both gains.
    pub fn flicker(&self, clock: FrameClock, tuning: &SkeletonTuning) -> f32 {
        // Each wave reduces its own angle; scaling an already wrapped angle by
        // a non-integer frequency would jump at every wrap.
        let primary = clock.phase(tuning.clock_rate);
        let secondary =
            clock.phase(tuning.clock_rate * f64::from(tuning.flicker_secondary_time_freq));
        (primary + self.flicker_phase).sin() * tuning.flicker_primary_gain
            + (secondary + self.flicker_phase * tuning.flicker_secondary_phase_freq).cos()
                * tuning.flicker_secondary_gain
    }
}
