//! Particle field: populations and the per-frame update
//!
//! `advance` is the whole simulation step. It takes the owned population by
//! reference and knows nothing about how frames are scheduled, which keeps it
//! testable without a host.

pub mod generator;
pub mod integrator;
pub mod particle;
pub mod respawn;

pub use generator::{
    core_anchor, flame_population, is_core_point, live_teardrop_point, skeleton_point,
    skeleton_population, spawn_flame, spawn_skeleton, teardrop_point, SPAWN_ATTEMPTS,
};
pub use integrator::{integrate, motion_terms, MotionTerms};
pub use particle::{FlameParticle, SkeletonParticle};
pub use respawn::{fate, recycle_if_dead, respawn, Fate};

use crate::config::FieldTuning;
use crate::core_types::{Canvas, FrameClock};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Both particle populations of one visualization instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub(crate) flames: Vec<FlameParticle>,
    pub(crate) skeleton: Vec<SkeletonParticle>,
}

impl Population {
    /// Generate both populations for `canvas`.
    pub fn generate<R: Rng + ?Sized>(canvas: &Canvas, tuning: &FieldTuning, rng: &mut R) -> Self {
        Self {
            flames: flame_population(canvas, tuning, rng),
            skeleton: skeleton_population(canvas, tuning, rng),
        }
    }

    pub fn flames(&self) -> &[FlameParticle] {
        &self.flames
    }

    pub fn skeleton(&self) -> &[SkeletonParticle] {
        &self.skeleton
    }

    /// Number of flame particles currently classified as core
    pub fn core_count(&self) -> usize {
        self.flames.iter().filter(|p| p.is_core).count()
    }
}

/// What happened to the flame population during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Particles recycled because their lifetime ran out
    pub expired: usize,
    /// Particles recycled because they left the live region
    pub escaped: usize,
}

impl FrameReport {
    #[inline]
    pub fn respawned(&self) -> usize {
        self.expired + self.escaped
    }

    fn record(&mut self, fate: Fate) {
        match fate {
            Fate::Alive => {}
            Fate::Expired => self.expired += 1,
            Fate::Escaped => self.escaped += 1,
        }
    }
}

/// Integrate every flame particle by one frame, then recycle the dead ones.
///
/// The skeleton is left untouched: its layout is fixed for the life of the
/// population and only its rendering flickers.
pub fn advance<R: Rng + ?Sized>(
    population: &mut Population,
    clock: FrameClock,
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) -> FrameReport {
    let mut report = FrameReport::default();
    for particle in &mut population.flames {
        integrate(particle, clock, &tuning.motion, rng);
        report.record(recycle_if_dead(particle, canvas, tuning, rng));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_advance_keeps_every_flame_alive_and_inside() {
        let canvas = Canvas::default();
        let tuning = FieldTuning::default().with_counts(400, 20);
        let mut rng = StdRng::seed_from_u64(5);
        let mut population = Population::generate(&canvas, &tuning, &mut rng);
        let live = canvas.inset(tuning.respawn.margin_fraction);

        let mut clock = FrameClock::default();
        let mut total = FrameReport::default();
        for _ in 0..300 {
            clock = clock.advanced_by(16.0);
            let report = advance(&mut population, clock, &canvas, &tuning, &mut rng);
            total.expired += report.expired;
            total.escaped += report.escaped;
            for p in population.flames() {
                assert!(p.life() > 0.0);
                assert!(live.contains(p.position()));
            }
        }
        assert_eq!(population.flames().len(), 400);
        assert_eq!(population.skeleton().len(), 20);
        assert!(total.escaped > 0, "nothing ever left the canvas");
    }

    #[test]
    fn test_same_seed_same_field() {
        let canvas = Canvas::default();
        let tuning = FieldTuning::default().with_counts(200, 10);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut population = Population::generate(&canvas, &tuning, &mut rng);
            for frame in 1..=50 {
                advance(
                    &mut population,
                    FrameClock::from_millis(f64::from(frame) * 16.7),
                    &canvas,
                    &tuning,
                    &mut rng,
                );
            }
            population
        };
        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }
}
