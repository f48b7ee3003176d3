//! Respawn policy
//!
//! A flame particle dies when its lifetime runs out or when it drifts past the
//! margin around the canvas. Death is an expected transition: the particle is
//! redrawn in place from the generator, so population size never changes.

use crate::config::FieldTuning;
use crate::core_types::Canvas;
use crate::field::generator::spawn_flame;
use crate::field::particle::FlameParticle;
use rand::Rng;

/// Outcome of the per-frame death check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fate {
    Alive,
    /// Lifetime reached zero
    Expired,
    /// Left the live region around the canvas
    Escaped,
}

impl Fate {
    #[inline]
    pub fn is_dead(self) -> bool {
        !matches!(self, Fate::Alive)
    }
}

/// Classify `particle` after integration.
///
/// Expiry wins over escape when both apply.
pub fn fate(particle: &FlameParticle, canvas: &Canvas, tuning: &FieldTuning) -> Fate {
    if particle.life <= 0.0 {
        Fate::Expired
    } else if !canvas
        .inset(tuning.respawn.margin_fraction)
        .contains(particle.position)
    {
        Fate::Escaped
    } else {
        Fate::Alive
    }
}

/// Replace the whole particle state with a fresh generator draw.
pub fn respawn<R: Rng + ?Sized>(
    particle: &mut FlameParticle,
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) {
    *particle = spawn_flame(canvas, tuning, rng);
}

/// Respawn `particle` if it is dead, reporting why.
pub fn recycle_if_dead<R: Rng + ?Sized>(
    particle: &mut FlameParticle,
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) -> Fate {
    let fate = fate(particle, canvas, tuning);
    if fate.is_dead() {
        respawn(particle, canvas, tuning, rng);
    }
    fate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{FrameClock, Vec2};
    use crate::field::integrator::{integrate, motion_terms};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (Canvas, FieldTuning, StdRng) {
        (Canvas::default(), FieldTuning::default(), StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_expired_particle_respawns_with_fresh_life() {
        let (canvas, tuning, mut rng) = setup();
        for seed in 0..200 {
            let mut p = spawn_flame(&canvas, &tuning, &mut StdRng::seed_from_u64(seed));
            p.life = 1.0;
            integrate(&mut p, FrameClock::from_millis(100.0), &tuning.motion, &mut rng);
            let fate = recycle_if_dead(&mut p, &canvas, &tuning, &mut rng);
            assert!(fate.is_dead(), "particle outlived its lifetime");
            assert!(p.life > 0.0);
            assert!(tuning.spawn.life.contains(p.life));
        }
    }

    #[test]
    fn test_escape_through_each_edge() {
        let (canvas, tuning, mut rng) = setup();
        let (w, h) = (canvas.width(), canvas.height());
        let outside = [
            Vec2::new(0.005 * w, h / 2.0),
            Vec2::new(0.995 * w, h / 2.0),
            Vec2::new(w / 2.0, 0.005 * h),
            Vec2::new(w / 2.0, 0.995 * h),
            Vec2::new(-40.0, -40.0),
        ];
        for position in outside {
            let mut p = spawn_flame(&canvas, &tuning, &mut rng);
            p.life = 500.0;
            p.position = position;
            assert_eq!(fate(&p, &canvas, &tuning), Fate::Escaped);
            assert_eq!(recycle_if_dead(&mut p, &canvas, &tuning, &mut rng), Fate::Escaped);
            assert!(canvas.inset(0.01).contains(p.position()));
        }
    }

    #[test]
    fn test_escape_after_integrating_across_the_margin() {
        let (canvas, tuning, mut rng) = setup();
        let live = canvas.inset(tuning.respawn.margin_fraction);
        let clock = FrameClock::from_millis(250.0);
        let starts = [
            Vec2::new(live.min.x + 0.01, canvas.height() / 2.0),
            Vec2::new(live.max.x - 0.01, canvas.height() / 2.0),
        ];

        for start in starts {
            let mut escapes = 0;
            for seed in 0..200 {
                let mut p = spawn_flame(&canvas, &tuning, &mut StdRng::seed_from_u64(seed));
                p.life = 500.0;
                p.lift = false;
                p.position = start;

                // Where the frame's displacement will carry it.
                let mut stepped = p.clone();
                stepped.phase += stepped.speed;
                stepped.orbit_angle += stepped.orbit_speed;
                let landing = stepped.position
                    + motion_terms(&stepped, clock, &tuning.motion).displacement(&tuning.motion);

                integrate(&mut p, clock, &tuning.motion, &mut rng);
                assert_eq!(p.position, landing);
                let expected = if live.contains(landing) {
                    Fate::Alive
                } else {
                    escapes += 1;
                    Fate::Escaped
                };
                assert_eq!(recycle_if_dead(&mut p, &canvas, &tuning, &mut rng), expected);
                assert!(live.contains(p.position()));
            }
            assert!(escapes > 0, "no particle drifted out past {start:?}");
        }
    }

    #[test]
    fn test_expiry_wins_over_escape() {
        let (canvas, tuning, mut rng) = setup();
        let mut p = spawn_flame(&canvas, &tuning, &mut rng);
        p.life = 0.0;
        p.position = Vec2::new(-1.0, -1.0);
        assert_eq!(fate(&p, &canvas, &tuning), Fate::Expired);
    }

    #[test]
    fn test_live_particle_is_untouched() {
        let (canvas, tuning, mut rng) = setup();
        let mut p = spawn_flame(&canvas, &tuning, &mut rng);
        p.life = 10.0;
        p.position = Vec2::new(canvas.width() / 2.0, canvas.height() / 2.0);
        let before = p.clone();
        assert_eq!(recycle_if_dead(&mut p, &canvas, &tuning, &mut rng), Fate::Alive);
        assert_eq!(p, before);
    }
}
