//! Per-frame integrator
//!
//! Motion is a superposition of independent periodic signals, not a fire
//! simulation. Each tick:
//!
//! 1. Advance the particle's own phase `φ` and orbital angle `θ`.
//! 2. Evaluate four terms from the global flame clock `g` and `φ`:
//!    - **orbit**: `R·(cos(θ+φ)·(1 + 0.2 sin φ), sin(θ+φ)·(1 + 0.2 cos 1.3φ))`
//!    - **swirl**: `sin(g + φ·swirl) · chaos · 0.75`
//!    - **burst**: `sin(1.7g + 2.7φ + 0.012·x₀) · chaos · 0.31 · burst`
//!    - **flicker**: `sin(9φ + 3g + 0.017·x) · 0.63`
//! 3. Lifting particles rise by a small per-frame amount.
//! 4. Weighted sums of the terms (plus a slow drift) move the particle.
//! 5. One frame of lifetime is spent.

use crate::config::MotionTuning;
use crate::core_types::{FrameClock, Vec2};
use crate::field::particle::FlameParticle;
use rand::Rng;

/// The motion terms evaluated for one particle on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTerms {
    pub drift: Vec2,
    pub orbit: Vec2,
    pub swirl: f32,
    pub burst: f32,
    pub flicker: f32,
}

impl MotionTerms {
    /// Position delta from the weighted sum of all terms
    pub fn displacement(&self, tuning: &MotionTuning) -> Vec2 {
        let wx = &tuning.x_weights;
        let wy = &tuning.y_weights;
        Vec2::new(
            self.drift.x * wx.drift
                + self.swirl * wx.swirl
                + self.burst * wx.burst
                + self.flicker * wx.flicker
                + self.orbit.x * wx.orbit,
            self.drift.y * wy.drift
                + self.swirl * wy.swirl
                + self.burst * wy.burst
                + self.flicker * wy.flicker
                + self.orbit.y * wy.orbit,
        )
    }
}

/// Evaluate the motion terms for `particle` at `clock`.
///
/// Pure: reads the particle's current phase, angles and position without
/// advancing anything.
pub fn motion_terms(particle: &FlameParticle, clock: FrameClock, tuning: &MotionTuning) -> MotionTerms {
    let phi = particle.phase;
    let theta = particle.orbit_angle + phi;
    let rate = tuning.clock_rate;

    // Non-integer time multiples get their own wrapped angle.
    let g = clock.phase(rate);
    let g_burst = clock.phase(rate * f64::from(tuning.burst_time_freq));
    let g_flicker = clock.phase(rate * f64::from(tuning.flicker_time_freq));

    let orbit = Vec2::new(
        theta.cos() * particle.orbit_radius * (1.0 + tuning.orbit_breathing * phi.sin()),
        theta.sin()
            * particle.orbit_radius
            * (1.0 + tuning.orbit_breathing * (phi * tuning.orbit_breathing_y_freq).cos()),
    );
    let swirl = (g + phi * particle.swirl).sin() * particle.chaos * tuning.swirl_gain;
    let burst = (g_burst
        + phi * tuning.burst_phase_freq
        + particle.origin.x * tuning.burst_origin_freq)
        .sin()
        * particle.chaos
        * tuning.burst_gain
        * particle.burst;
    let flicker = (phi * tuning.flicker_phase_freq
        + g_flicker
        + particle.position.x * tuning.flicker_x_freq)
        .sin()
        * tuning.flicker_gain;
    let drift = Vec2::new(
        (phi + particle.origin.y * tuning.drift_x_origin_freq).sin(),
        (phi + particle.origin.x * tuning.drift_y_origin_freq).cos(),
    );

    MotionTerms {
        drift,
        orbit,
        swirl,
        burst,
        flicker,
    }
}

/// Advance `particle` by one frame.
pub fn integrate<R: Rng + ?Sized>(
    particle: &mut FlameParticle,
    clock: FrameClock,
    tuning: &MotionTuning,
    rng: &mut R,
) {
    particle.phase += particle.speed;
    particle.orbit_angle += particle.orbit_speed;

    let terms = motion_terms(particle, clock, tuning);

    if particle.lift {
        particle.position.y -= tuning.lift.sample(rng);
    }
    particle.position += terms.displacement(tuning);

    particle.life -= 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldTuning, Span};
    use crate::core_types::Canvas;
    use crate::field::generator::spawn_flame;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle() -> FlameParticle {
        let canvas = Canvas::default();
        let tuning = FieldTuning::default();
        spawn_flame(&canvas, &tuning, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_integrate_advances_phase_and_life() {
        let tuning = MotionTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = particle();
        let (phase, angle, life, origin) = (p.phase, p.orbit_angle, p.life, p.origin);

        integrate(&mut p, FrameClock::from_millis(1000.0), &tuning, &mut rng);

        assert_relative_eq!(p.phase, phase + p.speed);
        assert_relative_eq!(p.orbit_angle, angle + p.orbit_speed);
        assert_eq!(p.life, life - 1.0);
        assert_eq!(p.origin, origin);
    }

    #[test]
    fn test_displacement_matches_terms_without_lift() {
        let tuning = MotionTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = particle();
        p.lift = false;
        let start = p.position;
        let clock = FrameClock::from_millis(5_000.0);

        let mut advanced = p.clone();
        advanced.phase += advanced.speed;
        advanced.orbit_angle += advanced.orbit_speed;
        let expected = motion_terms(&advanced, clock, &tuning).displacement(&tuning);

        integrate(&mut p, clock, &tuning, &mut rng);
        assert_relative_eq!(p.position.x, start.x + expected.x, epsilon = 1e-4);
        assert_relative_eq!(p.position.y, start.y + expected.y, epsilon = 1e-4);
    }

    #[test]
    fn test_lift_biases_upwards() {
        let mut tuning = MotionTuning::default();
        tuning.lift = Span::new(0.2, 0.2);
        let clock = FrameClock::from_millis(800.0);
        let mut lifted = particle();
        lifted.lift = true;
        let mut still = lifted.clone();
        still.lift = false;

        let mut rng = StdRng::seed_from_u64(9);
        integrate(&mut lifted, clock, &tuning, &mut rng);
        integrate(&mut still, clock, &tuning, &mut rng);

        assert_relative_eq!(still.position.y - lifted.position.y, 0.2, epsilon = 1e-3);
        assert_relative_eq!(still.position.x, lifted.position.x);
    }

    #[test]
    fn test_terms_are_bounded() {
        let tuning = MotionTuning::default();
        let p = particle();
        for step in 0..200 {
            let terms = motion_terms(&p, FrameClock::from_millis(f64::from(step) * 16.0), &tuning);
            assert!(terms.swirl.abs() <= p.chaos * tuning.swirl_gain + 1e-5);
            assert!(terms.flicker.abs() <= tuning.flicker_gain + 1e-5);
            assert!(terms.orbit.norm() <= p.orbit_radius * 1.2 * std::f32::consts::SQRT_2 + 1e-4);
        }
    }
}
