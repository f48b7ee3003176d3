//! Renderer
//!
//! Draws a frame onto anything implementing [`Surface`]: clear, the flickering
//! skeleton outline, then every flame particle after it has been advanced.
//! Surfaces only need to fill a circle with a blurred shadow, the same
//! primitive a 2D canvas context offers through `arc` + `shadowBlur`.

mod framebuffer;
mod recording;

pub use framebuffer::Framebuffer;
pub use recording::RecordingSurface;

use crate::config::{FieldTuning, HazeRule, RenderTuning, SkeletonTuning};
use crate::core_types::{Canvas, FrameClock, Rgb, Vec2};
use crate::field::{advance, FlameParticle, FrameReport, Population, SkeletonParticle};
use rand::Rng;

/// Filled circle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Fill style for one circle.
///
/// `alpha` is stored unclamped, exactly as the tier formulas produce it;
/// surfaces clamp to `[0, 1]` when compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Rgb,
    pub shadow: Rgb,
    /// Shadow blur radius in pixels, 0 for none
    pub blur: f32,
    pub alpha: f32,
}

impl Paint {
    /// Plain fill without a shadow
    pub fn solid(fill: Rgb, alpha: f32) -> Self {
        Self {
            fill,
            shadow: fill,
            blur: 0.0,
            alpha,
        }
    }

    /// Opacity actually composited
    #[inline]
    pub fn effective_alpha(&self) -> f32 {
        self.alpha.clamp(0.0, 1.0)
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Fill `circle`, drawing its shadow first when `paint.blur > 0`
    fn fill_circle(&mut self, circle: Circle, paint: Paint);
}

/// Paint for a skeleton particle given its current flicker value
pub fn skeleton_paint(particle: &SkeletonParticle, flicker: f32, tuning: &SkeletonTuning) -> (Circle, Paint) {
    let circle = Circle {
        center: particle.position,
        radius: (particle.radius + flicker * tuning.flicker_radius_gain).max(0.0),
    };
    let paint = Paint {
        fill: tuning.color,
        shadow: tuning.color,
        blur: tuning.blur_base + particle.glow * tuning.blur_gain,
        alpha: particle.alpha + flicker * tuning.flicker_alpha_gain,
    };
    (circle, paint)
}

/// Visual tier of a flame particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlameTier {
    /// Hot inner region, strongest glow
    Core,
    /// Large or glowing outer particle
    Bright,
    /// Everything else
    Dim,
}

impl FlameTier {
    pub fn of(particle: &FlameParticle, tuning: &RenderTuning) -> Self {
        if particle.is_core {
            Self::Core
        } else if particle.radius > tuning.bright_radius_threshold
            || particle.glow > tuning.bright_glow_threshold
        {
            Self::Bright
        } else {
            Self::Dim
        }
    }
}

/// Paint for a flame particle, selected by its tier
pub fn flame_paint(particle: &FlameParticle, tuning: &RenderTuning) -> Paint {
    let (tier, fill) = match FlameTier::of(particle, tuning) {
        FlameTier::Core => {
            let fill = if particle.radius > tuning.hot_radius_threshold {
                tuning.hot_fill
            } else {
                tuning.mid_fill
            };
            (&tuning.core, fill)
        }
        FlameTier::Bright => (&tuning.bright, tuning.mid_fill),
        FlameTier::Dim => (&tuning.dim, tuning.base_fill),
    };
    Paint {
        fill,
        shadow: tier.shadow,
        blur: tier.blur(particle.glow),
        alpha: tier.alpha(particle.glow, particle.alpha),
    }
}

/// Haze rule a particle qualifies for, ignoring the per-frame chance
pub fn haze_rule<'a>(particle: &FlameParticle, tuning: &'a RenderTuning) -> Option<&'a HazeRule> {
    let rule = if particle.is_core {
        &tuning.core_haze
    } else {
        &tuning.outer_haze
    };
    (particle.radius < rule.max_radius).then_some(rule)
}

/// Roll the per-frame haze chance for `particle`.
pub fn haze<R: Rng + ?Sized>(
    particle: &FlameParticle,
    tuning: &RenderTuning,
    rng: &mut R,
) -> Option<(Circle, Paint)> {
    let rule = haze_rule(particle, tuning)?;
    if !rng.random_bool(f64::from(rule.chance)) {
        return None;
    }
    let circle = Circle {
        center: particle.position,
        radius: particle.radius * rule.radius_scale,
    };
    Some((circle, Paint::solid(rule.color, rule.alpha)))
}

/// Draw the skeleton outline at `clock`.
pub fn draw_skeleton<S: Surface + ?Sized>(
    surface: &mut S,
    skeleton: &[SkeletonParticle],
    clock: FrameClock,
    tuning: &SkeletonTuning,
) {
    for particle in skeleton {
        let flicker = particle.flicker(clock, tuning);
        let (circle, paint) = skeleton_paint(particle, flicker, tuning);
        surface.fill_circle(circle, paint);
    }
}

/// Draw every flame particle at its current position, haze behind.
pub fn draw_flames<S: Surface + ?Sized, R: Rng + ?Sized>(
    surface: &mut S,
    flames: &[FlameParticle],
    tuning: &RenderTuning,
    rng: &mut R,
) {
    for particle in flames {
        if let Some((circle, paint)) = haze(particle, tuning, rng) {
            surface.fill_circle(circle, paint);
        }
        surface.fill_circle(
            Circle {
                center: particle.position,
                radius: particle.radius,
            },
            flame_paint(particle, tuning),
        );
    }
}

/// One full frame: clear, skeleton, advance the flames, draw the flames.
pub fn render_frame<S: Surface + ?Sized, R: Rng + ?Sized>(
    surface: &mut S,
    population: &mut Population,
    clock: FrameClock,
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) -> FrameReport {
    surface.clear();
    draw_skeleton(surface, &population.skeleton, clock, &tuning.skeleton);
    let report = advance(population, clock, canvas, tuning, rng);
    draw_flames(surface, &population.flames, &tuning.render, rng);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::spawn_flame;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flame(is_core: bool, radius: f32, glow: f32) -> FlameParticle {
        let mut p = spawn_flame(
            &Canvas::default(),
            &FieldTuning::default(),
            &mut StdRng::seed_from_u64(0),
        );
        p.is_core = is_core;
        p.radius = radius;
        p.glow = glow;
        p.alpha = 0.2;
        p
    }

    #[test]
    fn test_core_tier_paint() {
        let tuning = RenderTuning::default();
        let small = flame_paint(&flame(true, 0.15, 0.1), &tuning);
        assert_eq!(small.fill, Rgb::MID);
        assert_eq!(small.shadow, Rgb::CORE);
        assert!((small.blur - (28.0 + 5.6)).abs() < 1e-4);
        assert!((small.alpha - (0.44 + 0.17 + 0.2)).abs() < 1e-5);

        let ember = flame_paint(&flame(true, 1.5, 0.1), &tuning);
        assert_eq!(ember.fill, Rgb::HOT);
    }

    #[test]
    fn test_outer_tiers() {
        let tuning = RenderTuning::default();
        assert_eq!(FlameTier::of(&flame(false, 1.5, 0.1), &tuning), FlameTier::Bright);
        assert_eq!(FlameTier::of(&flame(false, 0.15, 0.6), &tuning), FlameTier::Bright);
        assert_eq!(FlameTier::of(&flame(false, 0.15, 0.1), &tuning), FlameTier::Dim);

        let dim = flame_paint(&flame(false, 0.15, 0.1), &tuning);
        assert_eq!(dim.fill, Rgb::BASE);
        assert_eq!(dim.shadow, Rgb::GLOW);
        assert!((dim.blur - 6.7).abs() < 1e-4);
    }

    #[test]
    fn test_haze_eligibility() {
        let tuning = RenderTuning::default();
        assert!(haze_rule(&flame(true, 0.15, 0.1), &tuning).is_some());
        assert!(haze_rule(&flame(true, 0.18, 0.1), &tuning).is_none());
        assert!(haze_rule(&flame(false, 0.12, 0.1), &tuning).is_some());
        assert!(haze_rule(&flame(false, 0.14, 0.1), &tuning).is_none());
    }

    #[test]
    fn test_haze_rate_and_shape() {
        let tuning = RenderTuning::default();
        let particle = flame(true, 0.12, 0.1);
        let mut rng = StdRng::seed_from_u64(8);
        let mut hits = 0;
        for _ in 0..10_000 {
            if let Some((circle, paint)) = haze(&particle, &tuning, &mut rng) {
                hits += 1;
                assert!((circle.radius - 0.12 * 12.4).abs() < 1e-4);
                assert_eq!(paint.blur, 0.0);
                assert_eq!(paint.alpha, 0.10);
            }
        }
        // 8% of 10k
        assert!((600..1000).contains(&hits), "haze hits {hits}");
    }

    #[test]
    fn test_render_frame_order() {
        let canvas = Canvas::default();
        let tuning = FieldTuning::default().with_counts(50, 7);
        let mut rng = StdRng::seed_from_u64(4);
        let mut population = Population::generate(&canvas, &tuning, &mut rng);
        let mut surface = RecordingSurface::new();
        surface.fill_circle(
            Circle {
                center: Vec2::zeros(),
                radius: 1.0,
            },
            Paint::solid(Rgb::BASE, 1.0),
        );

        render_frame(
            &mut surface,
            &mut population,
            FrameClock::from_millis(16.0),
            &canvas,
            &tuning,
            &mut rng,
        );

        assert_eq!(surface.clears(), 1);
        let circles = surface.circles();
        assert!(circles.len() >= 57);
        // Skeleton first, at its fixed positions.
        for (drawn, particle) in circles.iter().zip(population.skeleton()) {
            assert_eq!(drawn.0.center, particle.position());
        }
        // Flames last, at their advanced positions.
        let last = circles.last().unwrap();
        assert_eq!(last.0.center, population.flames().last().unwrap().position());
    }
}
