//! Particle field generator
//!
//! Produces spawn states for flame particles and the fixed skeleton layout.
//!
//! # Teardrop sampling
//!
//! A flame point is drawn in polar form around an anchor at the bottom-center
//! of the canvas:
//!
//! ```text
//! t  ~ U[0, 2π)
//! r  = u^k · (w / 2.02) · (1.17 − 0.33·cos t)        k = 1.04 (flare) | 1.22
//! x  = cx + cos t · r · U[0.96, 1.15)
//! y  = cy − |sin t| · r · U[b, b + 0.14) · (0.93 + (r / r_max)² · 0.17)
//! ```
//!
//! The `cos t` factor narrows the shape toward the top and widens the base,
//! `|sin t|` folds every sample above the anchor, and the vertical bias `b`
//! (1.54 for a tall fraction, 1.26 otherwise) stretches the plume upward. A
//! small share of samples gets an extra jitter so the boundary is not smooth.
//!
//! The skeleton uses the same parametrization without randomness, so its
//! outline is a pure function of `(index, count, w, h)`.

use crate::config::FieldTuning;
use crate::core_types::{Canvas, Vec2};
use crate::field::particle::{FlameParticle, SkeletonParticle};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Teardrop draws tried before falling back to clamping into the live region
pub const SPAWN_ATTEMPTS: usize = 16;

/// Bottom-center anchor shared by the flame and skeleton shapes
#[inline]
fn silhouette_anchor(canvas: &Canvas, tuning: &FieldTuning) -> Vec2 {
    Vec2::new(
        canvas.width() / 2.0,
        canvas.height() * tuning.spawn.anchor_y_fraction,
    )
}

/// Raw teardrop sample, before clamping into the live region.
///
/// May land slightly outside the canvas (jitter, wide stretch draws).
pub fn teardrop_point<R: Rng + ?Sized>(canvas: &Canvas, tuning: &FieldTuning, rng: &mut R) -> Vec2 {
    let spawn = &tuning.spawn;
    let anchor = silhouette_anchor(canvas, tuning);
    let r_max = canvas.width() / spawn.radius_divisor;

    let t = rng.random_range(0.0..TAU);
    let exponent = if rng.random_bool(f64::from(spawn.flare_probability)) {
        spawn.flare_exponent
    } else {
        spawn.base_exponent
    };
    let r = rng.random::<f32>().powf(exponent) * r_max * (spawn.shape_base - spawn.shape_cos * t.cos());

    let mut x = anchor.x + t.cos() * r * spawn.horizontal_stretch.sample(rng);

    let bias = if rng.random_bool(f64::from(spawn.tall_probability)) {
        spawn.tall_bias
    } else {
        spawn.base_bias
    };
    let vertical = spawn.vertical_bias(bias).sample(rng);
    let height = spawn.height_base + (r / r_max).powi(2) * spawn.height_gain;
    let mut y = anchor.y - t.sin().abs() * r * vertical * height;

    if rng.random_bool(f64::from(spawn.jitter_probability)) {
        x += spawn.jitter_x.sample(rng);
        y += spawn.jitter_y.sample(rng);
    }

    Vec2::new(x, y)
}

/// Reference point of the hot region, just below the canvas bottom
#[inline]
pub fn core_anchor(canvas: &Canvas, tuning: &FieldTuning) -> Vec2 {
    Vec2::new(
        canvas.width() / 2.0,
        canvas.height() * tuning.spawn.core_anchor_y_fraction,
    )
}

/// Core classification: strictly closer to the core anchor than
/// `core_radius_fraction × width`.
#[inline]
pub fn is_core_point(point: Vec2, canvas: &Canvas, tuning: &FieldTuning) -> bool {
    (point - core_anchor(canvas, tuning)).norm() < canvas.width() * tuning.spawn.core_radius_fraction
}

/// Teardrop point inside the respawn live region.
///
/// Samples falling outside are redrawn, which keeps the teardrop shape intact.
/// Only after [`SPAWN_ATTEMPTS`] misses is the last draw clamped onto the edge.
pub fn live_teardrop_point<R: Rng + ?Sized>(
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) -> Vec2 {
    let live = canvas.inset(tuning.respawn.margin_fraction);
    let mut point = teardrop_point(canvas, tuning, rng);
    for _ in 1..SPAWN_ATTEMPTS {
        if live.contains(point) {
            return point;
        }
        point = teardrop_point(canvas, tuning, rng);
    }
    live.clamp(point)
}

/// Draw a complete flame particle state.
///
/// The position comes from [`live_teardrop_point`], so a fresh particle is
/// always inside `[0, w] × [0, h]` and survives its first check.
pub fn spawn_flame<R: Rng + ?Sized>(canvas: &Canvas, tuning: &FieldTuning, rng: &mut R) -> FlameParticle {
    let spawn = &tuning.spawn;
    let position = live_teardrop_point(canvas, tuning, rng);
    let is_core = is_core_point(position, canvas, tuning);

    let radius = if rng.random_bool(f64::from(spawn.ember_probability)) {
        spawn.ember_radius.sample(rng)
    } else {
        spawn.radius.sample(rng)
    };
    let glow = if rng.random_bool(f64::from(spawn.bright_glow_probability)) {
        spawn.bright_glow.sample(rng)
    } else {
        spawn.glow.sample(rng)
    };
    let alpha = if is_core {
        spawn.core_alpha.sample(rng)
    } else {
        spawn.outer_alpha.sample(rng)
    };

    FlameParticle {
        position,
        origin: position,
        is_core,
        radius,
        alpha,
        glow,
        phase: spawn.phase.sample(rng),
        speed: spawn.speed.sample(rng),
        swirl: spawn.swirl.sample(rng),
        chaos: spawn.chaos.sample(rng),
        burst: spawn.burst.sample(rng),
        orbit_radius: spawn.orbit_radius.sample(rng),
        orbit_angle: spawn.orbit_angle.sample(rng),
        orbit_speed: spawn.orbit_speed.sample(rng),
        lift: rng.random_bool(f64::from(spawn.lift_probability)),
        life: spawn.life.sample(rng),
    }
}

/// Outline point `index` of `total`, evenly spaced by angle.
///
/// Deterministic: no randomness is involved.
pub fn skeleton_point(canvas: &Canvas, tuning: &FieldTuning, index: usize, total: usize) -> Vec2 {
    let skeleton = &tuning.skeleton;
    let anchor = silhouette_anchor(canvas, tuning);

    let t = TAU * index as f32 / total as f32;
    let r = (canvas.width() / skeleton.radius_divisor) * (skeleton.shape_base - skeleton.shape_cos * t.cos());
    let bias = if t < PI {
        skeleton.upper_bias
    } else {
        skeleton.lower_bias
    };

    Vec2::new(
        anchor.x + t.cos() * r,
        anchor.y
            - t.sin().abs() * r * bias * (skeleton.height_base + skeleton.height_gain * t.cos().abs()),
    )
}

/// Draw one skeleton particle at its fixed outline position.
pub fn spawn_skeleton<R: Rng + ?Sized>(
    canvas: &Canvas,
    tuning: &FieldTuning,
    index: usize,
    total: usize,
    rng: &mut R,
) -> SkeletonParticle {
    let skeleton = &tuning.skeleton;
    SkeletonParticle {
        position: skeleton_point(canvas, tuning, index, total),
        radius: skeleton.radius.sample(rng),
        alpha: skeleton.alpha.sample(rng),
        glow: skeleton.glow.sample(rng),
        flicker_phase: skeleton.flicker_phase.sample(rng),
    }
}

/// Initial flame population of `tuning.flame_count` particles
pub fn flame_population<R: Rng + ?Sized>(
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) -> Vec<FlameParticle> {
    (0..tuning.flame_count)
        .map(|_| spawn_flame(canvas, tuning, rng))
        .collect()
}

/// Skeleton population of `tuning.skeleton.count` particles
pub fn skeleton_population<R: Rng + ?Sized>(
    canvas: &Canvas,
    tuning: &FieldTuning,
    rng: &mut R,
) -> Vec<SkeletonParticle> {
    let total = tuning.skeleton.count;
    (0..total)
        .map(|index| spawn_skeleton(canvas, tuning, index, total, rng))
        .collect()
}
