//! Burning-bush particle simulation
//!
//! `BushSimulation` bundles what one mounted visualization owns: the canvas,
//! the validated tuning, both populations and a seedable random source. It is
//! driven one frame at a time by a host and never schedules anything itself.

use crate::config::FieldTuning;
use crate::core_types::{Canvas, FrameClock};
use crate::error::ConfigError;
use crate::field::{advance, FrameReport, Population};
use crate::render::{render_frame, Surface};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

/// One visualization instance
pub struct BushSimulation {
    canvas: Canvas,
    tuning: FieldTuning,
    population: Population,
    rng: StdRng,
    seed: u64,
    frame_count: u64,
    respawn_count: u64,
}

impl BushSimulation {
    /// Create a simulation with a fixed seed.
    ///
    /// The same seed, canvas and tuning reproduce the same particle field and,
    /// for identical clock readings, the same animation.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`FieldTuning::validate`].
    pub fn new(canvas: Canvas, tuning: FieldTuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let population = Population::generate(&canvas, &tuning, &mut rng);

        info!(
            "Bush simulation created: {:.0}x{:.0} canvas, {} flames ({} core), {} skeleton, seed={}",
            canvas.width(),
            canvas.height(),
            population.flames().len(),
            population.core_count(),
            population.skeleton().len(),
            seed
        );

        Ok(Self {
            canvas,
            tuning,
            population,
            rng,
            seed,
            frame_count: 0,
            respawn_count: 0,
        })
    }

    /// Create a simulation seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`FieldTuning::validate`].
    pub fn from_entropy(canvas: Canvas, tuning: FieldTuning) -> Result<Self, ConfigError> {
        let seed = StdRng::from_os_rng().next_u64();
        Self::new(canvas, tuning, seed)
    }

    /// Advance the flame population one frame without drawing.
    pub fn advance(&mut self, clock: FrameClock) -> FrameReport {
        let report = advance(
            &mut self.population,
            clock,
            &self.canvas,
            &self.tuning,
            &mut self.rng,
        );
        self.finish_frame(clock, report);
        report
    }

    /// Draw one complete frame onto `surface`, advancing the flames.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, clock: FrameClock) -> FrameReport {
        let report = render_frame(
            surface,
            &mut self.population,
            clock,
            &self.canvas,
            &self.tuning,
            &mut self.rng,
        );
        self.finish_frame(clock, report);
        report
    }

    fn finish_frame(&mut self, clock: FrameClock, report: FrameReport) {
        self.frame_count += 1;
        self.respawn_count += report.respawned() as u64;
        debug!(
            "Frame {}: t={:.1}ms, expired={}, escaped={}",
            self.frame_count,
            clock.millis(),
            report.expired,
            report.escaped
        );
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tuning(&self) -> &FieldTuning {
        &self.tuning
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Seed the random source was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total flame respawns so far
    pub fn respawn_count(&self) -> u64 {
        self.respawn_count
    }
}
