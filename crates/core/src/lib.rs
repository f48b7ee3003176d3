//! Burning-Bush Particle Field
//!
//! A procedural particle animation: a dense, dancing teardrop of embers over a
//! sparse flickering outline. Motion comes from superposed periodic, orbital
//! and stochastic terms rather than any combustion model; the goal is visual
//! plausibility.
//!
//! ## Layout
//!
//! - [`field`]: particle generator, per-frame integrator, respawn policy and the
//!   owned [`Population`] with its `advance` step
//! - [`render`]: the [`Surface`] abstraction, a software [`Framebuffer`] and the
//!   per-frame draw sequence
//! - [`simulation`]: [`BushSimulation`], one seeded visualization instance
//! - [`host`]: frame scheduling and the mount/unmount lifecycle
//! - [`config`]: every visual tuning constant, serde-loadable
//!
//! ## Example
//!
//! ```
//! use bush_sim_core::{BushSimulation, Canvas, FieldTuning, Framebuffer, FrameClock};
//!
//! let canvas = Canvas::from_size(200.0);
//! let tuning = FieldTuning::default().with_counts(500, 40);
//! let mut sim = BushSimulation::new(canvas, tuning, 7).unwrap();
//! let mut fb = Framebuffer::for_canvas(&canvas);
//!
//! let mut clock = FrameClock::default();
//! for _ in 0..10 {
//!     clock = clock.advanced_by(16.7);
//!     sim.frame(&mut fb, clock);
//! }
//! assert_eq!(sim.population().flames().len(), 500);
//! assert!(fb.lit_pixels(0.05) > 0);
//! ```

pub mod config;
pub mod core_types;
pub mod error;
pub mod field;
pub mod host;
pub mod render;
pub mod simulation;

pub use config::FieldTuning;
pub use core_types::{Bounds, Canvas, FrameClock, Rgb, Vec2};
pub use error::ConfigError;
pub use field::{FlameParticle, FrameReport, Population, SkeletonParticle};
pub use host::{Animation, FrameRequest, FrameScheduler, ManualScheduler};
pub use render::{Framebuffer, RecordingSurface, Surface};
pub use simulation::BushSimulation;
