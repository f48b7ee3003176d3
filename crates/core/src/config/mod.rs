//! Visual tuning for the particle field
//!
//! Every number that shapes the look of the effect lives here, grouped by the
//! stage that consumes it. None of them are correctness constraints; the
//! algorithm structure is fixed in `field` and only the feel is tunable.
//!
//! All sections use `#[serde(default)]`, so a tuning file only needs the
//! fields it overrides:
//!
//! ```
//! use bush_sim_core::config::FieldTuning;
//!
//! let tuning: FieldTuning =
//!     serde_json::from_str(r#"{ "flame_count": 500, "motion": { "clock_rate": 0.004 } }"#).unwrap();
//! assert_eq!(tuning.flame_count, 500);
//! assert_eq!(tuning.skeleton.count, 95);
//! assert!(tuning.validate().is_ok());
//! ```

mod motion;
mod render;
mod skeleton;
mod spawn;
mod span;

pub use motion::{MotionTuning, TermWeights};
pub use render::{GlowTier, HazeRule, RenderTuning};
pub use skeleton::SkeletonTuning;
pub use spawn::SpawnTuning;
pub use span::Span;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Flame population size of the reference effect
pub const DEFAULT_FLAME_COUNT: usize = 3700;

/// Fraction of each canvas dimension a particle may approach before respawning
pub const DEFAULT_MARGIN_FRACTION: f32 = 0.01;

/// Respawn trigger tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnTuning {
    pub margin_fraction: f32,
}

impl Default for RespawnTuning {
    fn default() -> Self {
        Self {
            margin_fraction: DEFAULT_MARGIN_FRACTION,
        }
    }
}

impl RespawnTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Past half the canvas the live region is empty.
        if (0.0..0.5).contains(&self.margin_fraction) {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name: "respawn.margin_fraction",
                min: self.margin_fraction,
                max: 0.5,
            })
        }
    }
}

/// Complete tuning for one field instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub flame_count: usize,
    pub spawn: SpawnTuning,
    pub motion: MotionTuning,
    pub respawn: RespawnTuning,
    pub skeleton: SkeletonTuning,
    pub render: RenderTuning,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            flame_count: DEFAULT_FLAME_COUNT,
            spawn: SpawnTuning::default(),
            motion: MotionTuning::default(),
            respawn: RespawnTuning::default(),
            skeleton: SkeletonTuning::default(),
            render: RenderTuning::default(),
        }
    }
}

impl FieldTuning {
    /// Check every section, reporting the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flame_count == 0 {
            return Err(ConfigError::InvalidCount {
                name: "flame_count",
                value: self.flame_count,
            });
        }
        self.spawn.validate()?;
        self.motion.validate()?;
        self.respawn.validate()?;
        self.skeleton.validate()?;
        self.render.validate()
    }

    /// Same tuning with different population sizes
    pub fn with_counts(mut self, flames: usize, skeleton: usize) -> Self {
        self.flame_count = flames;
        self.skeleton.count = skeleton;
        self
    }
}
