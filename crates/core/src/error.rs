//! Configuration errors
//!
//! The animation loop itself never fails. Tuning, however, arrives from the
//! host (defaults, JSON files, CLI flags), so it is validated up front and
//! rejected with a `ConfigError` naming the offending field.

use std::fmt;

/// Reasons a `FieldTuning` (or one of its parts) is unusable
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A sampling span has `min > max` or non-finite bounds
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    /// A chance lies outside `[0, 1]`
    InvalidProbability { name: &'static str, value: f32 },
    /// A population count is zero
    InvalidCount { name: &'static str, value: usize },
    /// A scalar that must be finite and positive is not
    NonPositive { name: &'static str, value: f64 },
    /// A shape or gain scalar is NaN or infinite
    NonFinite { name: &'static str, value: f32 },
    /// A color string is not `#rrggbb`
    InvalidColor { value: String },
}

impl ConfigError {
    /// Name of the offending field, when one applies
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidRange { name, .. }
            | Self::InvalidProbability { name, .. }
            | Self::InvalidCount { name, .. }
            | Self::NonPositive { name, .. }
            | Self::NonFinite { name, .. } => Some(*name),
            Self::InvalidColor { .. } => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { name, min, max } => {
                write!(f, "Tuning range {name}: expected finite min <= max, got [{min}, {max}]")
            }
            Self::InvalidProbability { name, value } => {
                write!(f, "Tuning probability {name}: must be within [0, 1], got {value}")
            }
            Self::InvalidCount { name, value } => {
                write!(f, "Tuning count {name}: must be positive, got {value}")
            }
            Self::NonPositive { name, value } => {
                write!(f, "Tuning value {name}: must be finite and positive, got {value}")
            }
            Self::NonFinite { name, value } => {
                write!(f, "Tuning value {name}: must be finite, got {value}")
            }
            Self::InvalidColor { value } => {
                write!(f, "Invalid color '{value}': expected '#rrggbb'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
