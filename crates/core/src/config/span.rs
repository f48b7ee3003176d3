//! Sampling spans for per-particle randomization

use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open interval `[min, max)` a parameter is drawn from.
///
/// A degenerate span (`min == max`) always yields `min`, which lets tuning
/// files pin a parameter to a constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a value uniformly from the span.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    /// Whether `value` could have been drawn from this span
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        if self.min < self.max {
            value >= self.min && value < self.max
        } else {
            value == self.min
        }
    }

    /// Finite bounds, `min <= max`, and a width that does not overflow
    pub(crate) fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
        {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

pub(crate) fn validate_probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

pub(crate) fn validate_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

pub(crate) fn validate_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_stays_in_span() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Span::new(0.12, 0.22);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }

    #[test]
    fn test_degenerate_span_is_constant() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Span::new(0.15, 0.15);
        assert_eq!(span.sample(&mut rng), 0.15);
        assert!(span.contains(0.15));
        assert!(span.validate("lift").is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(Span::new(2.0, 1.0).validate("x").is_err());
        assert!(Span::new(f32::NAN, 1.0).validate("x").is_err());
        assert!(Span::new(-3e38, 3e38).validate("x").is_err());
        assert!(validate_finite("gain", f32::INFINITY).is_err());
        assert!(validate_finite("gain", -0.5).is_ok());
        assert!(validate_probability("p", 1.5).is_err());
        assert!(validate_probability("p", f32::NAN).is_err());
        assert!(validate_positive("rate", 0.0).is_err());
        assert!(validate_positive("rate", 0.0055).is_ok());
    }
}
