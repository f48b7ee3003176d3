//! Logical canvas geometry
//!
//! The field lives in logical pixel units. A visual target size `s` maps to a
//! `s × 1.41s` portrait canvas, tall enough for the flame's upper plume.

use crate::core_types::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Whether `point` lies inside the rectangle (edges inclusive)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Pull `point` onto the nearest position inside the rectangle
    #[inline]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Logical drawing area in pixels
///
/// Construction asserts finite, positive dimensions: a zero-sized canvas is a
/// host bug, not a runtime condition the animation recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    width: f32,
    height: f32,
}

impl Canvas {
    /// Height/width ratio of the avatar canvas
    pub const HEIGHT_RATIO: f32 = 1.41;

    /// Default visual size in logical pixels
    pub const DEFAULT_SIZE: f32 = 430.0;

    /// Create a canvas with explicit dimensions.
    #[must_use]
    #[track_caller]
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && width > 0.0,
            "Canvas::new: width must be finite and positive, got {width}"
        );
        assert!(
            height.is_finite() && height > 0.0,
            "Canvas::new: height must be finite and positive, got {height}"
        );
        Self { width, height }
    }

    /// Create the portrait canvas for a visual target size (`size × 1.41·size`).
    #[must_use]
    #[track_caller]
    pub fn from_size(size: f32) -> Self {
        Self::new(size, size * Self::HEIGHT_RATIO)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Full canvas rectangle `[0, w] × [0, h]`
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vec2::zeros(),
            max: Vec2::new(self.width, self.height),
        }
    }

    /// Canvas shrunk by `fraction` of each dimension on every side.
    ///
    /// With the default 1% margin this is the region a flame particle must
    /// stay in to survive the respawn check.
    pub fn inset(&self, fraction: f32) -> Bounds {
        let mx = self.width * fraction;
        let my = self.height * fraction;
        Bounds {
            min: Vec2::new(mx, my),
            max: Vec2::new(self.width - mx, self.height - my),
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_size(Self::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size_uses_portrait_ratio() {
        let canvas = Canvas::from_size(100.0);
        assert_eq!(canvas.width(), 100.0);
        assert!((canvas.height() - 141.0).abs() < 1e-4);
    }

    #[test]
    fn test_inset_bounds() {
        let canvas = Canvas::new(200.0, 100.0);
        let live = canvas.inset(0.01);
        assert_eq!(live.min, Vec2::new(2.0, 1.0));
        assert_eq!(live.max, Vec2::new(198.0, 99.0));
        assert!(live.contains(Vec2::new(100.0, 50.0)));
        assert!(!live.contains(Vec2::new(1.0, 50.0)));
        assert_eq!(live.clamp(Vec2::new(-5.0, 500.0)), Vec2::new(2.0, 99.0));
    }

    #[test]
    #[should_panic(expected = "width must be finite and positive")]
    fn test_zero_width_is_rejected() {
        let _ = Canvas::new(0.0, 10.0);
    }

    #[test]
    #[should_panic(expected = "height must be finite and positive")]
    fn test_nan_height_is_rejected() {
        let _ = Canvas::new(10.0, f32::NAN);
    }
}
