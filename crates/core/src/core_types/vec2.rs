//! Vector type alias for 2D canvas positions.

use nalgebra::Vector2;

/// 2D vector type for canvas positions and per-frame offsets.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used throughout
/// the field for particle positions, spawn origins and orbital offsets.
/// Coordinates are logical canvas pixels with y growing downwards.
pub type Vec2 = Vector2<f32>;
