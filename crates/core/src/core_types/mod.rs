//! Core types and utilities

pub mod canvas;
pub mod clock;
pub mod color;
pub mod vec2;

pub use canvas::{Bounds, Canvas};
pub use clock::FrameClock;
pub use color::Rgb;
pub use vec2::Vec2;
