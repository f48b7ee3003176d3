//! CPU software rasterizer
//!
//! Pixels are premultiplied RGBA in `f32`, composited source-over on a
//! transparent background. A shadow is approximated the way a canvas shadow
//! looks for tiny discs: a Gaussian halo (σ = blur / 2) whose peak scales with
//! the disc area, so thousands of sub-pixel embers add up to a soft glow
//! rather than each one painting a full-strength blob.

use super::{Circle, Paint, Surface};
use crate::core_types::{Canvas, Rgb, Vec2};
use rayon::prelude::*;

/// Halo extent in standard deviations
const SHADOW_EXTENT_SIGMAS: f32 = 3.0;

/// Raster surface owning its pixels
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
}

impl Framebuffer {
    /// Create a transparent framebuffer. Asserts non-zero dimensions.
    #[must_use]
    #[track_caller]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "Framebuffer::new: dimensions must be positive, got {width}x{height}"
        );
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
        }
    }

    /// Framebuffer covering `canvas` at one pixel per logical unit
    #[must_use]
    pub fn for_canvas(canvas: &Canvas) -> Self {
        Self::new(
            canvas.width().ceil() as usize,
            canvas.height().ceil() as usize,
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Premultiplied RGBA at `(x, y)`
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// Color at `(x, y)` composited over black
    pub fn rgb_over_black(&self, x: usize, y: usize) -> [u8; 3] {
        let [r, g, b, _] = self.pixel(x, y);
        [to_byte(r), to_byte(g), to_byte(b)]
    }

    /// Pixels whose coverage exceeds `threshold`
    pub fn lit_pixels(&self, threshold: f32) -> usize {
        self.pixels.par_iter().filter(|p| p[3] > threshold).count()
    }

    /// Straight-alpha RGBA bytes, row-major, suitable for PNG encoders
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.pixels.len() * 4];
        bytes
            .par_chunks_mut(4)
            .zip(self.pixels.par_iter())
            .for_each(|(out, &[r, g, b, a])| {
                if a > 0.0 {
                    out[0] = to_byte(r / a);
                    out[1] = to_byte(g / a);
                    out[2] = to_byte(b / a);
                    out[3] = to_byte(a);
                }
            });
        bytes
    }

    /// Composite `color` with opacity `alpha` onto the pixel at `(x, y)`
    #[inline(always)]
    fn blend(&mut self, x: usize, y: usize, color: [f32; 3], alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        let keep = 1.0 - alpha;
        let dst = &mut self.pixels[y * self.width + x];
        dst[0] = color[0] * alpha + dst[0] * keep;
        dst[1] = color[1] * alpha + dst[1] * keep;
        dst[2] = color[2] * alpha + dst[2] * keep;
        dst[3] = alpha + dst[3] * keep;
    }

    /// Pixel rows/columns overlapping a square of half-size `reach` around `center`
    fn pixel_window(&self, center: Vec2, reach: f32) -> Option<(usize, usize, usize, usize)> {
        let x0 = (center.x - reach).floor().max(0.0);
        let y0 = (center.y - reach).floor().max(0.0);
        let x1 = (center.x + reach).ceil().min(self.width as f32);
        let y1 = (center.y + reach).ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    fn draw_shadow(&mut self, circle: Circle, color: Rgb, blur: f32, alpha: f32) {
        let sigma = blur / 2.0;
        let two_sigma_sq = 2.0 * sigma * sigma;
        // Peak of a Gaussian-blurred disc, capped at full coverage.
        let peak = alpha * (circle.radius * circle.radius / two_sigma_sq).min(1.0);
        if peak <= 1.0 / 1024.0 {
            return;
        }
        let reach = circle.radius + SHADOW_EXTENT_SIGMAS * sigma;
        let Some((x0, y0, x1, y1)) = self.pixel_window(circle.center, reach) else {
            return;
        };
        let color = color.to_unit();
        for y in y0..y1 {
            for x in x0..x1 {
                let d = pixel_center(x, y) - circle.center;
                let outside = (d.norm() - circle.radius).max(0.0);
                self.blend(x, y, color, peak * (-(outside * outside) / two_sigma_sq).exp());
            }
        }
    }

    fn draw_disc(&mut self, circle: Circle, color: Rgb, alpha: f32) {
        // Sub-pixel discs keep their area as partial coverage.
        let area_scale = (2.0 * circle.radius).min(1.0).powi(2);
        let reach = circle.radius + 1.0;
        let Some((x0, y0, x1, y1)) = self.pixel_window(circle.center, reach) else {
            return;
        };
        let color = color.to_unit();
        for y in y0..y1 {
            for x in x0..x1 {
                let d = (pixel_center(x, y) - circle.center).norm();
                let coverage = (circle.radius.max(0.5) + 0.5 - d).clamp(0.0, 1.0);
                self.blend(x, y, color, alpha * coverage * area_scale);
            }
        }
    }
}

impl Surface for Framebuffer {
    fn clear(&mut self) {
        self.pixels.par_iter_mut().for_each(|p| *p = [0.0; 4]);
    }

    fn fill_circle(&mut self, circle: Circle, paint: Paint) {
        let alpha = paint.effective_alpha();
        if alpha <= 0.0 || circle.radius <= 0.0 {
            return;
        }
        if paint.blur > 0.0 {
            self.draw_shadow(circle, paint.shadow, paint.blur, alpha);
        }
        self.draw_disc(circle, paint.fill, alpha);
    }
}

#[inline(always)]
fn pixel_center(x: usize, y: usize) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

#[inline(always)]
fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(x: f32, y: f32, radius: f32) -> Circle {
        Circle {
            center: Vec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn test_opaque_disc_covers_its_center() {
        let mut fb = Framebuffer::new(20, 20);
        fb.fill_circle(disc(10.0, 10.0, 4.0), Paint::solid(Rgb::HOT, 1.0));
        assert_eq!(fb.rgb_over_black(10, 10), [0xff, 0xc2, 0x3a]);
        assert_eq!(fb.pixel(0, 0), [0.0; 4]);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_circle(disc(4.0, 4.0, 3.0), Paint::solid(Rgb::BASE, 2.5));
        assert!((fb.pixel(4, 4)[3] - 1.0).abs() < 1e-6);

        let mut fb = Framebuffer::new(8, 8);
        fb.fill_circle(disc(4.0, 4.0, 3.0), Paint::solid(Rgb::BASE, -0.5));
        assert_eq!(fb.lit_pixels(0.0), 0);
    }

    #[test]
    fn test_shadow_spreads_beyond_the_disc() {
        let paint = Paint {
            fill: Rgb::MID,
            shadow: Rgb::CORE,
            blur: 8.0,
            alpha: 1.0,
        };
        let mut plain = Framebuffer::new(40, 40);
        plain.fill_circle(disc(20.0, 20.0, 3.0), Paint::solid(Rgb::MID, 1.0));
        let mut glowing = Framebuffer::new(40, 40);
        glowing.fill_circle(disc(20.0, 20.0, 3.0), paint);
        assert!(glowing.lit_pixels(0.01) > plain.lit_pixels(0.01));
    }

    #[test]
    fn test_sub_pixel_disc_is_faint() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_circle(disc(4.5, 4.5, 0.15), Paint::solid(Rgb::BASE, 1.0));
        let a = fb.pixel(4, 4)[3];
        assert!(a > 0.0 && a < 0.2, "coverage {a}");
    }

    #[test]
    fn test_clipped_at_edges() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_circle(disc(-2.0, 5.0, 4.0), Paint::solid(Rgb::BASE, 1.0));
        fb.fill_circle(disc(50.0, 50.0, 4.0), Paint::solid(Rgb::BASE, 1.0));
        assert!(fb.pixel(0, 5)[3] > 0.0);
    }

    #[test]
    fn test_rgba8_unpremultiplies_and_clear_resets() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_circle(disc(2.0, 2.0, 3.0), Paint::solid(Rgb::HOT, 0.5));
        let bytes = fb.to_rgba8();
        assert_eq!(bytes.len(), 64);
        let px = &bytes[(2 * 4 + 2) * 4..(2 * 4 + 2) * 4 + 4];
        assert_eq!(&px[..3], &[0xff, 0xc2, 0x3a]);
        assert_eq!(px[3], 128);

        fb.clear();
        assert!(fb.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn test_zero_sized_framebuffer_is_rejected() {
        let _ = Framebuffer::new(0, 10);
    }
}
