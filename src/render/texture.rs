//! Procedural background patterns.

use crate::assets::color::adjust_brightness;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::layout::model::Texture;
use crate::layout::random::RandomSource;

const DOT_RADIUS: f64 = 4.0;
const DOT_SPACING: usize = 20;
const LINE_WIDTH: f64 = 2.0;
const LINE_SPACING: usize = 15;
const GRID_WIDTH: f64 = 1.0;
const GRID_SPACING: usize = 30;
const WAVE_COUNT: usize = 8;
const WAVE_AMPLITUDE: f64 = 40.0;
const WAVE_FREQUENCY: f64 = 0.02;
const WAVE_STEP: usize = 5;
const WAVE_WIDTH: f64 = 3.0;
const NOISE_MAX: u8 = 50;
const NOISE_ALPHA: u8 = 25;

/// Drawing operations textures are expressed in.
pub trait TextureCanvas {
    /// Fill the whole canvas with an opaque color.
    fn fill_all(&mut self, color: Rgba8);
    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8);
    /// Composite straight-alpha RGBA8 pixels covering the whole canvas.
    fn draw_pixels(&mut self, rgba: Vec<u8>, width: u32, height: u32);
}

/// Paint `texture` over a `width` x `height` canvas.
///
/// `fill_base` repaints the base color first (solid backgrounds); gradients pass `false` so the
/// pattern lands on the gradient.
pub fn paint_texture(
    canvas: &mut dyn TextureCanvas,
    width: u32,
    height: u32,
    base: Rgba8,
    texture: Texture,
    fill_base: bool,
    rng: &mut dyn RandomSource,
) {
    if texture == Texture::None {
        return;
    }
    if fill_base {
        canvas.fill_all(base);
    }
    let (w, h) = (f64::from(width), f64::from(height));

    match texture {
        Texture::None => {}
        Texture::Dots => {
            let color = adjust_brightness(base, -15).with_opacity(0.3);
            for x in (0..width as usize).step_by(DOT_SPACING) {
                for y in (0..height as usize).step_by(DOT_SPACING) {
                    canvas.fill_circle(Point::new(x as f64, y as f64), DOT_RADIUS, color);
                }
            }
        }
        Texture::Lines => {
            let color = adjust_brightness(base, -20).with_opacity(0.2);
            for y in (0..height as usize).step_by(LINE_SPACING) {
                let y = y as f64;
                canvas.fill_rect(
                    Rect::new(0.0, y - LINE_WIDTH / 2.0, w, y + LINE_WIDTH / 2.0),
                    color,
                );
            }
        }
        Texture::Grid => {
            let color = adjust_brightness(base, -25).with_opacity(0.25);
            for x in (0..width as usize).step_by(GRID_SPACING) {
                let x = x as f64;
                canvas.fill_rect(
                    Rect::new(x - GRID_WIDTH / 2.0, 0.0, x + GRID_WIDTH / 2.0, h),
                    color,
                );
            }
            for y in (0..height as usize).step_by(GRID_SPACING) {
                let y = y as f64;
                canvas.fill_rect(
                    Rect::new(0.0, y - GRID_WIDTH / 2.0, w, y + GRID_WIDTH / 2.0),
                    color,
                );
            }
        }
        Texture::Waves => {
            let color = adjust_brightness(base, -15).with_opacity(0.2);
            for i in 0..WAVE_COUNT {
                let offset = (h / WAVE_COUNT as f64) * i as f64;
                let points: Vec<Point> = (0..width as usize)
                    .step_by(WAVE_STEP)
                    .map(|x| {
                        let x = x as f64;
                        Point::new(
                            x,
                            offset + (x * WAVE_FREQUENCY + i as f64).sin() * WAVE_AMPLITUDE,
                        )
                    })
                    .collect();
                canvas.stroke_polyline(&points, WAVE_WIDTH, color);
            }
        }
        Texture::Noise => {
            let mut rgba = vec![0u8; (width as usize) * (height as usize) * 4];
            for px in rgba.chunks_exact_mut(4) {
                let v = rng.byte_below(NOISE_MAX);
                px.copy_from_slice(&[v, v, v, NOISE_ALPHA]);
            }
            canvas.draw_pixels(rgba, width, height);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
