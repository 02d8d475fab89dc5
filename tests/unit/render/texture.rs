use super::*;
use crate::layout::random::{FirstChoice, SeededRandom};

#[derive(Default)]
struct Recorder {
    fills: usize,
    circles: Vec<(Point, f64, Rgba8)>,
    rects: Vec<(Rect, Rgba8)>,
    polylines: Vec<(usize, f64, Rgba8)>,
    pixels: Option<Vec<u8>>,
}

impl TextureCanvas for Recorder {
    fn fill_all(&mut self, _color: Rgba8) {
        self.fills += 1;
    }
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.circles.push((center, radius, color));
    }
    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.rects.push((rect, color));
    }
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        self.polylines.push((points.len(), width, color));
    }
    fn draw_pixels(&mut self, rgba: Vec<u8>, _width: u32, _height: u32) {
        self.pixels = Some(rgba);
    }
}

const BASE: Rgba8 = Rgba8::rgb(100, 100, 100);

fn paint(texture: Texture, w: u32, h: u32) -> Recorder {
    let mut rec = Recorder::default();
    paint_texture(&mut rec, w, h, BASE, texture, true, &mut FirstChoice);
    rec
}

#[test]
fn dots_form_a_twenty_pixel_grid_from_origin() {
    let rec = paint(Texture::Dots, 100, 60);
    assert_eq!(rec.fills, 1);
    // x in {0,20,40,60,80}, y in {0,20,40}
    assert_eq!(rec.circles.len(), 15);
    let (center, r, color) = rec.circles[0];
    assert_eq!(center, Point::new(0.0, 0.0));
    assert_eq!(r, 4.0);
    assert_eq!(color, Rgba8::rgb(85, 85, 85).with_opacity(0.3));
}

#[test]
fn lines_every_fifteen_pixels() {
    let rec = paint(Texture::Lines, 50, 45);
    assert_eq!(rec.rects.len(), 3);
    let (rect, color) = rec.rects[1];
    assert_eq!(rect, Rect::new(0.0, 14.0, 50.0, 16.0));
    assert_eq!(color, Rgba8::rgb(80, 80, 80).with_opacity(0.2));
}

#[test]
fn grid_draws_both_axes() {
    let rec = paint(Texture::Grid, 90, 60);
    // 3 vertical + 2 horizontal
    assert_eq!(rec.rects.len(), 5);
    assert!(rec.rects.iter().all(|(_, c)| *c == Rgba8::rgb(75, 75, 75).with_opacity(0.25)));
}

#[test]
fn waves_are_eight_sampled_polylines() {
    let rec = paint(Texture::Waves, 100, 80);
    assert_eq!(rec.polylines.len(), 8);
    assert!(rec.polylines.iter().all(|&(n, w, _)| n == 20 && w == 3.0));
}

#[test]
fn noise_is_low_gray_with_fixed_alpha() {
    let mut rec = Recorder::default();
    paint_texture(&mut rec, 8, 8, BASE, Texture::Noise, true, &mut SeededRandom::new(5));
    let px = rec.pixels.unwrap();
    assert_eq!(px.len(), 8 * 8 * 4);
    for p in px.chunks_exact(4) {
        assert!(p[0] < 50);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
        assert_eq!(p[3], 25);
    }
}

#[test]
fn none_is_a_no_op() {
    let rec = paint(Texture::None, 10, 10);
    assert_eq!(rec.fills, 0);
    assert!(rec.circles.is_empty() && rec.rects.is_empty() && rec.pixels.is_none());
}

#[test]
fn gradient_backgrounds_skip_base_fill() {
    let mut rec = Recorder::default();
    paint_texture(&mut rec, 40, 40, BASE, Texture::Dots, false, &mut FirstChoice);
    assert_eq!(rec.fills, 0);
    assert_eq!(rec.circles.len(), 4);
}
