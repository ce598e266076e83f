use glam::Vec2;
use std::f32::consts::TAU;

use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::Paint;
use crate::renderer::path::Path;
use crate::renderer::surface::Surface;

pub const BAND_COUNT: usize = 3;

/// Horizontal sample spacing in pixels.
const SAMPLE_STEP: f32 = 16.0;

/// Baseline height of the bands at `now_ms`.
pub fn base_line(height: f32, now_ms: f64, pan_y: f32) -> f32 {
    height * 0.24 + (now_ms * 0.0003).sin() as f32 * 10.0 + pan_y * 14.0
}

/// Closed outline of band `band`: a wavy lower edge filled up to the top of the viewport.
pub fn band_path(viewport: &Viewport, now_ms: f64, pan_y: f32, band: usize) -> Path {
    let (w, h) = (viewport.width, viewport.height);
    let y_base = base_line(h, now_ms, pan_y);
    let b = band as f32;
    let slow = (now_ms * 0.0004) as f32;
    let fast = (now_ms * 0.0006) as f32;

    let mut path = Path::new();
    let mut x = 0.0;
    while x <= w {
        let t = if w > 0.0 { x / w * TAU } else { 0.0 };
        let y = y_base + (t * 1.6 + b + slow).sin() * 18.0 + (t * 3.3 + b * 2.0 + fast).sin() * 6.0;
        if x == 0.0 {
            path.move_to(Vec2::new(x, y));
        } else {
            path.line_to(Vec2::new(x, y));
        }
        x += SAMPLE_STEP;
    }
    path.line_to(Vec2::new(w, 0.0)).line_to(Vec2::ZERO).close();
    path
}

pub fn band_color(band: usize) -> Color {
    let b = band as f32;
    Color::hsla(260.0 + b * 20.0, 0.7, 0.6, 0.08 + b * 0.05)
}

/// Stateless backdrop of translucent sinusoidal curtains.
pub fn draw_aurora<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, now_ms: f64, pan_y: f32) {
    for band in 0..BAND_COUNT {
        let path = band_path(viewport, now_ms, pan_y, band);
        surface.fill_path(&path, &Paint::Solid(band_color(band)));
    }
}
