use glam::{Affine2, Vec2};

use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::Paint;
use crate::renderer::surface::Surface;
use crate::sky::Star;

/// Twinkle level in [0, 1] for `star` at `now_ms`.
pub fn twinkle(star: &Star, now_ms: f64) -> f32 {
    let phase = star.twinkle as f64 + now_ms * 0.003 + star.size as f64;
    ((phase.sin() + 1.0) * 0.5) as f32
}

/// Screen position of `star` under the parallax pan.
pub fn star_screen_pos(star: &Star, pan: Vec2, viewport: &Viewport) -> Vec2 {
    (star.pos + pan * star.parallax()) * viewport.size()
}

/// Rotation about the viewport center.
fn rotation_about_center(viewport: &Viewport, angle: f32) -> Affine2 {
    let c = viewport.center();
    Affine2::from_translation(c) * Affine2::from_angle(angle) * Affine2::from_translation(-c)
}

/// Draw every star with its twinkle and parallax. `rotation` is skipped when zero.
pub fn draw_stars<S: Surface + ?Sized>(
    surface: &mut S,
    stars: &[Star],
    viewport: &Viewport,
    pan: Vec2,
    rotation: f32,
    now_ms: f64,
) {
    let rotated = rotation != 0.0;
    if rotated {
        surface.save();
        surface.transform(rotation_about_center(viewport, rotation));
    }
    for star in stars {
        let tw = twinkle(star, now_ms);
        let radius = (star.size + tw * 0.6).max(0.6);
        let color = Color::hsl(star.hue + tw * 20.0, 0.9, 0.8 + tw * 0.1);
        surface.fill_circle(star_screen_pos(star, pan, viewport), radius, &Paint::Solid(color));
    }
    if rotated {
        surface.restore();
    }
}
