//! Partial-stroke reveal for animal figures.
//!
//! A figure is a list of strokes in unit space. Only a length-proportional
//! prefix of the concatenated strokes is drawn, which makes the figure look
//! like it is being traced by hand.

use glam::Vec2;

use crate::animals::ShapePoint;
use crate::renderer::color::Color;
use crate::renderer::paint::{Paint, Shadow, StrokeStyle};
use crate::renderer::surface::Surface;

/// Share of the figure that is always visible.
pub const MIN_REVEAL: f32 = 0.2;

#[inline]
fn point(p: ShapePoint) -> Vec2 {
    Vec2::new(p[0], p[1])
}

/// Sum of all segment lengths across every stroke.
pub fn path_length(strokes: &[&[ShapePoint]]) -> f32 {
    strokes
        .iter()
        .flat_map(|s| s.windows(2))
        .map(|seg| point(seg[0]).distance(point(seg[1])))
        .sum()
}

/// Length to draw for `progress` in [0, 1]: never below `MIN_REVEAL` of the total.
pub fn reveal_length(total: f32, progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    (total * (MIN_REVEAL + (1.0 - MIN_REVEAL) * p)).clamp(0.0, total.max(0.0))
}

/// Cut the strokes down to `budget` total length.
///
/// Returns one polyline per stroke that received any budget, with points
/// shifted so the figure is centered on the origin (-0.5..0.5). When the
/// budget runs out inside a segment the last point is interpolated on it.
pub fn trim_strokes(strokes: &[&[ShapePoint]], budget: f32) -> Vec<Vec<Vec2>> {
    let offset = Vec2::splat(0.5);
    let mut left = budget;
    let mut out = Vec::with_capacity(strokes.len());

    for stroke in strokes {
        if left <= 0.0 {
            break;
        }
        if stroke.len() < 2 {
            continue;
        }
        let mut line = Vec::with_capacity(stroke.len());
        line.push(point(stroke[0]) - offset);
        for seg in stroke.windows(2) {
            let (a, b) = (point(seg[0]), point(seg[1]));
            let len = a.distance(b);
            if left >= len {
                line.push(b - offset);
                left -= len;
            } else {
                let t = if len > 0.0 { (left / len).max(0.0) } else { 0.0 };
                line.push(a.lerp(b, t) - offset);
                left = 0.0;
                break;
            }
        }
        out.push(line);
    }
    out
}

/// Look of a traced figure. Widths are in figure units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressStyle {
    pub color: Color,
    pub core_color: Color,
    pub width: f32,
    pub glow: f32,
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba8(242, 169, 0, 0.9),
            core_color: Color::rgb8(255, 230, 180),
            width: 0.010,
            glow: 16.0,
        }
    }
}

/// Draw the revealed prefix of `strokes`: a blurred glow pass then a thin core pass.
///
/// The caller sets up the transform so that figure units map to screen pixels.
pub fn draw_shape_progress<S: Surface + ?Sized>(
    surface: &mut S,
    strokes: &[&[ShapePoint]],
    progress: f32,
    style: &ProgressStyle,
) {
    let budget = reveal_length(path_length(strokes), progress);
    let lines = trim_strokes(strokes, budget);

    surface.save();

    surface.set_shadow(Some(Shadow::glow(style.color, style.glow)));
    let glow_paint = Paint::Solid(style.color);
    let glow_stroke = StrokeStyle::round(style.width * 1.1);
    for line in &lines {
        surface.stroke_polyline(line, &glow_paint, &glow_stroke);
    }

    surface.set_shadow(None);
    surface.set_alpha(0.95);
    let core_paint = Paint::Solid(style.core_color);
    let core_stroke = StrokeStyle::round(style.width * 0.9);
    for line in &lines {
        surface.stroke_polyline(line, &core_paint, &core_stroke);
    }

    surface.restore();
}
