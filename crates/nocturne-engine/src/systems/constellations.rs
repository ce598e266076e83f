use glam::Vec2;

use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::{Font, Paint, Shadow, StrokeStyle};
use crate::renderer::surface::Surface;
use crate::sky::{Constellation, Star};

/// Parallax factor for constellation lines (between the mid and far star layers).
pub const LINE_PARALLAX: f32 = 0.35;

pub const LABEL_FONT: &str = "600 12px Montserrat, sans-serif";

/// Number of stars to connect for reveal fraction `reveal` in [0, 1].
///
/// At least two, never more than the chain holds.
pub fn visible_segments(chain_len: usize, reveal: f32) -> usize {
    let wanted = ((reveal.clamp(0.0, 1.0) * chain_len as f32).floor() as usize).max(2);
    wanted.min(chain_len)
}

/// Reveal fraction for a constellation `cycle_progress` into its slot.
pub fn cycle_reveal(cycle_progress: f32) -> f32 {
    0.2 + 0.8 * cycle_progress.clamp(0.0, 1.0)
}

fn line_pos(star: &Star, pan: Vec2, viewport: &Viewport) -> Vec2 {
    (star.pos + pan * LINE_PARALLAX) * viewport.size()
}

/// Draw the first `segments` stars of `constellation` as a glowing polyline
/// with its name beside the middle star.
pub fn draw_constellation<S: Surface + ?Sized>(
    surface: &mut S,
    stars: &[Star],
    constellation: &Constellation,
    segments: usize,
    viewport: &Viewport,
    pan: Vec2,
) {
    let points: Vec<Vec2> = constellation
        .stars
        .iter()
        .take(segments)
        .filter_map(|&i| stars.get(i))
        .map(|s| line_pos(s, pan, viewport))
        .collect();

    surface.save();
    surface.set_shadow(Some(Shadow::glow(Color::rgb8(0xf2, 0xa9, 0x00), 10.0)));
    surface.stroke_polyline(
        &points,
        &Paint::Solid(Color::rgba8(255, 215, 130, 0.85)),
        &StrokeStyle::new(1.7),
    );

    if let Some(mid) = constellation.label_star(segments).and_then(|i| stars.get(i)) {
        let anchor = line_pos(mid, pan, viewport) + Vec2::new(6.0, -8.0);
        surface.set_shadow(None);
        surface.fill_text(
            constellation.name,
            anchor,
            &Font::new(LABEL_FONT),
            Color::WHITE.with_alpha(0.9),
        );
    }
    surface.restore();
}
