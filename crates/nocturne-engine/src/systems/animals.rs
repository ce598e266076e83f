use glam::{Affine2, Vec2};

use super::effects::AmbientEffects;
use super::stroke_progress::{draw_shape_progress, ProgressStyle};
use crate::animals::AnimalInstance;
use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::Paint;
use crate::renderer::surface::Surface;

/// Parallax factor for animal figures.
pub const FIGURE_PARALLAX: f32 = 0.10;

/// Figure size as a fraction of the short viewport side, before instance scale.
pub const FIGURE_SIZE: f32 = 0.42;

/// Animated pose of one figure for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigurePose {
    /// Screen position of the figure's center.
    pub center: Vec2,
    /// Pixels per figure unit.
    pub scale: f32,
    pub rotation: f32,
    /// Stroke reveal in [0, 1].
    pub progress: f32,
}

impl FigurePose {
    /// Breathing scale, gentle sway and an oscillating reveal.
    pub fn at(instance: &AnimalInstance, viewport: &Viewport, pan: Vec2, now_ms: f64) -> Self {
        let t = (now_ms * 0.0015) as f32;
        let phase = instance.phase;
        let breathe = (t * 0.6 + phase).sin() * 0.02 + 1.0;
        Self {
            center: (instance.center + pan * FIGURE_PARALLAX) * viewport.size(),
            scale: breathe * instance.scale * viewport.min_side() * FIGURE_SIZE,
            rotation: instance.rotation + (t * 0.3 + phase).sin() * 0.02,
            progress: ((t + phase).sin() + 1.0) * 0.5,
        }
    }

    /// Maps centered figure units (-0.5..0.5) to screen pixels.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(Vec2::splat(self.scale), self.rotation, self.center)
    }
}

/// Twinkle level of a figure node, keyed by its position so nodes pulse out of step.
pub fn node_twinkle(node: [f32; 2], now_ms: f64) -> f32 {
    let phase = now_ms * 0.004 + (node[0] + node[1]) as f64 * 40.0;
    ((phase.sin() + 1.0) * 0.5) as f32
}

/// Draw one animal: traced strokes, twinkling nodes, and sparkle spawns at the nodes.
pub fn draw_animal<S: Surface + ?Sized>(
    surface: &mut S,
    instance: &AnimalInstance,
    viewport: &Viewport,
    pan: Vec2,
    now_ms: f64,
    style: &ProgressStyle,
    effects: &mut AmbientEffects,
) {
    let pose = FigurePose::at(instance, viewport, pan, now_ms);
    let xf = pose.transform();

    surface.save();
    surface.transform(xf);
    draw_shape_progress(surface, instance.shape.strokes, pose.progress, style);

    for &node in instance.shape.nodes {
        let tw = node_twinkle(node, now_ms);
        let local = Vec2::new(node[0] - 0.5, node[1] - 0.5);
        let fill = Paint::Solid(Color::rgba8(255, 240, 200, 0.7 + tw * 0.3));
        surface.fill_circle(local, 0.012 + tw * 0.010, &fill);
        effects.maybe_sparkle(xf.transform_point2(local));
    }
    surface.restore();
}
