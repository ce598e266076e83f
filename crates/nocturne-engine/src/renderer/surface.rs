//! Drawing-surface abstraction.
//!
//! The engine never talks to a browser canvas directly. Every renderer draws
//! through [`Surface`], which mirrors the subset of Canvas2D the sky needs:
//! path fills and strokes, gradients, shadows used as glow, text, and a
//! save/restore stack for transform and style state.
//!
//! Backends:
//! - `RecordingSurface` (this crate): keeps a command log, used by tests.
//! - `TessellatingSurface` (this crate, `vectors` feature): lyon triangles.
//! - `Canvas2dSurface` (`nocturne-web`): `CanvasRenderingContext2d`.

use glam::{Affine2, Vec2};

use super::color::Color;
use super::paint::{Font, Paint, Shadow, StrokeStyle};
use super::path::Path;

/// Canvas-like drawing target.
pub trait Surface {
    /// Drawing area in logical pixels.
    fn logical_size(&self) -> Vec2;

    /// Device pixels per logical pixel.
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    /// Push transform, alpha and shadow state.
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`.
    fn restore(&mut self);

    /// Post-multiply the current transform by `xf`.
    fn transform(&mut self, xf: Affine2);

    /// Global alpha applied to subsequent draws.
    fn set_alpha(&mut self, alpha: f32);

    /// Shadow applied to subsequent draws; `None` disables it.
    fn set_shadow(&mut self, shadow: Option<Shadow>);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, paint: &Paint, style: &StrokeStyle);

    fn fill_text(&mut self, text: &str, at: Vec2, font: &Font, color: Color);

    fn translate(&mut self, by: Vec2) {
        self.transform(Affine2::from_translation(by));
    }

    fn rotate(&mut self, angle: f32) {
        self.transform(Affine2::from_angle(angle));
    }

    fn scale(&mut self, factor: f32) {
        self.transform(Affine2::from_scale(Vec2::splat(factor)));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.fill_path(&Path::circle(center, radius), paint);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], paint: &Paint, style: &StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        self.stroke_path(&Path::polyline(points), paint, style);
    }
}

/// Snapshot of the mutable drawing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub transform: Affine2,
    pub alpha: f32,
    pub shadow: Option<Shadow>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            shadow: None,
        }
    }
}

/// Save/restore stack for backends that track state themselves.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores are ignored, as on a canvas.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub fn transform(&mut self, xf: Affine2) {
        self.current.transform = self.current.transform * xf;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.current.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.current.shadow = shadow;
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }
}
