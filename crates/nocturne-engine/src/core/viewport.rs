use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical drawing area plus the device pixel ratio.
///
/// All engine geometry is expressed in logical (CSS) pixels; the backing
/// store of a canvas is `pixel_size()` device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Backing-store size in whole device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor().max(0.0) as u32,
            (self.height * self.pixel_ratio).floor().max(0.0) as u32,
        )
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Viewport rectangle grown by `margin` on every side.
    pub fn bounds(&self, margin: f32) -> Bounds {
        Bounds::new(
            Vec2::splat(-margin),
            Vec2::new(self.width + margin, self.height + margin),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

/// Axis-aligned rectangle. Containment is inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_rounds_down() {
        let vp = Viewport::new(390.0, 844.0, 3.0);
        assert_eq!(vp.pixel_size(), (1170, 2532));
        let vp = Viewport::new(100.5, 10.0, 1.5);
        assert_eq!(vp.pixel_size(), (150, 15));
    }

    #[test]
    fn invalid_pixel_ratio_falls_back_to_one() {
        let vp = Viewport::new(10.0, 10.0, 0.0);
        assert_eq!(vp.pixel_ratio, 1.0);
    }

    #[test]
    fn bounds_with_margin() {
        let b = Viewport::new(100.0, 50.0, 1.0).bounds(10.0);
        assert!(b.contains(Vec2::new(-10.0, -10.0)));
        assert!(b.contains(Vec2::new(110.0, 60.0)));
        assert!(!b.contains(Vec2::new(110.1, 0.0)));
        assert!(!b.contains(Vec2::new(0.0, -10.5)));
    }
}
