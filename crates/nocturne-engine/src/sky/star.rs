use glam::Vec2;
use std::f32::consts::TAU;

use crate::core::rng::Rng;

/// Number of parallax depth layers.
pub const LAYER_COUNT: u8 = 3;

/// A background star in the oversized virtual sky.
///
/// Positions are normalized to the viewport, but the sky spans
/// [-0.5, 1.5] on both axes so panning reveals off-screen stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Base radius in logical pixels.
    pub size: f32,
    /// Parallax depth: 0 near, 1 mid, 2 far.
    pub layer: u8,
    /// Hue in degrees (blue range).
    pub hue: f32,
    /// Twinkle phase offset in radians.
    pub twinkle: f32,
}

impl Star {
    /// Parallax factor applied to the pan for this star's layer.
    pub fn parallax(&self) -> f32 {
        0.2 + self.layer as f32 * 0.2
    }
}

/// Generate `n` stars.
///
/// Size follows a cubic curve so most stars are small and a few are large.
/// Per star the draws are consumed in order: x, y, size, hue, twinkle.
pub fn create_stars(n: usize, rng: &mut Rng) -> Vec<Star> {
    (0..n)
        .map(|i| {
            let x = rng.next_f64() as f32 * 2.0 - 0.5;
            let y = rng.next_f64() as f32 * 2.0 - 0.5;
            let size = 0.6 + (rng.next_f64() as f32).powi(3) * 2.2;
            let hue = 200.0 + rng.next_f64() as f32 * 40.0;
            let twinkle = rng.next_f64() as f32 * TAU;
            Star {
                pos: Vec2::new(x, y),
                size,
                layer: (i % LAYER_COUNT as usize) as u8,
                hue,
                twinkle,
            }
        })
        .collect()
}
