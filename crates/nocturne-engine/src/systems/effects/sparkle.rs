use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lifecycle::{Pool, Transient};
use crate::core::rng::Rng;
use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::{Paint, Shadow};
use crate::renderer::surface::Surface;

/// Sparkle tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SparkleParams {
    pub cap: usize,
    /// Spawn probability per figure node per frame.
    pub chance: f32,
    pub life: f32,
    /// Downward acceleration, px/s².
    pub gravity: f32,
    pub size: [f32; 2],
    pub margin: f32,
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            cap: 256,
            chance: 0.12,
            life: 0.8,
            gravity: 10.0,
            size: [1.0, 2.5],
            margin: 40.0,
        }
    }
}

/// A tiny glowing mote shed by figure nodes. Drifts up, then falls.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub life: f32,
    pub size: f32,
    gravity: f32,
}

impl Sparkle {
    pub fn spawn(rng: &mut Rng, at: Vec2, params: &SparkleParams) -> Self {
        let vx = (rng.next_f64() as f32 - 0.5) * 20.0;
        let vy = (rng.next_f64() as f32 - 0.8) * 30.0;
        let size = rng.range(params.size[0], params.size[1]);
        Self {
            pos: at,
            vel: Vec2::new(vx, vy),
            age: 0.0,
            life: params.life,
            size,
            gravity: params.gravity,
        }
    }
}

impl Transient for Sparkle {
    fn age(&self) -> f32 {
        self.age
    }

    fn life(&self) -> f32 {
        self.life
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn integrate(&mut self, dt: f32) {
        self.age += dt;
        self.pos += self.vel * dt;
        self.vel.y += self.gravity * dt;
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.pos, self.size, &Paint::Solid(Color::rgba8(255, 230, 170, self.fade())));
    }
}

/// Pool of sparkles. Spawning is driven by the figure renderer.
#[derive(Debug, Clone)]
pub struct SparkleField {
    pool: Pool<Sparkle>,
    params: SparkleParams,
}

impl SparkleField {
    pub fn new(params: SparkleParams) -> Self {
        Self {
            pool: Pool::new(params.cap),
            params,
        }
    }

    /// Roll the per-node chance and spawn at `at` on success.
    pub fn maybe_spawn(&mut self, rng: &mut Rng, at: Vec2) -> bool {
        if !rng.chance(self.params.chance) {
            return false;
        }
        let sparkle = Sparkle::spawn(rng, at, &self.params);
        self.pool.try_spawn(sparkle)
    }

    pub fn update<S: Surface + ?Sized>(&mut self, step: f32, viewport: &Viewport, surface: &mut S) {
        if self.pool.is_empty() {
            return;
        }
        surface.save();
        surface.set_shadow(Some(Shadow::glow(Color::rgba8(255, 210, 120, 0.8), 8.0)));
        self.pool.step(step, &viewport.bounds(self.params.margin), surface);
        surface.restore();
    }

    pub fn pool(&self) -> &Pool<Sparkle> {
        &self.pool
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingSurface;

    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn spawn_velocity_biased_upward() {
        let params = SparkleParams::default();
        let mut rng = Rng::new(17);
        for _ in 0..300 {
            let s = Sparkle::spawn(&mut rng, Vec2::new(10.0, 10.0), &params);
            assert!((-10.0..=10.0).contains(&s.vel.x));
            assert!((-24.0..=6.0).contains(&s.vel.y));
            assert!((1.0..=2.5).contains(&s.size));
        }
    }

    #[test]
    fn gravity_applies_after_move() {
        let params = SparkleParams::default();
        let mut s = Sparkle::spawn(&mut Rng::new(3), Vec2::ZERO, &params);
        let v0 = s.vel;
        s.integrate(STEP);
        assert_eq!(s.pos, v0 * STEP);
        assert!((s.vel.y - (v0.y + 10.0 * STEP)).abs() < 1e-6);
    }

    #[test]
    fn lives_for_its_lifetime() {
        let viewport = Viewport::new(200.0, 200.0, 1.0);
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let mut field = SparkleField::new(SparkleParams {
            chance: 1.0,
            ..SparkleParams::default()
        });
        let mut rng = Rng::new(1);
        assert!(field.maybe_spawn(&mut rng, Vec2::new(100.0, 100.0)));
        let mut ticks = 0;
        while !field.pool().is_empty() {
            field.update(STEP, &viewport, &mut surface);
            ticks += 1;
            assert!(ticks < 100);
        }
        // 0.8 s at 60 steps per second
        assert!((48..=50).contains(&ticks), "ticks {}", ticks);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn cap_holds_under_heavy_spawning() {
        let mut field = SparkleField::new(SparkleParams {
            chance: 1.0,
            ..SparkleParams::default()
        });
        let mut rng = Rng::new(2);
        for _ in 0..1000 {
            field.maybe_spawn(&mut rng, Vec2::ZERO);
        }
        assert_eq!(field.pool().len(), 256);
    }

    #[test]
    fn zero_chance_never_spawns() {
        let mut field = SparkleField::new(SparkleParams {
            chance: 0.0,
            ..SparkleParams::default()
        });
        let mut rng = Rng::new(2);
        for _ in 0..100 {
            assert!(!field.maybe_spawn(&mut rng, Vec2::ZERO));
        }
    }
}
