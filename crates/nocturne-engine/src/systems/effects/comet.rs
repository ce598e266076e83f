use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::lifecycle::{Pool, Transient};
use crate::core::rng::Rng;
use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::{Paint, Shadow, StrokeStyle};
use crate::renderer::surface::Surface;

/// Trail slots reserved up front; longer trails grow on demand.
const TRAIL_PREALLOC: usize = 256;

/// Comet emitter tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CometParams {
    pub cap: usize,
    /// Seconds between spawns.
    pub interval: f32,
    /// Distance outside the left or right edge where comets appear.
    pub edge_offset: f32,
    /// Vertical spawn band as fractions of the viewport height.
    pub spawn_y: [f32; 2],
    pub speed: [f32; 2],
    /// Maximum vertical drift in either direction, px/s.
    pub drift: f32,
    pub life: f32,
    /// Positions kept for the tail.
    pub trail_len: usize,
    pub margin: f32,
}

impl Default for CometParams {
    fn default() -> Self {
        Self {
            cap: 2,
            interval: 10.0,
            edge_offset: 80.0,
            spawn_y: [0.25, 0.55],
            speed: [60.0, 110.0],
            drift: 10.0,
            life: 20.0,
            trail_len: 180,
            margin: 120.0,
        }
    }
}

/// A slow comet with a long fading tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Comet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub life: f32,
    /// Most recent position first.
    trail: VecDeque<Vec2>,
    trail_len: usize,
}

impl Comet {
    /// Draw order: side, y, speed, drift.
    pub fn spawn(rng: &mut Rng, viewport: &Viewport, params: &CometParams) -> Self {
        let from_left = rng.chance(0.5);
        let x = if from_left {
            -params.edge_offset
        } else {
            viewport.width + params.edge_offset
        };
        let y = viewport.height * rng.range(params.spawn_y[0], params.spawn_y[1]);
        let speed = rng.range(params.speed[0], params.speed[1]);
        let vy = rng.signed(params.drift);
        let vx = if from_left { speed } else { -speed };
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            age: 0.0,
            life: params.life,
            trail: VecDeque::with_capacity(params.trail_len.min(TRAIL_PREALLOC) + 1),
            trail_len: params.trail_len,
        }
    }

    pub fn trail(&self) -> &VecDeque<Vec2> {
        &self.trail
    }
}

impl Transient for Comet {
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
        self.trail.push_front(self.pos);
        self.trail.truncate(self.trail_len);
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.set_shadow(Some(Shadow::glow(Color::rgb8(0xcb, 0xe7, 0xff), 18.0)));
        let style = StrokeStyle::new(2.2);
        let n = self.trail.len() as f32;
        for (j, (a, b)) in self.trail.iter().zip(self.trail.iter().skip(1)).enumerate() {
            let alpha = (1.0 - j as f32 / n) * 0.55;
            surface.stroke_polyline(&[*a, *b], &Paint::Solid(Color::rgba8(200, 230, 255, alpha)), &style);
        }
        surface.fill_circle(self.pos, 3.2, &Paint::Solid(Color::rgba8(230, 245, 255, 0.95)));
        surface.restore();
    }
}

/// Occasionally sends a comet across the sky.
#[derive(Debug, Clone)]
pub struct CometField {
    pool: Pool<Comet>,
    params: CometParams,
    last_spawn: f32,
}

impl CometField {
    pub fn new(params: CometParams) -> Self {
        Self {
            pool: Pool::new(params.cap),
            params,
            last_spawn: 0.0,
        }
    }

    pub fn update<S: Surface + ?Sized>(
        &mut self,
        rng: &mut Rng,
        elapsed: f32,
        step: f32,
        viewport: &Viewport,
        surface: &mut S,
    ) {
        if elapsed - self.last_spawn > self.params.interval && !self.pool.is_full() {
            self.last_spawn = elapsed;
            let comet = Comet::spawn(rng, viewport, &self.params);
            log::debug!("Comet from x={:.0}, y={:.0}", comet.pos.x, comet.pos.y);
            self.pool.try_spawn(comet);
        }
        self.pool.step(step, &viewport.bounds(self.params.margin), surface);
    }

    pub fn pool(&self) -> &Pool<Comet> {
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
    fn spawns_from_an_edge_heading_inward() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let params = CometParams::default();
        let mut rng = Rng::new(21);
        let mut sides = [false; 2];
        for _ in 0..200 {
            let c = Comet::spawn(&mut rng, &viewport, &params);
            if c.pos.x < 0.0 {
                assert_eq!(c.pos.x, -80.0);
                assert!(c.vel.x > 0.0);
                sides[0] = true;
            } else {
                assert_eq!(c.pos.x, 880.0);
                assert!(c.vel.x < 0.0);
                sides[1] = true;
            }
            assert!((150.0..=330.0).contains(&c.pos.y));
            assert!((60.0..=110.0).contains(&c.vel.x.abs()));
            assert!(c.vel.y.abs() <= 10.0);
        }
        assert_eq!(sides, [true, true]);
    }

    #[test]
    fn trail_is_capped() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut c = Comet::spawn(&mut Rng::new(1), &viewport, &CometParams::default());
        for _ in 0..500 {
            c.integrate(STEP);
        }
        assert_eq!(c.trail().len(), 180);
        assert_eq!(c.trail()[0], c.pos);
    }

    #[test]
    fn unbounded_trail_setting_spawns() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let params = CometParams {
            trail_len: usize::MAX,
            ..CometParams::default()
        };
        let mut c = Comet::spawn(&mut Rng::new(1), &viewport, &params);
        for _ in 0..300 {
            c.integrate(STEP);
        }
        assert_eq!(c.trail().len(), 300);
    }

    #[test]
    fn tail_segments_fade_out() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut c = Comet::spawn(&mut Rng::new(1), &viewport, &CometParams::default());
        for _ in 0..10 {
            c.integrate(STEP);
        }
        let mut surface = RecordingSurface::new(800.0, 600.0);
        c.draw(&mut surface);
        // 9 tail segments plus the head
        assert_eq!(surface.strokes().count(), 9);
        assert_eq!(surface.fills().count(), 1);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn at_most_two_comets() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut field = CometField::new(CometParams::default());
        let mut rng = Rng::new(8);
        for i in 0..60 {
            field.update(&mut rng, i as f32 * 10.5, STEP, &viewport, &mut surface);
            assert!(field.pool().len() <= 2);
        }
    }

    #[test]
    fn first_comet_after_interval() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut field = CometField::new(CometParams::default());
        let mut rng = Rng::new(8);
        field.update(&mut rng, 10.0, STEP, &viewport, &mut surface);
        assert!(field.pool().is_empty());
        field.update(&mut rng, 10.1, STEP, &viewport, &mut surface);
        assert_eq!(field.pool().len(), 1);
    }
}
