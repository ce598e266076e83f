use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lifecycle::{Pool, Transient};
use crate::core::rng::Rng;
use crate::core::viewport::Viewport;
use crate::renderer::color::Color;
use crate::renderer::paint::{Paint, StrokeStyle};
use crate::renderer::surface::Surface;

/// Meteor emitter tuning. Ranges are `[min, max)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeteorParams {
    pub cap: usize,
    /// Seconds between spawns: `min_interval + draw * interval_jitter`.
    pub min_interval: f32,
    pub interval_jitter: f32,
    /// Horizontal spawn band as fractions of the viewport width.
    pub spawn_x: [f32; 2],
    pub spawn_y: f32,
    /// Pixels per second.
    pub speed: [f32; 2],
    /// Degrees below the horizontal, heading right.
    pub heading: [f32; 2],
    pub life: [f32; 2],
    /// Streak length factor.
    pub length: [f32; 2],
    /// Off-screen margin before removal.
    pub margin: f32,
}

impl Default for MeteorParams {
    fn default() -> Self {
        Self {
            cap: 5,
            min_interval: 1.5,
            interval_jitter: 1.0,
            spawn_x: [0.30, 0.70],
            spawn_y: -20.0,
            speed: [500.0, 950.0],
            heading: [35.0, 45.0],
            life: [1.0, 1.9],
            length: [160.0, 280.0],
            margin: 50.0,
        }
    }
}

/// A fast streak crossing the upper sky.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub life: f32,
    pub length: f32,
    step: f32,
}

impl Meteor {
    /// Draw order: x, speed, heading, life, length.
    pub fn spawn(rng: &mut Rng, viewport: &Viewport, params: &MeteorParams) -> Self {
        let x = viewport.width * rng.range(params.spawn_x[0], params.spawn_x[1]);
        let speed = rng.range(params.speed[0], params.speed[1]);
        let heading = rng.range(params.heading[0], params.heading[1]).to_radians();
        let life = rng.range(params.life[0], params.life[1]);
        let length = rng.range(params.length[0], params.length[1]);
        Self {
            pos: Vec2::new(x, params.spawn_y),
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
            age: 0.0,
            life,
            length,
            step: 0.0,
        }
    }

    /// End of the streak, trailing behind the head.
    pub fn tail(&self) -> Vec2 {
        self.pos - self.vel * self.step * self.length / 60.0
    }
}

impl Transient for Meteor {
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
        self.step = dt;
        self.age += dt;
        self.pos += self.vel * dt;
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let alpha = self.fade();
        let tail = self.tail();
        let streak = Paint::linear(
            self.pos,
            tail,
            Color::rgba8(255, 255, 255, alpha),
            Color::rgba8(255, 220, 120, 0.0),
        );
        surface.stroke_polyline(&[self.pos, tail], &streak, &StrokeStyle::new(2.0));
        surface.fill_circle(self.pos, 2.5, &Paint::Solid(Color::rgba8(255, 240, 200, alpha * 0.8)));
    }
}

/// Spawns meteors at random intervals and steps the live ones.
#[derive(Debug, Clone)]
pub struct MeteorShower {
    pool: Pool<Meteor>,
    params: MeteorParams,
    last_spawn: f32,
}

impl MeteorShower {
    pub fn new(params: MeteorParams) -> Self {
        Self {
            pool: Pool::new(params.cap),
            params,
            last_spawn: 0.0,
        }
    }

    /// Maybe spawn, then advance and draw every meteor by `step` seconds.
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        rng: &mut Rng,
        elapsed: f32,
        step: f32,
        viewport: &Viewport,
        surface: &mut S,
    ) {
        let gap = self.params.min_interval + rng.next_f64() as f32 * self.params.interval_jitter;
        if elapsed - self.last_spawn > gap && !self.pool.is_full() {
            self.last_spawn = elapsed;
            let meteor = Meteor::spawn(rng, viewport, &self.params);
            log::debug!("Meteor at x={:.0} speed={:.0}", meteor.pos.x, meteor.vel.length());
            self.pool.try_spawn(meteor);
        }
        self.pool.step(step, &viewport.bounds(self.params.margin), surface);
    }

    pub fn pool(&self) -> &Pool<Meteor> {
        &self.pool
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}
