//! Shared lifecycle for short-lived effect entities.

use glam::Vec2;

use crate::core::viewport::Bounds;
use crate::renderer::surface::Surface;

/// An entity that is born, moves, fades and dies.
pub trait Transient {
    /// Seconds since spawn.
    fn age(&self) -> f32;

    /// Lifetime in seconds.
    fn life(&self) -> f32;

    fn position(&self) -> Vec2;

    /// Advance by `dt` seconds, including age.
    fn integrate(&mut self, dt: f32);

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S);

    /// Opacity from age: 1 at birth, 0 at end of life.
    fn fade(&self) -> f32 {
        if self.life() <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age() / self.life()).max(0.0)
    }

    /// Too old, or outside `bounds`.
    fn is_expired(&self, bounds: &Bounds) -> bool {
        self.age() > self.life() || !bounds.contains(self.position())
    }
}

/// Capped collection of live entities of one kind.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T: Transient> Pool<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap.min(256)),
            cap,
        }
    }

    /// Add `item` unless the pool is full. Returns whether it was added.
    pub fn try_spawn(&mut self, item: T) -> bool {
        if self.items.len() >= self.cap {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    /// Integrate, draw, then drop everything that expired on this tick.
    pub fn step<S: Surface + ?Sized>(&mut self, dt: f32, bounds: &Bounds, surface: &mut S) {
        self.items.retain_mut(|item| {
            item.integrate(dt);
            item.draw(surface);
            !item.is_expired(bounds)
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::Color;
    use crate::renderer::paint::Paint;
    use crate::renderer::recording::RecordingSurface;

    #[derive(Debug, Clone)]
    struct Dot {
        pos: Vec2,
        vel: Vec2,
        age: f32,
        life: f32,
    }

    impl Transient for Dot {
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
        }
        fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
            surface.fill_circle(self.pos, 1.0, &Paint::Solid(Color::WHITE.with_alpha(self.fade())));
        }
    }

    fn dot(vel: Vec2, life: f32) -> Dot {
        Dot { pos: Vec2::ZERO, vel, age: 0.0, life }
    }

    #[test]
    fn cap_enforced_at_spawn() {
        let mut pool = Pool::new(2);
        assert!(pool.try_spawn(dot(Vec2::ZERO, 1.0)));
        assert!(pool.try_spawn(dot(Vec2::ZERO, 1.0)));
        assert!(!pool.try_spawn(dot(Vec2::ZERO, 1.0)));
        assert_eq!(pool.len(), 2);
        assert!(pool.is_full());
    }

    #[test]
    fn age_advances_by_step_and_item_is_drawn() {
        let bounds = Bounds::new(Vec2::splat(-10.0), Vec2::splat(10.0));
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut pool = Pool::new(4);
        pool.try_spawn(dot(Vec2::ZERO, 1.0));
        pool.step(0.25, &bounds, &mut surface);
        pool.step(0.25, &bounds, &mut surface);
        assert_eq!(pool.iter().next().map(|d| d.age), Some(0.5));
        assert_eq!(surface.fills().count(), 2);
    }

    #[test]
    fn removed_on_the_tick_age_exceeds_life() {
        let bounds = Bounds::new(Vec2::splat(-10.0), Vec2::splat(10.0));
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut pool = Pool::new(4);
        pool.try_spawn(dot(Vec2::ZERO, 0.5));
        pool.step(0.25, &bounds, &mut surface);
        pool.step(0.25, &bounds, &mut surface); // age == life, still alive
        assert_eq!(pool.len(), 1);
        pool.step(0.25, &bounds, &mut surface);
        assert!(pool.is_empty());
        // drawn on its final tick too
        assert_eq!(surface.fills().count(), 3);
    }

    #[test]
    fn removed_on_the_tick_it_leaves_bounds() {
        let bounds = Bounds::new(Vec2::splat(-10.0), Vec2::splat(10.0));
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut pool = Pool::new(4);
        pool.try_spawn(dot(Vec2::new(8.0, 0.0), 100.0));
        pool.step(1.0, &bounds, &mut surface); // x = 8
        pool.step(1.0, &bounds, &mut surface); // x = 16
        assert!(pool.is_empty());
    }

    #[test]
    fn fade_runs_from_one_to_zero() {
        let mut d = dot(Vec2::ZERO, 2.0);
        assert_eq!(d.fade(), 1.0);
        d.age = 1.0;
        assert_eq!(d.fade(), 0.5);
        d.age = 3.0;
        assert_eq!(d.fade(), 0.0);
    }
}
