//! Ambient effects: meteors, comets, sparkles and the aurora backdrop.
//!
//! `AmbientEffects` owns the emitters and their random stream; the aurora is
//! stateless and drawn directly by the compositor.

mod aurora;
mod comet;
mod lifecycle;
mod meteor;
mod sparkle;

pub use aurora::{band_color, band_path, base_line, draw_aurora, BAND_COUNT};
pub use comet::{Comet, CometField, CometParams};
pub use lifecycle::{Pool, Transient};
pub use meteor::{Meteor, MeteorParams, MeteorShower};
pub use sparkle::{Sparkle, SparkleField, SparkleParams};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::rng::Rng;
use crate::core::viewport::Viewport;
use crate::renderer::surface::Surface;

/// Tuning for every emitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    /// Fixed integration step in seconds, independent of the frame delta.
    pub step: f32,
    pub meteors: MeteorParams,
    pub comets: CometParams,
    pub sparkles: SparkleParams,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            step: 1.0 / 60.0,
            meteors: MeteorParams::default(),
            comets: CometParams::default(),
            sparkles: SparkleParams::default(),
        }
    }
}

/// Container for all transient effects.
#[derive(Debug, Clone)]
pub struct AmbientEffects {
    pub meteors: MeteorShower,
    pub comets: CometField,
    pub sparkles: SparkleField,
    pub rng: Rng,
    step: f32,
}

impl AmbientEffects {
    /// Effects draw from their own stream so layout stays reproducible.
    pub fn new(seed: u32, config: &EffectsConfig) -> Self {
        Self {
            meteors: MeteorShower::new(config.meteors.clone()),
            comets: CometField::new(config.comets.clone()),
            sparkles: SparkleField::new(config.sparkles.clone()),
            rng: Rng::new(seed.wrapping_add(7919)),
            step: config.step,
        }
    }

    /// Per-node sparkle roll, at a screen position.
    pub fn maybe_sparkle(&mut self, at: Vec2) -> bool {
        self.sparkles.maybe_spawn(&mut self.rng, at)
    }

    /// Spawn, advance and draw meteors, then comets, then sparkles.
    pub fn update<S: Surface + ?Sized>(&mut self, elapsed: f32, viewport: &Viewport, surface: &mut S) {
        self.meteors.update(&mut self.rng, elapsed, self.step, viewport, surface);
        self.comets.update(&mut self.rng, elapsed, self.step, viewport, surface);
        self.sparkles.update(self.step, viewport, surface);
    }

    pub fn live_count(&self) -> usize {
        self.meteors.pool().len() + self.comets.pool().len() + self.sparkles.pool().len()
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn clear(&mut self) {
        self.meteors.clear();
        self.comets.clear();
        self.sparkles.clear();
    }
}
