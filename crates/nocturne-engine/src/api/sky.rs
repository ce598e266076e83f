use glam::Vec2;

use super::config::{AnimalMode, ConstellationMode, SkyConfig};
use super::scheduler::FrameScheduler;
use crate::animals::{library, place_animals, spotlight_instance, target_count, AnimalInstance};
use crate::core::rng::Rng;
use crate::core::time::{CycleTimer, FrameClock};
use crate::core::viewport::Viewport;
use crate::input::{EventQueue, OrientationState, SkyEvent};
use crate::renderer::surface::Surface;
use crate::sky::{Constellation, Sky};
use crate::systems::animals::draw_animal;
use crate::systems::constellations::{cycle_reveal, draw_constellation, visible_segments};
use crate::systems::effects::{draw_aurora, AmbientEffects};
use crate::systems::starfield::draw_stars;
use crate::systems::stroke_progress::ProgressStyle;

/// Everything that persists between frames.
///
/// The host owns one `SkyState`, pushes input events into it, and calls
/// [`SkyState::frame`] once per display refresh.
pub struct SkyState {
    config: SkyConfig,
    viewport: Viewport,
    sky: Sky,
    /// Layout stream: stars, constellations, animal placement.
    rng: Rng,
    /// Emitters, with their own stream.
    effects: AmbientEffects,
    clock: FrameClock,
    orientation: OrientationState,
    events: EventQueue,
    constellation_cycle: CycleTimer,
    animal_cycle: CycleTimer,
    spotlight: Option<AnimalInstance>,
    placed: Vec<AnimalInstance>,
    figure_style: ProgressStyle,
    show_lines: bool,
    show_animals: bool,
    frame_count: u64,
}

impl SkyState {
    /// Generate the sky for `seed`. Same seed and config, same sky.
    pub fn new(seed: u32, config: SkyConfig, viewport: Viewport) -> Self {
        let mut rng = Rng::new(seed);
        let sky = Sky::generate(&config, &mut rng);
        let shapes = library();
        let placed = place_animals(
            shapes,
            target_count(&viewport, shapes.len()),
            &config.placement,
            &mut rng,
        );
        let spotlight = shapes.first().map(|&shape| spotlight_instance(shape, &mut rng));
        let effects = AmbientEffects::new(seed, &config.effects);

        log::info!(
            "Sky ready: seed={}, viewport={}x{}, {} animals placed",
            seed,
            viewport.width,
            viewport.height,
            placed.len()
        );

        Self {
            viewport,
            constellation_cycle: CycleTimer::new(config.constellation_period_ms, sky.constellations().len()),
            sky,
            rng,
            effects,
            clock: FrameClock::new(config.max_frame_dt),
            orientation: OrientationState::new(),
            events: EventQueue::new(),
            animal_cycle: CycleTimer::new(config.animal_period_ms, shapes.len()),
            spotlight,
            placed,
            figure_style: ProgressStyle::default(),
            show_lines: config.show_lines,
            show_animals: config.show_animals,
            frame_count: 0,
            config,
        }
    }

    /// Queue an event for the next frame.
    pub fn push_event(&mut self, event: SkyEvent) {
        self.events.push(event);
    }

    /// Run one frame at `now_ms` and ask `scheduler` for the next one.
    pub fn frame<S, F>(&mut self, now_ms: f64, surface: &mut S, scheduler: &mut F)
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.process_events();

        let dt = self.clock.tick(now_ms);
        self.orientation.drift(dt, now_ms);
        let pan = self.orientation.pan();
        let viewport = self.viewport;

        surface.clear();
        draw_aurora(surface, &viewport, now_ms, pan.y);
        draw_stars(
            surface,
            self.sky.stars(),
            &viewport,
            pan,
            self.orientation.star_rotation(),
            now_ms,
        );

        if self.show_lines {
            self.draw_constellations(surface, &viewport, pan, now_ms);
        }
        if self.show_animals {
            self.draw_animals(surface, &viewport, pan, now_ms);
        }

        self.effects.update(self.clock.elapsed_secs(), &viewport, surface);

        self.frame_count += 1;
        scheduler.request_frame();
    }

    fn process_events(&mut self) {
        for event in self.events.drain() {
            match event {
                SkyEvent::Orientation { alpha, beta, gamma } => {
                    self.orientation.apply_sample(alpha, beta, gamma);
                }
                SkyEvent::ShowLines(on) => {
                    log::debug!("Constellation lines {}", if on { "on" } else { "off" });
                    self.show_lines = on;
                }
                SkyEvent::ShowAnimals(on) => {
                    log::debug!("Animal figures {}", if on { "on" } else { "off" });
                    self.show_animals = on;
                }
                SkyEvent::Resize(viewport) => self.resize(viewport),
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        let shapes = library();
        let before = target_count(&self.viewport, shapes.len());
        self.viewport = viewport;
        let after = target_count(&viewport, shapes.len());
        if before != after {
            self.placed = place_animals(shapes, after, &self.config.placement, &mut self.rng);
            log::debug!("Re-placed {} animals for {}x{}", self.placed.len(), viewport.width, viewport.height);
        }
    }

    fn draw_constellations<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport, pan: Vec2, now_ms: f64) {
        let all = self.sky.constellations();
        match self.config.constellation_mode {
            ConstellationMode::Cycle => {
                if self.constellation_cycle.advance(now_ms) {
                    if let Some(next) = all.get(self.constellation_cycle.index()) {
                        log::debug!("Constellation -> {} ({} stars)", next.name, next.len());
                    }
                }
                let Some(current) = all.get(self.constellation_cycle.index()) else {
                    return;
                };
                let reveal = cycle_reveal(self.constellation_cycle.progress(now_ms));
                let segments = visible_segments(current.len(), reveal);
                draw_constellation(surface, self.sky.stars(), current, segments, viewport, pan);
            }
            ConstellationMode::All => {
                for c in all {
                    draw_constellation(surface, self.sky.stars(), c, c.len(), viewport, pan);
                }
            }
        }
    }

    fn draw_animals<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport, pan: Vec2, now_ms: f64) {
        match self.config.animal_mode {
            AnimalMode::Cycle => {
                if self.animal_cycle.advance(now_ms) {
                    if let Some(&shape) = library().get(self.animal_cycle.index()) {
                        log::debug!("Animal -> {}", shape.name);
                        self.spotlight = Some(spotlight_instance(shape, &mut self.rng));
                    }
                }
                if let Some(instance) = &self.spotlight {
                    draw_animal(surface, instance, viewport, pan, now_ms, &self.figure_style, &mut self.effects);
                }
            }
            AnimalMode::Placed => {
                for instance in &self.placed {
                    draw_animal(surface, instance, viewport, pan, now_ms, &self.figure_style, &mut self.effects);
                }
            }
        }
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    pub fn orientation(&self) -> &OrientationState {
        &self.orientation
    }

    /// Compass heading from the last orientation sample, in whole degrees.
    pub fn heading_degrees(&self) -> Option<i32> {
        self.orientation.heading_degrees()
    }

    pub fn show_lines(&self) -> bool {
        self.show_lines
    }

    pub fn show_animals(&self) -> bool {
        self.show_animals
    }

    /// The constellation shown in `Cycle` mode.
    pub fn current_constellation(&self) -> Option<&Constellation> {
        self.sky.constellations().get(self.constellation_cycle.index())
    }

    /// The figure shown in `Cycle` mode.
    pub fn spotlight(&self) -> Option<&AnimalInstance> {
        self.spotlight.as_ref()
    }

    /// The figures shown in `Placed` mode.
    pub fn placed_animals(&self) -> &[AnimalInstance] {
        &self.placed
    }

    pub fn effects(&self) -> &AmbientEffects {
        &self.effects
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scheduler::ManualScheduler;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};
    use crate::systems::effects::BAND_COUNT;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn state(config: SkyConfig) -> SkyState {
        SkyState::new(12345, config, Viewport::new(W, H, 1.0))
    }

    fn run(state: &mut SkyState, times: &[f64]) -> RecordingSurface {
        let mut surface = RecordingSurface::new(W, H);
        let mut scheduler = ManualScheduler::new();
        for &t in times {
            surface.take_commands();
            state.frame(t, &mut surface, &mut scheduler);
        }
        surface
    }

    #[test]
    fn frame_order_clear_aurora_stars() {
        let config = SkyConfig::default();
        let mut sky = state(config.clone());
        let surface = run(&mut sky, &[0.0]);
        let cmds = surface.commands();
        assert_eq!(cmds[0], DrawCommand::Clear);
        let fills_before_lines = cmds
            .iter()
            .skip(1)
            .take_while(|c| matches!(c, DrawCommand::Fill { .. }))
            .count();
        assert_eq!(fills_before_lines, BAND_COUNT + config.star_count);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn every_frame_requests_the_next() {
        let mut sky = state(SkyConfig::default());
        let mut surface = RecordingSurface::new(W, H);
        let mut scheduler = ManualScheduler::new();
        for i in 0..5 {
            sky.frame(i as f64 * 16.0, &mut surface, &mut scheduler);
        }
        assert_eq!(scheduler.pending(), 5);
        assert_eq!(sky.frame_count(), 5);
    }

    #[test]
    fn one_labelled_constellation_per_frame() {
        let mut sky = state(SkyConfig::default());
        let surface = run(&mut sky, &[0.0]);
        let labels: Vec<&str> = surface.texts().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(Some(labels[0]), sky.current_constellation().map(|c| c.name));
    }

    #[test]
    fn constellation_cycles_every_six_seconds() {
        let mut sky = state(SkyConfig::default());
        let first = sky.current_constellation().cloned();
        run(&mut sky, &[0.0, 3000.0, 6000.0]);
        assert_eq!(sky.current_constellation().cloned(), first);
        run(&mut sky, &[6001.0]);
        assert_eq!(sky.current_constellation(), sky.sky().constellations().get(1));
    }

    #[test]
    fn all_mode_draws_every_chain() {
        let config = SkyConfig {
            constellation_mode: ConstellationMode::All,
            show_animals: false,
            ..SkyConfig::default()
        };
        let mut sky = state(config);
        let surface = run(&mut sky, &[0.0]);
        assert_eq!(surface.texts().count(), sky.sky().constellations().len());
    }

    #[test]
    fn toggles_hide_lines_and_animals() {
        let mut sky = state(SkyConfig::default());
        sky.push_event(SkyEvent::ShowLines(false));
        sky.push_event(SkyEvent::ShowAnimals(false));
        let surface = run(&mut sky, &[0.0]);
        assert!(!sky.show_lines() && !sky.show_animals());
        assert_eq!(surface.texts().count(), 0);
        assert_eq!(surface.strokes().count(), 0);
    }

    #[test]
    fn animal_cycle_swaps_spotlight() {
        let mut sky = state(SkyConfig::default());
        assert_eq!(sky.spotlight().map(|a| a.shape.name), Some(library()[0].name));
        run(&mut sky, &[0.0, 7001.0]);
        assert_eq!(sky.spotlight().map(|a| a.shape.name), Some(library()[1].name));
    }

    #[test]
    fn placed_mode_draws_placed_set() {
        let config = SkyConfig {
            animal_mode: AnimalMode::Placed,
            show_lines: false,
            ..SkyConfig::default()
        };
        let mut sky = state(config.clone());
        let surface = run(&mut sky, &[0.0]);
        let node_fills: usize = sky.placed_animals().iter().map(|a| a.shape.nodes.len()).sum();
        let expected = BAND_COUNT + config.star_count + node_fills;
        // sparkles spawned this frame are drawn too
        let fills = surface.fills().count();
        assert!(fills >= expected && fills <= expected + node_fills, "{} fills", fills);
        assert!((1..=4).contains(&sky.placed_animals().len()));
    }

    #[test]
    fn orientation_event_takes_over_drift() {
        let mut sky = state(SkyConfig::default());
        run(&mut sky, &[0.0, 16.0]);
        assert!(!sky.orientation().has_sensor());
        assert!(sky.orientation().yaw > 0.0);

        sky.push_event(SkyEvent::Orientation { alpha: Some(180.4), beta: 0.0, gamma: 0.0 });
        run(&mut sky, &[32.0]);
        assert!(sky.orientation().has_sensor());
        assert_eq!(sky.heading_degrees(), Some(180));
    }

    #[test]
    fn resize_to_phone_replaces_with_three() {
        let config = SkyConfig {
            animal_mode: AnimalMode::Placed,
            ..SkyConfig::default()
        };
        let mut sky = state(config);
        sky.push_event(SkyEvent::Resize(Viewport::new(390.0, 844.0, 3.0)));
        run(&mut sky, &[0.0]);
        assert_eq!(sky.viewport().width, 390.0);
        assert!(sky.placed_animals().len() <= 3);
    }

    #[test]
    fn same_seed_same_frames() {
        let times: Vec<f64> = (0..240).map(|i| i as f64 * 16.7).collect();
        let mut a = state(SkyConfig::default());
        let mut b = state(SkyConfig::default());
        let sa = run(&mut a, &times);
        let sb = run(&mut b, &times);
        assert_eq!(sa.commands(), sb.commands());
    }

    #[test]
    fn stalled_frame_is_clamped() {
        let mut sky = state(SkyConfig::default());
        run(&mut sky, &[0.0]);
        let yaw0 = sky.orientation().yaw;
        run(&mut sky, &[60_000.0]);
        assert!((sky.orientation().yaw - yaw0 - 0.02 * 0.033).abs() < 1e-6);
    }

    #[test]
    fn hostile_config_values_do_not_stop_frames() {
        let json = r#"{ "max_frame_dt": -0.5, "effects": { "comets": { "trail_len": 18446744073709551615, "interval": 0.0 } } }"#;
        let config = SkyConfig::from_json(json).unwrap();
        let mut sky = state(config);
        let times: Vec<f64> = (0..30).map(|i| i as f64 * 16.0).collect();
        run(&mut sky, &times);
        assert_eq!(sky.frame_count(), 30);
        assert_eq!(sky.orientation().yaw, 0.0);
    }

    #[test]
    fn empty_sky_still_renders() {
        let config = SkyConfig {
            star_count: 0,
            ..SkyConfig::default()
        };
        let mut sky = state(config);
        let surface = run(&mut sky, &[0.0, 7000.0]);
        assert!(sky.current_constellation().is_none());
        assert_eq!(surface.texts().count(), 0);
    }
}
