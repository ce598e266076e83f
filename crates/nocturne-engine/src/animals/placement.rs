use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::shapes::AnimalShape;
use crate::core::rng::Rng;
use crate::core::viewport::{Bounds, Viewport};

/// One animal on screen: a shared template plus its own placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimalInstance {
    pub shape: &'static AnimalShape,
    /// Center in normalized viewport coordinates.
    pub center: Vec2,
    /// Multiplier on the base figure size.
    pub scale: f32,
    /// Radians.
    pub rotation: f32,
    /// Animation phase offset in radians.
    pub phase: f32,
}

/// Tuning for [`place_animals`]. Distances are in normalized viewport units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementParams {
    pub center: Vec2,
    pub base_radius: f32,
    /// Minimum spacing between placed centers.
    pub min_distance: f32,
    pub max_attempts: u32,
    /// Candidates outside this rectangle are rejected.
    pub region: Bounds,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            center: Vec2::new(0.5, 0.5),
            base_radius: 0.14,
            min_distance: 0.18,
            max_attempts: 400,
            region: Bounds::new(Vec2::new(0.30, 0.35), Vec2::new(0.70, 0.70)),
        }
    }
}

/// Scatter up to `count` animals around `params.center` without overlap.
///
/// Candidates walk around the center; the i-th placed animal uses
/// `shapes[i % shapes.len()]`. When nothing could be placed the first shape
/// is put at the center, so a non-empty library always yields at least one
/// instance.
pub fn place_animals(
    shapes: &[&'static AnimalShape],
    count: usize,
    params: &PlacementParams,
    rng: &mut Rng,
) -> Vec<AnimalInstance> {
    let Some(&first) = shapes.first() else {
        return Vec::new();
    };

    let min_d2 = params.min_distance * params.min_distance;
    let mut placed: Vec<AnimalInstance> = Vec::with_capacity(count);
    let mut attempts = 0;

    while placed.len() < count && attempts < params.max_attempts {
        attempts += 1;
        let angle = (placed.len() as f32 / count as f32) * TAU + rng.signed(0.3);
        let r = params.base_radius * (0.85 + rng.next_f64() as f32 * 0.4);
        let candidate = params.center + Vec2::new(angle.cos() * r, angle.sin() * r * 0.8);

        if !params.region.contains(candidate) {
            continue;
        }
        if placed.iter().any(|a| a.center.distance_squared(candidate) <= min_d2) {
            continue;
        }

        placed.push(AnimalInstance {
            shape: shapes[placed.len() % shapes.len()],
            center: candidate,
            scale: 1.05 + rng.next_f64() as f32 * 0.45,
            rotation: rng.signed(0.18),
            phase: rng.next_f64() as f32 * TAU,
        });
    }

    if placed.is_empty() {
        log::debug!("Animal placement fell back to the center after {} attempts", attempts);
        placed.push(AnimalInstance {
            shape: first,
            center: params.center,
            scale: 1.2,
            rotation: 0.0,
            phase: rng.next_f64() as f32 * TAU,
        });
    }
    placed
}

/// How many animals fit the viewport: 3 on small screens, 4 otherwise,
/// never more than there are shapes.
pub fn target_count(viewport: &Viewport, shape_count: usize) -> usize {
    let wanted = if viewport.min_side().max(320.0) < 520.0 { 3 } else { 4 };
    wanted.min(shape_count)
}

/// A single, nearly centered instance for the one-at-a-time cycle.
pub fn spotlight_instance(shape: &'static AnimalShape, rng: &mut Rng) -> AnimalInstance {
    let x = 0.5 + rng.signed(0.01);
    let y = 0.52 + rng.signed(0.01);
    AnimalInstance {
        shape,
        center: Vec2::new(x, y),
        scale: 1.15 + rng.next_f64() as f32 * 0.35,
        rotation: rng.signed(0.15),
        phase: rng.next_f64() as f32 * TAU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::shapes::library;

    #[test]
    fn placed_animals_keep_their_distance() {
        let params = PlacementParams::default();
        let min_d2 = params.min_distance * params.min_distance;
        for seed in 0..50 {
            let mut rng = Rng::new(seed);
            let placed = place_animals(library(), 4, &params, &mut rng);
            assert!(!placed.is_empty() && placed.len() <= 4);
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(a.center.distance_squared(b.center) > min_d2);
                }
            }
        }
    }

    #[test]
    fn placed_animals_stay_in_region() {
        let params = PlacementParams::default();
        for seed in [7, 12345] {
            let placed = place_animals(library(), 3, &params, &mut Rng::new(seed));
            for a in &placed {
                assert!(params.region.contains(a.center), "{:?} outside region", a.center);
                assert!((1.05..=1.5).contains(&a.scale));
                assert!(a.rotation.abs() <= 0.18);
            }
        }
    }

    #[test]
    fn shapes_are_assigned_in_order() {
        let placed = place_animals(library(), 4, &PlacementParams::default(), &mut Rng::new(3));
        for (i, a) in placed.iter().enumerate() {
            assert_eq!(a.shape.name, library()[i].name);
        }
    }

    #[test]
    fn impossible_region_falls_back_to_center() {
        let params = PlacementParams {
            region: Bounds::new(Vec2::splat(2.0), Vec2::splat(3.0)),
            ..PlacementParams::default()
        };
        let placed = place_animals(library(), 4, &params, &mut Rng::new(1));
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].center, params.center);
        assert_eq!(placed[0].scale, 1.2);
        assert_eq!(placed[0].rotation, 0.0);
        assert_eq!(placed[0].shape.name, library()[0].name);
    }

    #[test]
    fn no_shapes_no_animals() {
        assert!(place_animals(&[], 4, &PlacementParams::default(), &mut Rng::new(1)).is_empty());
    }

    #[test]
    fn target_count_by_viewport() {
        assert_eq!(target_count(&Viewport::new(390.0, 844.0, 3.0), 6), 3);
        assert_eq!(target_count(&Viewport::new(1280.0, 720.0, 1.0), 6), 4);
        assert_eq!(target_count(&Viewport::new(1280.0, 720.0, 1.0), 2), 2);
    }

    #[test]
    fn spotlight_is_near_center() {
        let mut rng = Rng::new(99);
        for shape in library() {
            let a = spotlight_instance(*shape, &mut rng);
            assert!((a.center.x - 0.5).abs() <= 0.01 + 1e-6);
            assert!((a.center.y - 0.52).abs() <= 0.01 + 1e-6);
            assert!((1.15..=1.5).contains(&a.scale));
            assert!(a.rotation.abs() <= 0.15);
            assert!((0.0..=TAU).contains(&a.phase));
        }
    }
}
