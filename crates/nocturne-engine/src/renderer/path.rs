//! Retained 2D path description shared by every surface backend.

use glam::{Affine2, Vec2};
use std::f32::consts::TAU;

/// One path command. Mirrors the Canvas2D path API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEl {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    /// Clockwise (y-down) arc from `start` to `end` radians.
    Arc { center: Vec2, radius: f32, start: f32, end: f32 },
    Close,
}

/// A sequence of sub-paths built from [`PathEl`] commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    els: Vec<PathEl>,
}

/// A flattened sub-path.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self { els: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { els: Vec::with_capacity(n) }
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.els.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        self.els.push(PathEl::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, ctrl: Vec2, to: Vec2) -> &mut Self {
        self.els.push(PathEl::QuadTo { ctrl, to });
        self
    }

    pub fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) -> &mut Self {
        self.els.push(PathEl::Arc { center, radius, start, end });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.els.push(PathEl::Close);
        self
    }

    /// Full circle as its own sub-path.
    pub fn circle(center: Vec2, radius: f32) -> Self {
        let mut path = Self::with_capacity(1);
        path.arc(center, radius, 0.0, TAU);
        path
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Vec2]) -> Self {
        let mut path = Self::with_capacity(points.len());
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    pub fn elements(&self) -> &[PathEl] {
        &self.els
    }

    pub fn is_empty(&self) -> bool {
        self.els.is_empty()
    }

    /// Flatten curves and arcs into polylines.
    ///
    /// `tolerance` is the maximum chord deviation in path units. An arc that
    /// follows existing geometry is connected to it with a straight line, the
    /// way Canvas2D does. Sub-paths with fewer than two points are dropped.
    pub fn flatten(&self, tolerance: f32) -> Vec<Polyline> {
        let tolerance = tolerance.max(1e-4);
        let mut out = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();

        let flush = |current: &mut Vec<Vec2>, closed: bool, out: &mut Vec<Polyline>| {
            if current.len() > 1 {
                out.push(Polyline {
                    points: std::mem::take(current),
                    closed,
                });
            } else {
                current.clear();
            }
        };

        for el in &self.els {
            match *el {
                PathEl::MoveTo(p) => {
                    flush(&mut current, false, &mut out);
                    current.push(p);
                }
                PathEl::LineTo(p) => current.push(p),
                PathEl::QuadTo { ctrl, to } => {
                    let from = current.last().copied().unwrap_or(ctrl);
                    if current.is_empty() {
                        current.push(from);
                    }
                    let dev = (from - 2.0 * ctrl + to).length() * 0.25;
                    let steps = ((dev / tolerance).sqrt().ceil() as usize).clamp(1, 64);
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        let mt = 1.0 - t;
                        current.push(from * mt * mt + ctrl * 2.0 * mt * t + to * t * t);
                    }
                }
                PathEl::Arc { center, radius, start, end } => {
                    let sweep = end - start;
                    let steps = arc_steps(radius, sweep, tolerance);
                    for i in 0..=steps {
                        let a = start + sweep * i as f32 / steps as f32;
                        current.push(center + Vec2::new(a.cos(), a.sin()) * radius);
                    }
                }
                PathEl::Close => {
                    let restart = current.first().copied();
                    flush(&mut current, true, &mut out);
                    if let Some(p) = restart {
                        current.push(p);
                    }
                }
            }
        }
        flush(&mut current, false, &mut out);
        out
    }

    /// Copy of this path with every point mapped through `xf`.
    /// Arc radii are scaled by the mean axis scale.
    pub fn transformed(&self, xf: &Affine2) -> Self {
        let radius_scale = {
            let sx = xf.matrix2.x_axis.length();
            let sy = xf.matrix2.y_axis.length();
            (sx + sy) * 0.5
        };
        let rotation = xf.matrix2.x_axis.y.atan2(xf.matrix2.x_axis.x);
        let els = self
            .els
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(xf.transform_point2(p)),
                PathEl::LineTo(p) => PathEl::LineTo(xf.transform_point2(p)),
                PathEl::QuadTo { ctrl, to } => PathEl::QuadTo {
                    ctrl: xf.transform_point2(ctrl),
                    to: xf.transform_point2(to),
                },
                PathEl::Arc { center, radius, start, end } => PathEl::Arc {
                    center: xf.transform_point2(center),
                    radius: radius * radius_scale,
                    start: start + rotation,
                    end: end + rotation,
                },
                PathEl::Close => PathEl::Close,
            })
            .collect();
        Self { els }
    }
}

fn arc_steps(radius: f32, sweep: f32, tolerance: f32) -> usize {
    if radius <= tolerance {
        return 4;
    }
    // Chord error of a segment spanning angle `a` is r * (1 - cos(a/2)).
    let max_angle = 2.0 * (1.0 - tolerance / radius).clamp(-1.0, 1.0).acos();
    ((sweep.abs() / max_angle.max(1e-3)).ceil() as usize).clamp(4, 256)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_flattens_to_itself() {
        let pts = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let flat = Path::polyline(&pts).flatten(0.25);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].points, pts.to_vec());
        assert!(!flat[0].closed);
    }

    #[test]
    fn circle_points_lie_on_radius() {
        let flat = Path::circle(Vec2::new(5.0, 5.0), 3.0).flatten(0.1);
        assert_eq!(flat.len(), 1);
        for p in &flat[0].points {
            assert!(((*p - Vec2::new(5.0, 5.0)).length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn close_marks_subpath_closed() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO)
            .line_to(Vec2::new(1.0, 0.0))
            .line_to(Vec2::new(0.0, 1.0))
            .close();
        let flat = path.flatten(0.1);
        assert_eq!(flat.len(), 1);
        assert!(flat[0].closed);
    }

    #[test]
    fn quad_ends_at_target() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).quad_to(Vec2::new(5.0, 10.0), Vec2::new(10.0, 0.0));
        let flat = path.flatten(0.1);
        assert_eq!(*flat[0].points.last().unwrap(), Vec2::new(10.0, 0.0));
        assert!(flat[0].points.len() > 2);
    }

    #[test]
    fn transformed_scales_arc_radius() {
        let xf = Affine2::from_scale_angle_translation(Vec2::splat(2.0), 0.0, Vec2::new(1.0, 1.0));
        let path = Path::circle(Vec2::ZERO, 1.5).transformed(&xf);
        match path.elements()[0] {
            PathEl::Arc { center, radius, .. } => {
                assert_eq!(center, Vec2::new(1.0, 1.0));
                assert!((radius - 3.0).abs() < 1e-6);
            }
            other => panic!("expected arc, got {:?}", other),
        }
    }
}
