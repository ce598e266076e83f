use glam::Vec2;

use super::color::Color;

/// A gradient stop: `offset` in [0, 1] along the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

/// Gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

/// Gradient between two circles (Canvas2D `createRadialGradient`).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Two-stop linear gradient.
    pub fn linear(start: Vec2, end: Vec2, from: Color, to: Color) -> Self {
        Paint::Linear(LinearGradient {
            start,
            end,
            stops: vec![
                ColorStop { offset: 0.0, color: from },
                ColorStop { offset: 1.0, color: to },
            ],
        })
    }

    /// Two-stop radial gradient.
    pub fn radial(center: Vec2, inner_radius: f32, outer_radius: f32, from: Color, to: Color) -> Self {
        Paint::Radial(RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: vec![
                ColorStop { offset: 0.0, color: from },
                ColorStop { offset: 1.0, color: to },
            ],
        })
    }

    /// Color this paint produces at `p` (used by backends without native gradients).
    pub fn color_at(&self, p: Vec2) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => {
                let axis = g.end - g.start;
                let len2 = axis.length_squared();
                let t = if len2 > 0.0 { (p - g.start).dot(axis) / len2 } else { 0.0 };
                sample_stops(&g.stops, t)
            }
            Paint::Radial(g) => {
                let span = g.outer_radius - g.inner_radius;
                let d = (p - g.center).length();
                let t = if span > 0.0 { (d - g.inner_radius) / span } else { 0.0 };
                sample_stops(&g.stops, t)
            }
        }
    }

    /// The first stop color, or the solid color.
    pub fn primary_color(&self) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.stops.first().map(|s| s.color).unwrap_or(Color::TRANSPARENT),
            Paint::Radial(g) => g.stops.first().map(|s| s.color).unwrap_or(Color::TRANSPARENT),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Color::TRANSPARENT,
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp(b.color, local);
        }
    }
    last.color
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl StrokeStyle {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }

    /// Round caps and joins, used for hand-drawn lines.
    pub fn round(width: f32) -> Self {
        Self {
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

/// Blurred drop shadow under subsequent draws (used as a glow).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

impl Shadow {
    pub fn glow(color: Color, blur: f32) -> Self {
        Self { color, blur }
    }
}

/// Text font as a CSS font shorthand, e.g. `600 12px Montserrat, sans-serif`.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub css: String,
}

impl Font {
    pub fn new(css: impl Into<String>) -> Self {
        Self { css: css.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_color_at_endpoints_and_midpoint() {
        let paint = Paint::linear(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Color::WHITE,
            Color::WHITE.with_alpha(0.0),
        );
        assert_eq!(paint.color_at(Vec2::ZERO).a, 1.0);
        assert_eq!(paint.color_at(Vec2::new(10.0, 3.0)).a, 0.0);
        assert!((paint.color_at(Vec2::new(5.0, -2.0)).a - 0.5).abs() < 1e-6);
        // outside the axis the end colors extend
        assert_eq!(paint.color_at(Vec2::new(-4.0, 0.0)).a, 1.0);
    }

    #[test]
    fn radial_color_by_distance() {
        let paint = Paint::radial(Vec2::ZERO, 1.0, 3.0, Color::BLACK, Color::WHITE);
        assert_eq!(paint.color_at(Vec2::new(0.5, 0.0)), Color::BLACK);
        assert!((paint.color_at(Vec2::new(0.0, 2.0)).r - 0.5).abs() < 1e-6);
        assert_eq!(paint.color_at(Vec2::new(5.0, 0.0)), Color::WHITE);
    }

    #[test]
    fn empty_gradient_is_transparent() {
        let paint = Paint::Linear(LinearGradient {
            start: Vec2::ZERO,
            end: Vec2::ONE,
            stops: Vec::new(),
        });
        assert_eq!(paint.color_at(Vec2::ZERO), Color::TRANSPARENT);
        assert_eq!(paint.primary_color(), Color::TRANSPARENT);
    }
}
