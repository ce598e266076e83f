/// RGBA color, each channel in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) and a 0.0 - 1.0 alpha,
    /// the way CSS `rgba()` is written.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Opaque color from RGB u8 values.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    /// HSL color. `hue` in degrees (wraps), `saturation` and `lightness` in 0.0 - 1.0.
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::hsla(hue, saturation, lightness, 1.0)
    }

    /// HSL color with alpha.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::new(r1 + m, g1 + m, b1 + m, alpha.clamp(0.0, 1.0))
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scale the alpha channel.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise linear blend, `t` clamped to [0, 1]. Exact at both ends.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r * (1.0 - t) + other.r * t,
            g: self.g * (1.0 - t) + other.g * t,
            b: self.b * (1.0 - t) + other.b * t,
            a: self.a * (1.0 - t) + other.a * t,
        }
    }

    /// CSS `rgba(...)` string for Canvas2D style setters.
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{:.3})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn hsl_primaries() {
        let red = Color::hsl(0.0, 1.0, 0.5);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));

        let blue = Color::hsl(240.0, 1.0, 0.5);
        assert!(close(blue.r, 0.0) && close(blue.g, 0.0) && close(blue.b, 1.0));

        let wrapped = Color::hsl(480.0, 1.0, 0.5); // same as 120
        assert!(close(wrapped.g, 1.0) && close(wrapped.r, 0.0));
    }

    #[test]
    fn hsl_lightness_extremes() {
        let white = Color::hsl(210.0, 0.9, 1.0);
        assert!(close(white.r, 1.0) && close(white.g, 1.0) && close(white.b, 1.0));
        let black = Color::hsl(210.0, 0.9, 0.0);
        assert!(close(black.r, 0.0) && close(black.b, 0.0));
    }

    #[test]
    fn rgba8_matches_css_notation() {
        let c = Color::rgba8(255, 215, 130, 0.85);
        assert_eq!(c.to_css(), "rgba(255,215,130,0.850)");
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::rgb8(255, 255, 255);
        let b = Color::rgba8(255, 220, 120, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!(close(a.lerp(b, 0.5).a, 0.5));
    }

    #[test]
    fn lerp_end_reproduces_gradient_stop() {
        let gold = Color::rgba8(242, 169, 120, 0.9);
        for from in [Color::WHITE, Color::BLACK, Color::rgb8(17, 34, 51)] {
            assert_eq!(from.lerp(gold, 1.0), gold);
            assert_eq!(from.lerp(gold, 3.0), gold);
            assert_eq!(from.lerp(gold, 0.0), from);
        }
    }

    #[test]
    fn fade_scales_alpha() {
        let c = Color::WHITE.with_alpha(0.8).fade(0.5);
        assert!(close(c.a, 0.4));
    }
}
