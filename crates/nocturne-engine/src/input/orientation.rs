use glam::Vec2;

/// Pan amplitude in normalized viewport units.
pub const PAN_AMPLITUDE: f32 = 0.2;

/// Device attitude driving the parallax pan.
///
/// Angles are radians. Until the first sensor sample arrives the sky drifts
/// on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationState {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    has_sensor: bool,
    heading: Option<i32>,
}

impl OrientationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a device-orientation sample given in degrees.
    ///
    /// Samples without a compass angle are ignored. Returns whether it was applied.
    pub fn apply_sample(&mut self, alpha: Option<f32>, beta: f32, gamma: f32) -> bool {
        let Some(alpha) = alpha.filter(|a| a.is_finite()) else {
            return false;
        };
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        self.yaw = alpha.to_radians();
        self.pitch = finite_or_zero(beta).to_radians();
        self.roll = finite_or_zero(gamma).to_radians();
        self.heading = Some(alpha.round() as i32);
        if !self.has_sensor {
            log::info!("Orientation sensor active");
        }
        self.has_sensor = true;
        true
    }

    /// Slow automatic drift, used only while no sensor is live.
    pub fn drift(&mut self, dt: f32, now_ms: f64) {
        if self.has_sensor {
            return;
        }
        self.yaw += 0.02 * dt;
        self.pitch = ((now_ms * 0.0002).sin() * 0.1) as f32;
    }

    pub fn has_sensor(&self) -> bool {
        self.has_sensor
    }

    /// Parallax offset from the current attitude.
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.yaw.sin(), self.pitch.sin()) * PAN_AMPLITUDE
    }

    /// Small star-field rotation that hints at the compass direction.
    pub fn star_rotation(&self) -> f32 {
        if self.has_sensor {
            self.yaw.sin() * 0.02
        } else {
            0.0
        }
    }

    /// Rounded compass heading in degrees from the last sample.
    pub fn heading_degrees(&self) -> Option<i32> {
        self.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn sample_converts_degrees() {
        let mut o = OrientationState::new();
        assert!(o.apply_sample(Some(90.0), 45.0, -30.0));
        assert!((o.yaw - FRAC_PI_2).abs() < 1e-6);
        assert!((o.pitch - 45f32.to_radians()).abs() < 1e-6);
        assert!((o.roll + 30f32.to_radians()).abs() < 1e-6);
        assert!(o.has_sensor());
        assert_eq!(o.heading_degrees(), Some(90));
        assert!((o.pan().x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn sample_without_alpha_is_ignored() {
        let mut o = OrientationState::new();
        assert!(!o.apply_sample(None, 10.0, 10.0));
        assert!(!o.apply_sample(Some(f32::NAN), 10.0, 10.0));
        assert!(!o.has_sensor());
        assert_eq!(o.heading_degrees(), None);
    }

    #[test]
    fn drift_only_without_sensor() {
        let mut o = OrientationState::new();
        o.drift(0.5, 0.0);
        assert!((o.yaw - 0.01).abs() < 1e-7);
        assert_eq!(o.pitch, 0.0);
        assert_eq!(o.star_rotation(), 0.0);

        o.apply_sample(Some(0.0), 0.0, 0.0);
        o.drift(0.5, 1000.0);
        assert_eq!(o.yaw, 0.0);
    }

    #[test]
    fn drift_pitch_follows_sine() {
        let mut o = OrientationState::new();
        let now = 7853.98; // quarter period of sin(now * 0.0002)
        o.drift(0.0, now);
        assert!((o.pitch - 0.1).abs() < 1e-4);
    }

    #[test]
    fn rotation_when_sensor_live() {
        let mut o = OrientationState::new();
        o.apply_sample(Some(90.0), 0.0, 0.0);
        assert!((o.star_rotation() - 0.02).abs() < 1e-6);
    }
}
