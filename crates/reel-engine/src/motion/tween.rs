// motion/tween.rs
//
// Scalar tween — the one interpolation primitive every phase builds on:
// a value from A to B over a duration, sampled once per tick.

use super::easing::{ease, Easing};

/// A single scalar value transition.
#[derive(Debug, Clone)]
pub struct ScalarTween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl ScalarTween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` and return the eased value at the new time.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }

    /// Eased value at the current time.
    pub fn value(&self) -> f32 {
        ease(self.from, self.to, self.progress(), self.easing)
    }

    /// Normalized progress [0, 1]. A non-positive duration completes
    /// immediately.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint() {
        let mut tw = ScalarTween::new(0.0, 100.0, 1.0, Easing::Linear);
        let v = tw.advance(0.5);
        assert!((v - 50.0).abs() < 1e-3);
        assert!(!tw.is_complete());
    }

    #[test]
    fn clamps_at_target() {
        let mut tw = ScalarTween::new(0.0, 100.0, 1.0, Easing::Linear);
        let v = tw.advance(2.0);
        assert!((v - 100.0).abs() < 1e-3);
        assert!(tw.is_complete());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tw = ScalarTween::new(5.0, 9.0, 0.0, Easing::Smooth);
        assert!(tw.is_complete());
        assert!((tw.value() - 9.0).abs() < 1e-5);
    }
}
