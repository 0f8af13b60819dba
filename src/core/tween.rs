//! Timed transition between two scalar values.
//!
//! A [`Tween`] holds no clock of its own: callers pass `now` into every
//! query, which keeps the frame loop and the tests on the same footing.

use std::time::{Duration, Instant};

use super::easing::Easing;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing, started: Instant) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            easing,
        }
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased value at `now`.  Exactly `to` once the duration has elapsed.
    pub fn sample(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}
