//! Time-based scalar animations.
//!
//! An [`Animation`] interpolates between two values over a fixed duration along an easing curve,
//! reading time from a shared [`Clock`]. Animations never schedule anything themselves: whoever
//! owns them checks [`Animation::is_done`] once per frame.

use std::time::Duration;

use beamshot_config::Curve;
use keyframe::functions::{EaseInQuad, EaseOutCubic, EaseOutQuad, Linear};
use keyframe::EasingFunction;

mod animated_value;
mod clock;

pub use animated_value::AnimatedValue;
pub use clock::Clock;

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    is_off: bool,
    curve: Curve,
    clock: Clock,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: beamshot_config::Transition) -> Self {
        let start_time = clock.now();
        Self {
            from,
            to,
            duration: Duration::from_millis(u64::from(config.duration_ms)),
            start_time,
            is_off: config.off,
            curve: config.curve,
            clock,
        }
    }

    pub fn is_done(&self) -> bool {
        if self.is_off || self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.start_time + self.duration
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);
        let x = passed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.curve.y(x)
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

pub trait CurveExt {
    /// Evaluates the curve at `x` in `[0, 1]`.
    fn y(self, x: f64) -> f64;
}

impl CurveExt for Curve {
    fn y(self, x: f64) -> f64 {
        let x = x.clamp(0., 1.);
        match self {
            Curve::Linear => Linear.y(x),
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseInQuad => EaseInQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}
