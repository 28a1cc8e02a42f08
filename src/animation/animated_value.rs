//! Animated value abstraction for scale transitions.
//!
//! A value is either resting or following an [`Animation`]. Cancelling freezes it at whatever the
//! animation currently reads, so a follow-up animation can pick up from there without a jump.

use super::Animation;

/// A value that can be static or animating.
#[derive(Debug, Clone)]
pub enum AnimatedValue {
    /// The value is static.
    Static(f64),
    /// The value is animating toward a target.
    Animation(Animation),
}

impl AnimatedValue {
    /// Creates a new static value.
    pub fn new(value: f64) -> Self {
        Self::Static(value)
    }

    /// Returns the current value.
    pub fn current(&self) -> f64 {
        match self {
            AnimatedValue::Static(value) => *value,
            AnimatedValue::Animation(anim) => anim.value(),
        }
    }

    /// Returns the value this will settle at.
    pub fn target(&self) -> f64 {
        match self {
            AnimatedValue::Static(value) => *value,
            AnimatedValue::Animation(anim) => anim.to(),
        }
    }

    /// Returns the running animation, if any.
    pub fn animation(&self) -> Option<&Animation> {
        match self {
            AnimatedValue::Static(_) => None,
            AnimatedValue::Animation(anim) => Some(anim),
        }
    }

    /// Returns `true` if the value is static.
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    /// Returns `true` if an animation is running and not yet done.
    pub fn is_animation_ongoing(&self) -> bool {
        match self {
            AnimatedValue::Static(_) => false,
            AnimatedValue::Animation(anim) => !anim.is_done(),
        }
    }

    /// Starts following `anim`, replacing anything in progress.
    pub fn animate(&mut self, anim: Animation) {
        *self = AnimatedValue::Animation(anim);
    }

    /// Stops any animation, keeping the current value.
    ///
    /// Returns `true` if an animation was running.
    pub fn stop_anim(&mut self) -> bool {
        let was_animating = !self.is_static();
        *self = AnimatedValue::Static(self.current());
        was_animating
    }

    /// Stops any animation, jumping to its target.
    ///
    /// Returns `true` if an animation was running.
    pub fn end_anim(&mut self) -> bool {
        let was_animating = !self.is_static();
        *self = AnimatedValue::Static(self.target());
        was_animating
    }
}
