use beamshot_config::Animations;

use crate::animation::{Animation, Clock};

/// Scale the screenshot rests at while the overlay is shown.
pub const INTERMEDIATE_SCALE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TransitionName {
    PreShow,
    SlowClone,
    FastClone,
    ScaleUp,
}

/// Which visual of the surface a transition scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualTarget {
    /// The screenshot itself.
    Primary,
    /// A copy of the screenshot that shrinks away while sending.
    Clone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub name: TransitionName,
    pub from: f64,
    pub to: f64,
    pub config: beamshot_config::Transition,
    pub target: VisualTarget,
}

impl TransitionSpec {
    pub fn start(&self, clock: Clock) -> Animation {
        self.start_from(clock, self.from)
    }

    /// Starts the transition from `from` instead of its nominal start value.
    pub fn start_from(&self, clock: Clock, from: f64) -> Animation {
        Animation::new(clock, from, self.to, self.config)
    }
}

/// The fixed set of transitions of the send ritual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpecs {
    pub pre_show: TransitionSpec,
    pub slow_clone: TransitionSpec,
    pub fast_clone: TransitionSpec,
    pub scale_up: TransitionSpec,
}

impl TransitionSpecs {
    pub fn from_config(config: &Animations) -> Self {
        Self {
            pre_show: TransitionSpec {
                name: TransitionName::PreShow,
                from: 1.,
                to: INTERMEDIATE_SCALE,
                config: config.pre_show(),
                target: VisualTarget::Primary,
            },
            slow_clone: TransitionSpec {
                name: TransitionName::SlowClone,
                from: INTERMEDIATE_SCALE,
                to: 0.,
                config: config.slow_clone(),
                target: VisualTarget::Clone,
            },
            fast_clone: TransitionSpec {
                name: TransitionName::FastClone,
                from: INTERMEDIATE_SCALE,
                to: 0.,
                config: config.fast_clone(),
                target: VisualTarget::Clone,
            },
            scale_up: TransitionSpec {
                name: TransitionName::ScaleUp,
                from: INTERMEDIATE_SCALE,
                to: 1.,
                config: config.scale_up(),
                target: VisualTarget::Primary,
            },
        }
    }
}

impl Default for TransitionSpecs {
    fn default() -> Self {
        Self::from_config(&Animations::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use beamshot_config::Curve;

    use super::*;

    #[test]
    fn stock_specs() {
        let specs = TransitionSpecs::default();

        assert_eq!((specs.pre_show.from, specs.pre_show.to), (1., 0.6));
        assert_eq!(specs.pre_show.config.duration_ms, 300);
        assert_eq!(specs.pre_show.config.curve, Curve::EaseOutQuad);

        assert_eq!((specs.slow_clone.from, specs.slow_clone.to), (0.6, 0.));
        assert_eq!(specs.slow_clone.config.duration_ms, 3000);
        assert_eq!(specs.slow_clone.target, VisualTarget::Clone);

        assert_eq!(specs.fast_clone.config.duration_ms, 200);
        assert_eq!(specs.fast_clone.config.curve, Curve::Linear);

        assert_eq!((specs.scale_up.from, specs.scale_up.to), (0.6, 1.));
        assert_eq!(specs.scale_up.config.curve, Curve::EaseInQuad);
        assert_eq!(specs.scale_up.target, VisualTarget::Primary);
    }

    #[test]
    fn start_from_overrides_start_value() {
        let clock = Clock::with_time(Duration::ZERO);
        let specs = TransitionSpecs::default();
        let anim = specs.fast_clone.start_from(clock, 0.4);
        assert_eq!(anim.from(), 0.4);
        assert_eq!(anim.to(), 0.);
        assert_eq!(anim.duration(), Duration::from_millis(200));
    }
}
