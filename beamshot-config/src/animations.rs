use std::str::FromStr;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    /// Clock rate divisor; must be written as a float, e.g. `slowdown 2.0`.
    #[knuffel(child, unwrap(argument))]
    pub slowdown: Option<f64>,
    #[knuffel(child, default)]
    pub pre_show: TransitionPart,
    #[knuffel(child, default)]
    pub slow_clone: TransitionPart,
    #[knuffel(child, default)]
    pub fast_clone: TransitionPart,
    #[knuffel(child, default)]
    pub scale_up: TransitionPart,
}

/// A transition block as written in the config, with every field optional.
#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct TransitionPart {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument))]
    pub duration_ms: Option<u32>,
    #[knuffel(child, unwrap(argument, str))]
    pub curve: Option<Curve>,
}

/// Resolved timing of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub off: bool,
    pub duration_ms: u32,
    pub curve: Curve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseInQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animations {
    pub fn slowdown(&self) -> f64 {
        self.slowdown.unwrap_or(1.)
    }

    /// Shrink of the screenshot right after it is shown.
    pub fn pre_show(&self) -> Transition {
        self.pre_show.resolve(300, Curve::EaseOutQuad)
    }

    /// Long shrink of the clone while the send is in flight.
    pub fn slow_clone(&self) -> Transition {
        self.slow_clone.resolve(3000, Curve::Linear)
    }

    /// Final shrink of the clone once the send went through.
    pub fn fast_clone(&self) -> Transition {
        self.fast_clone.resolve(200, Curve::Linear)
    }

    /// Scale the screenshot back up to full size.
    pub fn scale_up(&self) -> Transition {
        self.scale_up.resolve(300, Curve::EaseInQuad)
    }
}

impl TransitionPart {
    fn resolve(&self, duration_ms: u32, curve: Curve) -> Transition {
        Transition {
            off: self.off,
            duration_ms: self.duration_ms.unwrap_or(duration_ms),
            curve: self.curve.unwrap_or(curve),
        }
    }
}

impl FromStr for Curve {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "ease-out-quad" => Ok(Self::EaseOutQuad),
            "ease-in-quad" => Ok(Self::EaseInQuad),
            "ease-out-cubic" => Ok(Self::EaseOutCubic),
            "ease-out-expo" => Ok(Self::EaseOutExpo),
            _ => Err(
                r#"invalid curve, can be "linear", "ease-out-quad", "ease-in-quad", "ease-out-cubic" or "ease-out-expo""#,
            ),
        }
    }
}
