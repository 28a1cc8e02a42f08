use super::transitions::{TransitionName, VisualTarget, INTERMEDIATE_SCALE};
use crate::animation::{AnimatedValue, Animation};
use crate::capture::{CapturedImage, Size};

/// Host that actually shows the overlay.
///
/// The orchestrator calls `attach` and `detach` exactly once per show/dismiss cycle, and never
/// attaches twice without detaching in between. Layout and drawing belong to the host; it reads
/// the visuals from the surface every frame.
pub trait Presenter {
    fn attach(&mut self, surface: &SendSurface);
    fn detach(&mut self, surface: &SendSurface);
}

/// Receives the confirming touch.
///
/// Called from inside the orchestrator, so implementations must not call back into it; queue the
/// follow-up work instead.
pub trait SendCallback {
    fn on_send_confirmed(&self);
}

impl<F: Fn()> SendCallback for F {
    fn on_send_confirmed(&self) {
        self()
    }
}

/// Screen orientation the host keeps while the overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationLock {
    #[default]
    Portrait,
    Landscape,
}

impl OrientationLock {
    pub fn for_size(size: Size) -> Self {
        if size.w > size.h {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// What to do once a transition runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Completion {
    Nothing,
    /// The pre-show shrink landed.
    PreShown,
    /// The clone is gone; scale the screenshot back up.
    SendScaleUp,
    /// Tear the overlay down.
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Running {
    pub name: TransitionName,
    pub completion: Completion,
}

/// One scaled copy of the screenshot.
#[derive(Debug)]
pub struct Visual {
    scale: AnimatedValue,
    alpha: f64,
    visible: bool,
    running: Option<Running>,
}

impl Visual {
    fn new(scale: f64, visible: bool) -> Self {
        Self {
            scale: AnimatedValue::new(scale),
            alpha: 1.,
            visible,
            running: None,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale.current()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Name of the transition currently driving this visual.
    pub fn transition(&self) -> Option<TransitionName> {
        self.running.map(|running| running.name)
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.scale.animation()
    }

    pub(super) fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    pub(super) fn reset(&mut self, scale: f64, visible: bool) {
        *self = Self::new(scale, visible);
    }

    /// Starts a transition, silently replacing the one in progress.
    pub(super) fn start(&mut self, running: Running, anim: Animation) {
        self.scale.animate(anim);
        self.running = Some(running);
    }

    /// Cancels the running transition in place. No-op when nothing runs.
    pub(super) fn cancel(&mut self) -> Option<TransitionName> {
        self.scale.stop_anim();
        self.running.take().map(|running| running.name)
    }

    /// Jumps the running transition to its end and hands back its completion.
    pub(super) fn end(&mut self) -> Option<Running> {
        self.scale.end_anim();
        self.running.take()
    }

    /// Hands back the completion of a transition that ran out.
    pub(super) fn take_finished(&mut self) -> Option<Running> {
        if self.running.is_none() || self.scale.is_animation_ongoing() {
            return None;
        }
        self.end()
    }
}

/// The overlay handed to the [`Presenter`].
#[derive(Debug)]
pub struct SendSurface {
    image: Option<CapturedImage>,
    orientation: OrientationLock,
    primary: Visual,
    clone: Visual,
}

impl SendSurface {
    pub(super) fn new() -> Self {
        Self {
            image: None,
            orientation: OrientationLock::default(),
            primary: Visual::new(1., false),
            clone: Visual::new(INTERMEDIATE_SCALE, false),
        }
    }

    /// The screenshot shown by both visuals.
    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    pub fn orientation(&self) -> OrientationLock {
        self.orientation
    }

    pub fn primary(&self) -> &Visual {
        &self.primary
    }

    pub fn clone_view(&self) -> &Visual {
        &self.clone
    }

    pub(super) fn visual_mut(&mut self, target: VisualTarget) -> &mut Visual {
        match target {
            VisualTarget::Primary => &mut self.primary,
            VisualTarget::Clone => &mut self.clone,
        }
    }

    pub(super) fn set_image(&mut self, image: Option<CapturedImage>) {
        self.image = image;
    }

    pub(super) fn take_image(&mut self) -> Option<CapturedImage> {
        self.image.take()
    }

    /// Puts both visuals in their initial pose and locks the orientation to the screenshot.
    pub(super) fn prepare(&mut self) {
        self.primary.reset(1., true);
        self.clone.reset(INTERMEDIATE_SCALE, false);
        self.orientation = self
            .image
            .as_ref()
            .map_or(OrientationLock::default(), |image| {
                OrientationLock::for_size(image.size())
            });
    }

    pub(super) fn cancel_all(&mut self) {
        self.primary.cancel();
        self.clone.cancel();
    }

    pub(super) fn take_finished(&mut self) -> Option<Running> {
        self.primary
            .take_finished()
            .or_else(|| self.clone.take_finished())
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.primary.scale.is_animation_ongoing() || self.clone.scale.is_animation_ongoing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_follows_aspect() {
        assert_eq!(
            OrientationLock::for_size(Size::new(1920, 1080)),
            OrientationLock::Landscape
        );
        assert_eq!(
            OrientationLock::for_size(Size::new(1080, 1920)),
            OrientationLock::Portrait
        );
        assert_eq!(
            OrientationLock::for_size(Size::new(500, 500)),
            OrientationLock::Portrait
        );
    }

    #[test]
    fn cancel_without_transition_is_noop() {
        let mut visual = Visual::new(0.6, true);
        assert_eq!(visual.cancel(), None);
        assert_eq!(visual.end(), None);
        assert_eq!(visual.take_finished(), None);
        assert_eq!(visual.scale(), 0.6);
    }
}
