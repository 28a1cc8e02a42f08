//! Send confirmation overlay.
//!
//! The overlay shows a screenshot shrinking down, waits for the caller to drive it through the
//! send, and tears itself down once the final transition lands or the caller dismisses it.
//!
//! All calls happen on the presentation thread. Transitions read time from a shared [`Clock`];
//! the host calls [`AnimationOrchestrator::advance_animations`] once per frame, and that is where
//! completions run.

use std::rc::Rc;

use crate::animation::Clock;
use crate::capture::{self, CaptureError, CaptureSource};
use crate::input::{ConfirmGateState, TouchConfirmGate, TouchEvent};

mod phase;
mod surface;
mod transitions;


pub use phase::{Phase, PhaseEvent};
use surface::{Completion, Running};
pub use surface::{OrientationLock, Presenter, SendCallback, SendSurface, Visual};
pub use transitions::{
    TransitionName, TransitionSpec, TransitionSpecs, VisualTarget, INTERMEDIATE_SCALE,
};

pub struct AnimationOrchestrator<P> {
    presenter: P,
    callback: Rc<dyn SendCallback>,
    clock: Clock,
    specs: TransitionSpecs,
    phase: Phase,
    surface: SendSurface,
    gate: TouchConfirmGate,
}

impl<P: Presenter> AnimationOrchestrator<P> {
    pub fn new(
        presenter: P,
        clock: Clock,
        specs: TransitionSpecs,
        callback: impl SendCallback + 'static,
    ) -> Self {
        Self {
            presenter,
            callback: Rc::new(callback),
            clock,
            specs,
            phase: Phase::Idle,
            surface: SendSurface::new(),
            gate: TouchConfirmGate::new(),
        }
    }

    /// Captures the screen, returning `Ok(false)` without capturing while the overlay is shown.
    ///
    /// A successful capture replaces the previous screenshot. A failed capture drops the previous
    /// screenshot too, so a stale one is never shown.
    pub fn take_screenshot(
        &mut self,
        source: &mut impl CaptureSource,
    ) -> Result<bool, CaptureError> {
        if self.phase.is_attached() {
            debug!("ignoring screenshot request in {:?}", self.phase);
            return Ok(false);
        }

        match capture::capture(source) {
            Ok(image) => {
                debug!("took screenshot: {}", image.size());
                self.surface.set_image(Some(image));
                Ok(true)
            }
            Err(err) => {
                warn!("error taking screenshot: {err}");
                self.surface.set_image(None);
                Err(err)
            }
        }
    }

    /// Drops the screenshot. Ignored while the overlay is shown.
    pub fn release_screenshot(&mut self) {
        if self.phase.is_attached() {
            trace!("not releasing screenshot in {:?}", self.phase);
            return;
        }

        self.surface.take_image();
    }

    /// Attaches the overlay and starts shrinking the screenshot.
    pub fn show_pre_send(&mut self) {
        let Some(next) = self.phase.on(PhaseEvent::ShowPreSend) else {
            trace!("show_pre_send ignored in {:?}", self.phase);
            return;
        };
        if self.surface.image().is_none() {
            trace!("show_pre_send ignored without a screenshot");
            return;
        }

        self.surface.prepare();
        self.presenter.attach(&self.surface);

        // Armed right away so that a quick touch during the shrink still counts.
        let callback = self.callback.clone();
        self.gate.arm(move || callback.on_send_confirmed());

        self.set_phase(next);
        self.start(self.specs.pre_show, None, Completion::PreShown);
    }

    /// Starts slowly shrinking the clone away while the send is in flight.
    pub fn show_start_send(&mut self) {
        let Some(next) = self.phase.on(PhaseEvent::StartSend) else {
            trace!("show_start_send ignored in {:?}", self.phase);
            return;
        };

        self.surface.visual_mut(VisualTarget::Primary).set_alpha(0.6);
        self.surface
            .visual_mut(VisualTarget::Clone)
            .reset(INTERMEDIATE_SCALE, true);

        self.set_phase(next);
        self.start(self.specs.slow_clone, None, Completion::Nothing);
    }

    /// Finishes the send: the clone shrinks away fast from wherever it is, then the screenshot
    /// scales back up and the overlay detaches.
    pub fn show_post_send(&mut self) {
        let Some(next) = self.phase.on(PhaseEvent::PostSend) else {
            trace!("show_post_send ignored in {:?}", self.phase);
            return;
        };

        let clone = self.surface.visual_mut(VisualTarget::Clone);
        clone.cancel();
        // Pick up from the live scale so that the clone does not jump.
        let current = clone.scale();

        self.gate.disarm();
        self.set_phase(next);
        self.start(self.specs.fast_clone, Some(current), Completion::SendScaleUp);
    }

    /// Scales the screenshot back up without sending, then detaches.
    pub fn finish(&mut self) {
        let Some(next) = self.phase.on(PhaseEvent::Finish) else {
            trace!("finish ignored in {:?}", self.phase);
            return;
        };

        self.gate.disarm();
        self.set_phase(next);
        self.start(self.specs.scale_up, None, Completion::Detach);
    }

    /// Tears the overlay down immediately. No-op when not shown.
    pub fn dismiss(&mut self) {
        self.teardown(PhaseEvent::Dismiss);
    }

    /// Feeds an input event to the overlay.
    ///
    /// Returns `true` if the event was consumed as the confirming touch.
    pub fn on_touch(&mut self, event: &TouchEvent) -> bool {
        if !self.phase.is_attached() || !event.is_down() || !self.gate.is_armed() {
            return false;
        }

        // Land the pre-show shrink before telling the caller.
        let primary = self.surface.visual_mut(VisualTarget::Primary);
        if primary.transition() == Some(TransitionName::PreShow) {
            if let Some(running) = primary.end() {
                self.complete(running);
            }
        }
        if let Some(next) = self.phase.on(PhaseEvent::Confirmed) {
            self.set_phase(next);
        }

        self.gate.handle(event)
    }

    /// Runs completions of the transitions that ran out by now.
    pub fn advance_animations(&mut self) {
        while let Some(running) = self.surface.take_finished() {
            self.complete(running);
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.surface.are_animations_ongoing()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &SendSurface {
        &self.surface
    }

    pub fn has_screenshot(&self) -> bool {
        self.surface.image().is_some()
    }

    pub fn gate_state(&self) -> ConfirmGateState {
        self.gate.state()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn start(&mut self, spec: TransitionSpec, from: Option<f64>, completion: Completion) {
        let anim = match from {
            Some(from) => spec.start_from(self.clock.clone(), from),
            None => spec.start(self.clock.clone()),
        };
        trace!(
            "starting {:?}: {} -> {} over {:?}",
            spec.name,
            anim.from(),
            anim.to(),
            anim.duration()
        );

        let running = Running {
            name: spec.name,
            completion,
        };
        self.surface.visual_mut(spec.target).start(running, anim);
    }

    fn complete(&mut self, running: Running) {
        trace!("{:?} done", running.name);

        match running.completion {
            Completion::Nothing => (),
            Completion::PreShown => {
                if let Some(next) = self.phase.on(PhaseEvent::PreShowDone) {
                    self.set_phase(next);
                }
            }
            Completion::SendScaleUp => {
                if let Some(next) = self.phase.on(PhaseEvent::FastShrinkDone) {
                    self.set_phase(next);
                    self.start(self.specs.scale_up, None, Completion::Detach);
                }
            }
            Completion::Detach => self.teardown(PhaseEvent::RestoreDone),
        }
    }

    fn teardown(&mut self, event: PhaseEvent) {
        let Some(next) = self.phase.on(event) else {
            trace!("{event:?} ignored in {:?}", self.phase);
            return;
        };

        self.surface.cancel_all();
        self.presenter.detach(&self.surface);
        self.set_phase(next);
        self.gate.disarm();
        self.surface.take_image();
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            debug!("send ui: {:?} -> {next:?}", self.phase);
        }
        self.phase = next;
    }
}

impl<P> std::fmt::Debug for AnimationOrchestrator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationOrchestrator")
            .field("phase", &self.phase)
            .field("surface", &self.surface)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
