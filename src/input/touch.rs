//! Single-shot touch confirmation.

use super::TouchEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmGateState {
    Armed,
    Disarmed,
}

/// Accepts exactly one pointer-down while armed.
///
/// The confirmation handler is consumed when it fires, so a second touch can never confirm
/// twice; the gate has to be armed again with a fresh handler.
#[derive(Default)]
pub struct TouchConfirmGate {
    on_confirm: Option<Box<dyn FnOnce()>>,
}

impl TouchConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the gate, replacing any handler that has not fired yet.
    pub fn arm(&mut self, on_confirm: impl FnOnce() + 'static) {
        self.on_confirm = Some(Box::new(on_confirm));
    }

    pub fn disarm(&mut self) {
        self.on_confirm = None;
    }

    pub fn state(&self) -> ConfirmGateState {
        if self.on_confirm.is_some() {
            ConfirmGateState::Armed
        } else {
            ConfirmGateState::Disarmed
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state() == ConfirmGateState::Armed
    }

    /// Feeds an input event to the gate.
    ///
    /// Returns `true` if the event confirmed; the gate is disarmed afterwards.
    pub fn handle(&mut self, event: &TouchEvent) -> bool {
        if !event.is_down() {
            return false;
        }

        let Some(on_confirm) = self.on_confirm.take() else {
            return false;
        };

        trace!("touch confirmed: {event:?}");
        on_confirm();
        true
    }
}

impl std::fmt::Debug for TouchConfirmGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchConfirmGate")
            .field("state", &self.state())
            .finish()
    }
}
