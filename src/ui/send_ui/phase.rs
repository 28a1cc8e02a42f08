/// Where the send overlay is in its show/send/dismiss cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum Phase {
    /// Nothing shown yet.
    #[default]
    Idle,
    /// Surface attached, screenshot shrinking to the intermediate scale.
    AttachedPreShow,
    /// Shown at the intermediate scale, waiting for the caller to send or finish.
    AwaitingConfirm,
    /// Clone shrinking away after a successful send.
    Sending,
    /// Screenshot scaling back up at the end of a successful send.
    PostSendSuccess,
    /// Screenshot scaling back up without a send.
    Restoring,
    /// Surface detached and screenshot released. Equivalent to `Idle`.
    Detached,
}

/// Inputs of the phase transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    ShowPreSend,
    PreShowDone,
    Confirmed,
    StartSend,
    PostSend,
    FastShrinkDone,
    Finish,
    RestoreDone,
    Dismiss,
}

impl Phase {
    /// Whether the surface is attached to the presenter in this phase.
    pub fn is_attached(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Detached)
    }

    /// Returns the phase `event` leads to, or `None` if it does not apply here.
    pub fn on(self, event: PhaseEvent) -> Option<Phase> {
        use Phase::*;
        use PhaseEvent::*;

        let next = match (self, event) {
            (Idle | Detached, ShowPreSend) => AttachedPreShow,
            (AttachedPreShow, PreShowDone | Confirmed | StartSend) => AwaitingConfirm,
            (AwaitingConfirm, StartSend) => AwaitingConfirm,
            (AttachedPreShow | AwaitingConfirm, PostSend) => Sending,
            (AttachedPreShow | AwaitingConfirm, Finish) => Restoring,
            (Sending, FastShrinkDone) => PostSendSuccess,
            (PostSendSuccess | Restoring, RestoreDone) => Detached,
            (phase, Dismiss) if phase.is_attached() => Detached,
            _ => return None,
        };
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [Phase; 7] = [
        Phase::Idle,
        Phase::AttachedPreShow,
        Phase::AwaitingConfirm,
        Phase::Sending,
        Phase::PostSendSuccess,
        Phase::Restoring,
        Phase::Detached,
    ];

    #[test]
    fn show_only_from_detached_states() {
        for phase in ALL_PHASES {
            let next = phase.on(PhaseEvent::ShowPreSend);
            if phase.is_attached() {
                assert_eq!(next, None, "{phase:?}");
            } else {
                assert_eq!(next, Some(Phase::AttachedPreShow), "{phase:?}");
            }
        }
    }

    #[test]
    fn dismiss_only_while_attached() {
        for phase in ALL_PHASES {
            let next = phase.on(PhaseEvent::Dismiss);
            if phase.is_attached() {
                assert_eq!(next, Some(Phase::Detached), "{phase:?}");
            } else {
                assert_eq!(next, None, "{phase:?}");
            }
        }
    }

    #[test]
    fn success_path() {
        let mut phase = Phase::Idle;
        for (event, expected) in [
            (PhaseEvent::ShowPreSend, Phase::AttachedPreShow),
            (PhaseEvent::PreShowDone, Phase::AwaitingConfirm),
            (PhaseEvent::StartSend, Phase::AwaitingConfirm),
            (PhaseEvent::PostSend, Phase::Sending),
            (PhaseEvent::FastShrinkDone, Phase::PostSendSuccess),
            (PhaseEvent::RestoreDone, Phase::Detached),
        ] {
            phase = phase.on(event).unwrap();
            assert_eq!(phase, expected);
        }
    }

    #[test]
    fn late_calls_are_rejected() {
        assert_eq!(Phase::Sending.on(PhaseEvent::PostSend), None);
        assert_eq!(Phase::Sending.on(PhaseEvent::Finish), None);
        assert_eq!(Phase::Restoring.on(PhaseEvent::StartSend), None);
        assert_eq!(Phase::AwaitingConfirm.on(PhaseEvent::PreShowDone), None);
        assert_eq!(Phase::Idle.on(PhaseEvent::PostSend), None);
        assert_eq!(Phase::Detached.on(PhaseEvent::Finish), None);
    }
}
