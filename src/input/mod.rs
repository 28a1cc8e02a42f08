use glam::DVec2;

pub mod touch;

pub use touch::{ConfirmGateState, TouchConfirmGate};

/// A pointer or touch event delivered to the overlay, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Down { slot: Option<u32>, pos: DVec2 },
    Motion { slot: Option<u32>, pos: DVec2 },
    Up { slot: Option<u32> },
    Cancel,
}

impl TouchEvent {
    pub fn down(pos: impl Into<DVec2>) -> Self {
        Self::Down {
            slot: None,
            pos: pos.into(),
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Self::Down { .. })
    }
}
