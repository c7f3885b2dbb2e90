//! Outbound application events.
//!
//! The [`GaitSequencer`](crate::gait::GaitSequencer) and the boot service
//! emit these through the [`EventSink`](super::ports::EventSink) port.

use crate::gait::Phase;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GaitEvent {
    /// The PWM controller is configured and the gait loop is about to start.
    Started { prescale: u8, phase_delay_ms: u32 },

    /// A phase finished issuing its commands (before its hold delay).
    PhaseCompleted(PhaseReport),

    /// All four phases ran; carries the number of completed cycles.
    CycleCompleted(u64),
}

/// Outcome of one phase: how many PWM commands were attempted and how many
/// of those the bus rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub issued: usize,
    pub failed: usize,
}

impl PhaseReport {
    /// `true` when every command in the phase reached the controller.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
