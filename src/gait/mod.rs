//! Gait sequencer — the fixed, looping walk animation.
//!
//! A table-driven state machine in the same shape as a classic embedded
//! FSM: each [`Phase`] has a row in [`phases::build_phase_table`] holding
//! its command planner and whether it holds afterwards.  Each
//! [`GaitSequencer::step`] runs the current phase's planner, pushes every
//! command through the PWM driver, optionally blocks for the phase delay,
//! and advances.  After the last phase it wraps to the first; there is no
//! terminal state.
//!
//! Bus failures never stop the sequence.  The driver logs them, the
//! sequencer counts them in the [`PhaseReport`], and the next command is
//! attempted regardless.

pub mod phases;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::events::{GaitEvent, PhaseReport};
use crate::app::ports::{BusTransport, EventSink};
use crate::drivers::pca9685::{Pca9685, PwmCommand};
use crate::limbs::{LIMB_COUNT, LimbRegistry};
use phases::{PhaseDescriptor, build_phase_table};

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    /// Odd legs lift while even legs rest; falls straight through.
    LiftOdd = 0,
    /// All lift joints back to neutral.
    SettleOdd = 1,
    /// Even legs lift while odd legs rest.
    LiftEven = 2,
    /// All lift joints back to neutral.
    SettleEven = 3,
}

impl Phase {
    /// Total number of phases — used to size the table array.
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::LiftOdd, Self::SettleOdd, Self::LiftEven, Self::SettleEven];

    /// Convert an index back to `Phase`.  Panics on out-of-range in debug
    /// builds; wraps to the first phase in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::LiftOdd,
            1 => Self::SettleOdd,
            2 => Self::LiftEven,
            3 => Self::SettleEven,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::LiftOdd
            }
        }
    }

    pub fn next(self) -> Self {
        Self::from_index((self as usize + 1) % Self::COUNT)
    }
}

/// Largest phase: every secondary extends, then every leg gets two commands.
pub const MAX_PHASE_COMMANDS: usize = 3 * LIMB_COUNT;

/// Commands for one phase, in the order they go on the bus.
pub type CommandPlan = heapless::Vec<PwmCommand, MAX_PHASE_COMMANDS>;

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Owns the PWM driver and delay source for the lifetime of the gait loop.
pub struct GaitSequencer<B, D> {
    pwm: Pca9685<B>,
    delay: D,
    registry: LimbRegistry,
    table: [PhaseDescriptor; Phase::COUNT],
    current: usize,
    phase_delay_ms: u32,
    cycles: u64,
}

impl<B: BusTransport, D: DelayNs> GaitSequencer<B, D> {
    /// `pwm` must already be initialised; the sequencer starts at
    /// [`Phase::LiftOdd`].
    pub fn new(pwm: Pca9685<B>, delay: D, registry: LimbRegistry, phase_delay_ms: u32) -> Self {
        Self {
            pwm,
            delay,
            registry,
            table: build_phase_table(),
            current: 0,
            phase_delay_ms,
            cycles: 0,
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.table[self.current].id
    }

    /// Completed full cycles since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Commands the current phase would issue, without touching the bus.
    pub fn plan(&self) -> CommandPlan {
        (self.table[self.current].plan)(&self.registry)
    }

    /// Run the current phase and advance to the next one.
    pub fn step(&mut self, sink: &mut impl EventSink) -> PhaseReport {
        let PhaseDescriptor {
            id,
            name,
            plan,
            hold_after,
        } = self.table[self.current];

        let commands = plan(&self.registry);
        let mut failed = 0;
        for cmd in &commands {
            // Already logged by the driver; keep going with the next joint.
            if self.pwm.apply(cmd).is_err() {
                failed += 1;
            }
        }

        let report = PhaseReport {
            phase: id,
            issued: commands.len(),
            failed,
        };
        debug!("gait: {} issued={} failed={}", name, report.issued, report.failed);
        sink.emit(&GaitEvent::PhaseCompleted(report));

        if hold_after {
            self.delay.delay_ms(self.phase_delay_ms);
        }

        self.current = (self.current + 1) % Phase::COUNT;
        if self.current == 0 {
            self.cycles += 1;
            sink.emit(&GaitEvent::CycleCompleted(self.cycles));
        }
        report
    }

    /// Run [`Phase::COUNT`] steps starting from the current phase.
    pub fn run_cycle(&mut self, sink: &mut impl EventSink) -> [PhaseReport; Phase::COUNT] {
        core::array::from_fn(|_| self.step(sink))
    }

    /// The firmware's main activity.  Never returns.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        loop {
            self.step(sink);
        }
    }

    /// Tear down into the driver and delay source.
    pub fn release(self) -> (Pca9685<B>, D) {
        (self.pwm, self.delay)
    }
}
