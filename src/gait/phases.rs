//! Phase table for the alternating tripod gait.
//!
//! Each row names a phase, the function that plans its PWM commands, and
//! whether the sequencer holds for the phase delay afterwards:
//!
//! ```text
//! ┌────────────┬────────────────────────────────────────────┬──────┐
//! │ Phase      │ Commands                                   │ Hold │
//! ├────────────┼────────────────────────────────────────────┼──────┤
//! │ LiftOdd    │ all secondary → raised, then per leg i:    │  no  │
//! │            │   odd  → primary raised,  secondary raised │      │
//! │            │   even → primary neutral, secondary neutral│      │
//! │ SettleOdd  │ all primary → neutral                      │  yes │
//! │ LiftEven   │ per leg i:                                 │  yes │
//! │            │   odd  → primary neutral, secondary neutral│      │
//! │            │   even → primary raised,  secondary raised │      │
//! │ SettleEven │ all primary → neutral                      │  yes │
//! └────────────┴────────────────────────────────────────────┴──────┘
//! ```
//!
//! Parity and the primary/secondary coupling are the walking pattern
//! itself; changing either changes how the robot moves.

use crate::limbs::{LimbRegistry, LimbRole, Pose};

use super::{CommandPlan, Phase};

/// Plans the commands for one phase, in bus order.
pub type PlanFn = fn(&LimbRegistry) -> CommandPlan;

/// Static descriptor for a single gait phase.
#[derive(Clone, Copy)]
pub struct PhaseDescriptor {
    pub id: Phase,
    pub name: &'static str,
    pub plan: PlanFn,
    /// Block for the phase delay after the commands are issued.
    pub hold_after: bool,
}

/// Build the phase table, indexed by `Phase as usize`.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        PhaseDescriptor {
            id: Phase::LiftOdd,
            name: "lift-odd",
            plan: plan_lift_odd,
            hold_after: false,
        },
        PhaseDescriptor {
            id: Phase::SettleOdd,
            name: "settle-odd",
            plan: plan_settle,
            hold_after: true,
        },
        PhaseDescriptor {
            id: Phase::LiftEven,
            name: "lift-even",
            plan: plan_lift_even,
            hold_after: true,
        },
        PhaseDescriptor {
            id: Phase::SettleEven,
            name: "settle-even",
            plan: plan_settle,
            hold_after: true,
        },
    ]
}

// ── Planners ──────────────────────────────────────────────────

fn plan_lift_odd(reg: &LimbRegistry) -> CommandPlan {
    let mut plan = CommandPlan::new();
    for i in 0..reg.len(LimbRole::Secondary) {
        push(&mut plan, reg, LimbRole::Secondary, i, Pose::Raised);
    }
    for i in 0..reg.len(LimbRole::Primary) {
        stride(&mut plan, reg, i, is_odd(i));
    }
    plan
}

fn plan_lift_even(reg: &LimbRegistry) -> CommandPlan {
    let mut plan = CommandPlan::new();
    for i in 0..reg.len(LimbRole::Primary) {
        stride(&mut plan, reg, i, !is_odd(i));
    }
    plan
}

fn plan_settle(reg: &LimbRegistry) -> CommandPlan {
    let mut plan = CommandPlan::new();
    for i in 0..reg.len(LimbRole::Primary) {
        push(&mut plan, reg, LimbRole::Primary, i, Pose::Neutral);
    }
    plan
}

/// Leg `i` either lifts (both joints raised) or rests (both neutral).
fn stride(plan: &mut CommandPlan, reg: &LimbRegistry, i: usize, lift: bool) {
    let pose = if lift { Pose::Raised } else { Pose::Neutral };
    push(plan, reg, LimbRole::Primary, i, pose);
    push(plan, reg, LimbRole::Secondary, i, pose);
}

fn push(plan: &mut CommandPlan, reg: &LimbRegistry, role: LimbRole, i: usize, pose: Pose) {
    let pushed = plan.push(reg.command(role, i, pose)).is_ok();
    debug_assert!(pushed, "phase plan capacity exceeded");
}

const fn is_odd(i: usize) -> bool {
    i % 2 == 1
}
