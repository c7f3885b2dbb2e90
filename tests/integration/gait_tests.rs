//! Integration tests for the GaitSequencer → Pca9685 → bus pipeline.

use crate::mock_hw::{MockBus, RecordingDelay, RecordingSink};

use hexapod::app::events::{GaitEvent, PhaseReport};
use hexapod::app::service;
use hexapod::config::RobotConfig;
use hexapod::error::TransportError;
use hexapod::gait::{GaitSequencer, Phase};
use hexapod::drivers::pca9685::Pca9685;
use hexapod::limbs::{LIMB_COUNT, LimbRegistry, LimbRole, Pose};

/// PCA9685 configuration transfers issued before the first gait command.
const INIT_WRITES: usize = 3;
/// Channel updates in one full cycle: 18 + 6 + 12 + 6.
const CYCLE_COMMANDS: usize = 42;

fn make_gait(bus: MockBus) -> (GaitSequencer<MockBus, RecordingDelay>, RecordingSink) {
    let mut sink = RecordingSink::new();
    let gait = service::start(bus, RecordingDelay::new(), &RobotConfig::DEFAULT, &mut sink)
        .expect("init should succeed on a healthy bus");
    (gait, sink)
}

fn finish(gait: GaitSequencer<MockBus, RecordingDelay>) -> (MockBus, RecordingDelay) {
    let (pwm, delay) = gait.release();
    (pwm.release(), delay)
}

// ── Phase P0 command order ────────────────────────────────────

#[test]
fn lift_odd_phase_issues_reference_stream() {
    let (mut gait, mut sink) = make_gait(MockBus::new());
    assert_eq!(gait.current_phase(), Phase::LiftOdd);

    gait.step(&mut sink);
    let (bus, delay) = finish(gait);

    let expected: Vec<(u8, u16)> = vec![
        // Every secondary extends first.
        (2, 300),
        (3, 270),
        (6, 270),
        (8, 270),
        (10, 250),
        (12, 110),
        // Leg 0 (even): rests.
        (1, 185),
        (2, 220),
        // Leg 1 (odd): lifts.
        (4, 505),
        (3, 270),
        // Leg 2 (even)
        (5, 200),
        (6, 220),
        // Leg 3 (odd)
        (7, 475),
        (8, 270),
        // Leg 4 (even)
        (15, 310),
        (10, 280),
        // Leg 5 (odd)
        (11, 505),
        (12, 110),
    ];
    assert_eq!(bus.channel_offs(), expected);
    assert!(delay.calls_ms.is_empty(), "lift-odd falls straight through");
}

#[test]
fn every_gait_frame_uses_zero_on_tick_and_chip_address() {
    let (mut gait, mut sink) = make_gait(MockBus::new());
    gait.run_cycle(&mut sink);
    let (bus, _) = finish(gait);

    assert!(bus.writes.iter().all(|w| w.address == 0x40 && w.timeout_ms == 1_000));
    assert!(bus.channel_updates().iter().all(|&(_, on, _)| on == 0));
}

// ── Timing ────────────────────────────────────────────────────

#[test]
fn one_cycle_holds_three_times() {
    let (mut gait, mut sink) = make_gait(MockBus::new());
    gait.run_cycle(&mut sink);
    let (_, delay) = finish(gait);

    assert_eq!(delay.calls_ms, [1_500, 1_500, 1_500]);
    assert_eq!(delay.total_ms(), 3 * 1_500);
}

#[test]
fn phase_delay_follows_config() {
    let config = RobotConfig {
        phase_delay_ms: 20,
        ..RobotConfig::DEFAULT
    };
    let mut sink = RecordingSink::new();
    let mut gait = service::start(MockBus::new(), RecordingDelay::new(), &config, &mut sink).unwrap();
    gait.run_cycle(&mut sink);
    let (_, delay) = finish(gait);
    assert_eq!(delay.calls_ms, [20, 20, 20]);
}

// ── Periodicity ───────────────────────────────────────────────

#[test]
fn cycles_repeat_the_same_command_stream() {
    let (mut gait, mut sink) = make_gait(MockBus::new());
    for _ in 0..3 {
        gait.run_cycle(&mut sink);
    }
    assert_eq!(gait.cycles(), 3);
    assert_eq!(gait.current_phase(), Phase::LiftOdd);
    let (bus, _) = finish(gait);

    let updates = bus.channel_offs();
    assert_eq!(updates.len(), 3 * CYCLE_COMMANDS);
    let cycles: Vec<&[(u8, u16)]> = updates.chunks(CYCLE_COMMANDS).collect();
    assert_eq!(cycles[0], cycles[1]);
    assert_eq!(cycles[1], cycles[2]);
}

#[test]
fn cycle_completion_is_reported_once_per_cycle() {
    let (mut gait, mut sink) = make_gait(MockBus::new());
    gait.run_cycle(&mut sink);
    gait.run_cycle(&mut sink);

    let cycles: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            GaitEvent::CycleCompleted(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, [1, 2]);

    let phases = sink
        .events
        .iter()
        .filter(|e| matches!(e, GaitEvent::PhaseCompleted(_)))
        .count();
    assert_eq!(phases, 2 * Phase::COUNT);
}

// ── Tripod alternation ────────────────────────────────────────

#[test]
fn odd_and_even_legs_never_lift_together() {
    let reg = LimbRegistry::reference();
    let (mut gait, mut sink) = make_gait(MockBus::new());

    for _ in 0..Phase::COUNT {
        let plan = gait.plan();
        let lifted = |odd: bool| {
            (0..LIMB_COUNT).filter(|i| (i % 2 == 1) == odd).any(|i| {
                let cmd = reg.command(LimbRole::Primary, i, Pose::Raised);
                plan.contains(&cmd)
            })
        };
        assert!(
            !(lifted(true) && lifted(false)),
            "{:?} lifts both tripods",
            gait.current_phase()
        );
        gait.step(&mut sink);
    }
}

#[test]
fn settle_phases_return_every_primary_to_neutral() {
    let reg = LimbRegistry::reference();
    let (mut gait, mut sink) = make_gait(MockBus::new());
    gait.step(&mut sink);
    assert_eq!(gait.current_phase(), Phase::SettleOdd);

    let plan = gait.plan();
    let expected: Vec<(u8, u16)> = (0..LIMB_COUNT)
        .map(|i| {
            (
                reg.channel_of(LimbRole::Primary, i).index(),
                reg.neutral(LimbRole::Primary, i),
            )
        })
        .collect();
    let planned: Vec<(u8, u16)> = plan.iter().map(|c| (c.channel.index(), c.off_tick)).collect();
    assert_eq!(planned, expected);
}

// ── Failure semantics ─────────────────────────────────────────

#[test]
fn failed_write_does_not_stop_the_phase() {
    // Third gait command (secondary ch6) is rejected.
    let (mut gait, mut sink) = make_gait(MockBus::failing_at(&[INIT_WRITES + 2]));

    let report = gait.step(&mut sink);
    assert_eq!(
        report,
        PhaseReport {
            phase: Phase::LiftOdd,
            issued: 3 * LIMB_COUNT,
            failed: 1,
        }
    );

    let (bus, _) = finish(gait);
    assert_eq!(bus.writes.len(), INIT_WRITES + 3 * LIMB_COUNT, "every command attempted");
}

#[test]
fn dead_bus_after_init_keeps_the_loop_running() {
    let mut sink = RecordingSink::new();
    let mut gait = service::start(
        MockBus::failing_at(&(INIT_WRITES..INIT_WRITES + 10 * CYCLE_COMMANDS).collect::<Vec<_>>()),
        RecordingDelay::new(),
        &RobotConfig::DEFAULT,
        &mut sink,
    )
    .unwrap();

    let reports = gait.run_cycle(&mut sink);
    assert!(reports.iter().all(|r| r.failed == r.issued));
    assert_eq!(gait.cycles(), 1);

    let (_, delay) = finish(gait);
    assert_eq!(delay.calls_ms.len(), 3, "holds still happen on a dead bus");
}

#[test]
fn timeouts_are_counted_like_any_other_failure() {
    let pwm = Pca9685::new(MockBus::failing_all(TransportError::Timeout), &RobotConfig::DEFAULT);
    let mut gait = GaitSequencer::new(pwm, RecordingDelay::new(), LimbRegistry::reference(), 1_500);
    let mut sink = RecordingSink::new();

    let report = gait.step(&mut sink);
    assert_eq!(report.phase, Phase::LiftOdd);
    assert_eq!(report.failed, 3 * LIMB_COUNT);
    assert!(!report.is_clean());
    assert_eq!(gait.current_phase(), Phase::SettleOdd, "no rollback on failure");
}
