//! Integration tests for the embedded-hal bus bridge.

use crate::mock_hw::{MockI2c, RecordingDelay, RecordingSink};

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use hexapod::adapters::i2c_bus::HalI2cBus;
use hexapod::app::ports::BusTransport;
use hexapod::app::service;
use hexapod::config::RobotConfig;
use hexapod::error::{InitError, TransportError};

#[test]
fn hal_bus_forwards_frames_unchanged() {
    let mut bus = HalI2cBus::new(MockI2c::new());
    bus.write(0x40, &[0x06, 0, 0, 0xB9, 0], 1_000).unwrap();
    let i2c = bus.release();
    assert_eq!(i2c.writes, [(0x40, vec![0x06, 0, 0, 0xB9, 0])]);
}

#[test]
fn hal_bus_runs_a_full_cycle() {
    let mut sink = RecordingSink::new();
    let mut gait = service::start(
        HalI2cBus::new(MockI2c::new()),
        RecordingDelay::new(),
        &RobotConfig::DEFAULT,
        &mut sink,
    )
    .unwrap();

    let reports = gait.run_cycle(&mut sink);
    assert!(reports.iter().all(|r| r.is_clean()));

    let (pwm, _) = gait.release();
    let i2c = pwm.release().release();
    // 3 configuration writes + 42 channel updates.
    assert_eq!(i2c.writes.len(), 45);
    assert!(i2c.writes.iter().all(|(addr, _)| *addr == 0x40));
}

#[test]
fn missing_controller_maps_to_init_nack() {
    let mut sink = RecordingSink::new();
    let i2c = MockI2c::failing(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
    let err = service::start(HalI2cBus::new(i2c), RecordingDelay::new(), &RobotConfig::DEFAULT, &mut sink).err();
    assert_eq!(err, Some(InitError::PwmController(TransportError::Nack)));
}

#[test]
fn arbitration_loss_reports_busy_bus() {
    let mut bus = HalI2cBus::new(MockI2c::failing(ErrorKind::ArbitrationLoss));
    assert_eq!(bus.write(0x40, &[0x00, 0x10], 1_000), Err(TransportError::BusBusy));
}
