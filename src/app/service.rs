//! Gait service — assembles the core from a bus, a delay source and config.
//!
//! ```text
//!  BusTransport ──▶ Pca9685 ──▶ ┌──────────────────┐ ──▶ EventSink
//!                               │  GaitSequencer   │
//!  DelayNs ───────────────────▶ │  LimbRegistry    │
//!                               └──────────────────┘
//! ```
//!
//! The PWM controller is configured here, before any gait command is sent.
//! If that fails the caller gets an [`InitError`] and no sequencer, so the
//! gait loop is never entered with a misconfigured chip.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::RobotConfig;
use crate::drivers::pca9685::Pca9685;
use crate::error::InitError;
use crate::gait::GaitSequencer;
use crate::limbs::LimbRegistry;

use super::events::GaitEvent;
use super::ports::{BusTransport, EventSink};

/// Configure the PCA9685 on `bus` and return a sequencer over the
/// reference limb tables, positioned at the first phase.
pub fn start<B: BusTransport, D: DelayNs>(
    bus: B,
    delay: D,
    config: &RobotConfig,
    sink: &mut impl EventSink,
) -> Result<GaitSequencer<B, D>, InitError> {
    start_with(bus, delay, LimbRegistry::reference(), config, sink)
}

/// [`start`] with an explicit limb registry.
pub fn start_with<B: BusTransport, D: DelayNs>(
    bus: B,
    delay: D,
    registry: LimbRegistry,
    config: &RobotConfig,
    sink: &mut impl EventSink,
) -> Result<GaitSequencer<B, D>, InitError> {
    let mut pwm = Pca9685::new(bus, config);
    let prescale = pwm.initialize().map_err(InitError::PwmController)?;

    sink.emit(&GaitEvent::Started {
        prescale,
        phase_delay_ms: config.phase_delay_ms,
    });
    info!("GaitService ready (phase delay {} ms)", config.phase_delay_ms);

    Ok(GaitSequencer::new(pwm, delay, registry, config.phase_delay_ms))
}
