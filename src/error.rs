//! Unified error types for the hexapod firmware.
//!
//! Two categories exist: [`TransportError`] for a single bus transfer that
//! did not complete (skipped and logged inside the gait loop), and
//! [`InitError`] for startup failures that stop the firmware before the gait
//! loop is entered.  All variants are `Copy` so they pass through the driver
//! and sequencer layers without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A bus transfer failed.
    Transport(TransportError),
    /// Platform or peripheral initialisation failed.
    Init(InitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// A bus write did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The peripheral did not acknowledge its address or a data byte.
    Nack,
    /// Arbitration lost, or the bus driver is in an invalid state.
    BusBusy,
    /// The transfer exceeded its per-transfer timeout.
    Timeout,
    /// Misplaced START/STOP or data overrun on the wire.
    Bus,
    /// Any other failure.  Carries the platform error code (`-1`, the
    /// ESP-IDF generic failure, when none is available).
    Other(i32),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nack => write!(f, "peripheral NACK"),
            Self::BusBusy => write!(f, "bus busy"),
            Self::Timeout => write!(f, "transfer timed out"),
            Self::Bus => write!(f, "bus protocol error"),
            Self::Other(code) => write!(f, "bus error (rc={code})"),
        }
    }
}

impl core::error::Error for TransportError {}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

/// Startup failures.  All of these are fatal: the firmware halts rather than
/// driving servos through a misconfigured bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Non-volatile storage could not be initialised (even after erase).
    Storage(i32),
    /// I²C parameter configuration was rejected.
    BusConfig(i32),
    /// I²C driver install failed.
    DriverInstall(i32),
    /// The PWM controller did not accept its configuration writes.
    PwmController(TransportError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(rc) => write!(f, "NVS init failed (rc={rc})"),
            Self::BusConfig(rc) => write!(f, "I2C param config failed (rc={rc})"),
            Self::DriverInstall(rc) => write!(f, "I2C driver install failed (rc={rc})"),
            Self::PwmController(e) => write!(f, "PCA9685 init failed: {e}"),
        }
    }
}

impl core::error::Error for InitError {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
