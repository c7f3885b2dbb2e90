//! I²C bus transport adapters.
//!
//! Two implementations of [`BusTransport`]:
//!
//! - [`EspI2cBus`] — **`target_os = "espidf"`**: the legacy ESP-IDF I²C
//!   master driver (`i2c_master_write_to_device`) with a per-transfer
//!   timeout.  The driver must have been installed by
//!   [`hw_init::init_i2c_master`](crate::drivers::hw_init::init_i2c_master).
//! - [`HalI2cBus`] — any [`embedded_hal::i2c::I2c`] implementation.  The
//!   underlying driver's own timeout applies; `timeout_ms` is not used.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::app::ports::BusTransport;
use crate::error::TransportError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error mapping ─────────────────────────────────────────────

/// ESP-IDF `esp_err_t` codes returned by the I²C master driver.
mod esp_code {
    pub const OK: i32 = 0;
    /// The driver reports a NACK as the generic failure.
    pub const FAIL: i32 = -1;
    pub const INVALID_STATE: i32 = 0x103;
    pub const TIMEOUT: i32 = 0x107;
}

/// Map an `esp_err_t` from `i2c_master_write_to_device` to a transport result.
pub fn transport_result(code: i32) -> Result<(), TransportError> {
    match code {
        esp_code::OK => Ok(()),
        esp_code::FAIL => Err(TransportError::Nack),
        esp_code::INVALID_STATE => Err(TransportError::BusBusy),
        esp_code::TIMEOUT => Err(TransportError::Timeout),
        other => Err(TransportError::Other(other)),
    }
}

/// Map an embedded-hal error kind to a transport error.
pub fn transport_error_from_kind(kind: ErrorKind) -> TransportError {
    match kind {
        ErrorKind::NoAcknowledge(_) => TransportError::Nack,
        ErrorKind::ArbitrationLoss => TransportError::BusBusy,
        ErrorKind::Bus | ErrorKind::Overrun => TransportError::Bus,
        _ => TransportError::Other(esp_code::FAIL),
    }
}

// ── ESP-IDF master driver ─────────────────────────────────────

/// Transport over an installed ESP-IDF I²C master port.
#[cfg(target_os = "espidf")]
pub struct EspI2cBus {
    port: i2c_port_t,
}

#[cfg(target_os = "espidf")]
impl EspI2cBus {
    /// `port` must have had its master driver installed.
    pub fn new(port: i2c_port_t) -> Self {
        Self { port }
    }
}

#[cfg(target_os = "espidf")]
impl BusTransport for EspI2cBus {
    fn write(&mut self, address: u8, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError> {
        let ticks = (u64::from(timeout_ms) * u64::from(configTICK_RATE_HZ) / 1000) as TickType_t;
        // SAFETY: the master driver for `self.port` was installed during
        // bring-up and is never deleted; `bytes` outlives this blocking call.
        let ret = unsafe {
            i2c_master_write_to_device(self.port, address, bytes.as_ptr(), bytes.len(), ticks)
        };
        transport_result(ret)
    }
}

// ── embedded-hal bridge ───────────────────────────────────────

/// Transport over any embedded-hal 1.0 blocking I²C bus.
pub struct HalI2cBus<I> {
    i2c: I,
}

impl<I: I2c> HalI2cBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the I²C bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> BusTransport for HalI2cBus<I> {
    fn write(&mut self, address: u8, bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
        self.i2c
            .write(address, bytes)
            .map_err(|e| transport_error_from_kind(e.kind()))
    }
}
