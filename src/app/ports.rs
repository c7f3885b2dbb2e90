//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Pca9685 / GaitSequencer (domain)
//! ```
//!
//! Driven adapters (bus transports, event sinks) implement these traits.  The
//! PWM driver and gait sequencer consume them via generics, so the domain
//! core never touches hardware directly and runs unchanged on the host.
//! Blocking delays use [`embedded_hal::delay::DelayNs`] directly rather than
//! a bespoke port.

use crate::error::TransportError;

// ───────────────────────────────────────────────────────────────
// Bus transport port (driven adapter: domain → I²C bus)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the shared two-wire bus.
///
/// One call is one atomic bus transfer: start, address, `bytes`, stop.
pub trait BusTransport {
    /// Send `bytes` to the peripheral at `address`.
    ///
    /// A transfer that does not complete within `timeout_ms` is reported as
    /// [`TransportError::Timeout`]; implementations never retry.
    fn write(&mut self, address: u8, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError>;
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    fn write(&mut self, address: u8, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError> {
        (**self).write(address, bytes, timeout_ms)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`GaitEvent`](super::events::GaitEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GaitEvent);
}
