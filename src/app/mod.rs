//! Application core — pure domain wiring, zero direct I/O.
//!
//! The PWM driver, limb registry and gait sequencer are assembled here.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
