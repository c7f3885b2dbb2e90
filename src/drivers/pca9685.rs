//! PCA9685 16-channel, 12-bit PWM controller driver.
//!
//! Register framing is split from bus I/O: [`encode_channel_frame`] and
//! [`prescale_for`] are pure and testable on the host, and [`Pca9685`]
//! only pushes their output through a [`BusTransport`].
//!
//! ## Channel frame
//!
//! ```text
//! ┌──────────────┬────────┬────────┬─────────┬─────────┐
//! │ LEDn_ON_L    │ ON lo  │ ON hi  │ OFF lo  │ OFF hi  │
//! │ 0x06 + 4*n   │        │        │         │         │
//! └──────────────┴────────┴────────┴─────────┴─────────┘
//! ```
//!
//! With MODE1 auto-increment enabled the chip stores the four value bytes in
//! consecutive registers, so one transfer updates one channel atomically.

use core::fmt;

use log::{error, info};

use crate::app::ports::BusTransport;
use crate::config::RobotConfig;
use crate::error::TransportError;

/// Register addresses
pub mod reg {
    pub const MODE1: u8 = 0x00;
    pub const LED0_ON_L: u8 = 0x06;
    pub const PRESCALE: u8 = 0xFE;
}

/// MODE1 register values
pub mod mode1 {
    /// Oscillator off; PRESCALE is only writable in this state.
    pub const SLEEP: u8 = 0x10;
    /// RESTART | AI: leave sleep, resume PWM, auto-increment register address.
    pub const RESTART_AUTO_INCREMENT: u8 = 0xA0;
}

/// Number of PWM outputs on the chip.
pub const CHANNEL_COUNT: u8 = 16;
/// Counter steps per PWM period (12-bit).
pub const COUNTER_STEPS: u32 = 4096;
/// Largest meaningful on/off tick value.
pub const MAX_TICK: u16 = 4095;

/// Hardware lower bound of the PRESCALE register.
const PRESCALE_MIN: u64 = 3;

/// Length of a channel update frame.
pub const FRAME_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// One of the 16 PWM outputs.  Always `< 16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Build a channel from a raw index.
    ///
    /// Intended for static tables: an out-of-range index fails const
    /// evaluation at compile time.
    #[track_caller]
    pub const fn new(raw: u8) -> Self {
        assert!(raw < CHANNEL_COUNT, "PCA9685 channel out of range");
        Self(raw)
    }

    /// Fallible constructor for runtime values.
    pub const fn try_new(raw: u8) -> Option<Self> {
        if raw < CHANNEL_COUNT { Some(Self(raw)) } else { None }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Address of this channel's LEDn_ON_L register.
    pub const fn base_register(self) -> u8 {
        reg::LED0_ON_L + 4 * self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PWM command
// ---------------------------------------------------------------------------

/// One servo position: the output goes high at `on_tick` and low at
/// `off_tick` within each PWM period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmCommand {
    pub channel: Channel,
    pub on_tick: u16,
    pub off_tick: u16,
}

impl PwmCommand {
    /// Pulse starting at tick 0 (no phase offset) and ending at `off_tick`.
    pub const fn pulse(channel: Channel, off_tick: u16) -> Self {
        Self {
            channel,
            on_tick: 0,
            off_tick,
        }
    }
}

// ---------------------------------------------------------------------------
// Pure protocol helpers
// ---------------------------------------------------------------------------

/// Encode a channel update: base register followed by little-endian ON and
/// OFF values.  `off` is not clamped to 12 bits.
pub const fn encode_channel_frame(channel: Channel, on: u16, off: u16) -> [u8; FRAME_LEN] {
    let [on_lo, on_hi] = on.to_le_bytes();
    let [off_lo, off_hi] = off.to_le_bytes();
    [channel.base_register(), on_lo, on_hi, off_lo, off_hi]
}

/// Inverse of [`encode_channel_frame`].  Returns `None` if the first byte is
/// not the base register of a channel.
pub fn decode_channel_frame(frame: &[u8; FRAME_LEN]) -> Option<(Channel, u16, u16)> {
    let offset = frame[0].checked_sub(reg::LED0_ON_L)?;
    if offset % 4 != 0 {
        return None;
    }
    let channel = Channel::try_new(offset / 4)?;
    let on = u16::from_le_bytes([frame[1], frame[2]]);
    let off = u16::from_le_bytes([frame[3], frame[4]]);
    Some((channel, on, off))
}

/// PRESCALE value for an output frequency, per the datasheet:
/// `round(osc / (4096 * freq)) - 1`, bounded to the register's 3..=255.
pub const fn prescale_for(oscillator_hz: u32, freq_hz: u32) -> u8 {
    let divisor = COUNTER_STEPS as u64 * freq_hz as u64;
    if divisor == 0 {
        return u8::MAX;
    }
    let rounded = (oscillator_hz as u64 + divisor / 2) / divisor;
    let prescale = rounded.saturating_sub(1);
    if prescale < PRESCALE_MIN {
        PRESCALE_MIN as u8
    } else if prescale > u8::MAX as u64 {
        u8::MAX
    } else {
        prescale as u8
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// PCA9685 driver over any [`BusTransport`].
pub struct Pca9685<B> {
    bus: B,
    address: u8,
    timeout_ms: u32,
    oscillator_hz: u32,
    freq_hz: u32,
    prescale: Option<u8>,
}

impl<B: BusTransport> Pca9685<B> {
    pub fn new(bus: B, config: &RobotConfig) -> Self {
        Self {
            bus,
            address: config.pwm_address,
            timeout_ms: config.transfer_timeout_ms,
            oscillator_hz: config.oscillator_hz,
            freq_hz: config.pwm_freq_hz,
            prescale: None,
        }
    }

    /// Sleep the chip, program PRESCALE, then restart into auto-increment
    /// mode.  Stops at the first failed write; nothing is retried.
    ///
    /// Returns the programmed prescale value.
    pub fn initialize(&mut self) -> Result<u8, TransportError> {
        let prescale = prescale_for(self.oscillator_hz, self.freq_hz);

        self.write_register(reg::MODE1, mode1::SLEEP)?;
        self.write_register(reg::PRESCALE, prescale)?;
        self.write_register(reg::MODE1, mode1::RESTART_AUTO_INCREMENT)?;

        self.prescale = Some(prescale);
        info!(
            "PCA9685@0x{:02x}: {} Hz output (prescale={})",
            self.address, self.freq_hz, prescale
        );
        Ok(prescale)
    }

    /// Program one channel's ON/OFF ticks in a single transfer.
    ///
    /// A failed transfer is logged here and returned; callers in the gait
    /// loop are free to ignore it.
    pub fn set_channel(&mut self, channel: Channel, on: u16, off: u16) -> Result<(), TransportError> {
        let frame = encode_channel_frame(channel, on, off);
        self.bus
            .write(self.address, &frame, self.timeout_ms)
            .inspect_err(|e| error!("PCA9685: {} on={} off={} not written: {}", channel, on, off, e))
    }

    /// Apply a prepared command.
    pub fn apply(&mut self, cmd: &PwmCommand) -> Result<(), TransportError> {
        self.set_channel(cmd.channel, cmd.on_tick, cmd.off_tick)
    }

    /// Prescale programmed by the last successful [`initialize`](Self::initialize).
    pub fn prescale(&self) -> Option<u8> {
        self.prescale
    }

    /// Release the underlying bus.
    pub fn release(self) -> B {
        self.bus
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError> {
        self.bus
            .write(self.address, &[register, value], self.timeout_ms)
            .inspect_err(|e| error!("PCA9685: register 0x{:02x} write failed: {}", register, e))
    }
}
