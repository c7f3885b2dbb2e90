//! System configuration parameters
//!
//! Bus, PWM and gait timing constants for the hexapod.  The gait is an
//! open-loop animation with no runtime tuning, so the configuration is a
//! compile-time constant ([`RobotConfig::DEFAULT`]).  It derives serde so the
//! active values can be dumped to the log at boot.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    // --- I²C bus ---
    /// Bus clock speed (Hz)
    pub i2c_freq_hz: u32,
    /// 7-bit address of the PCA9685
    pub pwm_address: u8,
    /// Per-transfer timeout (milliseconds)
    pub transfer_timeout_ms: u32,

    // --- PWM controller ---
    /// PCA9685 internal oscillator frequency (Hz)
    pub oscillator_hz: u32,
    /// Servo refresh frequency (Hz)
    pub pwm_freq_hz: u32,

    // --- Gait ---
    /// Hold time after each delayed gait phase (milliseconds)
    pub phase_delay_ms: u32,
}

impl RobotConfig {
    pub const DEFAULT: Self = Self {
        // I²C
        i2c_freq_hz: 100_000, // standard mode
        pwm_address: 0x40,
        transfer_timeout_ms: 1_000,

        // PWM
        oscillator_hz: 25_000_000,
        pwm_freq_hz: 50, // analog servo frame rate

        // Gait
        phase_delay_ms: 1_500,
    };
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
