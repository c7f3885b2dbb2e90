//! GPIO / peripheral pin assignments for the hexapod controller board.
//!
//! Single source of truth — the I²C bring-up references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// I²C bus (PCA9685 servo driver)
// ---------------------------------------------------------------------------

/// I²C controller used for the servo driver.
pub const I2C_PORT: i32 = 0;
/// I²C data line.
pub const I2C_SDA_GPIO: i32 = 21;
/// I²C clock line.
pub const I2C_SCL_GPIO: i32 = 22;
/// Internal pull-ups stay off; the PCA9685 breakout carries its own.
pub const I2C_INTERNAL_PULLUPS: bool = false;
