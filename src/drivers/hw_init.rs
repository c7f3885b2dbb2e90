//! One-shot hardware peripheral initialization.
//!
//! Configures the I²C master port that carries the PCA9685 using raw
//! ESP-IDF sys calls.  Called once from `main()` before the gait loop
//! starts.  Electrical settings come from [`pins`] and [`RobotConfig`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

use crate::config::RobotConfig;
use crate::error::InitError;
use crate::pins;

// ── I²C master ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_i2c_master(config: &RobotConfig) -> Result<(), InitError> {
    let conf = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: pins::I2C_INTERNAL_PULLUPS,
        scl_pullup_en: pins::I2C_INTERNAL_PULLUPS,
        __bindgen_anon_1: i2c_config_t__bindgen_ty_1 {
            master: i2c_config_t__bindgen_ty_1__bindgen_ty_1 {
                clk_speed: config.i2c_freq_hz,
            },
        },
        ..Default::default()
    };

    // SAFETY: Called once from main() before the gait loop; single-threaded.
    let ret = unsafe { i2c_param_config(pins::I2C_PORT, &conf) };
    if ret != ESP_OK as i32 {
        return Err(InitError::BusConfig(ret));
    }

    // Master mode: no slave buffers, default interrupt flags.
    let ret = unsafe { i2c_driver_install(pins::I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(InitError::DriverInstall(ret));
    }

    info!(
        "hw_init: I2C{} master (SDA={}, SCL={}, {} Hz)",
        pins::I2C_PORT,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        config.i2c_freq_hz
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_i2c_master(config: &RobotConfig) -> Result<(), InitError> {
    info!(
        "hw_init(sim): I2C{} master (SDA={}, SCL={}, {} Hz) skipped",
        pins::I2C_PORT,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        config.i2c_freq_hz
    );
    Ok(())
}
