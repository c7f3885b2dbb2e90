//! Hexapod Firmware — Main Entry Point
//!
//! Open-loop walking animation for a six-legged robot: an ESP32 drives
//! twelve hobby servos through a PCA9685 PWM controller on I²C.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EspI2cBus        LogEventSink     nvs / hw_init               │
//! │  (BusTransport)   (EventSink)      (platform bring-up)         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  GaitSequencer ─▶ LimbRegistry ─▶ Pca9685              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use hexapod::adapters::i2c_bus::EspI2cBus;
use hexapod::adapters::log_sink::LogEventSink;
use hexapod::adapters::nvs;
use hexapod::app::service;
use hexapod::config::RobotConfig;
use hexapod::drivers::hw_init;
use hexapod::error::InitError;
use hexapod::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Hexapod v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = RobotConfig::DEFAULT;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 2. Platform bring-up ──────────────────────────────────
    if let Err(e) = bring_up(&config) {
        halt(e);
    }

    // ── 3. PWM controller + gait ──────────────────────────────
    let mut sink = LogEventSink::new();
    let bus = EspI2cBus::new(pins::I2C_PORT);
    let mut gait = match service::start(bus, FreeRtos, &config, &mut sink) {
        Ok(gait) => gait,
        Err(e) => halt(e),
    };

    info!("System ready. Entering gait loop.");
    gait.run(&mut sink)
}

fn bring_up(config: &RobotConfig) -> Result<(), InitError> {
    info!("Initializing NVS...");
    nvs::init_flash()?;
    info!("Initializing I2C...");
    hw_init::init_i2c_master(config)?;
    Ok(())
}

/// Startup failures are fatal: servos are never driven through a bus that
/// did not come up cleanly.
fn halt(e: InitError) -> ! {
    error!("Startup failed: {} — halting", e);
    loop {
        FreeRtos::delay_ms(1_000);
    }
}
