//! NVS (Non-Volatile Storage) bring-up.
//!
//! The gait keeps no persistent state, but the ESP-IDF radio/PHY stack and
//! several system components expect the default NVS partition to be
//! initialised before they run.  On first boot or after a version mismatch
//! the partition is erased once and re-initialised.

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::error::InitError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Initialise the default NVS partition, erasing it once if it is full or
/// was written by a newer format.
#[cfg(target_os = "espidf")]
pub fn init_flash() -> Result<(), InitError> {
    // SAFETY: nvs_flash_init / nvs_flash_erase are called from the single
    // main-task context before anything else touches NVS.
    let ret = unsafe { nvs_flash_init() };
    if ret == ESP_ERR_NVS_NO_FREE_PAGES as i32 || ret == ESP_ERR_NVS_NEW_VERSION_FOUND as i32 {
        warn!("NVS: erasing and re-initialising flash partition");
        let ret = unsafe { nvs_flash_erase() };
        if ret != ESP_OK as i32 {
            return Err(InitError::Storage(ret));
        }
        let ret = unsafe { nvs_flash_init() };
        if ret != ESP_OK as i32 {
            return Err(InitError::Storage(ret));
        }
    } else if ret != ESP_OK as i32 {
        return Err(InitError::Storage(ret));
    }
    info!("NVS: flash initialised");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_flash() -> Result<(), InitError> {
    info!("NVS(sim): flash init skipped");
    Ok(())
}
