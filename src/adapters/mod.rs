//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                      |
//! |------------|---------------|----------------------------------|
//! | `i2c_bus`  | BusTransport  | ESP-IDF I²C master / embedded-hal|
//! | `log_sink` | EventSink     | Serial log output                |
//! | `nvs`      | —             | NVS flash bring-up               |

pub mod i2c_bus;
pub mod log_sink;
pub mod nvs;
