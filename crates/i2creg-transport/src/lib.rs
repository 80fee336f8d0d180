//! Bus binding and byte transport for I2C devices.
//!
//! This is the OS-facing layer of i2creg. It knows how to claim one
//! (bus, address) pair and hand back a blocking byte stream:
//! - [`BusBinding`] performs the one-time address claim
//! - any `Read + Write` value serves as the byte transport
//! - [`LinuxI2c`] binds through the Linux `i2c-dev` interface
//!
//! Register semantics live one layer up, in `i2creg-channel`.

pub mod error;
pub mod traits;

#[cfg(target_os = "linux")]
pub mod linux;

pub use error::{Result, TransportError};
pub use traits::{validate_address, BusBinding, MAX_ADDRESS};

#[cfg(target_os = "linux")]
pub use linux::{I2cDevice, LinuxI2c, LinuxI2cConfig, DEFAULT_DEVICE_PREFIX};
