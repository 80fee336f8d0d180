//! Register-level access to I2C devices using SMBus conventions.
//!
//! i2creg binds to one device on one bus and reads or writes its registers:
//! select the register, optionally wait for the device to settle, then
//! transfer 8- or 16-bit values in either byte order.
//!
//! # Crate Structure
//!
//! - [`transport`]: Bus binding and byte transport (`/dev/i2c-N` on Linux)
//! - [`channel`]: Register channel, value codecs, transfer observers
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> Result<(), i2creg::channel::ChannelError> {
//! use i2creg::channel::RegisterChannel;
//!
//! let mut sensor = RegisterChannel::bind(0x48, 1)?;
//! let raw = sensor.read_i16_be(0x00)?;
//! sensor.write_u8(0x01, 0x60)?;
//! sensor.close()?;
//! # let _ = raw;
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```

/// Re-export transport types.
pub mod transport {
    pub use i2creg_transport::*;
}

/// Re-export channel types.
pub mod channel {
    pub use i2creg_channel::*;
}

pub use i2creg_channel::{ChannelError, RegisterChannel};
