use std::io::{Read, Write};

use crate::error::{Result, TransportError};

/// Highest valid 7-bit device address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Claims a device address on a bus and yields a byte transport for it.
///
/// Binding happens once, when a register channel is created. The returned
/// transport talks to that device only; there is no per-transfer
/// addressing. Reads and writes on it block until the bus driver completes
/// or fails.
pub trait BusBinding {
    /// Byte stream bound to the claimed device.
    type Transport: Read + Write;

    /// Open `bus` and claim `address` as its active device.
    fn bind(&self, bus: u32, address: u8) -> Result<Self::Transport>;
}

impl<B: BusBinding + ?Sized> BusBinding for &B {
    type Transport = B::Transport;

    fn bind(&self, bus: u32, address: u8) -> Result<Self::Transport> {
        (**self).bind(bus, address)
    }
}

/// Reject addresses outside the 7-bit range.
///
/// Reserved addresses inside the range are left to the bus driver.
pub fn validate_address(address: u8) -> Result<()> {
    if address > MAX_ADDRESS {
        return Err(TransportError::InvalidAddress(address));
    }
    Ok(())
}
