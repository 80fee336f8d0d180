use std::io::{Read, Write};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use i2creg_transport::{validate_address, BusBinding};
use tracing::debug;

use crate::codec::{
    decode_i16_be, decode_u16_be, encode_i16_be, encode_register_write, encode_u16_be, swap_i16,
    swap_u16, BYTE_WIDTH, WORD_WIDTH,
};
use crate::error::{ChannelError, Result};
use crate::observer::{NoopObserver, TransferEvent, TransferObserver, TransferOp};

/// Settle delay used by the register reads without a `_with_delay` suffix.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::ZERO;

/// Register access to one device on one bus.
///
/// The channel owns its byte transport and stays bound to the same address
/// for its whole life. After [`close`](Self::close) every operation fails
/// with [`ChannelError::ChannelClosed`] without touching the transport.
///
/// Register reads are select-write, settle delay, read: callers sharing a
/// channel between threads must hold a lock across the whole call (see
/// `SharedChannel` behind the `shared` feature). Nothing is retried; the
/// first transport failure is returned as is.
pub struct RegisterChannel<T, O = NoopObserver> {
    inner: Option<T>,
    bus: u32,
    address: u8,
    observer: O,
}

#[cfg(target_os = "linux")]
impl RegisterChannel<i2creg_transport::I2cDevice> {
    /// Open `/dev/i2c-<bus>` and claim `address` on it.
    pub fn bind(address: u8, bus: u32) -> Result<Self> {
        Self::bind_with(&i2creg_transport::LinuxI2c::new(), address, bus)
    }
}

impl<T: Read + Write> RegisterChannel<T> {
    /// Claim `address` on `bus` through an explicit bus binding.
    pub fn bind_with<B>(binding: &B, address: u8, bus: u32) -> Result<Self>
    where
        B: BusBinding<Transport = T>,
    {
        validate_address(address)?;
        let transport = binding.bind(bus, address)?;
        debug!(bus, address, "register channel bound");
        Ok(Self {
            inner: Some(transport),
            bus,
            address,
            observer: NoopObserver,
        })
    }

    /// Wrap a transport that is already bound to `address` on `bus`.
    pub fn from_transport(transport: T, address: u8, bus: u32) -> Result<Self> {
        validate_address(address)?;
        Ok(Self {
            inner: Some(transport),
            bus,
            address,
            observer: NoopObserver,
        })
    }
}

impl<T: Read + Write, O: TransferObserver> RegisterChannel<T, O> {
    /// Replace the transfer observer.
    pub fn with_observer<P: TransferObserver>(self, observer: P) -> RegisterChannel<T, P> {
        RegisterChannel {
            inner: self.inner,
            bus: self.bus,
            address: self.address,
            observer,
        }
    }

    /// Bus this channel is bound to.
    pub fn bus(&self) -> u32 {
        self.bus
    }

    /// 7-bit device address this channel is bound to.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrow the transport, if the channel is open.
    pub fn get_ref(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Mutably borrow the transport, if the channel is open.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_mut()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Flush and release the transport.
    ///
    /// The channel is closed even when the flush fails. A second call
    /// returns [`ChannelError::AlreadyClosed`].
    pub fn close(&mut self) -> Result<()> {
        let mut transport = self.inner.take().ok_or(ChannelError::AlreadyClosed)?;
        let flushed = transport.flush();
        drop(transport);
        debug!(bus = self.bus, address = self.address, "register channel closed");
        flushed.map_err(ChannelError::Transfer)
    }

    /// Send `payload` to the device as one write.
    ///
    /// Returns the number of bytes the transport accepted.
    pub fn write_bytes(&mut self, payload: &[u8]) -> Result<usize> {
        let transport = self.inner.as_mut().ok_or(ChannelError::ChannelClosed)?;
        let written = transport.write(payload)?;
        self.observer.on_transfer(&TransferEvent {
            op: TransferOp::Write,
            bytes: payload,
            delay: None,
        });
        Ok(written)
    }

    /// Read up to `buf.len()` bytes from the device with a single read.
    ///
    /// Returns the number of bytes read; only that prefix of `buf` is valid.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_observed(buf, None)
    }

    fn read_observed(&mut self, buf: &mut [u8], delay: Option<Duration>) -> Result<usize> {
        let transport = self.inner.as_mut().ok_or(ChannelError::ChannelClosed)?;
        let n = transport.read(buf)?;
        self.observer.on_transfer(&TransferEvent {
            op: TransferOp::Read,
            bytes: &buf[..n],
            delay,
        });
        Ok(n)
    }

    /// Select `register`, wait `delay`, then read into `buf`.
    ///
    /// A failed select aborts before any read. A failed read leaves the
    /// device with `register` selected.
    fn read_register(&mut self, register: u8, buf: &mut [u8], delay: Duration) -> Result<usize> {
        let selected = self.write_bytes(&[register])?;
        if selected != 1 {
            return Err(ChannelError::short_write(1, selected));
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.read_observed(buf, Some(delay))
    }

    fn read_register_exact<const N: usize>(
        &mut self,
        register: u8,
        delay: Duration,
    ) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let n = self.read_register(register, &mut buf, delay)?;
        if n != N {
            return Err(ChannelError::short_read(N, n));
        }
        Ok(buf)
    }

    /// Read `n` bytes starting at `register`.
    pub fn read_reg_bytes(&mut self, register: u8, n: usize) -> Result<Bytes> {
        self.read_reg_bytes_with_delay(register, n, DEFAULT_SETTLE_DELAY)
    }

    /// Read `n` bytes starting at `register`, waiting `delay` after the select.
    ///
    /// The result holds only the bytes the device actually returned.
    pub fn read_reg_bytes_with_delay(
        &mut self,
        register: u8,
        n: usize,
        delay: Duration,
    ) -> Result<Bytes> {
        let mut buf = BytesMut::zeroed(n);
        let read = self.read_register(register, &mut buf, delay)?;
        buf.truncate(read);
        Ok(buf.freeze())
    }

    pub fn read_u8(&mut self, register: u8) -> Result<u8> {
        self.read_u8_with_delay(register, DEFAULT_SETTLE_DELAY)
    }

    pub fn read_u8_with_delay(&mut self, register: u8, delay: Duration) -> Result<u8> {
        let [value] = self.read_register_exact::<BYTE_WIDTH>(register, delay)?;
        Ok(value)
    }

    /// Unsigned word, most significant byte first on the wire.
    pub fn read_u16_be(&mut self, register: u8) -> Result<u16> {
        self.read_u16_be_with_delay(register, DEFAULT_SETTLE_DELAY)
    }

    pub fn read_u16_be_with_delay(&mut self, register: u8, delay: Duration) -> Result<u16> {
        let wire = self.read_register_exact::<WORD_WIDTH>(register, delay)?;
        Ok(decode_u16_be(wire))
    }

    /// Unsigned word, least significant byte first on the wire.
    pub fn read_u16_le(&mut self, register: u8) -> Result<u16> {
        self.read_u16_le_with_delay(register, DEFAULT_SETTLE_DELAY)
    }

    pub fn read_u16_le_with_delay(&mut self, register: u8, delay: Duration) -> Result<u16> {
        self.read_u16_be_with_delay(register, delay).map(swap_u16)
    }

    /// Signed word, most significant byte first on the wire.
    pub fn read_i16_be(&mut self, register: u8) -> Result<i16> {
        self.read_i16_be_with_delay(register, DEFAULT_SETTLE_DELAY)
    }

    pub fn read_i16_be_with_delay(&mut self, register: u8, delay: Duration) -> Result<i16> {
        let wire = self.read_register_exact::<WORD_WIDTH>(register, delay)?;
        Ok(decode_i16_be(wire))
    }

    /// Signed word, least significant byte first on the wire.
    pub fn read_i16_le(&mut self, register: u8) -> Result<i16> {
        self.read_i16_le_with_delay(register, DEFAULT_SETTLE_DELAY)
    }

    pub fn read_i16_le_with_delay(&mut self, register: u8, delay: Duration) -> Result<i16> {
        self.read_i16_be_with_delay(register, delay).map(swap_i16)
    }

    /// Write `data` to `register` in a single transaction.
    pub fn write_reg_bytes(&mut self, register: u8, data: &[u8]) -> Result<()> {
        let mut frame = BytesMut::with_capacity(1 + data.len());
        encode_register_write(register, data, &mut frame);
        let written = self.write_bytes(&frame)?;
        if written != frame.len() {
            return Err(ChannelError::short_write(frame.len(), written));
        }
        Ok(())
    }

    pub fn write_u8(&mut self, register: u8, value: u8) -> Result<()> {
        self.write_reg_bytes(register, &[value])
    }

    pub fn write_i8(&mut self, register: u8, value: i8) -> Result<()> {
        self.write_reg_bytes(register, &value.to_be_bytes())
    }

    /// Unsigned word, most significant byte first on the wire.
    pub fn write_u16_be(&mut self, register: u8, value: u16) -> Result<()> {
        self.write_reg_bytes(register, &encode_u16_be(value))
    }

    /// Unsigned word, least significant byte first on the wire.
    pub fn write_u16_le(&mut self, register: u8, value: u16) -> Result<()> {
        self.write_u16_be(register, swap_u16(value))
    }

    /// Signed word, most significant byte first on the wire.
    pub fn write_i16_be(&mut self, register: u8, value: i16) -> Result<()> {
        self.write_reg_bytes(register, &encode_i16_be(value))
    }

    /// Signed word, least significant byte first on the wire.
    pub fn write_i16_le(&mut self, register: u8, value: i16) -> Result<()> {
        self.write_i16_be(register, swap_i16(value))
    }
}

impl<T, O> std::fmt::Debug for RegisterChannel<T, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterChannel")
            .field("bus", &self.bus)
            .field("address", &format_args!("0x{:02x}", self.address))
            .field("closed", &self.inner.is_none())
            .finish()
    }
}
