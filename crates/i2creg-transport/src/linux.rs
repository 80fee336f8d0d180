use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::{validate_address, BusBinding};

/// Device node prefix; the bus number is appended (`/dev/i2c-1`).
pub const DEFAULT_DEVICE_PREFIX: &str = "/dev/i2c-";

/// `linux/i2c-dev.h`: use this slave address.
const I2C_SLAVE: libc::c_ulong = 0x0703;
/// `linux/i2c-dev.h`: use this slave address, even if already claimed by a driver.
const I2C_SLAVE_FORCE: libc::c_ulong = 0x0706;

/// Configuration for binding through `i2c-dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinuxI2cConfig {
    /// Path prefix of the bus device nodes. Default: `/dev/i2c-`.
    pub device_prefix: PathBuf,
    /// Claim the address even if a kernel driver already owns it.
    pub force: bool,
}

impl Default for LinuxI2cConfig {
    fn default() -> Self {
        Self {
            device_prefix: PathBuf::from(DEFAULT_DEVICE_PREFIX),
            force: false,
        }
    }
}

impl LinuxI2cConfig {
    /// Device node for `bus` under this configuration.
    pub fn device_path(&self, bus: u32) -> PathBuf {
        let mut path = OsString::from(self.device_prefix.as_os_str());
        path.push(bus.to_string());
        PathBuf::from(path)
    }
}

/// Bus binding over the Linux `i2c-dev` character devices.
///
/// Requires the `i2c-dev` kernel module (`modprobe i2c-dev`).
#[derive(Debug, Clone, Default)]
pub struct LinuxI2c {
    config: LinuxI2cConfig,
}

impl LinuxI2c {
    /// Binding with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding with explicit configuration.
    pub fn with_config(config: LinuxI2cConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &LinuxI2cConfig {
        &self.config
    }

    /// Open the bus node and claim `address` on it.
    pub fn open(&self, bus: u32, address: u8) -> Result<I2cDevice> {
        validate_address(address)?;

        let path = self.config.device_path(bus);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| TransportError::Open {
                path: path.clone(),
                source: e,
            })?;

        let request = if self.config.force {
            I2C_SLAVE_FORCE
        } else {
            I2C_SLAVE
        };

        // SAFETY: `file` is an open descriptor owned by this function, and
        // I2C_SLAVE/I2C_SLAVE_FORCE take the address by value.
        let rc = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                request as _,
                libc::c_ulong::from(address),
            )
        };
        if rc < 0 {
            return Err(TransportError::Bind {
                bus,
                address,
                source: std::io::Error::last_os_error(),
            });
        }

        debug!(?path, bus, address, force = self.config.force, "bound i2c device");

        Ok(I2cDevice {
            file,
            path,
            bus,
            address,
        })
    }
}

impl BusBinding for LinuxI2c {
    type Transport = I2cDevice;

    fn bind(&self, bus: u32, address: u8) -> Result<I2cDevice> {
        self.open(bus, address)
    }
}

/// An `i2c-dev` node bound to one device address.
///
/// Each `write` is one bus write transaction and each `read` one bus read
/// transaction against the bound device. Closing happens on drop.
pub struct I2cDevice {
    file: File,
    path: PathBuf,
    bus: u32,
    address: u8,
}

impl I2cDevice {
    /// Bus number this device sits on.
    pub fn bus(&self) -> u32 {
        self.bus
    }

    /// Bound 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Device node path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for I2cDevice {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for I2cDevice {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl std::fmt::Debug for I2cDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I2cDevice")
            .field("path", &self.path)
            .field("bus", &self.bus)
            .field("address", &format_args!("0x{:02x}", self.address))
            .finish()
    }
}
