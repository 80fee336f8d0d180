use std::path::PathBuf;

/// Errors that can occur while binding a byte transport to a device.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The bus device node could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The bus driver rejected the device address.
    #[error("failed to bind address 0x{address:02x} on bus {bus}: {source}")]
    Bind {
        bus: u32,
        address: u8,
        source: std::io::Error,
    },

    /// The address does not fit in 7 bits.
    #[error("invalid 7-bit device address 0x{0:02x}")]
    InvalidAddress(u8),
}

pub type Result<T> = std::result::Result<T, TransportError>;
