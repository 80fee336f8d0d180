use i2creg_transport::TransportError;

/// Errors that can occur on a register channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The bus could not be opened or the address could not be claimed.
    #[error("bind failed: {0}")]
    Bind(#[from] TransportError),

    /// A read or write failed at the transport level.
    #[error("transfer failed: {0}")]
    Transfer(#[from] std::io::Error),

    /// The channel was closed before this operation.
    #[error("channel closed")]
    ChannelClosed,

    /// `close` was called on a channel that is already closed.
    #[error("channel already closed")]
    AlreadyClosed,
}

impl ChannelError {
    pub(crate) fn short_read(expected: usize, actual: usize) -> Self {
        ChannelError::Transfer(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("short register read ({actual} of {expected} bytes)"),
        ))
    }

    pub(crate) fn short_write(expected: usize, actual: usize) -> Self {
        ChannelError::Transfer(std::io::Error::new(
            std::io::ErrorKind::WriteZero,
            format!("short register write ({actual} of {expected} bytes)"),
        ))
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
