//! Transfer observability.
//!
//! Every successful raw transfer is reported to the channel's observer.
//! Observers are informational only: they cannot fail a transfer or
//! change what the channel does next.

use std::fmt;
use std::time::Duration;

use tracing::trace;

/// Direction of a raw transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOp {
    Read,
    Write,
}

impl TransferOp {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferOp::Read => "read",
            TransferOp::Write => "write",
        }
    }
}

impl fmt::Display for TransferOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed transfer.
#[derive(Debug, Clone, Copy)]
pub struct TransferEvent<'a> {
    pub op: TransferOp,
    /// Bytes written, or bytes received for reads.
    pub bytes: &'a [u8],
    /// Settle delay that preceded a register read.
    pub delay: Option<Duration>,
}

impl TransferEvent<'_> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Receives transfer events from a register channel.
pub trait TransferObserver {
    fn on_transfer(&self, event: &TransferEvent<'_>);
}

impl<F> TransferObserver for F
where
    F: Fn(&TransferEvent<'_>),
{
    fn on_transfer(&self, event: &TransferEvent<'_>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TransferObserver for NoopObserver {
    fn on_transfer(&self, _event: &TransferEvent<'_>) {}
}

/// Emits each event as a `tracing` event at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TransferObserver for TracingObserver {
    fn on_transfer(&self, event: &TransferEvent<'_>) {
        let hex = hex::encode(event.bytes);
        match event.delay {
            Some(delay) => trace!(
                op = %event.op,
                len = event.len(),
                hex = %hex,
                ?delay,
                "i2c {}",
                event.op
            ),
            None => trace!(op = %event.op, len = event.len(), hex = %hex, "i2c {}", event.op),
        }
    }
}
