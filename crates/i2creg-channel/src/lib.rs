//! SMBus-style register access over a bound I2C byte transport.
//!
//! This is the core layer of i2creg. A [`RegisterChannel`] owns the byte
//! transport for exactly one (bus, address) pair and builds typed register
//! access on top of two primitives, `write` and `read`:
//! - reads select the register with a one-byte write, wait an optional
//!   settle delay, then read the value's width
//! - writes send the register byte and the payload in one transaction
//! - little-endian accessors reinterpret the big-endian bytes, they never
//!   issue a different bus transaction
//!
//! A channel is not safe to share between threads without external
//! locking: a register read is two bus operations, and another caller's
//! select may land between them. Enable the `shared` feature for
//! [`SharedChannel`], which holds a lock across each whole register
//! operation.

pub mod channel;
pub mod codec;
pub mod error;
pub mod observer;

#[cfg(feature = "shared")]
pub mod shared;

#[cfg(test)]
pub(crate) mod fake;

pub use channel::{RegisterChannel, DEFAULT_SETTLE_DELAY};
pub use codec::{BYTE_WIDTH, WORD_WIDTH};
pub use error::{ChannelError, Result};
pub use observer::{NoopObserver, TracingObserver, TransferEvent, TransferObserver, TransferOp};

#[cfg(feature = "shared")]
pub use shared::SharedChannel;
