use parking_lot::{Mutex, MutexGuard};

use crate::channel::RegisterChannel;
use crate::observer::NoopObserver;

/// A register channel behind a mutex.
///
/// The lock is held for a whole logical register operation, so one
/// caller's register select can never land between another caller's
/// select and read.
pub struct SharedChannel<T, O = NoopObserver> {
    inner: Mutex<RegisterChannel<T, O>>,
    bus: u32,
    address: u8,
}

impl<T, O> SharedChannel<T, O>
where
    T: std::io::Read + std::io::Write,
    O: crate::observer::TransferObserver,
{
    pub fn new(channel: RegisterChannel<T, O>) -> Self {
        let bus = channel.bus();
        let address = channel.address();
        Self {
            inner: Mutex::new(channel),
            bus,
            address,
        }
    }

    /// Lock the channel; it stays locked until the guard drops.
    ///
    /// Hold one guard across every call that must not interleave.
    pub fn lock(&self) -> MutexGuard<'_, RegisterChannel<T, O>> {
        self.inner.lock()
    }

    /// Run `f` with the channel locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut RegisterChannel<T, O>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    pub fn bus(&self) -> u32 {
        self.bus
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn into_inner(self) -> RegisterChannel<T, O> {
        self.inner.into_inner()
    }
}

impl<T, O> From<RegisterChannel<T, O>> for SharedChannel<T, O>
where
    T: std::io::Read + std::io::Write,
    O: crate::observer::TransferObserver,
{
    fn from(channel: RegisterChannel<T, O>) -> Self {
        Self::new(channel)
    }
}

impl<T, O> std::fmt::Debug for SharedChannel<T, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedChannel")
            .field("bus", &self.bus)
            .field("address", &format_args!("0x{:02x}", self.address))
            .finish()
    }
}
