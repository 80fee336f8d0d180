//! Fake byte transports for unit tests.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Replays scripted read responses and records every write.
#[derive(Default)]
pub(crate) struct ScriptedDevice {
    pub written: Vec<Vec<u8>>,
    pub responses: VecDeque<Vec<u8>>,
    pub reads: Arc<AtomicUsize>,
    pub writes: Arc<AtomicUsize>,
    pub fail_writes: bool,
    pub fail_reads: bool,
    /// Accept at most this many bytes per write.
    pub write_limit: Option<usize>,
    pub flushed: Arc<AtomicBool>,
}

impl ScriptedDevice {
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Read for ScriptedDevice {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(std::io::Error::other("remote i/o error"));
        }
        let response = self.responses.pop_front().unwrap_or_default();
        let n = response.len().min(buf.len());
        buf[..n].copy_from_slice(&response[..n]);
        Ok(n)
    }
}

impl Write for ScriptedDevice {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(std::io::Error::other("no acknowledgement"));
        }
        let n = self.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.written.push(buf[..n].to_vec());
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A 256-byte register file with an auto-incrementing register pointer.
///
/// The first byte of every write selects the register; remaining bytes are
/// stored from there on. Reads return bytes from the current pointer.
pub(crate) struct RegisterFile {
    pub memory: [u8; 256],
    pointer: u8,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            memory: [0; 256],
            pointer: 0,
        }
    }

    pub fn preset(mut self, register: u8, bytes: &[u8]) -> Self {
        for (offset, byte) in bytes.iter().enumerate() {
            self.memory[register.wrapping_add(offset as u8) as usize] = *byte;
        }
        self
    }
}

impl Read for RegisterFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        for slot in buf.iter_mut() {
            *slot = self.memory[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
        }
        Ok(buf.len())
    }
}

impl Write for RegisterFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let Some((register, data)) = buf.split_first() else {
            return Ok(0);
        };
        self.pointer = *register;
        for byte in data {
            self.memory[self.pointer as usize] = *byte;
            self.pointer = self.pointer.wrapping_add(1);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
