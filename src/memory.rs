//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from its
//! backing store, and `Ram`, the flat 256-byte memory the LS-8 ships with.
//!
//! ## Design Principles
//!
//! Unlike real hardware buses, LS-8 memory is strict:
//! - Every access is bounds-checked against `size()`
//! - Out-of-range reads and writes fail with `ExecutionError::OutOfBounds`
//! - Nothing is mapped beyond the end of the store

use crate::ExecutionError;

/// Number of addressable bytes on the LS-8.
pub const MEMORY_SIZE: usize = 256;

/// Memory bus trait for the CPU to read/write bytes.
///
/// The CPU accesses program, data and stack memory through this abstraction.
///
/// # Examples
///
/// ```
/// use ls8::{ExecutionError, MemoryBus, Ram};
///
/// let mut mem = Ram::new();
/// mem.write(0x42, 7).unwrap();
/// assert_eq!(mem.read(0x42), Ok(7));
/// assert_eq!(mem.read(256), Err(ExecutionError::OutOfBounds(256)));
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use ls8::{ExecutionError, MemoryBus};
///
/// /// Memory whose upper half is write-protected.
/// struct GuardedMemory {
///     data: [u8; 256],
/// }
///
/// impl MemoryBus for GuardedMemory {
///     fn read(&self, addr: usize) -> Result<u8, ExecutionError> {
///         self.data.get(addr).copied().ok_or(ExecutionError::OutOfBounds(addr))
///     }
///
///     fn write(&mut self, addr: usize, value: u8) -> Result<(), ExecutionError> {
///         match self.data.get_mut(addr) {
///             Some(slot) if addr < 0x80 => {
///                 *slot = value;
///                 Ok(())
///             }
///             _ => Err(ExecutionError::OutOfBounds(addr)),
///         }
///     }
///
///     fn size(&self) -> usize {
///         self.data.len()
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads the byte at `addr`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::OutOfBounds` if `addr >= size()`.
    fn read(&self, addr: usize) -> Result<u8, ExecutionError>;

    /// Writes `value` at `addr`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::OutOfBounds` if `addr >= size()`.
    fn write(&mut self, addr: usize, value: u8) -> Result<(), ExecutionError>;

    /// Number of addressable bytes.
    fn size(&self) -> usize;

    /// Copies `bytes` into memory starting at address 0.
    ///
    /// Bytes are written left to right; an image that does not fit fails at
    /// the first address past the end, after the bytes before it were written.
    fn load(&mut self, bytes: &[u8]) -> Result<(), ExecutionError> {
        for (addr, &byte) in bytes.iter().enumerate() {
            self.write(addr, byte)?;
        }
        Ok(())
    }
}

/// Flat 256-byte RAM, zeroed on construction.
///
/// # Examples
///
/// ```
/// use ls8::{MemoryBus, Ram};
///
/// let mut ram = Ram::new();
/// ram.load(&[0b1000_0010, 0, 8]).unwrap();
/// assert_eq!(ram.read(2), Ok(8));
/// assert_eq!(ram.read(3), Ok(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ram {
    data: [u8; MEMORY_SIZE],
}

impl Ram {
    /// Creates a new RAM with all bytes set to zero.
    pub fn new() -> Self {
        Self {
            data: [0; MEMORY_SIZE],
        }
    }

    /// Returns the whole memory contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for Ram {
    fn read(&self, addr: usize) -> Result<u8, ExecutionError> {
        self.data
            .get(addr)
            .copied()
            .ok_or(ExecutionError::OutOfBounds(addr))
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<(), ExecutionError> {
        let slot = self
            .data
            .get_mut(addr)
            .ok_or(ExecutionError::OutOfBounds(addr))?;
        *slot = value;
        Ok(())
    }

    fn size(&self) -> usize {
        MEMORY_SIZE
    }
}
