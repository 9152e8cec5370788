//! # Register File
//!
//! Eight general-purpose one-byte registers, R0-R7. R7 is reserved as the
//! stack pointer and starts at the top of memory.

use crate::ExecutionError;

/// Number of registers in the file.
pub const REGISTER_COUNT: usize = 8;

/// Index of the stack pointer register (R7).
pub const SP: u8 = 7;

/// Initial (empty-stack) value of the stack pointer.
pub const STACK_TOP: u8 = 0xFF;

/// The LS-8 register file.
///
/// Every stored value is masked to eight bits, so arithmetic results written
/// back through `write` wrap modulo 256.
///
/// # Examples
///
/// ```
/// use ls8::{RegisterFile, SP, STACK_TOP};
///
/// let mut regs = RegisterFile::new();
/// assert_eq!(regs.read(SP), Ok(STACK_TOP));
///
/// regs.write(0, 300u32).unwrap();
/// assert_eq!(regs.read(0), Ok(44));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file in its power-on state: all zero except SP.
    pub fn new() -> Self {
        let mut regs = [0; REGISTER_COUNT];
        regs[SP as usize] = STACK_TOP;
        Self { regs }
    }

    /// Reads register `index`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::InvalidRegister` if `index` is not in 0..8.
    pub fn read(&self, index: u8) -> Result<u8, ExecutionError> {
        self.regs
            .get(index as usize)
            .copied()
            .ok_or(ExecutionError::InvalidRegister(index))
    }

    /// Writes the low byte of `value` into register `index`.
    ///
    /// # Errors
    ///
    /// `ExecutionError::InvalidRegister` if `index` is not in 0..8.
    pub fn write(&mut self, index: u8, value: impl Into<u32>) -> Result<(), ExecutionError> {
        let slot = self
            .regs
            .get_mut(index as usize)
            .ok_or(ExecutionError::InvalidRegister(index))?;
        *slot = (value.into() & 0xFF) as u8;
        Ok(())
    }

    /// Current stack pointer value.
    pub fn sp(&self) -> u8 {
        self.regs[SP as usize]
    }

    pub(crate) fn set_sp(&mut self, value: u8) {
        self.regs[SP as usize] = value;
    }

    /// All eight registers, R0 first.
    pub fn as_array(&self) -> &[u8; REGISTER_COUNT] {
        &self.regs
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
