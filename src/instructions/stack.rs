//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PUSH: Push register on stack
//! - POP: Pop stack into register
//!
//! The LS-8 stack lives in main memory and grows downward from 0xFF. R7 holds
//! the stack pointer and always addresses the most recently pushed byte.

use std::io::Write;

use super::{operand, Outcome};
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the PUSH instruction.
///
/// Decrements SP, then writes the named register's value at SP.
///
/// # Examples
///
/// ```
/// use ls8::{Cpu, MemoryBus};
///
/// let mut cpu = Cpu::with_output(Vec::new());
/// cpu.load(&[0b0100_0101, 0]).unwrap(); // PUSH R0
/// cpu.set_register(0, 0x42u8).unwrap();
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.sp(), 0xFE);
/// assert_eq!(cpu.memory().read(0xFE), Ok(0x42));
/// assert_eq!(cpu.pc(), 2);
/// ```
pub(crate) fn execute_push<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    let reg = operand(cpu, 1)?;
    let value = cpu.registers.read(reg)?;

    cpu.push(value)?;

    Ok(Outcome::Next)
}

/// Executes the POP instruction.
///
/// Reads the byte at SP into the named register, then increments SP unless
/// the stack is already at its top.
pub(crate) fn execute_pop<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    let reg = operand(cpu, 1)?;
    // Validate the destination before SP moves
    cpu.registers.read(reg)?;

    let value = cpu.pop()?;
    cpu.registers.write(reg, value)?;

    Ok(Outcome::Next)
}
