//! # Control Flow Instructions
//!
//! This module implements halting and subroutine linkage:
//! - HLT: Halt the machine
//! - CALL: Call subroutine at the address in a register
//! - RET: Return from subroutine
//!
//! CALL pushes the address of the following instruction (PC+2) as a single
//! byte, then jumps to the address held in its register; RET pops the byte
//! straight into PC.

use std::io::Write;

use super::{operand, Outcome};
use crate::{Cpu, ExecutionError, MemoryBus, Opcode};

/// Dispatches a zero-operand instruction.
///
/// Only HLT and RET are executable; every other zero-operand byte is an
/// `UnknownOpcode`.
pub(crate) fn execute_no_operand<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
    opcode: u8,
) -> Result<Outcome, ExecutionError> {
    match Opcode::from_byte(opcode) {
        Some(Opcode::Hlt) => Ok(Outcome::Halted),
        Some(Opcode::Ret) => execute_ret(cpu),
        _ => Err(ExecutionError::UnknownOpcode(opcode)),
    }
}

/// Executes the CALL instruction.
///
/// # Examples
///
/// ```
/// use ls8::{Cpu, MemoryBus};
///
/// let mut cpu = Cpu::with_output(Vec::new());
/// cpu.load(&[0b0101_0000, 1]).unwrap(); // CALL R1
/// cpu.set_register(1, 0x20u8).unwrap();
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.pc(), 0x20);
/// assert_eq!(cpu.memory().read(cpu.sp() as usize), Ok(2)); // return address
/// ```
pub(crate) fn execute_call<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    let reg = operand(cpu, 1)?;
    cpu.registers.read(reg)?;

    let return_address = cpu.pc + 2;
    if return_address > u8::MAX as usize {
        return Err(ExecutionError::OutOfBounds(return_address));
    }
    cpu.push(return_address as u8)?;

    // Read after the push: CALL R7 jumps to the new SP
    let target = cpu.registers.read(reg)?;

    Ok(Outcome::Jumped(target as usize))
}

/// Executes the RET instruction.
pub(crate) fn execute_ret<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    let return_address = cpu.pop()?;
    Ok(Outcome::Jumped(return_address as usize))
}
