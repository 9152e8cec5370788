//! # Branch Instructions
//!
//! This module implements jumps:
//! - JMP: Jump unconditionally
//! - JEQ: Jump if the Equal flag is set
//! - JNE: Jump if the Equal flag is clear
//!
//! All three take one register operand holding the target address. An untaken
//! conditional branch never looks at its register; it reports `Outcome::Next`
//! and is auto-advanced past its two bytes like any other instruction.

use std::io::Write;

use super::{operand, Outcome};
use crate::{Cpu, ExecutionError, MemoryBus};

/// Reads the branch target held in the register named by the operand.
fn target<M: MemoryBus, W: Write>(cpu: &Cpu<M, W>) -> Result<usize, ExecutionError> {
    let reg = operand(cpu, 1)?;
    Ok(cpu.registers.read(reg)? as usize)
}

/// Executes the JMP instruction.
pub(crate) fn execute_jmp<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    Ok(Outcome::Jumped(target(cpu)?))
}

/// Executes the JEQ instruction.
///
/// # Examples
///
/// ```
/// use ls8::Cpu;
///
/// // LDI R1,9 ; JEQ R1 with FL clear -> falls through
/// let mut cpu = Cpu::with_output(Vec::new());
/// cpu.load(&[0b1000_0010, 1, 9, 0b0101_0101, 1]).unwrap();
///
/// cpu.step().unwrap();
/// cpu.step().unwrap();
/// assert_eq!(cpu.pc(), 5);
/// ```
pub(crate) fn execute_jeq<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    if cpu.flag_e() {
        Ok(Outcome::Jumped(target(cpu)?))
    } else {
        Ok(Outcome::Next)
    }
}

/// Executes the JNE instruction.
pub(crate) fn execute_jne<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    if !cpu.flag_e() {
        Ok(Outcome::Jumped(target(cpu)?))
    } else {
        Ok(Outcome::Next)
    }
}
