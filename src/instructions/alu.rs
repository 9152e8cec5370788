//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements the register-to-register ALU operations:
//! - ADD, SUB, MUL: wrapping 8-bit arithmetic, result in register A
//! - DIV: truncating division, result in register A
//! - CMP: compare A with B and set exactly one of the L, G, E flags
//!
//! All ALU instructions take two register operands, `regA` and `regB`.

use std::io::Write;

use super::{operand, Outcome};
use crate::cpu::{FLAG_E, FLAG_G, FLAG_L};
use crate::{Cpu, ExecutionError, MemoryBus, Opcode};

/// Executes a two-operand ALU instruction.
///
/// Decodes the operation from the opcode byte, validates both registers,
/// checks DIV's divisor before touching any state, and hands off to `apply`.
pub(crate) fn execute_alu<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
    opcode: u8,
) -> Result<Outcome, ExecutionError> {
    let op = match Opcode::from_byte(opcode) {
        Some(op @ (Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Cmp)) => op,
        _ => return Err(ExecutionError::UnknownOpcode(opcode)),
    };

    let reg_a = operand(cpu, 1)?;
    let reg_b = operand(cpu, 2)?;

    cpu.registers.read(reg_a)?;
    let divisor = cpu.registers.read(reg_b)?;

    if op == Opcode::Div && divisor == 0 {
        return Err(ExecutionError::DivideByZero);
    }

    apply(cpu, op, reg_a, reg_b)?;

    Ok(Outcome::Next)
}

/// Performs `op` on registers `reg_a` and `reg_b`.
///
/// Arithmetic results are stored in `reg_a`; CMP overwrites FL.
///
/// # Errors
///
/// - `InvalidRegister` if either index is not in 0..8
/// - `DivideByZero` for DIV with a zero divisor
/// - `UnsupportedOperation` if `op` is not ADD, SUB, MUL, DIV or CMP
pub(crate) fn apply<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
    op: Opcode,
    reg_a: u8,
    reg_b: u8,
) -> Result<(), ExecutionError> {
    let a = cpu.registers.read(reg_a)?;
    let b = cpu.registers.read(reg_b)?;

    let result = match op {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Div => a.checked_div(b).ok_or(ExecutionError::DivideByZero)?,
        Opcode::Cmp => {
            cpu.fl = compare(a, b);
            return Ok(());
        }
        other => return Err(ExecutionError::UnsupportedOperation(other)),
    };

    cpu.registers.write(reg_a, result)
}

/// Flag byte for comparing `a` with `b`.
fn compare(a: u8, b: u8) -> u8 {
    use std::cmp::Ordering;

    match a.cmp(&b) {
        Ordering::Less => FLAG_L,
        Ordering::Greater => FLAG_G,
        Ordering::Equal => FLAG_E,
    }
}
