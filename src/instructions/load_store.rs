//! # Load Instructions
//!
//! - LDI: Load an immediate byte into a register
//!
//! LDI is the only executable two-operand instruction outside the ALU. Its
//! second operand is a literal value, not a register index.

use std::io::Write;

use super::{operand, Outcome};
use crate::{Cpu, ExecutionError, MemoryBus, Opcode};

/// Executes the LDI instruction.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte; any non-ALU two-operand byte other than LDI
///   is rejected
pub(crate) fn execute_ldi<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
    opcode: u8,
) -> Result<Outcome, ExecutionError> {
    if Opcode::from_byte(opcode) != Some(Opcode::Ldi) {
        return Err(ExecutionError::UnknownOpcode(opcode));
    }

    let reg = operand(cpu, 1)?;
    let value = operand(cpu, 2)?;

    cpu.registers.write(reg, value)?;

    Ok(Outcome::Next)
}
