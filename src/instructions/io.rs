//! # Output Instructions
//!
//! - PRN: Print the decimal value of a register, one value per line

use std::io::Write;

use super::{operand, Outcome};
use crate::{Cpu, ExecutionError, MemoryBus};

/// Executes the PRN instruction.
pub(crate) fn execute_prn<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
) -> Result<Outcome, ExecutionError> {
    let reg = operand(cpu, 1)?;
    let value = cpu.registers.read(reg)?;

    writeln!(cpu.output, "{}", value).map_err(|e| ExecutionError::Output(e.to_string()))?;

    Ok(Outcome::Next)
}
