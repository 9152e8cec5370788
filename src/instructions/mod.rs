//! # LS-8 Instruction Implementations
//!
//! This module contains the implementations of the executable LS-8
//! instructions, organized by category. Each executor takes a mutable
//! reference to the CPU and the opcode byte, performs the instruction, and
//! reports how it affected control flow. PC advancement is left to
//! `Cpu::step`, which applies the generic auto-advance rule.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and compare (ADD, SUB, MUL, DIV, CMP)
//! - **branches**: Jumps (JMP, JEQ, JNE)
//! - **control**: Halt and subroutines (HLT, CALL, RET)
//! - **stack**: Stack operations (PUSH, POP)
//! - **load_store**: Immediate loads (LDI)
//! - **io**: Output (PRN)

pub mod alu;
pub mod branches;
pub mod control;
pub mod io;
pub mod load_store;
pub mod stack;

use std::io::Write;

use crate::{Cpu, ExecutionError, MemoryBus, Opcode};

pub(crate) use load_store::execute_ldi;

/// Effect of an executed instruction on control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Fall through to the next instruction.
    Next,
    /// PC must be set to the given address.
    Jumped(usize),
    /// HLT executed.
    Halted,
}

/// Reads the `n`th operand byte of the instruction at PC.
pub(crate) fn operand<M: MemoryBus, W: Write>(
    cpu: &Cpu<M, W>,
    n: usize,
) -> Result<u8, ExecutionError> {
    cpu.memory.read(cpu.pc + n)
}

/// Dispatches a one-operand instruction.
pub(crate) fn execute_one_operand<M: MemoryBus, W: Write>(
    cpu: &mut Cpu<M, W>,
    opcode: u8,
) -> Result<Outcome, ExecutionError> {
    match Opcode::from_byte(opcode) {
        Some(Opcode::Prn) => io::execute_prn(cpu),
        Some(Opcode::Push) => stack::execute_push(cpu),
        Some(Opcode::Pop) => stack::execute_pop(cpu),
        Some(Opcode::Call) => control::execute_call(cpu),
        Some(Opcode::Jmp) => branches::execute_jmp(cpu),
        Some(Opcode::Jeq) => branches::execute_jeq(cpu),
        Some(Opcode::Jne) => branches::execute_jne(cpu),
        _ => Err(ExecutionError::UnknownOpcode(opcode)),
    }
}
