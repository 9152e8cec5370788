//! # LS-8 Virtual Machine
//!
//! An emulator for the LS-8, a minimal 8-bit CPU with 256 bytes of memory,
//! eight one-byte registers and a fixed-width, bit-encoded instruction set.
//!
//! This crate provides the machine state and fetch-decode-execute loop, a
//! loader for the ASCII-binary program image format, a disassembler, and
//! optional WebAssembly bindings.
//!
//! ## Quick Start
//!
//! ```rust
//! use ls8::{parse_program, Cpu};
//!
//! let image = parse_program(
//!     "10000010 # LDI R0,8\n\
//!      00000000\n\
//!      00001000\n\
//!      01000111 # PRN R0\n\
//!      00000000\n\
//!      00000001 # HLT\n",
//! )
//! .unwrap();
//!
//! let mut cpu = Cpu::with_output(Vec::new());
//! cpu.load(&image).unwrap();
//! cpu.run().unwrap();
//!
//! assert!(cpu.is_halted());
//! assert_eq!(cpu.output().as_slice(), b"8\n");
//! ```
//!
//! ## Architecture
//!
//! - **Memory**: 256 bytes behind the `MemoryBus` trait, bounds-checked
//! - **Registers**: R0-R7, R7 doubles as the stack pointer (starts at 0xFF)
//! - **Flags**: `00000LGE`, written by CMP and read by JEQ/JNE
//! - **Decode**: the opcode byte itself encodes operand count (bits 7-6),
//!   ALU membership (bit 5) and whether the instruction sets PC (bit 4)
//!
//! ## Modules
//!
//! - `cpu` - Machine state and the execution loop
//! - `memory` - MemoryBus trait and the flat 256-byte RAM
//! - `registers` - The eight-register file
//! - `opcodes` - Opcode enum, metadata table and bit-field decoding
//! - `loader` - Program image parsing
//! - `disassembler` - Machine code to mnemonic listing
//! - `log` - Leveled stderr logging used by the CLI

pub mod cpu;
pub mod disassembler;
pub mod loader;
pub mod log;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cpu::Cpu;
pub use disassembler::{disassemble, format_instruction, format_listing, Instruction};
pub use loader::{load_program_file, parse_program, LoadError};
pub use memory::{MemoryBus, Ram, MEMORY_SIZE};
pub use opcodes::{
    is_alu, no_auto_advance, operand_count, Opcode, OpcodeMetadata, OPCODE_TABLE,
};
pub use registers::{RegisterFile, REGISTER_COUNT, SP, STACK_TOP};

use thiserror::Error;

/// Errors that can occur during machine execution.
///
/// Every variant is fatal: the step that raised it stops mutating state and
/// `run()` returns immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Memory access outside the 256-byte address space.
    #[error("address {0} is outside of memory")]
    OutOfBounds(usize),

    /// Register index outside R0-R7.
    #[error("register index {0} is out of range")]
    InvalidRegister(u8),

    /// The fetched byte is not an executable instruction.
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),

    /// DIV with a zero divisor register.
    #[error("divide by zero")]
    DivideByZero,

    /// The ALU was asked to perform a non-ALU operation.
    #[error("unsupported ALU operation {0:?}")]
    UnsupportedOperation(Opcode),

    /// The PRN output sink rejected a write.
    #[error("output error: {0}")]
    Output(String),
}
