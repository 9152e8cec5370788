//! # CPU State and Execution
//!
//! This module contains the `Cpu` struct representing the LS-8 machine state
//! and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: R0-R7, with R7 as the stack pointer
//! - **Program counter** (PC): address of the next instruction
//! - **Flags** (FL): `00000LGE`, result of the last CMP
//! - **Memory**: 256 bytes behind a `MemoryBus`
//! - **Output**: sink receiving the text printed by PRN
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction
//! - `run()`: Execute until HLT
//! - `run_for_steps()`: Execute until HLT or an instruction budget is spent
//!
//! Every step fetches the opcode at PC, dispatches on its operand count and ALU
//! bit, and then advances PC by `operand_count + 1` unless the instruction
//! carries the no-auto-advance bit *and* actually moved PC.

use std::io::{self, Write};

use crate::instructions::{self, Outcome};
use crate::opcodes::{is_alu, no_auto_advance, operand_count};
use crate::{ExecutionError, MemoryBus, Ram, RegisterFile};

/// Equal flag (bit 0 of FL).
pub const FLAG_E: u8 = 0b0000_0001;

/// Greater-than flag (bit 1 of FL).
pub const FLAG_G: u8 = 0b0000_0010;

/// Less-than flag (bit 2 of FL).
pub const FLAG_L: u8 = 0b0000_0100;

/// LS-8 machine state and execution context.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation, `Ram` by default
/// * `W` - Sink for PRN output, stdout by default
///
/// # Examples
///
/// ```
/// use ls8::Cpu;
///
/// let cpu = Cpu::new();
///
/// assert_eq!(cpu.pc(), 0);
/// assert_eq!(cpu.fl(), 0);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert!(!cpu.is_halted());
/// ```
pub struct Cpu<M: MemoryBus = Ram, W: Write = io::Stdout> {
    /// Register file (R7 = SP)
    pub(crate) registers: RegisterFile,

    /// Program counter
    pub(crate) pc: usize,

    /// Flags register, `00000LGE`
    pub(crate) fl: u8,

    /// Set once HLT executes
    pub(crate) halted: bool,

    /// Instructions executed since construction
    pub(crate) steps: u64,

    /// Memory bus implementation
    pub(crate) memory: M,

    /// PRN output sink
    pub(crate) output: W,
}

impl Cpu {
    /// Creates a machine with zeroed RAM that prints to stdout.
    pub fn new() -> Self {
        Cpu::with_parts(Ram::new(), io::stdout())
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Cpu<Ram, W> {
    /// Creates a machine with zeroed RAM that prints to `output`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::Cpu;
    ///
    /// let mut cpu = Cpu::with_output(Vec::new());
    /// cpu.load(&[0b0000_0001]).unwrap(); // HLT
    /// cpu.run().unwrap();
    /// assert!(cpu.output().is_empty());
    /// ```
    pub fn with_output(output: W) -> Self {
        Cpu::with_parts(Ram::new(), output)
    }
}

impl<M: MemoryBus, W: Write> Cpu<M, W> {
    /// Creates a machine over the given memory and output sink.
    ///
    /// Registers start at zero except SP (0xFF); PC and FL start at zero.
    /// The memory is used as-is.
    pub fn with_parts(memory: M, output: W) -> Self {
        Self {
            registers: RegisterFile::new(),
            pc: 0,
            fl: 0,
            halted: false,
            steps: 0,
            memory,
            output,
        }
    }

    /// Writes a program image into memory starting at address 0.
    ///
    /// Registers, PC and flags are left alone.
    ///
    /// # Errors
    ///
    /// `ExecutionError::OutOfBounds` if the image is larger than memory.
    pub fn load(&mut self, program: &[u8]) -> Result<(), ExecutionError> {
        self.memory.load(program)
    }

    /// Executes one instruction.
    ///
    /// Stepping a halted machine does nothing. On error no state beyond what
    /// the failing instruction had already validated is changed, and PC still
    /// points at the failing instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{Cpu, ExecutionError};
    ///
    /// let mut cpu = Cpu::with_output(Vec::new());
    /// cpu.load(&[0b1000_0010, 0, 42]).unwrap(); // LDI R0,42
    ///
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.register(0), Ok(42));
    /// assert_eq!(cpu.pc(), 3);
    ///
    /// // Address 3 holds 0x00 (NOP), which this machine does not execute
    /// assert_eq!(cpu.step(), Err(ExecutionError::UnknownOpcode(0x00)));
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.halted {
            return Ok(());
        }

        // Fetch
        let ir = self.memory.read(self.pc)?;

        // Decode
        let operands = operand_count(ir);

        // Dispatch
        let outcome = match operands {
            0 => instructions::control::execute_no_operand(self, ir)?,
            1 => instructions::execute_one_operand(self, ir)?,
            2 if is_alu(ir) => instructions::alu::execute_alu(self, ir)?,
            2 => instructions::execute_ldi(self, ir)?,
            _ => return Err(ExecutionError::UnknownOpcode(ir)),
        };

        if outcome == Outcome::Halted {
            self.halted = true;
        }

        // Advance
        match outcome {
            Outcome::Jumped(target) if no_auto_advance(ir) => self.pc = target,
            _ => self.pc += operands as usize + 1,
        }

        self.steps += 1;

        Ok(())
    }

    /// Runs until HLT executes.
    ///
    /// A program that never halts runs forever; use `run_for_steps` to bound
    /// execution.
    ///
    /// # Returns
    ///
    /// The number of instructions executed by this call.
    pub fn run(&mut self) -> Result<u64, ExecutionError> {
        let start = self.steps;

        while !self.halted {
            self.step()?;
        }

        Ok(self.steps - start)
    }

    /// Runs until HLT executes or `budget` instructions have been executed.
    ///
    /// # Returns
    ///
    /// The number of instructions executed by this call. Check `is_halted()`
    /// to tell a finished program from an exhausted budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::Cpu;
    ///
    /// // LDI R0,0 ; JMP R0  -- spins forever
    /// let mut cpu = Cpu::with_output(Vec::new());
    /// cpu.load(&[0b1000_0010, 0, 0, 0b0101_0100, 0]).unwrap();
    ///
    /// assert_eq!(cpu.run_for_steps(100), Ok(100));
    /// assert!(!cpu.is_halted());
    /// ```
    pub fn run_for_steps(&mut self, budget: u64) -> Result<u64, ExecutionError> {
        let start = self.steps;

        while !self.halted && self.steps - start < budget {
            self.step()?;
        }

        Ok(self.steps - start)
    }

    /// Pushes `value` onto the stack: decrement SP, then store at SP.
    ///
    /// SP wraps below zero without complaint; a runaway push loop overwrites
    /// the program from the top of memory down.
    pub fn push(&mut self, value: u8) -> Result<(), ExecutionError> {
        let sp = self.registers.sp().wrapping_sub(1);
        self.memory.write(sp as usize, value)?;
        self.registers.set_sp(sp);
        Ok(())
    }

    /// Pops the byte at SP, then increments SP if it is below the stack top.
    ///
    /// Popping an empty stack returns the byte at 0xFF and leaves SP there.
    pub fn pop(&mut self) -> Result<u8, ExecutionError> {
        let sp = self.registers.sp();
        let value = self.memory.read(sp as usize)?;
        if sp < crate::STACK_TOP {
            self.registers.set_sp(sp + 1);
        }
        Ok(value)
    }

    /// Formats the machine state as a single trace line.
    ///
    /// `TRACE: PC | IR OP1 OP2 | R0 R1 R2 R3 R4 R5 R6 R7`, all in two-digit
    /// hex. Bytes past the end of memory show as `00`.
    pub fn trace_line(&self) -> String {
        let byte_at = |addr: usize| self.memory.read(addr).unwrap_or(0);

        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc,
            byte_at(self.pc),
            byte_at(self.pc.wrapping_add(1)),
            byte_at(self.pc.wrapping_add(2)),
        );
        for value in self.registers.as_array() {
            line.push_str(&format!(" {:02X}", value));
        }
        line
    }

    // ========== Accessors ==========

    /// Returns the program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Returns the flags register.
    pub fn fl(&self) -> u8 {
        self.fl
    }

    /// Returns the stack pointer (R7).
    pub fn sp(&self) -> u8 {
        self.registers.sp()
    }

    /// Returns true if the last CMP found its operands equal.
    pub fn flag_e(&self) -> bool {
        self.fl & FLAG_E != 0
    }

    /// Returns true if the last CMP found A greater than B.
    pub fn flag_g(&self) -> bool {
        self.fl & FLAG_G != 0
    }

    /// Returns true if the last CMP found A less than B.
    pub fn flag_l(&self) -> bool {
        self.fl & FLAG_L != 0
    }

    /// Returns true once HLT has executed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the number of instructions executed since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Reads register `index`.
    pub fn register(&self, index: u8) -> Result<u8, ExecutionError> {
        self.registers.read(index)
    }

    /// Writes the low byte of `value` into register `index`.
    pub fn set_register(&mut self, index: u8, value: impl Into<u32>) -> Result<(), ExecutionError> {
        self.registers.write(index, value)
    }

    /// Returns the register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Returns a reference to the PRN output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Returns a mutable reference to the PRN output sink.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Opcode, STACK_TOP};

    fn machine(program: &[u8]) -> Cpu<Ram, Vec<u8>> {
        let mut cpu = Cpu::with_output(Vec::new());
        cpu.load(program).unwrap();
        cpu
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = machine(&[]);

        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.fl(), 0);
        assert_eq!(cpu.sp(), STACK_TOP);
        assert_eq!(cpu.steps(), 0);
        for r in 0..7 {
            assert_eq!(cpu.register(r), Ok(0));
        }
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_load_does_not_reset_state() {
        let mut cpu = machine(&[]);
        cpu.set_register(1, 5u8).unwrap();
        cpu.set_pc(3);

        cpu.load(&[Opcode::Hlt.byte()]).unwrap();

        assert_eq!(cpu.register(1), Ok(5));
        assert_eq!(cpu.pc(), 3);
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut cpu = machine(&[Opcode::Hlt.byte()]);

        cpu.step().unwrap();
        assert!(cpu.is_halted());
        let pc = cpu.pc();

        cpu.step().unwrap();
        assert_eq!(cpu.pc(), pc);
        assert_eq!(cpu.steps(), 1);
    }

    #[test]
    fn test_push_pop_round_trip() {
        let mut cpu = machine(&[]);

        cpu.push(0x11).unwrap();
        cpu.push(0x22).unwrap();
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.memory().read(0xFE), Ok(0x11));

        assert_eq!(cpu.pop(), Ok(0x22));
        assert_eq!(cpu.pop(), Ok(0x11));
        assert_eq!(cpu.sp(), STACK_TOP);
    }

    #[test]
    fn test_pop_empty_stack_keeps_sp() {
        let mut cpu = machine(&[]);
        cpu.memory_mut().write(0xFF, 0x99).unwrap();

        assert_eq!(cpu.pop(), Ok(0x99));
        assert_eq!(cpu.sp(), STACK_TOP);
        assert_eq!(cpu.pop(), Ok(0x99));
        assert_eq!(cpu.sp(), STACK_TOP);
    }

    #[test]
    fn test_push_wraps_sp_below_zero() {
        let mut cpu = machine(&[]);
        cpu.set_register(crate::SP, 0u8).unwrap();

        cpu.push(0x5A).unwrap();

        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().read(0xFF), Ok(0x5A));
    }

    #[test]
    fn test_trace_line_format() {
        let mut cpu = machine(&[0x82, 0x00, 0x08]);
        cpu.set_register(0, 0xABu8).unwrap();

        assert_eq!(
            cpu.trace_line(),
            "TRACE: 00 | 82 00 08 | AB 00 00 00 00 00 00 FF"
        );
    }

    #[test]
    fn test_trace_line_past_end_of_memory() {
        let mut cpu = machine(&[]);
        cpu.set_pc(0xFF);

        assert!(cpu.trace_line().starts_with("TRACE: FF | 00 00 00 |"));
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut cpu = machine(&[]);
        cpu.set_pc(0x100);

        assert_eq!(cpu.step(), Err(ExecutionError::OutOfBounds(0x100)));
        assert_eq!(cpu.steps(), 0);
    }
}
