//! Fuzz target for CPU execution.
//!
//! Runs an arbitrary memory image from an arbitrary register state for a
//! bounded number of instructions. Errors are expected; panics are bugs.

#![no_main]

use arbitrary::Arbitrary;
use ls8::{disassemble, Cpu, MemoryBus, MEMORY_SIZE};
use libfuzzer_sys::fuzz_target;

/// Instruction budget per input
const MAX_STEPS: u64 = 4096;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// R0-R7, SP included
    registers: [u8; 8],
    /// Starting PC
    pc: u8,
    /// Memory image
    image: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let image = &input.image[..input.image.len().min(MEMORY_SIZE)];

    let mut cpu = Cpu::with_output(Vec::new());
    if cpu.load(image).is_err() {
        return;
    }
    for (index, &value) in input.registers.iter().enumerate() {
        let _ = cpu.set_register(index as u8, value);
    }
    cpu.set_pc(input.pc as usize);

    let steps_before = cpu.steps();
    let result = cpu.run_for_steps(MAX_STEPS);

    // Invariants that hold whatever the program did
    assert!(cpu.steps() - steps_before <= MAX_STEPS);
    assert_eq!(cpu.memory().size(), MEMORY_SIZE);
    assert!(cpu.fl().count_ones() <= 1);
    if result.is_ok() && !cpu.is_halted() {
        assert_eq!(cpu.steps() - steps_before, MAX_STEPS);
    }

    // The trace line and disassembler accept any state
    let _ = cpu.trace_line();
    let _ = disassemble(image, 0);
});
