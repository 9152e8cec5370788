//! Tests for the PUSH and POP instructions.
//!
//! Tests cover:
//! - PUSH decrements SP then stores the register value
//! - POP reads at SP then increments SP
//! - Popping an empty stack keeps SP at 0xFF
//! - Register validation happens before SP moves

use ls8::{Cpu, ExecutionError, MemoryBus, Opcode, Ram, SP, STACK_TOP};

fn setup_cpu(program: &[u8]) -> Cpu<Ram, Vec<u8>> {
    let mut cpu = Cpu::with_output(Vec::new());
    cpu.load(program).unwrap();
    cpu
}

const PUSH: u8 = Opcode::Push.byte();
const POP: u8 = Opcode::Pop.byte();
const PRN: u8 = Opcode::Prn.byte();
const LDI: u8 = Opcode::Ldi.byte();
const HLT: u8 = Opcode::Hlt.byte();

// ========== PUSH ==========

#[test]
fn test_push_basic() {
    let mut cpu = setup_cpu(&[PUSH, 3]);
    cpu.set_register(3, 0x42u8).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), STACK_TOP - 1);
    assert_eq!(cpu.memory().read(0xFE), Ok(0x42));
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_push_sequence_grows_down() {
    let mut cpu = setup_cpu(&[PUSH, 0, PUSH, 1, PUSH, 2]);
    cpu.set_register(0, 10u8).unwrap();
    cpu.set_register(1, 20u8).unwrap();
    cpu.set_register(2, 30u8).unwrap();

    cpu.run_for_steps(3).unwrap();

    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.memory().read(0xFE), Ok(10));
    assert_eq!(cpu.memory().read(0xFD), Ok(20));
    assert_eq!(cpu.memory().read(0xFC), Ok(30));
}

#[test]
fn test_push_sp_itself() {
    let mut cpu = setup_cpu(&[PUSH, SP]);

    cpu.step().unwrap();

    // Value read before SP moves
    assert_eq!(cpu.memory().read(0xFE), Ok(0xFF));
}

#[test]
fn test_push_invalid_register() {
    let mut cpu = setup_cpu(&[PUSH, 8]);

    assert_eq!(cpu.step(), Err(ExecutionError::InvalidRegister(8)));
    assert_eq!(cpu.sp(), STACK_TOP);
}

#[test]
fn test_push_wraps_past_zero() {
    let mut cpu = setup_cpu(&[PUSH, 0]);
    cpu.set_register(SP, 0u8).unwrap();
    cpu.set_register(0, 0x77u8).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory().read(0xFF), Ok(0x77));
}

// ========== POP ==========

#[test]
fn test_pop_basic() {
    let mut cpu = setup_cpu(&[PUSH, 0, POP, 1]);
    cpu.set_register(0, 9u8).unwrap();

    cpu.run_for_steps(2).unwrap();

    assert_eq!(cpu.register(1), Ok(9));
    assert_eq!(cpu.sp(), STACK_TOP);
    assert_eq!(cpu.pc(), 4);
}

#[test]
fn test_pop_empty_stack() {
    let mut cpu = setup_cpu(&[POP, 0, POP, 1]);
    cpu.memory_mut().write(0xFF, 0x33).unwrap();

    cpu.run_for_steps(2).unwrap();

    assert_eq!(cpu.register(0), Ok(0x33));
    assert_eq!(cpu.register(1), Ok(0x33));
    assert_eq!(cpu.sp(), STACK_TOP);
}

#[test]
fn test_pop_invalid_register_keeps_sp() {
    let mut cpu = setup_cpu(&[PUSH, 0, POP, 9]);

    cpu.step().unwrap();
    assert_eq!(cpu.step(), Err(ExecutionError::InvalidRegister(9)));

    assert_eq!(cpu.sp(), STACK_TOP - 1);
}

// ========== Programs ==========

#[test]
fn test_push_pop_prn_program() {
    // LDI R0,9 ; PUSH R0 ; POP R1 ; PRN R1 ; HLT
    let mut cpu = setup_cpu(&[LDI, 0, 9, PUSH, 0, POP, 1, PRN, 1, HLT]);

    cpu.run().unwrap();

    assert_eq!(String::from_utf8(cpu.output().clone()).unwrap(), "9\n");
}

#[test]
fn test_stack_is_lifo() {
    // LDI R0,1 ; LDI R1,2 ; PUSH R0 ; PUSH R1 ; POP R2 ; POP R3 ; PRN R2 ; PRN R3 ; HLT
    let mut cpu = setup_cpu(&[
        LDI, 0, 1, LDI, 1, 2, PUSH, 0, PUSH, 1, POP, 2, POP, 3, PRN, 2, PRN, 3, HLT,
    ]);

    cpu.run().unwrap();

    assert_eq!(String::from_utf8(cpu.output().clone()).unwrap(), "2\n1\n");
}
