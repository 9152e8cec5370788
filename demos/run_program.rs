//! Run a program with output captured in memory
//!
//! This example shows:
//! - Building a program image in code
//! - Stepping the CPU and inspecting state between instructions
//! - Reading PRN output from a `Vec<u8>` sink
//! - Handling an execution error

use ls8::{Cpu, ExecutionError, Opcode};

fn main() {
    println!("LS-8 - Run Program Example");
    println!("==========================\n");

    // R0 = 6 ; R1 = 7 ; MUL R0,R1 ; PRN R0 ; HLT
    let program = [
        Opcode::Ldi.byte(), 0, 6,
        Opcode::Ldi.byte(), 1, 7,
        Opcode::Mul.byte(), 0, 1,
        Opcode::Prn.byte(), 0,
        Opcode::Hlt.byte(),
    ];

    let mut cpu = Cpu::with_output(Vec::new());
    if let Err(e) = cpu.load(&program) {
        eprintln!("load failed: {}", e);
        return;
    }

    println!("Stepping:");
    while !cpu.is_halted() {
        println!("  {}", cpu.trace_line());
        if let Err(e) = cpu.step() {
            eprintln!("  stopped: {}", e);
            return;
        }
    }

    println!("\nHalted after {} instructions", cpu.steps());
    println!("Output: {:?}", String::from_utf8_lossy(cpu.output()));

    // Dividing by zero stops the machine with PC still on the DIV
    let mut cpu = Cpu::with_output(Vec::new());
    let divide = [Opcode::Ldi.byte(), 0, 1, Opcode::Div.byte(), 0, 1];
    if cpu.load(&divide).is_ok() {
        match cpu.run() {
            Err(ExecutionError::DivideByZero) => {
                println!("\nDIV by zero rejected at PC = {:02X}", cpu.pc());
            }
            other => println!("\nunexpected result: {:?}", other),
        }
    }
}
