//! End-to-end tests running the bundled `.ls8` programs.

use ls8::{load_program_file, Cpu, ExecutionError, Ram};

fn run_program(name: &str) -> (Cpu<Ram, Vec<u8>>, Result<u64, ExecutionError>) {
    let path = format!("{}/programs/{}", env!("CARGO_MANIFEST_DIR"), name);
    let bytes = load_program_file(&path).unwrap();

    let mut cpu = Cpu::with_output(Vec::new());
    cpu.load(&bytes).unwrap();
    let result = cpu.run_for_steps(10_000);
    (cpu, result)
}

fn output(cpu: &Cpu<Ram, Vec<u8>>) -> String {
    String::from_utf8(cpu.output().clone()).unwrap()
}

#[test]
fn test_print8() {
    let (cpu, result) = run_program("print8.ls8");

    assert_eq!(result, Ok(3));
    assert!(cpu.is_halted());
    assert_eq!(output(&cpu), "8\n");
}

#[test]
fn test_mult() {
    let (cpu, result) = run_program("mult.ls8");

    assert!(result.is_ok());
    assert!(cpu.is_halted());
    assert_eq!(output(&cpu), "72\n");
}

#[test]
fn test_stack() {
    let (cpu, result) = run_program("stack.ls8");

    assert!(result.is_ok());
    assert_eq!(output(&cpu), "2\n4\n1\n");
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_call() {
    let (cpu, result) = run_program("call.ls8");

    assert_eq!(result, Ok(22));
    assert_eq!(output(&cpu), "20\n30\n36\n60\n");
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_sctest() {
    let (cpu, result) = run_program("sctest.ls8");

    assert_eq!(result, Ok(24));
    assert!(cpu.is_halted());
    assert_eq!(output(&cpu), "1\n4\n5\n");
}

#[test]
fn test_divzero_stops_with_error() {
    let (cpu, result) = run_program("divzero.ls8");

    assert_eq!(result, Err(ExecutionError::DivideByZero));
    assert!(!cpu.is_halted());
    assert_eq!(output(&cpu), "7\n");
    assert_eq!(cpu.pc(), 8);
    assert_eq!(cpu.register(0), Ok(7));
}
