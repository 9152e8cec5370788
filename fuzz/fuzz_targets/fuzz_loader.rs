//! Fuzz target for the program image loader.
//!
//! Any text must either parse or yield a `LoadError`; parsed bytes must be
//! loadable and disassemblable without panics.

#![no_main]

use ls8::{disassemble, format_listing, parse_program, Cpu};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let Ok(bytes) = parse_program(text) else {
        return;
    };

    // Every contributing line starts with 0 or 1
    let data_lines = text
        .lines()
        .filter(|line| matches!(line.as_bytes().first(), Some(b'0' | b'1')))
        .count();
    assert_eq!(bytes.len(), data_lines);

    let _ = format_listing(&disassemble(&bytes, 0));

    let mut cpu = Cpu::with_output(Vec::new());
    let _ = cpu.load(&bytes);
});
