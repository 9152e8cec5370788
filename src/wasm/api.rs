//! WASM API for the LS-8 emulator.
//!
//! Provides JavaScript-callable interfaces for loading program images,
//! stepping the machine, inspecting state and disassembling memory.

use std::io::{self, Write};

use crate::{disassemble, format_instruction, parse_program, Cpu, MemoryBus, Ram, MEMORY_SIZE};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// PRN sink that buffers text and optionally forwards each line to JavaScript.
struct JsConsole {
    buffer: Vec<u8>,
    on_print: Option<js_sys::Function>,
}

impl Write for JsConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        if let Some(callback) = &self.on_print {
            let text = String::from_utf8_lossy(buf);
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&text));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Ls8Emulator {
    cpu: Cpu<Ram, JsConsole>,
    program: Vec<u8>,
}

#[wasm_bindgen]
impl Ls8Emulator {
    /// Create a fresh machine with empty memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Ls8Emulator {
            cpu: Cpu::with_parts(
                Ram::new(),
                JsConsole {
                    buffer: Vec::new(),
                    on_print: None,
                },
            ),
            program: Vec::new(),
        }
    }

    /// Register a function called with the text of every PRN
    pub fn set_print_callback(&mut self, on_print: js_sys::Function) {
        self.cpu.output_mut().on_print = Some(on_print);
    }

    /// Parse an ASCII-binary program image and load it at address 0
    pub fn load_program(&mut self, source: String) -> Result<usize, JsError> {
        let bytes = parse_program(&source).map_err(|e| JsError::new(&e.to_string()))?;
        self.load_bytes(&bytes)?;
        Ok(bytes.len())
    }

    /// Load raw bytes at address 0
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        self.cpu
            .load(bytes)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.program = bytes.to_vec();
        Ok(())
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute up to `steps` instructions and return how many ran
    pub fn run_for_steps(&mut self, steps: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_steps(steps as u64)
            .map(|n| n as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// PRN text produced since the last call
    pub fn take_output(&mut self) -> String {
        let bytes = std::mem::take(&mut self.cpu.output_mut().buffer);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Rebuild the machine and reload the last program
    ///
    /// On error the current machine is left as it was.
    pub fn reset(&mut self) -> Result<(), JsError> {
        let mut ram = Ram::new();
        ram.load(&self.program)
            .map_err(|e| JsError::new(&e.to_string()))?;

        let on_print = self.cpu.output_mut().on_print.take();
        self.cpu = Cpu::with_parts(
            ram,
            JsConsole {
                buffer: Vec::new(),
                on_print,
            },
        );
        Ok(())
    }

    // State getters
    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> usize {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn fl(&self) -> u8 {
        self.cpu.fl()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> f64 {
        self.cpu.steps() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Read register R0-R7
    pub fn register(&self, index: u8) -> Result<u8, JsError> {
        self.cpu
            .register(index)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Read a single byte of memory
    pub fn read_memory(&self, addr: usize) -> Result<u8, JsError> {
        self.cpu
            .memory()
            .read(addr)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// The whole 256-byte memory (for display)
    pub fn memory_dump(&self) -> Vec<u8> {
        (0..MEMORY_SIZE)
            .map(|addr| self.cpu.memory().read(addr).unwrap_or(0))
            .collect()
    }

    /// Disassemble the loaded program, one instruction per entry
    pub fn disassemble(&self) -> Vec<String> {
        disassemble(&self.program, 0)
            .iter()
            .map(|instr| format!("{:02X}: {}", instr.address, format_instruction(instr)))
            .collect()
    }
}

impl Default for Ls8Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_reloads_program() {
        let mut emu = Ls8Emulator::new();
        // LDI R0,8 ; PRN R0 ; HLT
        emu.load_bytes(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001])
            .unwrap();
        emu.run_for_steps(10).unwrap();
        assert!(emu.halted());
        assert_eq!(emu.take_output(), "8\n");

        assert!(emu.reset().is_ok());

        assert_eq!(emu.pc(), 0);
        assert!(!emu.halted());
        assert_eq!(emu.register(0).unwrap(), 0);
        assert_eq!(emu.read_memory(2).unwrap(), 8);
    }

    #[test]
    fn test_reset_rejects_oversized_program() {
        let mut emu = Ls8Emulator::new();
        emu.load_bytes(&[0b1000_0010, 0, 8]).unwrap();
        emu.step().unwrap();
        emu.program = vec![0; MEMORY_SIZE + 1];

        let err = emu.reset().unwrap_err();

        assert!(err.message().contains("outside of memory"));
        // Machine state untouched
        assert_eq!(emu.pc(), 3);
        assert_eq!(emu.register(0).unwrap(), 8);
    }
}
