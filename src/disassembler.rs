//! LS-8 Disassembler Module
//!
//! Converts machine code into human-readable assembly mnemonics. Instruction
//! length comes from the operand-count bits of each opcode byte, the same rule
//! the CPU uses to advance PC.

use crate::opcodes::{operand_count, Opcode, Operand};

/// A single disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: usize,

    /// The opcode byte value
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDI", "PRN"), or ".byte" for bytes not
    /// in the opcode table
    pub mnemonic: &'static str,

    /// Operand bytes actually present (may be short at the end of the image)
    pub operands: Vec<u8>,
}

impl Instruction {
    /// Total size in bytes, opcode included.
    pub fn size(&self) -> usize {
        if self.mnemonic == ".byte" {
            1
        } else {
            1 + self.operands.len()
        }
    }
}

/// Disassembles `bytes`, labelling the first byte with `start_address`.
///
/// # Examples
///
/// ```
/// use ls8::{disassemble, format_instruction};
///
/// let listing = disassemble(&[0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001], 0);
/// let text: Vec<String> = listing.iter().map(format_instruction).collect();
/// assert_eq!(text, ["LDI R0,8", "PRN R0", "HLT"]);
/// ```
pub fn disassemble(bytes: &[u8], start_address: usize) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let opcode = bytes[offset];

        let instr = match Opcode::from_byte(opcode) {
            Some(op) => {
                let end = (offset + 1 + operand_count(opcode) as usize).min(bytes.len());
                Instruction {
                    address: start_address + offset,
                    opcode,
                    mnemonic: op.mnemonic(),
                    operands: bytes[offset + 1..end].to_vec(),
                }
            }
            None => Instruction {
                address: start_address + offset,
                opcode,
                mnemonic: ".byte",
                operands: Vec::new(),
            },
        };

        offset += instr.size();
        instructions.push(instr);
    }

    instructions
}

/// Formats a single instruction as assembly text.
///
/// Register operands print as `R<n>`, immediates in decimal, and missing
/// operand bytes as `?`.
pub fn format_instruction(instr: &Instruction) -> String {
    let op = match Opcode::from_byte(instr.opcode) {
        Some(op) if instr.mnemonic != ".byte" => op,
        _ => return format!(".byte ${:02X}", instr.opcode),
    };

    let operands: Vec<String> = op
        .metadata()
        .operands
        .iter()
        .enumerate()
        .map(|(i, kind)| match (kind, instr.operands.get(i)) {
            (Operand::Register, Some(reg)) => format!("R{}", reg),
            (Operand::Immediate, Some(value)) => value.to_string(),
            (_, None) => "?".to_string(),
        })
        .collect();

    if operands.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operands.join(","))
    }
}

/// Formats a listing as `AA: BB BB BB  TEXT` lines.
///
/// # Examples
///
/// ```
/// use ls8::{disassemble, format_listing};
///
/// let listing = format_listing(&disassemble(&[0b0100_0111, 2], 0x10));
/// assert_eq!(listing, "10: 47 02     PRN R2\n");
/// ```
pub fn format_listing(instructions: &[Instruction]) -> String {
    let mut out = String::new();

    for instr in instructions {
        let mut hex = format!("{:02X}", instr.opcode);
        for byte in &instr.operands {
            hex.push_str(&format!(" {:02X}", byte));
        }
        out.push_str(&format!(
            "{:02X}: {:<8}  {}\n",
            instr.address,
            hex,
            format_instruction(instr)
        ));
    }

    out
}
