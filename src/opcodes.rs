//! # Opcode Table
//!
//! The LS-8 instruction set and the bit-field rules used to decode it.
//!
//! An opcode byte is self-describing:
//!
//! ```text
//! AABCDDDD
//! ││││└┴┴┴── instruction identifier
//! │││└────── C: sets PC itself (no auto-advance)
//! ││└─────── B: handled by the ALU
//! └┴──────── AA: number of operand bytes that follow (0-2)
//! ```
//!
//! Dispatch and PC advancement are driven by these fields rather than by the
//! individual opcode, so `operand_count`, `is_alu` and `no_auto_advance` keep
//! the exact bit positions external program images rely on.
//!
//! The table lists the whole LS-8 instruction set so images can be
//! disassembled; only the entries marked `executable` run on this machine.

use crate::ExecutionError;

/// Number of operand bytes following `opcode` (bits 7-6).
///
/// # Examples
///
/// ```
/// use ls8::operand_count;
///
/// assert_eq!(operand_count(0b1000_0010), 2); // LDI
/// assert_eq!(operand_count(0b0100_0111), 1); // PRN
/// assert_eq!(operand_count(0b0000_0001), 0); // HLT
/// ```
pub const fn operand_count(opcode: u8) -> u8 {
    opcode >> 6
}

/// Whether `opcode` is an ALU operation (bit 5).
pub const fn is_alu(opcode: u8) -> bool {
    (opcode >> 5) & 0b1 == 1
}

/// Whether `opcode` repositions PC itself and must not be auto-advanced (bit 4).
pub const fn no_auto_advance(opcode: u8) -> bool {
    (opcode >> 4) & 0b1 == 1
}

/// Kind of a single operand byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Register index, R0-R7.
    Register,
    /// Literal byte value.
    Immediate,
}

const NONE: &[Operand] = &[];
const REG: &[Operand] = &[Operand::Register];
const REG_REG: &[Operand] = &[Operand::Register, Operand::Register];
const REG_IMM: &[Operand] = &[Operand::Register, Operand::Immediate];

/// An LS-8 instruction, discriminated by its opcode byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop = 0b0000_0000,
    Hlt = 0b0000_0001,
    Ret = 0b0001_0001,
    Iret = 0b0001_0011,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Pra = 0b0100_1000,
    Call = 0b0101_0000,
    Int = 0b0101_0010,
    Jmp = 0b0101_0100,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    Jgt = 0b0101_0111,
    Jlt = 0b0101_1000,
    Jle = 0b0101_1001,
    Jge = 0b0101_1010,
    Inc = 0b0110_0101,
    Dec = 0b0110_0110,
    Not = 0b0110_1001,
    Ldi = 0b1000_0010,
    Ld = 0b1000_0011,
    St = 0b1000_0100,
    Add = 0b1010_0000,
    Sub = 0b1010_0001,
    Mul = 0b1010_0010,
    Div = 0b1010_0011,
    Mod = 0b1010_0100,
    Cmp = 0b1010_0111,
    And = 0b1010_1000,
    Or = 0b1010_1010,
    Xor = 0b1010_1011,
    Shl = 0b1010_1100,
    Shr = 0b1010_1101,
}

/// Static information about an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Assembly mnemonic, e.g. "LDI".
    pub mnemonic: &'static str,

    /// Operand kinds, in encoding order.
    pub operands: &'static [Operand],

    /// Whether this machine executes the instruction.
    pub executable: bool,
}

impl Opcode {
    /// Every instruction in the LS-8 set.
    pub const ALL: [Opcode; 34] = [
        Opcode::Nop,
        Opcode::Hlt,
        Opcode::Ret,
        Opcode::Iret,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Prn,
        Opcode::Pra,
        Opcode::Call,
        Opcode::Int,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Jgt,
        Opcode::Jlt,
        Opcode::Jle,
        Opcode::Jge,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Not,
        Opcode::Ldi,
        Opcode::Ld,
        Opcode::St,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Cmp,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
    ];

    /// The encoded opcode byte.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Looks up `byte` in the opcode table.
    pub const fn from_byte(byte: u8) -> Option<Opcode> {
        OPCODE_TABLE[byte as usize]
    }

    /// Static metadata for this instruction.
    pub const fn metadata(self) -> OpcodeMetadata {
        use Opcode::*;

        let (mnemonic, operands, executable) = match self {
            Nop => ("NOP", NONE, false),
            Hlt => ("HLT", NONE, true),
            Ret => ("RET", NONE, true),
            Iret => ("IRET", NONE, false),
            Push => ("PUSH", REG, true),
            Pop => ("POP", REG, true),
            Prn => ("PRN", REG, true),
            Pra => ("PRA", REG, false),
            Call => ("CALL", REG, true),
            Int => ("INT", REG, false),
            Jmp => ("JMP", REG, true),
            Jeq => ("JEQ", REG, true),
            Jne => ("JNE", REG, true),
            Jgt => ("JGT", REG, false),
            Jlt => ("JLT", REG, false),
            Jle => ("JLE", REG, false),
            Jge => ("JGE", REG, false),
            Inc => ("INC", REG, false),
            Dec => ("DEC", REG, false),
            Not => ("NOT", REG, false),
            Ldi => ("LDI", REG_IMM, true),
            Ld => ("LD", REG_REG, false),
            St => ("ST", REG_REG, false),
            Add => ("ADD", REG_REG, true),
            Sub => ("SUB", REG_REG, true),
            Mul => ("MUL", REG_REG, true),
            Div => ("DIV", REG_REG, true),
            Mod => ("MOD", REG_REG, false),
            Cmp => ("CMP", REG_REG, true),
            And => ("AND", REG_REG, false),
            Or => ("OR", REG_REG, false),
            Xor => ("XOR", REG_REG, false),
            Shl => ("SHL", REG_REG, false),
            Shr => ("SHR", REG_REG, false),
        };

        OpcodeMetadata {
            mnemonic,
            operands,
            executable,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        self.metadata().mnemonic
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ExecutionError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::from_byte(byte).ok_or(ExecutionError::UnknownOpcode(byte))
    }
}

/// 256-entry table indexed by opcode byte; `None` for unassigned bytes.
///
/// # Examples
///
/// ```
/// use ls8::{Opcode, OPCODE_TABLE};
///
/// assert_eq!(OPCODE_TABLE[0b1000_0010], Some(Opcode::Ldi));
/// assert_eq!(OPCODE_TABLE[0xFF], None);
/// ```
pub const OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < Opcode::ALL.len() {
        let op = Opcode::ALL[i];
        table[op as usize] = Some(op);
        i += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_count_matches_metadata() {
        for op in Opcode::ALL {
            assert_eq!(
                operand_count(op.byte()) as usize,
                op.metadata().operands.len(),
                "{} operand count disagrees with its encoding",
                op.mnemonic()
            );
        }
    }

    #[test]
    fn test_alu_bit() {
        for op in [Opcode::Add, Opcode::Sub, Opcode::Mul, Opcode::Div, Opcode::Cmp] {
            assert!(is_alu(op.byte()), "{} should be an ALU op", op.mnemonic());
        }
        for op in [Opcode::Ldi, Opcode::Prn, Opcode::Hlt, Opcode::Call] {
            assert!(!is_alu(op.byte()), "{} should not be an ALU op", op.mnemonic());
        }
    }

    #[test]
    fn test_no_auto_advance_bit() {
        for op in [Opcode::Call, Opcode::Ret, Opcode::Jmp, Opcode::Jeq, Opcode::Jne] {
            assert!(no_auto_advance(op.byte()), "{} sets PC itself", op.mnemonic());
        }
        for op in [Opcode::Hlt, Opcode::Ldi, Opcode::Push, Opcode::Pop, Opcode::Prn] {
            assert!(!no_auto_advance(op.byte()));
        }
    }

    #[test]
    fn test_table_round_trip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::try_from(op.byte()), Ok(op));
        }
        assert_eq!(OPCODE_TABLE.iter().flatten().count(), Opcode::ALL.len());
    }

    #[test]
    fn test_unassigned_byte() {
        assert_eq!(Opcode::try_from(0xFF), Err(ExecutionError::UnknownOpcode(0xFF)));
    }
}
