//! Opcode table and bit-field decoding tests

use ls8::{is_alu, no_auto_advance, operand_count, ExecutionError, Opcode, OPCODE_TABLE};

#[test]
fn test_table_has_every_instruction() {
    let defined = OPCODE_TABLE.iter().filter(|entry| entry.is_some()).count();

    assert_eq!(defined, Opcode::ALL.len());
    for op in Opcode::ALL {
        assert_eq!(OPCODE_TABLE[op.byte() as usize], Some(op));
    }
}

#[test]
fn test_executable_set() {
    let executable: Vec<&str> = Opcode::ALL
        .iter()
        .filter(|op| op.metadata().executable)
        .map(|op| op.mnemonic())
        .collect();

    assert_eq!(
        executable,
        [
            "HLT", "RET", "PUSH", "POP", "PRN", "CALL", "JMP", "JEQ", "JNE", "LDI", "ADD", "SUB",
            "MUL", "DIV", "CMP"
        ]
    );
}

#[test]
fn test_bit_fields() {
    assert_eq!(operand_count(0b1000_0010), 2);
    assert_eq!(operand_count(0b0100_0111), 1);
    assert_eq!(operand_count(0b0000_0001), 0);
    assert_eq!(operand_count(0b1100_0000), 3);

    assert!(is_alu(Opcode::Cmp.byte()));
    assert!(!is_alu(Opcode::Ldi.byte()));

    assert!(no_auto_advance(Opcode::Call.byte()));
    assert!(no_auto_advance(Opcode::Ret.byte()));
    assert!(!no_auto_advance(Opcode::Prn.byte()));
}

#[test]
fn test_encoding_agrees_with_category() {
    for op in Opcode::ALL {
        let byte = op.byte();
        assert_eq!(operand_count(byte) as usize, op.metadata().operands.len());
    }

    for op in [Opcode::Add, Opcode::Sub, Opcode::Mul, Opcode::Div, Opcode::Cmp, Opcode::Inc] {
        assert!(is_alu(op.byte()), "{} should carry the ALU bit", op.mnemonic());
    }

    for op in [Opcode::Call, Opcode::Ret, Opcode::Jmp, Opcode::Jeq, Opcode::Jne] {
        assert!(no_auto_advance(op.byte()), "{} should set PC itself", op.mnemonic());
    }
}

#[test]
fn test_try_from() {
    assert_eq!(Opcode::try_from(0b1010_0011), Ok(Opcode::Div));
    assert_eq!(Opcode::try_from(0xFF), Err(ExecutionError::UnknownOpcode(0xFF)));
}
