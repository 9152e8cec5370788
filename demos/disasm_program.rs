//! Basic disassembler usage example

use ls8::{disassemble, format_instruction, format_listing};

fn main() {
    // print8.ls8
    let code = &[
        0b1000_0010, 0b0000_0000, 0b0000_1000, // LDI R0,8
        0b0100_0111, 0b0000_0000, // PRN R0
        0b0000_0001, // HLT
    ];

    let instructions = disassemble(code, 0);

    println!("Disassembled code:");
    for instr in &instructions {
        println!("{:02X}: {}", instr.address, format_instruction(instr));
    }

    println!("\nListing:");
    print!("{}", format_listing(&instructions));
}
