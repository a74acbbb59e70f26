//! Program image disassembler.
//!
//! Walks an image as opcode/operand pairs and renders one line per pair.
//! Everything after the first `HALT`, and any pair whose opcode does not
//! decode, is shown as data.
//!
//! ```
//! use clockbus_core::isa::disasm::disassemble;
//!
//! let lines = disassemble(&[0, 8, 3, 0, 4, 0, 42]);
//! assert_eq!(lines, vec![
//!     "0000: LOAD A #8",
//!     "0002: PRINT A",
//!     "0004: HALT",
//!     "0006: .byte 42",
//! ]);
//! ```

use crate::isa::opcode::Opcode;

/// Renders one instruction, or `None` if `opcode` does not decode.
pub fn disassemble_instruction(opcode: u8, operand: u8) -> Option<String> {
    let opcode = Opcode::try_from(opcode).ok()?;
    Some(if opcode.uses_operand() {
        format!("{} #{operand}", opcode.mnemonic())
    } else {
        opcode.mnemonic().to_owned()
    })
}

/// Disassembles a whole program image, one line per instruction or data byte.
pub fn disassemble(image: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut address = 0;
    let mut in_code = true;

    while address < image.len() {
        if in_code {
            if let Some(&[opcode, operand]) = image.get(address..address + 2) {
                if let Some(text) = disassemble_instruction(opcode, operand) {
                    lines.push(format!("{address:04x}: {text}"));
                    in_code = opcode != u8::from(Opcode::Halt);
                } else {
                    lines.push(format!("{address:04x}: .byte {opcode}"));
                    lines.push(format!("{:04x}: .byte {operand}", address + 1));
                }
                address += 2;
                continue;
            }
        }
        lines.push(format!("{address:04x}: .byte {}", image[address]));
        address += 1;
    }
    lines
}
