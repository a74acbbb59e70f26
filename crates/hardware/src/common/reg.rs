//! Register file.
//!
//! The machine has exactly two architectural registers: the 8-bit accumulator
//! and the 16-bit program counter. Both are written only by the apply phase.

use serde::Serialize;

/// Accumulator and program counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegisterFile {
    /// Accumulator (`A`).
    pub accumulator: u8,
    /// Address of the opcode byte of the current instruction.
    pub program_counter: u16,
}

impl RegisterFile {
    /// Creates a register file with both registers cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dumps both registers to stderr.
    pub fn dump(&self) {
        eprintln!(
            "A  = {:#04x} ({})\nPC = {:#06x}",
            self.accumulator, self.accumulator, self.program_counter
        );
    }
}
