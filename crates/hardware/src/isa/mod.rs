//! Instruction set definitions.
//!
//! Every instruction is two bytes: an opcode followed by an operand. The
//! instruction set is fixed at five opcodes:
//!
//! | Opcode | Mnemonic | Ticks |
//! |---|---|---|
//! | 0 | `LOAD A`  | 3 |
//! | 1 | `STORE A` | 2 |
//! | 2 | `ADD`     | 3 |
//! | 3 | `PRINT A` | 1 |
//! | 4 | `HALT`    | 1 |

/// Program image disassembler for the CLI and debug tracing.
pub mod disasm;

/// Opcodes and their micro-step programs.
pub mod opcode;

pub use opcode::{MicroStep, Opcode};
