//! Global machine constants.

/// Bytes occupied by one instruction: an opcode byte followed by an operand byte.
pub const INSTRUCTION_SIZE: u16 = 2;

/// Largest memory array the 16-bit address line can reach.
pub const MAX_MEMORY_SIZE: usize = 1 << 16;

/// Program run when no image is supplied: adds the data bytes at 8 and 9,
/// prints the sum, then halts.
pub const SAMPLE_PROGRAM: [u8; 10] = [
    0, 8, // LOAD A #8
    2, 9, // ADD #9
    3, 0, // PRINT A
    4, 0, // HALT
    42, 73,
];
