//! Common types and constants shared by every part of the simulator.
//!
//! 1. **Constants:** Instruction size, memory limits, and the built-in sample program.
//! 2. **Error Handling:** Component faults and simulator-level errors.
//! 3. **Register Management:** The accumulator/program-counter register file.

/// Machine-wide constants.
pub mod constants;

/// Fault and error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{INSTRUCTION_SIZE, MAX_MEMORY_SIZE, SAMPLE_PROGRAM};
pub use error::{Fault, Result, SimError};
pub use reg::RegisterFile;
