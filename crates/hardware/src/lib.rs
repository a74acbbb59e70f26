//! Cycle-accurate simulator of a minimal stored-program computer.
//!
//! This crate models a CPU, a byte-addressable memory, and the shared bus
//! between them, advanced one clock tick at a time:
//! 1. **Core:** The CPU's fetch/decode/execute state machine and its micro-operations.
//! 2. **SoC:** Machine state (bus lines, registers, memory, halt flag) and the memory component.
//! 3. **ISA:** The five-opcode instruction set and a disassembler.
//! 4. **Simulation:** The two-phase tick scheduler, effects, trace output, and loader.
//! 5. **Support:** Configuration and run statistics.
//!
//! ```
//! use clockbus_core::{Config, Simulator, SAMPLE_PROGRAM};
//! use clockbus_core::sim::{RunOutcome, TraceEvent};
//!
//! let mut sim = Simulator::new(&Config::default(), &SAMPLE_PROGRAM).unwrap();
//! assert!(matches!(sim.run().unwrap(), RunOutcome::Halted { .. }));
//! assert_eq!(sim.trace(), &[TraceEvent::Print(115), TraceEvent::Halt]);
//! ```

/// Common types and constants (errors, registers, sample program).
pub mod common;
/// Simulator configuration.
pub mod config;
/// CPU state machine and micro-operations.
pub mod core;
/// Instruction set (opcodes, micro-step tables, disassembler).
pub mod isa;
/// Scheduler, effects, trace output, and program loading.
pub mod sim;
/// Machine state, bus, memory, and the component trait.
pub mod soc;
/// Run statistics.
pub mod stats;

pub use crate::common::{Fault, SAMPLE_PROGRAM, SimError};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The CPU component.
pub use crate::core::Cpu;
/// The two-phase scheduler; construct with `Simulator::new`.
pub use crate::sim::Simulator;
pub use crate::soc::{Component, MachineState, Memory};
