//! CPU Core Definition.
//!
//! The CPU is an explicit state machine advanced once per global tick. It
//! coordinates the following:
//! 1. **Fetch:** Present the opcode address, then the operand address, on the bus.
//! 2. **Latch:** Read memory's responses for the opcode and operand off the data line.
//! 3. **Execute:** Step the opcode's micro-operation, one micro-step per tick.
//! 4. **Advance:** Commit the program counter of the next instruction.
//!
//! The CPU never stops itself: the simulator observes the halt flag raised by
//! the HALT micro-operation and stops clocking it.

/// State transitions, one per tick.
pub mod execution;

/// Micro-operation executor.
pub mod micro_op;

pub use self::micro_op::MicroOp;

use crate::common::error::Fault;
use crate::sim::effect::Effect;
use crate::soc::{Component, MachineState};

/// Position of the CPU in its fetch/decode/execute cycle.
///
/// `pc` is the program counter read at `FetchAddress`, carried through the
/// whole instruction so `Advance` can commit `pc + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// Clear write-enable and drive the address line with the program counter.
    FetchAddress,
    /// Drive the address line with the operand address (`pc + 1`).
    FetchAdvance {
        /// Address of the opcode byte.
        pc: u16,
    },
    /// Latch the opcode from the data line; no bus activity.
    OpcodeLatch {
        /// Address of the opcode byte.
        pc: u16,
    },
    /// Latch the operand, decode, and run the first micro-step in the same tick.
    OperandLatch {
        /// Address of the opcode byte.
        pc: u16,
        /// Opcode byte latched in the previous tick.
        opcode: u8,
    },
    /// Run the remaining micro-steps of the current instruction.
    Execute {
        /// Address of the opcode byte.
        pc: u16,
        /// The micro-operation in flight.
        op: MicroOp,
    },
    /// Commit `pc + 2` to the program counter.
    Advance {
        /// Address of the opcode byte.
        pc: u16,
    },
}

/// The CPU component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    state: CpuState,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates a CPU about to fetch from the program counter.
    pub fn new() -> Self {
        Self {
            state: CpuState::FetchAddress,
        }
    }

    /// Current state.
    pub fn state(&self) -> CpuState {
        self.state
    }
}

impl Component for Cpu {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn tick(&mut self, machine: &MachineState) -> Result<Vec<Effect>, Fault> {
        let (next, effects) = self.state.step(machine)?;
        self.state = next;
        Ok(effects)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.state)
    }

    fn is_bus_master(&self) -> bool {
        true
    }
}
