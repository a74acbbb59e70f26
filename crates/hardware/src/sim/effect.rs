//! Tick effects.
//!
//! An effect is a plain value describing one deferred mutation of the machine
//! state. Components produce effects during the compute phase; the simulator
//! applies them, in order, during the apply phase of the same tick. Keeping
//! effects as data makes every tick's intent inspectable without re-running
//! component logic.

use std::fmt;

use serde::Serialize;

use crate::common::error::Fault;
use crate::sim::trace::TraceEvent;
use crate::soc::{BusLine, MachineState};

/// One deferred mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Drive the address line.
    SetAddress(u16),
    /// Drive the write-enable line.
    SetWriteEnable(bool),
    /// Drive the data line.
    SetData(u8),
    /// Write the accumulator.
    SetAccumulator(u8),
    /// Write the program counter.
    SetProgramCounter(u16),
    /// Commit a byte into memory.
    WriteMemory {
        /// Cell to write.
        address: u16,
        /// Value to store.
        value: u8,
    },
    /// Emit a `PRINT` trace line with the given accumulator value.
    Print(u8),
    /// Raise the halt flag.
    Halt,
}

/// The piece of state an effect overwrites.
///
/// Two components targeting the same piece in one tick is bus contention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EffectTarget {
    /// A bus line.
    Bus(BusLine),
    /// The accumulator.
    Accumulator,
    /// The program counter.
    ProgramCounter,
    /// One memory cell.
    Memory(u16),
}

impl fmt::Display for EffectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(line) => write!(f, "{line}"),
            Self::Accumulator => f.write_str("accumulator"),
            Self::ProgramCounter => f.write_str("program counter"),
            Self::Memory(address) => write!(f, "memory cell {address:#06x}"),
        }
    }
}

impl Effect {
    /// Returns the state this effect overwrites, if any.
    ///
    /// `Print` and `Halt` have no exclusive target: two prints both appear in
    /// the trace and raising the halt flag twice is harmless.
    pub fn target(&self) -> Option<EffectTarget> {
        match *self {
            Self::SetAddress(_) => Some(EffectTarget::Bus(BusLine::Address)),
            Self::SetWriteEnable(_) => Some(EffectTarget::Bus(BusLine::WriteEnable)),
            Self::SetData(_) => Some(EffectTarget::Bus(BusLine::Data)),
            Self::SetAccumulator(_) => Some(EffectTarget::Accumulator),
            Self::SetProgramCounter(_) => Some(EffectTarget::ProgramCounter),
            Self::WriteMemory { address, .. } => Some(EffectTarget::Memory(address)),
            Self::Print(_) | Self::Halt => None,
        }
    }

    /// Checks that `apply` would succeed on `machine`, without mutating it.
    ///
    /// Only memory writes can fail: their address must lie inside memory.
    pub fn validate(&self, machine: &MachineState) -> Result<(), Fault> {
        match *self {
            Self::WriteMemory { address, .. } => machine.check_address(address),
            _ => Ok(()),
        }
    }

    /// Applies the effect to the machine state.
    ///
    /// # Arguments
    ///
    /// * `machine` - State to mutate.
    ///
    /// # Returns
    ///
    /// The trace event the effect produces (only `Print` does), or the fault
    /// raised by a memory write outside the array.
    pub fn apply(&self, machine: &mut MachineState) -> Result<Option<TraceEvent>, Fault> {
        match *self {
            Self::SetAddress(address) => machine.bus.address = address,
            Self::SetWriteEnable(enabled) => machine.bus.write_enable = enabled,
            Self::SetData(data) => machine.bus.data = data,
            Self::SetAccumulator(value) => machine.regs.accumulator = value,
            Self::SetProgramCounter(pc) => machine.regs.program_counter = pc,
            Self::WriteMemory { address, value } => machine.write_memory(address, value)?,
            Self::Print(value) => return Ok(Some(TraceEvent::Print(value))),
            Self::Halt => machine.raise_halt(),
        }
        Ok(None)
    }
}
