//! Opcodes and their micro-step programs.
//!
//! Each opcode is executed as a short, fixed sequence of micro-steps, one per
//! tick. The sequences below are the whole timing model of the execute phase.

use std::fmt;

use serde::Serialize;

/// One tick of a micro-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MicroStep {
    /// Drive the address line with the operand.
    AddressOperand,
    /// Let memory's response land; no effects.
    Wait,
    /// Copy the data line into the accumulator.
    LoadData,
    /// Add the data line to the accumulator (wrapping).
    AddData,
    /// Raise write-enable and drive address and data with operand and accumulator.
    DriveStore,
    /// Emit the accumulator as a trace line.
    PrintAccumulator,
    /// Raise the halt flag.
    RaiseHalt,
}

const LOAD_STEPS: &[MicroStep] = &[MicroStep::AddressOperand, MicroStep::Wait, MicroStep::LoadData];
const STORE_STEPS: &[MicroStep] = &[MicroStep::DriveStore, MicroStep::Wait];
const ADD_STEPS: &[MicroStep] = &[MicroStep::AddressOperand, MicroStep::Wait, MicroStep::AddData];
const PRINT_STEPS: &[MicroStep] = &[MicroStep::PrintAccumulator];
const HALT_STEPS: &[MicroStep] = &[MicroStep::RaiseHalt];

/// The five opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Opcode {
    /// `LOAD A #addr`: accumulator = memory\[addr\].
    Load = 0,
    /// `STORE A #addr`: memory\[addr\] = accumulator.
    Store = 1,
    /// `ADD #addr`: accumulator += memory\[addr\].
    Add = 2,
    /// `PRINT A`: trace the accumulator.
    Print = 3,
    /// `HALT`: stop the machine.
    Halt = 4,
}

impl Opcode {
    /// All opcodes in encoding order.
    pub const ALL: [Self; 5] = [Self::Load, Self::Store, Self::Add, Self::Print, Self::Halt];

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Load => "LOAD A",
            Self::Store => "STORE A",
            Self::Add => "ADD",
            Self::Print => "PRINT A",
            Self::Halt => "HALT",
        }
    }

    /// Whether the operand byte means anything to this opcode.
    pub fn uses_operand(self) -> bool {
        matches!(self, Self::Load | Self::Store | Self::Add)
    }

    /// Micro-steps executed, one per tick.
    pub fn micro_steps(self) -> &'static [MicroStep] {
        match self {
            Self::Load => LOAD_STEPS,
            Self::Store => STORE_STEPS,
            Self::Add => ADD_STEPS,
            Self::Print => PRINT_STEPS,
            Self::Halt => HALT_STEPS,
        }
    }

    /// Ticks spent in the execute phase.
    pub fn ticks(self) -> usize {
        self.micro_steps().len()
    }
}

impl TryFrom<u8> for Opcode {
    /// The byte that did not decode.
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(byte)).copied().ok_or(byte)
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode as Self
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
