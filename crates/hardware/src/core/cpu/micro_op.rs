//! Micro-operation executor.
//!
//! A micro-operation is created fresh when an instruction is dispatched,
//! walks its opcode's micro-step table one entry per tick, and is dropped when
//! the table runs out. It carries no state between instructions.

use crate::isa::opcode::{MicroStep, Opcode};
use crate::sim::effect::Effect;
use crate::soc::MachineState;

/// An instruction in its execute phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroOp {
    opcode: Opcode,
    operand: u8,
    step: usize,
}

impl MicroOp {
    /// Starts executing `opcode` with the latched `operand`.
    pub fn new(opcode: Opcode, operand: u8) -> Self {
        Self {
            opcode,
            operand,
            step: 0,
        }
    }

    /// Opcode being executed.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Operand latched at dispatch.
    pub fn operand(&self) -> u8 {
        self.operand
    }

    /// Index of the next micro-step.
    pub fn step_index(&self) -> usize {
        self.step
    }

    /// Runs one micro-step.
    ///
    /// # Arguments
    ///
    /// * `machine` - Machine state as latched by the previous apply phase.
    ///
    /// # Returns
    ///
    /// This tick's effects, and the micro-operation to continue with next
    /// tick, or `None` once the last micro-step has run.
    pub fn step(self, machine: &MachineState) -> (Vec<Effect>, Option<Self>) {
        let steps = self.opcode.micro_steps();
        let effects = steps
            .get(self.step)
            .map_or_else(Vec::new, |step| self.effects(*step, machine));

        let next = Self {
            step: self.step + 1,
            ..self
        };
        (effects, (next.step < steps.len()).then_some(next))
    }

    fn effects(&self, step: MicroStep, machine: &MachineState) -> Vec<Effect> {
        let accumulator = machine.regs.accumulator;
        match step {
            MicroStep::AddressOperand => vec![Effect::SetAddress(u16::from(self.operand))],
            MicroStep::Wait => Vec::new(),
            MicroStep::LoadData => vec![Effect::SetAccumulator(machine.bus.data)],
            MicroStep::AddData => vec![Effect::SetAccumulator(
                accumulator.wrapping_add(machine.bus.data),
            )],
            MicroStep::DriveStore => vec![
                Effect::SetWriteEnable(true),
                Effect::SetAddress(u16::from(self.operand)),
                Effect::SetData(accumulator),
            ],
            MicroStep::PrintAccumulator => vec![Effect::Print(accumulator)],
            MicroStep::RaiseHalt => vec![Effect::Halt],
        }
    }
}
