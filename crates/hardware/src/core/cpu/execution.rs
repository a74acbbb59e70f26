//! CPU state transitions.
//!
//! `CpuState::step` is a pure function of the current state and the machine
//! state latched by the previous tick: it returns the next state and the
//! effects for this tick. An instruction occupies `4 + n` ticks, where `n` is
//! its micro-step count:
//!
//! | Tick | State | Bus activity |
//! |---|---|---|
//! | 1 | `FetchAddress` | write-enable low, address = pc |
//! | 2 | `FetchAdvance` | address = pc + 1 |
//! | 3 | `OpcodeLatch` | none; data holds memory\[pc\] |
//! | 4 | `OperandLatch` | data holds memory\[pc + 1\]; first micro-step |
//! | 5.. | `Execute` | remaining micro-steps |
//! | last | `Advance` | program counter = pc + 2 |

use tracing::debug;

use super::{CpuState, MicroOp};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::Fault;
use crate::isa::disasm::disassemble_instruction;
use crate::isa::opcode::Opcode;
use crate::sim::effect::Effect;
use crate::soc::MachineState;

impl CpuState {
    /// Advances the state machine by one tick.
    ///
    /// # Arguments
    ///
    /// * `machine` - Machine state as latched by the previous apply phase.
    ///
    /// # Returns
    ///
    /// The next state and this tick's effects, or a fault if the program
    /// counter leaves memory or the latched opcode does not decode.
    pub fn step(self, machine: &MachineState) -> Result<(Self, Vec<Effect>), Fault> {
        match self {
            Self::FetchAddress => {
                let pc = machine.regs.program_counter;
                machine.check_address(pc)?;
                Ok((
                    Self::FetchAdvance { pc },
                    vec![Effect::SetWriteEnable(false), Effect::SetAddress(pc)],
                ))
            }
            Self::FetchAdvance { pc } => {
                let operand_address = pc.checked_add(1).ok_or(Fault::OutOfRangeAddress {
                    address: pc,
                    size: machine.memory().len(),
                })?;
                machine.check_address(operand_address)?;
                Ok((
                    Self::OpcodeLatch { pc },
                    vec![Effect::SetAddress(operand_address)],
                ))
            }
            Self::OpcodeLatch { pc } => Ok((
                Self::OperandLatch {
                    pc,
                    opcode: machine.bus.data,
                },
                Vec::new(),
            )),
            Self::OperandLatch { pc, opcode } => {
                let operand = machine.bus.data;
                let decoded =
                    Opcode::try_from(opcode).map_err(|opcode| Fault::UnknownOpcode { opcode, pc })?;
                let text = disassemble_instruction(opcode, operand).unwrap_or_default();
                debug!(pc, instruction = %text, "dispatch");
                Ok(Self::execute(pc, MicroOp::new(decoded, operand), machine))
            }
            Self::Execute { pc, op } => Ok(Self::execute(pc, op, machine)),
            Self::Advance { pc } => Ok((
                Self::FetchAddress,
                vec![Effect::SetProgramCounter(pc.wrapping_add(INSTRUCTION_SIZE))],
            )),
        }
    }

    fn execute(pc: u16, op: MicroOp, machine: &MachineState) -> (Self, Vec<Effect>) {
        let (effects, next) = op.step(machine);
        let state = match next {
            Some(op) => Self::Execute { pc, op },
            None => Self::Advance { pc },
        };
        (state, effects)
    }
}
