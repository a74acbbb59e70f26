//! # CPU State Machine Tests
//!
//! Each state is stepped in isolation against a hand-built machine state,
//! then the full fetch/execute cycle is walked alongside the memory
//! component.

use clockbus_core::core::{Cpu, CpuState};
use clockbus_core::isa::Opcode;
use clockbus_core::sim::Effect;
use clockbus_core::soc::{Component, MachineState, Memory};
use clockbus_core::{Fault, SAMPLE_PROGRAM};
use pretty_assertions::assert_eq;

fn machine() -> MachineState {
    MachineState::new(&SAMPLE_PROGRAM, None).unwrap()
}

/// Variant name, ignoring payloads.
fn kind(state: &CpuState) -> &'static str {
    match state {
        CpuState::FetchAddress => "FetchAddress",
        CpuState::FetchAdvance { .. } => "FetchAdvance",
        CpuState::OpcodeLatch { .. } => "OpcodeLatch",
        CpuState::OperandLatch { .. } => "OperandLatch",
        CpuState::Execute { .. } => "Execute",
        CpuState::Advance { .. } => "Advance",
    }
}

#[test]
fn test_fetch_address_drives_pc_with_write_disabled() {
    let mut m = machine();
    m.regs.program_counter = 2;
    m.bus.write_enable = true;

    let (next, effects) = CpuState::FetchAddress.step(&m).unwrap();
    assert_eq!(next, CpuState::FetchAdvance { pc: 2 });
    assert_eq!(
        effects,
        vec![Effect::SetWriteEnable(false), Effect::SetAddress(2)]
    );
}

#[test]
fn test_fetch_address_rejects_pc_past_memory() {
    let mut m = machine();
    m.regs.program_counter = 10;

    let err = CpuState::FetchAddress.step(&m).unwrap_err();
    assert_eq!(
        err,
        Fault::OutOfRangeAddress {
            address: 10,
            size: 10
        }
    );
}

#[test]
fn test_fetch_advance_drives_operand_address() {
    let (next, effects) = CpuState::FetchAdvance { pc: 4 }.step(&machine()).unwrap();
    assert_eq!(next, CpuState::OpcodeLatch { pc: 4 });
    assert_eq!(effects, vec![Effect::SetAddress(5)]);
}

#[test]
fn test_fetch_advance_rejects_operand_past_memory() {
    let err = CpuState::FetchAdvance { pc: 9 }.step(&machine()).unwrap_err();
    assert_eq!(
        err,
        Fault::OutOfRangeAddress {
            address: 10,
            size: 10
        }
    );
}

#[test]
fn test_opcode_latch_reads_data_line() {
    let mut m = machine();
    m.bus.data = 2;

    let (next, effects) = CpuState::OpcodeLatch { pc: 2 }.step(&m).unwrap();
    assert_eq!(next, CpuState::OperandLatch { pc: 2, opcode: 2 });
    assert!(effects.is_empty());
}

#[test]
fn test_operand_latch_dispatches_and_runs_first_step() {
    let mut m = machine();
    m.bus.data = 8;

    let (next, effects) = CpuState::OperandLatch { pc: 0, opcode: 0 }
        .step(&m)
        .unwrap();
    assert_eq!(effects, vec![Effect::SetAddress(8)]);
    match next {
        CpuState::Execute { pc, op } => {
            assert_eq!(pc, 0);
            assert_eq!(op.opcode(), Opcode::Load);
            assert_eq!(op.operand(), 8);
            assert_eq!(op.step_index(), 1);
        }
        other => panic!("expected Execute, got {other:?}"),
    }
}

#[test]
fn test_single_step_opcode_goes_straight_to_advance() {
    let mut m = machine();
    m.regs.accumulator = 115;

    let (next, effects) = CpuState::OperandLatch { pc: 4, opcode: 3 }
        .step(&m)
        .unwrap();
    assert_eq!(next, CpuState::Advance { pc: 4 });
    assert_eq!(effects, vec![Effect::Print(115)]);
}

#[test]
fn test_operand_latch_rejects_unknown_opcode() {
    let err = CpuState::OperandLatch { pc: 6, opcode: 9 }
        .step(&machine())
        .unwrap_err();
    assert_eq!(err, Fault::UnknownOpcode { opcode: 9, pc: 6 });
}

#[test]
fn test_advance_commits_next_instruction() {
    let (next, effects) = CpuState::Advance { pc: 4 }.step(&machine()).unwrap();
    assert_eq!(next, CpuState::FetchAddress);
    assert_eq!(effects, vec![Effect::SetProgramCounter(6)]);
}

#[test]
fn test_advance_uses_pc_latched_at_fetch() {
    let mut m = machine();
    m.regs.program_counter = 8;

    let (_, effects) = CpuState::Advance { pc: 2 }.step(&m).unwrap();
    assert_eq!(effects, vec![Effect::SetProgramCounter(4)]);
}

#[test]
fn test_cpu_component_identity() {
    let cpu = Cpu::new();
    assert_eq!(cpu.name(), "cpu");
    assert_eq!(cpu.state(), CpuState::FetchAddress);
    assert_eq!(cpu.describe(), "FetchAddress");
    assert!(cpu.is_bus_master());
    assert!(!Memory::new().is_bus_master());
}

#[test]
fn test_cpu_component_keeps_state_on_fault() {
    let mut m = machine();
    m.regs.program_counter = 200;
    let mut cpu = Cpu::new();

    assert!(cpu.tick(&m).is_err());
    assert_eq!(cpu.state(), CpuState::FetchAddress);
}

/// Walks the first instruction of the sample program (LOAD A #8) with the
/// memory and CPU components, applying effects the same way the simulator
/// does.
#[test]
fn test_load_instruction_state_sequence() {
    let mut m = machine();
    let mut memory = Memory::new();
    let mut cpu = Cpu::new();
    let mut states = Vec::new();

    for _ in 0..7 {
        let mut effects = memory.tick(&m).unwrap();
        effects.extend(cpu.tick(&m).unwrap());
        for effect in effects {
            let _ = effect.apply(&mut m).unwrap();
        }
        states.push(kind(&cpu.state()));
    }

    assert_eq!(
        states,
        vec![
            "FetchAdvance",
            "OpcodeLatch",
            "OperandLatch",
            "Execute",
            "Execute",
            "Advance",
            "FetchAddress",
        ]
    );
    assert_eq!(m.regs.accumulator, 42);
    assert_eq!(m.regs.program_counter, 2);
}
