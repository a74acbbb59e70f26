//! # Memory Component Tests
//!
//! Read latency, write commit latency, and the data-line behavior during a
//! store. Memory commits once per write cycle.

use clockbus_core::Fault;
use clockbus_core::sim::Effect;
use clockbus_core::soc::{Component, MachineState, Memory};

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;

fn machine() -> MachineState {
    MachineState::new(&[10, 20, 30, 40], None).unwrap()
}

#[test]
fn test_memory_identity() {
    let memory = Memory::new();
    assert_eq!(memory.name(), "memory");
    assert_eq!(memory.describe(), "Reactive");
}

#[test]
fn test_read_cycle_drives_data() {
    let mut m = machine();
    m.bus.address = 2;
    let effects = Memory::new().tick(&m).unwrap();
    assert_eq!(effects, vec![Effect::SetData(30)]);
}

#[test]
fn test_write_cycle_commits_without_driving_data() {
    let mut m = machine();
    m.bus.write_enable = true;
    m.bus.address = 1;
    m.bus.data = 99;

    let effects = Memory::new().tick(&m).unwrap();
    assert_eq!(
        effects,
        vec![Effect::WriteMemory {
            address: 1,
            value: 99
        }]
    );
    assert_eq!(m.memory()[1], 20);

    for effect in effects {
        let _ = effect.apply(&mut m).unwrap();
    }
    assert_eq!(m.memory()[1], 99);
    assert_eq!(m.bus.data, 99);
}

#[test]
fn test_out_of_range_read_and_write() {
    let mut m = machine();
    m.bus.address = 4;
    let expected = Fault::OutOfRangeAddress {
        address: 4,
        size: 4,
    };
    assert_eq!(Memory::new().tick(&m), Err(expected.clone()));

    m.bus.write_enable = true;
    assert_eq!(Memory::new().tick(&m), Err(expected));
}

#[test]
fn test_read_visible_one_tick_after_address() {
    let image = ProgramBuilder::new().raw(&[4, 9]).build();
    let mut ctx = TestContext::new(&image);

    // The CPU presents the operand address in tick 2; its byte lands in tick 3.
    ctx.tick_n(2);
    assert_eq!(ctx.state().bus.address, 1);
    assert_eq!(ctx.state().bus.data, 4);
    ctx.tick_n(1);
    assert_eq!(ctx.state().bus.data, 9);
}

/// LOAD A #10 puts 7 in the accumulator; STORE A #11 presents the write in
/// tick 11 and memory commits it in tick 12.
#[test]
fn test_store_commit_latency() {
    let image = ProgramBuilder::new()
        .load(10)
        .store(11)
        .load(11)
        .print()
        .halt()
        .data(&[7, 0])
        .build();
    let mut ctx = TestContext::new(&image);

    ctx.tick_n(11);
    assert!(ctx.state().bus.write_enable);
    assert_eq!(ctx.state().bus.address, 11);
    assert_eq!(ctx.state().bus.data, 7);
    assert_eq!(ctx.state().memory()[11], 0);

    ctx.tick_n(1);
    assert_eq!(ctx.state().memory()[11], 7);
    assert_eq!(ctx.sim.stats().memory_commits, 1);

    // Write-enable stays high until the next fetch clears it; memory holds
    // the committed byte on the data line without committing again.
    ctx.tick_n(1);
    assert!(ctx.state().bus.write_enable);
    assert_eq!(ctx.state().bus.data, 7);
    ctx.tick_n(1);
    assert!(!ctx.state().bus.write_enable);
    assert_eq!(ctx.state().bus.data, 7);
    assert_eq!(ctx.sim.stats().memory_commits, 1);
}

#[test]
fn test_write_cycle_commits_once_then_holds() {
    let mut m = machine();
    m.bus.write_enable = true;
    m.bus.address = 2;
    m.bus.data = 77;
    let mut memory = Memory::new();

    let commit = memory.tick(&m).unwrap();
    assert_eq!(
        commit,
        vec![Effect::WriteMemory {
            address: 2,
            value: 77
        }]
    );
    assert_eq!(memory.describe(), "Holding { address: 0x0002, value: 77 }");
    for effect in commit {
        let _ = effect.apply(&mut m).unwrap();
    }

    assert_eq!(memory.tick(&m).unwrap(), vec![Effect::SetData(77)]);
    assert_eq!(memory.tick(&m).unwrap(), vec![Effect::SetData(77)]);

    // A new value under the same write-enable is a new write.
    m.bus.data = 78;
    assert_eq!(
        memory.tick(&m).unwrap(),
        vec![Effect::WriteMemory {
            address: 2,
            value: 78
        }]
    );
}

#[test]
fn test_write_enable_drop_ends_write_cycle() {
    let mut m = machine();
    m.bus.write_enable = true;
    m.bus.address = 0;
    m.bus.data = 10;
    let mut memory = Memory::new();

    assert!(matches!(
        memory.tick(&m).unwrap()[..],
        [Effect::WriteMemory { address: 0, value: 10 }]
    ));
    m.bus.write_enable = false;
    assert_eq!(memory.tick(&m).unwrap(), vec![Effect::SetData(10)]);
    assert_eq!(memory.describe(), "Reactive");

    // Same address and value, but a fresh cycle commits again.
    m.bus.write_enable = true;
    assert!(matches!(
        memory.tick(&m).unwrap()[..],
        [Effect::WriteMemory { address: 0, value: 10 }]
    ));
}

#[test]
fn test_load_after_store_sees_new_value() {
    let image = ProgramBuilder::new()
        .load(10)
        .store(11)
        .load(11)
        .print()
        .halt()
        .data(&[7, 0])
        .build();
    let mut ctx = TestContext::new(&image);
    let _ = ctx.run();

    assert_eq!(ctx.trace_lines(), vec!["PRINT: 7", "HALT"]);
    assert_eq!(ctx.state().memory()[11], 7);
    assert_eq!(ctx.sim.ticks(), 29);
}
