//! Memory component.
//!
//! Memory is a reactive block. Every tick it looks at the bus as latched by
//! the previous apply phase:
//! 1. **Write cycle:** With write-enable high, it commits the data line into the
//!    addressed cell during this tick's apply phase and does not drive the
//!    data line, so the value the CPU drove stays there until committed. The
//!    cell holds its old byte until that apply phase runs. While write-enable
//!    stays high afterwards, it drives the data line with the committed byte
//!    instead of committing again.
//! 2. **Read cycle:** Otherwise it drives the data line with the addressed
//!    byte. A read of address A is visible one tick after A is presented.

use tracing::debug;

use crate::common::error::Fault;
use crate::sim::effect::Effect;
use crate::soc::{Component, MachineState};

/// The memory block.
///
/// The byte array itself lives in `MachineState`; this component only
/// decides, per tick, whether to commit a write or serve a read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    /// Address and value committed in the current write cycle.
    committed: Option<(u16, u8)>,
}

impl Memory {
    /// Creates the memory component.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for Memory {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn tick(&mut self, machine: &MachineState) -> Result<Vec<Effect>, Fault> {
        let bus = machine.bus;
        if !bus.write_enable {
            self.committed = None;
            let value = machine.read_memory(bus.address)?;
            return Ok(vec![Effect::SetData(value)]);
        }

        machine.check_address(bus.address)?;
        let write = (bus.address, bus.data);
        if self.committed == Some(write) {
            return Ok(vec![Effect::SetData(machine.read_memory(bus.address)?)]);
        }

        debug!(address = bus.address, value = bus.data, "memory write cycle");
        self.committed = Some(write);
        Ok(vec![Effect::WriteMemory {
            address: bus.address,
            value: bus.data,
        }])
    }

    fn describe(&self) -> String {
        match self.committed {
            None => "Reactive".to_owned(),
            Some((address, value)) => {
                format!("Holding {{ address: {address:#06x}, value: {value} }}")
            }
        }
    }
}
