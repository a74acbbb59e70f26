//! Machine state and the components attached to the bus.
//!
//! This module organizes everything the CPU shares with the rest of the
//! machine:
//! 1. **Interconnect:** The three bus lines (address, write-enable, data).
//! 2. **Memory:** The byte array and the component that serves it over the bus.
//! 3. **Traits:** The `Component` contract every clocked block implements.
//! 4. **Machine State:** The single value bundling bus, registers, memory, and
//!    the halt flag. It is built once from the program image and mutated only
//!    by the simulator's apply phase.

/// Bus lines shared by the CPU and memory.
pub mod interconnect;

/// Memory component.
pub mod memory;

/// Component trait definitions.
pub mod traits;

use serde::Serialize;
use tracing::warn;

use crate::common::constants::MAX_MEMORY_SIZE;
use crate::common::error::{Fault, Result, SimError};
use crate::common::reg::RegisterFile;

pub use interconnect::{Bus, BusLine};
pub use memory::Memory;
pub use traits::Component;

/// Everything a component may read during the compute phase.
///
/// Components only ever receive `&MachineState`; the simulator holds the one
/// mutable borrow and uses it solely to apply effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineState {
    /// Bus lines as latched by the previous apply phase.
    pub bus: Bus,
    /// Accumulator and program counter.
    pub regs: RegisterFile,
    memory: Vec<u8>,
    halted: bool,
}

impl MachineState {
    /// Builds the power-on state with `image` loaded at address 0.
    ///
    /// # Arguments
    ///
    /// * `image` - Program image, copied verbatim into memory.
    /// * `memory_size` - Size of the memory array; `None` sizes it to the image.
    ///   Bytes past the image are zero.
    ///
    /// # Returns
    ///
    /// The machine state, or an error if the image is empty or does not fit.
    pub fn new(image: &[u8], memory_size: Option<usize>) -> Result<Self> {
        if image.is_empty() {
            return Err(SimError::EmptyImage);
        }
        if image.len() > MAX_MEMORY_SIZE {
            return Err(SimError::ImageTooLarge {
                len: image.len(),
                max: MAX_MEMORY_SIZE,
            });
        }

        let size = match memory_size {
            Some(size) if size > MAX_MEMORY_SIZE => {
                warn!(
                    requested = size,
                    max = MAX_MEMORY_SIZE,
                    "memory size exceeds the address space, clamping"
                );
                MAX_MEMORY_SIZE
            }
            Some(size) if size < image.len() => {
                return Err(SimError::ImageTooLarge {
                    len: image.len(),
                    max: size,
                });
            }
            Some(size) => size,
            None => image.len(),
        };

        let mut memory = vec![0; size];
        memory[..image.len()].copy_from_slice(image);

        Ok(Self {
            bus: Bus::default(),
            regs: RegisterFile::new(),
            memory,
            halted: false,
        })
    }

    /// Memory contents.
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Returns `true` once a HALT effect has been applied.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Fails with `OutOfRangeAddress` unless `address` lies inside memory.
    pub fn check_address(&self, address: u16) -> std::result::Result<(), Fault> {
        if usize::from(address) < self.memory.len() {
            Ok(())
        } else {
            Err(Fault::OutOfRangeAddress {
                address,
                size: self.memory.len(),
            })
        }
    }

    /// Reads the byte at `address`.
    pub fn read_memory(&self, address: u16) -> std::result::Result<u8, Fault> {
        self.check_address(address)?;
        Ok(self.memory[usize::from(address)])
    }

    pub(crate) fn write_memory(
        &mut self,
        address: u16,
        value: u8,
    ) -> std::result::Result<(), Fault> {
        self.check_address(address)?;
        self.memory[usize::from(address)] = value;
        Ok(())
    }

    pub(crate) fn raise_halt(&mut self) {
        self.halted = true;
    }

    /// Dumps registers and bus lines to stderr.
    pub fn dump(&self) {
        self.regs.dump();
        eprintln!(
            "BUS address={:#06x} write_enable={} data={:#04x}",
            self.bus.address, self.bus.write_enable, self.bus.data
        );
        eprintln!("HALTED = {}", self.halted);
    }
}
