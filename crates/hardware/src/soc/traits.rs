//! Component trait for clocked blocks attached to the machine.
//!
//! A component is advanced exactly once per global tick. It reads the machine
//! state as it stood after the previous tick's apply phase and describes the
//! mutations it wants as a list of effects. It never mutates shared state
//! itself: the simulator applies every component's effects only after all
//! components have been advanced.

use crate::common::error::Fault;
use crate::sim::effect::Effect;
use crate::soc::MachineState;

/// A block advanced by the simulator's global clock.
pub trait Component {
    /// Short name used in diagnostics (e.g. `"cpu"`, `"memory"`).
    fn name(&self) -> &'static str;

    /// Advances the component by one tick.
    ///
    /// # Arguments
    ///
    /// * `machine` - Shared state as latched by the previous apply phase.
    ///
    /// # Returns
    ///
    /// The effects to apply at the end of this tick, in order, or the fault
    /// that stops the machine.
    fn tick(&mut self, machine: &MachineState) -> Result<Vec<Effect>, Fault>;

    /// Describes the component's internal state for diagnostics.
    fn describe(&self) -> String;

    /// Whether this component masters the bus.
    ///
    /// When a master and a non-master drive the same target in one tick, the
    /// master's effect stands and the other is dropped before the apply
    /// phase. That overlap is part of the bus protocol and is not contention.
    fn is_bus_master(&self) -> bool {
        false
    }
}
