//! Fault and error definitions.
//!
//! Errors are split in two layers, the way a trap is kept apart from the
//! context it was raised in:
//! 1. **Faults:** What a component ran into (`Fault`). Components know nothing
//!    about the global clock, so a fault carries only the offending value.
//! 2. **Simulator errors:** A fault wrapped with the tick, component, and
//!    component state it surfaced in, plus construction, loading, and
//!    configuration failures (`SimError`).
//!
//! Every error is fatal: a deterministic single-threaded simulation has
//! nothing to retry.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::effect::EffectTarget;

/// A condition a component cannot continue from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The address line or program counter points past the memory array.
    #[error("address {address:#06x} is outside the {size}-byte memory")]
    OutOfRangeAddress {
        /// The offending address.
        address: u16,
        /// Size of the memory array in bytes.
        size: usize,
    },

    /// The latched opcode has no micro-operation.
    #[error("unknown opcode {opcode} fetched from {pc:#06x}")]
    UnknownOpcode {
        /// The byte latched as opcode.
        opcode: u8,
        /// Address the opcode was fetched from.
        pc: u16,
    },
}

/// Errors reported by the simulator and its loader.
#[derive(Debug, Error)]
pub enum SimError {
    /// A component faulted while computing or applying a tick.
    #[error("tick {tick}: {component} faulted in state {state}: {source}")]
    Component {
        /// Global tick (1-based) in which the fault surfaced.
        tick: u64,
        /// Name of the faulting component.
        component: &'static str,
        /// The component's state when it faulted.
        state: String,
        /// What went wrong.
        #[source]
        source: Fault,
    },

    /// Two components drove the same target in one tick while contention is denied.
    #[error("tick {tick}: {target} driven by both {first} and {second}")]
    BusContention {
        /// Global tick in which both drives happened.
        tick: u64,
        /// The contended line, register, or memory cell.
        target: EffectTarget,
        /// Component whose effect came first in apply order.
        first: &'static str,
        /// Component whose effect would have overridden it.
        second: &'static str,
    },

    /// The program image holds no bytes.
    #[error("program image is empty")]
    EmptyImage,

    /// The program image does not fit in the memory array.
    #[error("program image of {len} bytes does not fit in a {max}-byte memory")]
    ImageTooLarge {
        /// Image length in bytes.
        len: usize,
        /// Memory size in bytes.
        max: usize,
    },

    /// A program or configuration file could not be read.
    #[error("could not read {path:?}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A token in a text program image is not a byte value.
    #[error("line {line}: {token:?} is not a byte value")]
    ParseImage {
        /// 1-based line number.
        line: usize,
        /// The rejected token.
        token: String,
    },

    /// A configuration document did not deserialize.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SimError>;
