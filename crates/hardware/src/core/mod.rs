//! Core processor implementation.
//!
//! This module contains the CPU: its fetch/decode/execute state machine and
//! the micro-operation executor it delegates instruction execution to.

/// CPU state machine and micro-operations.
pub mod cpu;

pub use self::cpu::{Cpu, CpuState, MicroOp};
