//! Simulation: the clock-tick scheduler and everything it drives.
//!
//! 1. **Effects:** Value-described mutations produced in the compute phase.
//! 2. **Simulator:** The two-phase scheduler advancing every component per tick.
//! 3. **Trace:** The `PRINT`/`HALT` output lines and their sinks.
//! 4. **Loader:** Reading program images from disk.

/// Tick effects and their application.
pub mod effect;

/// Program image loading.
pub mod loader;

/// Two-phase clock-tick scheduler.
pub mod simulator;

/// Trace events and sinks.
pub mod trace;

pub use effect::{Effect, EffectTarget};
pub use simulator::{RunOutcome, Simulator, TickOutcome};
pub use trace::{NullSink, TraceEvent, TraceSink, WriterSink};
