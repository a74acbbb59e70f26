//! Simulation statistics collection and reporting.
//!
//! Tracks what the apply phase did over a run:
//! 1. **Clock:** Ticks elapsed, wall-clock time, and ticks per second.
//! 2. **Retirement:** Instructions retired (program-counter commits plus the final HALT).
//! 3. **Memory and bus:** Memory commits and contended drives.
//! 4. **Output:** Trace lines emitted.

use std::time::{Duration, Instant};

use crate::sim::effect::Effect;

/// Counters for one simulator instance.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Global ticks completed.
    pub ticks: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Memory write commits, one per write cycle. Memory commits on the
    /// first tick it sees write-enable high and holds the data line after.
    pub memory_commits: u64,
    /// Targets driven by more than one component within a tick.
    pub bus_contentions: u64,
    /// Trace lines emitted, including the terminal `HALT`.
    pub trace_lines: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            instructions_retired: 0,
            memory_commits: 0,
            bus_contentions: 0,
            trace_lines: 0,
        }
    }
}

impl SimStats {
    /// Updates counters for one applied effect.
    pub fn record(&mut self, effect: &Effect) {
        match effect {
            Effect::SetProgramCounter(_) | Effect::Halt => self.instructions_retired += 1,
            Effect::WriteMemory { .. } => self.memory_commits += 1,
            _ => {}
        }
    }

    /// Wall-clock time since the statistics were created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Simulated ticks per wall-clock second.
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }

    /// Average ticks per retired instruction.
    pub fn ticks_per_instruction(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.ticks as f64 / self.instructions_retired as f64
        }
    }

    /// Prints a summary to stderr.
    pub fn print(&self) {
        eprintln!("==========================================================");
        eprintln!("SIMULATION STATISTICS");
        eprintln!("==========================================================");
        eprintln!(
            "{} ticks in {:.3} ms ({:.0} ticks/s)",
            self.ticks,
            self.elapsed().as_secs_f64() * 1000.0,
            self.ticks_per_second()
        );
        eprintln!(
            "instructions retired: {} ({:.2} ticks/instruction)",
            self.instructions_retired,
            self.ticks_per_instruction()
        );
        eprintln!("memory commits:       {}", self.memory_commits);
        eprintln!("bus contentions:      {}", self.bus_contentions);
        eprintln!("trace lines:          {}", self.trace_lines);
    }
}
