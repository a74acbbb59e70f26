//! Simulator: the two-phase clock-tick scheduler.
//!
//! Each global tick runs in two phases:
//! 1. **Compute:** Every registered component is advanced exactly once, in
//!    registration order, against the same `&MachineState`. Components only
//!    describe the mutations they want.
//! 2. **Apply:** The effect lists are concatenated in registration order and
//!    applied one by one. Shared state changes only here.
//!
//! Because the compute phase holds a shared borrow, no component can observe
//! a sibling's same-tick effect: the machine behaves like synchronous
//! registers latching on a clock edge, whatever order the components are
//! visited in. The halt flag is checked once per tick, after the apply phase.

use std::collections::HashMap;

use tracing::{debug, info, trace, warn};

use crate::common::error::{Fault, Result, SimError};
use crate::config::{Config, ContentionPolicy};
use crate::core::Cpu;
use crate::sim::effect::{Effect, EffectTarget};
use crate::sim::trace::{NullSink, TraceEvent, TraceSink};
use crate::soc::{Component, MachineState, Memory};
use crate::stats::SimStats;

/// Result of a single `Simulator::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick completed and the halt flag is still low.
    Running,
    /// The halt flag is set; no further ticks will run.
    Halted,
}

/// Why `Simulator::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// HALT executed.
    Halted {
        /// Ticks completed.
        ticks: u64,
    },
    /// The configured tick limit was reached first.
    TickLimit {
        /// Ticks completed.
        ticks: u64,
    },
}

/// Top-level simulator: machine state plus the components clocked against it.
pub struct Simulator {
    machine: MachineState,
    components: Vec<Box<dyn Component>>,
    config: Config,
    sink: Box<dyn TraceSink>,
    trace: Vec<TraceEvent>,
    stats: SimStats,
    ticks: u64,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("machine", &self.machine)
            .field(
                "components",
                &self.components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Creates a simulator running `image` on the standard machine.
    ///
    /// Components are registered memory first, CPU second. The CPU masters
    /// the bus, so its drive of the data line in the tick a store begins
    /// overrides memory's last read.
    ///
    /// # Arguments
    ///
    /// * `config` - Run configuration.
    /// * `image` - Program image, loaded at address 0.
    pub fn new(config: &Config, image: &[u8]) -> Result<Self> {
        Self::with_components(
            config,
            image,
            vec![Box::new(Memory::new()), Box::new(Cpu::new())],
        )
    }

    /// Creates a simulator with a caller-chosen component list.
    ///
    /// Components are advanced, and their effects applied, in the order given.
    pub fn with_components(
        config: &Config,
        image: &[u8],
        components: Vec<Box<dyn Component>>,
    ) -> Result<Self> {
        let machine = MachineState::new(image, config.system.memory_size)?;
        debug!(
            memory = machine.memory().len(),
            components = ?components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "simulator created"
        );
        Ok(Self {
            machine,
            components,
            config: config.clone(),
            sink: Box::new(NullSink),
            trace: Vec::new(),
            stats: SimStats::default(),
            ticks: 0,
        })
    }

    /// Sends trace events to `sink` as they are emitted.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Machine state as of the last completed apply phase.
    pub fn state(&self) -> &MachineState {
        &self.machine
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Every trace event emitted so far.
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    /// Run statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Returns `true` once the halt flag has been observed.
    pub fn is_halted(&self) -> bool {
        self.machine.is_halted()
    }

    /// Advances the whole machine by one tick.
    ///
    /// Once halted, this returns `TickOutcome::Halted` without advancing any
    /// component or emitting anything.
    ///
    /// # Returns
    ///
    /// Whether the machine is still running, or the fault that stopped it. On
    /// error the tick counter stays at the last completed tick.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.machine.is_halted() {
            return Ok(TickOutcome::Halted);
        }
        let tick = self.ticks + 1;

        let mut pending: Vec<(usize, Effect)> = Vec::new();
        for (index, component) in self.components.iter_mut().enumerate() {
            let effects = component
                .tick(&self.machine)
                .map_err(|source| SimError::Component {
                    tick,
                    component: component.name(),
                    state: component.describe(),
                    source,
                })?;
            trace!(tick, component = component.name(), ?effects, "compute");
            pending.extend(effects.into_iter().map(|effect| (index, effect)));
        }

        let pending = self.arbitrate(tick, pending)?;

        // Every effect is checked before any is applied, so a fault leaves
        // the machine exactly as the previous tick left it.
        for &(index, effect) in &pending {
            effect
                .validate(&self.machine)
                .map_err(|source| self.component_fault(tick, index, source))?;
        }

        for &(index, effect) in &pending {
            let event = effect
                .apply(&mut self.machine)
                .map_err(|source| self.component_fault(tick, index, source))?;
            self.stats.record(&effect);
            if let Some(event) = event {
                self.emit(event);
            }
        }
        trace!(tick, bus = ?self.machine.bus, regs = ?self.machine.regs, "apply");

        self.ticks = tick;
        self.stats.ticks = tick;

        if self.machine.is_halted() {
            info!(tick, "halt flag raised");
            self.emit(TraceEvent::Halt);
            return Ok(TickOutcome::Halted);
        }
        Ok(TickOutcome::Running)
    }

    /// Ticks until HALT, a fault, or the configured tick limit.
    ///
    /// Without a tick limit a program that never halts runs forever.
    pub fn run(&mut self) -> Result<RunOutcome> {
        loop {
            if let Some(limit) = self.config.general.max_ticks {
                if self.ticks >= limit && !self.machine.is_halted() {
                    warn!(limit, "tick limit reached before HALT");
                    return Ok(RunOutcome::TickLimit { ticks: self.ticks });
                }
            }
            if self.tick()? == TickOutcome::Halted {
                info!(ticks = self.ticks, "run complete");
                return Ok(RunOutcome::Halted { ticks: self.ticks });
            }
        }
    }

    /// Resolves targets driven by more than one component this tick.
    ///
    /// A bus master overrides a non-master silently. Any other overlap is
    /// contention and is handled per the configured policy. Returns the
    /// effects that survive, in apply order.
    fn arbitrate(
        &mut self,
        tick: u64,
        pending: Vec<(usize, Effect)>,
    ) -> Result<Vec<(usize, Effect)>> {
        let mut owners: HashMap<EffectTarget, usize> = HashMap::new();
        let mut dropped = vec![false; pending.len()];

        for (position, &(index, effect)) in pending.iter().enumerate() {
            let Some(target) = effect.target() else {
                continue;
            };
            let Some(&owner) = owners.get(&target) else {
                let _ = owners.insert(target, position);
                continue;
            };
            let owner_index = pending[owner].0;
            if owner_index == index {
                let _ = owners.insert(target, position);
                continue;
            }

            let owner_master = self.components[owner_index].is_bus_master();
            let master = self.components[index].is_bus_master();
            let first = self.components[owner_index].name();
            let second = self.components[index].name();
            if owner_master && !master {
                trace!(tick, %target, master = first, dropped = second, "bus master holds line");
                dropped[position] = true;
                continue;
            }
            if master && !owner_master {
                trace!(tick, %target, master = second, dropped = first, "bus master takes line");
                dropped[owner] = true;
                let _ = owners.insert(target, position);
                continue;
            }

            match self.config.bus.contention {
                ContentionPolicy::LastWins => {
                    debug!(tick, %target, first, second, "contention, later driver wins");
                    self.stats.bus_contentions += 1;
                    let _ = owners.insert(target, position);
                }
                ContentionPolicy::Deny => {
                    return Err(SimError::BusContention {
                        tick,
                        target,
                        first,
                        second,
                    });
                }
            }
        }

        Ok(pending
            .into_iter()
            .zip(dropped)
            .filter_map(|(entry, dropped)| (!dropped).then_some(entry))
            .collect())
    }

    fn component_fault(&self, tick: u64, index: usize, source: Fault) -> SimError {
        let component = &self.components[index];
        SimError::Component {
            tick,
            component: component.name(),
            state: component.describe(),
            source,
        }
    }

    fn emit(&mut self, event: TraceEvent) {
        self.sink.emit(&event);
        self.trace.push(event);
        self.stats.trace_lines += 1;
    }
}
