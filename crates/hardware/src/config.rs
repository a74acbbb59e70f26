//! Configuration system for the simulator.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline values used when a setting is omitted.
//! 2. **Structures:** Sections for general run control, the system (memory), and the bus.
//! 3. **Enums:** The bus contention policy.
//!
//! Configuration is supplied as JSON (`Config::from_file`) or built with
//! `Config::default()`; the CLI overrides individual fields from its flags.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{Result, SimError};

/// Default configuration constants.
mod defaults {
    /// Tick limit for a run; `None` runs until HALT, however long that takes.
    pub const MAX_TICKS: Option<u64> = None;

    /// Memory array size; `None` sizes memory to the program image.
    pub const MEMORY_SIZE: Option<usize> = None;

    /// Trace lines go to stdout unless this is set.
    pub const TRACE_TO_STDERR: bool = false;
}

/// What the simulator does when two components of equal rank drive the same
/// target in one tick.
///
/// A bus master overriding a non-master is not contention: on the first tick
/// of a store the CPU drives the data line while memory, which has not yet
/// seen write-enable, still serves the previous read, and the CPU's value
/// stands under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum ContentionPolicy {
    /// Apply effects in registration order; the later component's value stands.
    ///
    /// Contention is counted in the statistics and logged at debug level.
    #[default]
    #[serde(alias = "last_wins")]
    LastWins,
    /// Stop the simulation with `SimError::BusContention`.
    #[serde(alias = "deny")]
    Deny,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use clockbus_core::config::{Config, ContentionPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.general.max_ticks, None);
/// assert_eq!(config.bus.contention, ContentionPolicy::LastWins);
/// ```
///
/// Deserializing from JSON; omitted sections keep their defaults:
///
/// ```
/// use clockbus_core::config::{Config, ContentionPolicy};
///
/// let json = r#"{
///     "general": { "max_ticks": 1000 },
///     "system": { "memory_size": 256 },
///     "bus": { "contention": "Deny" }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.general.max_ticks, Some(1000));
/// assert_eq!(config.system.memory_size, Some(256));
/// assert_eq!(config.bus.contention, ContentionPolicy::Deny);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General run control.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory layout.
    #[serde(default)]
    pub system: SystemConfig,
    /// Bus arbitration.
    #[serde(default)]
    pub bus: BusConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    ///
    /// # Returns
    ///
    /// The configuration, or an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// General run control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Stop the run after this many ticks even if HALT was never executed.
    #[serde(default = "GeneralConfig::default_max_ticks")]
    pub max_ticks: Option<u64>,

    /// Write trace lines to stderr instead of stdout.
    #[serde(default = "GeneralConfig::default_trace_to_stderr")]
    pub trace_to_stderr: bool,
}

impl GeneralConfig {
    fn default_max_ticks() -> Option<u64> {
        defaults::MAX_TICKS
    }

    fn default_trace_to_stderr() -> bool {
        defaults::TRACE_TO_STDERR
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_ticks: defaults::MAX_TICKS,
            trace_to_stderr: defaults::TRACE_TO_STDERR,
        }
    }
}

/// Memory layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemConfig {
    /// Size of the memory array in bytes. The image is zero-padded up to this
    /// size; a size smaller than the image is rejected.
    #[serde(default = "SystemConfig::default_memory_size")]
    pub memory_size: Option<usize>,
}

impl SystemConfig {
    fn default_memory_size() -> Option<usize> {
        defaults::MEMORY_SIZE
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            memory_size: defaults::MEMORY_SIZE,
        }
    }
}

/// Bus arbitration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BusConfig {
    /// Policy for two components driving one target in the same tick.
    #[serde(default)]
    pub contention: ContentionPolicy,
}
