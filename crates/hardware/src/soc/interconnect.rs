//! Bus lines shared between the CPU and memory.
//!
//! The bus has no behavior of its own. Each line holds the value latched by
//! the last apply phase; components drive a line by producing an effect.
//! Only one component is expected to drive a line per tick. That is a
//! protocol convention of the CPU and memory state machines; the simulator
//! detects violations and resolves them per `ContentionPolicy`.

use std::fmt;

use serde::Serialize;

/// The three bus lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bus {
    /// Address line.
    pub address: u16,
    /// Write-enable line; high while a write cycle is in progress.
    pub write_enable: bool,
    /// Data line.
    pub data: u8,
}

/// Names one bus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BusLine {
    /// `Bus::address`.
    Address,
    /// `Bus::write_enable`.
    WriteEnable,
    /// `Bus::data`.
    Data,
}

impl fmt::Display for BusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Address => "address line",
            Self::WriteEnable => "write-enable line",
            Self::Data => "data line",
        })
    }
}
