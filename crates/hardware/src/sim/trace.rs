//! Trace output.
//!
//! The trace is the machine's only observable output: one `PRINT: <value>`
//! line per PRINT A, and a terminal `HALT` line. Its text is a compatibility
//! surface and must not change.

use std::fmt;
use std::io::Write;

use serde::Serialize;
use tracing::warn;

/// One line of trace output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceEvent {
    /// The accumulator value printed by PRINT A.
    Print(u8),
    /// The simulator observed the halt flag and stopped.
    Halt,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Print(value) => write!(f, "PRINT: {value}"),
            Self::Halt => f.write_str("HALT"),
        }
    }
}

/// Destination for trace events.
pub trait TraceSink {
    /// Receives one event, in emission order.
    fn emit(&mut self, event: &TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn emit(&mut self, event: &TraceEvent) {
        self.push(*event);
    }
}

/// Writes each event as a line to an `io::Write`.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn emit(&mut self, event: &TraceEvent) {
        if let Err(e) = writeln!(self.writer, "{event}").and_then(|()| self.writer.flush()) {
            warn!(%event, error = %e, "dropped trace line");
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _event: &TraceEvent) {}
}
