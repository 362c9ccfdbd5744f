//! The data-logging contract (consumed, never implemented here).
//!
//! This is the supervisor-facing feature the dispatcher drives through
//! `OPEN_LOG`/`START_LOG`/`STOP_LOG`/`CLOSE_LOG`; the transport (where
//! entries actually end up) is out of scope.

use crate::command::LogType;

/// One logged sample. The dispatcher only ever constructs
/// [`LogEntry::Command`] itself (the per-cycle command trace); the other
/// variants are written by the cyclic executor through the same sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogEntry {
    /// A processed command: kind tag, sequence number, cycle counter.
    Command { kind: u32, seq: u64, cycle: u64 },
    Position { axis: usize, value: f64, cycle: u64 },
    FollowingError { axis: usize, value: f64, cycle: u64 },
}

pub trait LogSink {
    /// Allocate a buffer for `log_type` sized for `size` entries.
    fn log_init(&mut self, log_type: LogType, size: u32);
    /// Append one entry to the currently armed log, if any.
    fn log_add(&mut self, entry: LogEntry);
}
