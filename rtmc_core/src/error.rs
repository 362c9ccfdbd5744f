//! Rust-level error types for this crate.
//!
//! These are distinct from the wire-level [`rtmc_common::CommandResult`]
//! taxonomy carried on the status record: nothing here is ever surfaced to
//! the supervisor. They cover things that can only fail on the Rust side —
//! loading the machine configuration file at process start.

use std::fmt;

/// Configuration loading/validation error, matching the `ERR_*:`-prefixed
/// message convention used elsewhere in this codebase.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(String),
    /// The TOML body did not parse into the expected shape.
    Parse(String),
    /// The parsed configuration failed a validation rule.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "ERR_CONFIG_IO: {e}"),
            Self::Parse(e) => write!(f, "ERR_CONFIG_PARSE: {e}"),
            Self::Validation(e) => write!(f, "ERR_CONFIG_VALIDATION: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A realtime scheduling syscall failed during startup (`rt` feature only).
#[derive(Debug)]
pub struct RtSetupError(pub String);

impl fmt::Display for RtSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERR_RT_SETUP: {}", self.0)
    }
}

impl std::error::Error for RtSetupError {}
