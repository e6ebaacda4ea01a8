//! Core domain types for pidguard.
//!
//! This crate holds everything about PID files that does not touch the OS:
//! - The error taxonomy shared by every store operation
//! - Process identifiers and signal specifications
//! - Settings and default path resolution
//! - The exit-hook registry port used by PID handles
//!
//! The filesystem and signal implementations live in `pidguard-runtime`.
#![deny(unused_crate_dependencies)]

pub mod error;
pub mod paths;
pub mod pid;
pub mod ports;
pub mod settings;
pub mod signal;

pub use error::PidFileError;
pub use paths::{PathError, default_pidfile_path};
pub use pid::{IntoPid, ProcessId};
pub use ports::{ExitHook, ExitHookRegistry, ExitReason, NoopExitHooks};
pub use settings::{PidFileSettings, SettingsError, validate_settings};
pub use signal::SignalSpec;

#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
