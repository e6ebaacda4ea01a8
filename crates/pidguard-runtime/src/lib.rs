//! PID file store and exit-time cleanup.
//!
//! ```no_run
//! use pidguard_runtime::{ProcessExitHooks, pidfile};
//!
//! let hooks = ProcessExitHooks::global();
//! let _exit = hooks.exit_guard();
//!
//! let handle = pidfile::create("/tmp/myapp.pid", false)?;
//! handle.remove_on_exit();
//! # Ok::<(), pidguard_core::PidFileError>(())
//! ```
#![deny(unsafe_code)]

pub mod exit_hooks;
mod handle;
pub mod pidfile;

pub use exit_hooks::{ExitGuard, ProcessExitHooks};
pub use handle::PidHandle;
pub use pidfile::{acquire, create, exists, is_running, read_pid, remove, terminate};
