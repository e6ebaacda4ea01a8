//! Port definitions (trait abstractions) for process-wide state.
//!
//! Ports define the interfaces the store expects from its host process.
//! Handles receive implementations at construction, so tests can pass a fake
//! without touching real signal handlers.

pub mod exit_hooks;

pub use exit_hooks::{ExitHook, ExitHookRegistry, ExitReason, NoopExitHooks};
