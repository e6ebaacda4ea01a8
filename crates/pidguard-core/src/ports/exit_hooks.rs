//! Exit-hook registry trait definition.

/// Why exit hooks are being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The process is shutting down normally.
    Normal,
    /// A termination request signal was received.
    Signal,
}

/// A cleanup action run once at process exit.
pub type ExitHook = Box<dyn FnOnce(ExitReason) + Send + 'static>;

/// Process-wide registry of cleanup actions.
///
/// Lifecycle: created once per process, hooks registered any number of times,
/// then fired once. There is no unregister operation.
pub trait ExitHookRegistry: Send + Sync {
    /// Add a hook to run when the registry fires.
    fn register(&self, hook: ExitHook);

    /// Run every registered hook with `reason`.
    fn fire(&self, reason: ExitReason);
}

/// Registry that drops every hook.
///
/// For callers that manage cleanup themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExitHooks;

impl ExitHookRegistry for NoopExitHooks {
    fn register(&self, _hook: ExitHook) {}

    fn fire(&self, _reason: ExitReason) {}
}
