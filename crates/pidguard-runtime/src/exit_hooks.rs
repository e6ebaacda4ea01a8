//! Process-wide exit-hook registry.
//!
//! Two triggers run the registered hooks:
//! - A termination request (SIGINT, SIGTERM or SIGHUP), caught by a `ctrlc`
//!   handler installed on first registration with the global registry. The
//!   process exits with status 143 after the hooks have run, for all three
//!   signals: ctrlc does not report which one arrived. The handler occupies
//!   the process's single ctrlc slot; hosts that need their own handler use a
//!   detached registry and call `fire` from it.
//! - Normal termination, signalled by dropping the [`ExitGuard`] returned from
//!   [`ProcessExitHooks::exit_guard`]. Rust has no safe `atexit`, so binaries
//!   hold the guard in `main`.
//!
//! Hooks are drained when fired, so each runs at most once.

use std::sync::{Arc, LazyLock, Mutex, Once, PoisonError};

use pidguard_core::{ExitHook, ExitHookRegistry, ExitReason};
use tracing::{debug, info, warn};

/// Exit status used after cleanup on a termination signal (128 + SIGTERM).
pub const SIGNAL_EXIT_CODE: i32 = 128 + 15;

static GLOBAL: LazyLock<Arc<ProcessExitHooks>> = LazyLock::new(|| {
    Arc::new(ProcessExitHooks {
        hooks: Mutex::new(Vec::new()),
        signal_handler: true,
    })
});
static SIGNAL_HANDLER: Once = Once::new();

/// Registry of cleanup actions run at process exit.
pub struct ProcessExitHooks {
    hooks: Mutex<Vec<ExitHook>>,
    /// Whether registering should install the OS termination handler.
    signal_handler: bool,
}

impl ProcessExitHooks {
    /// A detached registry: hooks only run when [`fire`](ExitHookRegistry::fire)
    /// is called or an [`ExitGuard`] drops. No OS signal handler is installed.
    pub fn new() -> Self {
        Self {
            hooks: Mutex::new(Vec::new()),
            signal_handler: false,
        }
    }

    /// The registry shared by the whole process, created on first use.
    pub fn global() -> Arc<Self> {
        GLOBAL.clone()
    }

    /// Returns a guard that fires [`ExitReason::Normal`] when dropped.
    pub fn exit_guard(self: &Arc<Self>) -> ExitGuard {
        ExitGuard::new(self.clone())
    }

    /// Number of hooks waiting to run.
    pub fn len(&self) -> usize {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_signal_handler(&self) {
        if !self.signal_handler {
            return;
        }

        SIGNAL_HANDLER.call_once(|| {
            let result = ctrlc::set_handler(|| {
                info!("Termination signal received, running exit hooks");
                Self::global().fire(ExitReason::Signal);
                std::process::exit(SIGNAL_EXIT_CODE);
            });

            match result {
                Ok(()) => debug!("Installed termination signal handler"),
                Err(e) => warn!(
                    error = %e,
                    "Could not install termination signal handler; exit hooks run on normal exit only"
                ),
            }
        });
    }
}

impl Default for ProcessExitHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessExitHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessExitHooks")
            .field("pending", &self.len())
            .field("signal_handler", &self.signal_handler)
            .finish()
    }
}

impl ExitHookRegistry for ProcessExitHooks {
    fn register(&self, hook: ExitHook) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
        self.ensure_signal_handler();
    }

    fn fire(&self, reason: ExitReason) {
        let hooks = std::mem::take(
            &mut *self.hooks.lock().unwrap_or_else(PoisonError::into_inner),
        );
        if hooks.is_empty() {
            return;
        }

        debug!(?reason, count = hooks.len(), "Running exit hooks");
        for hook in hooks {
            hook(reason);
        }
    }
}

/// Fires [`ExitReason::Normal`] on its registry when dropped.
#[must_use = "exit hooks fire as soon as the guard is dropped"]
pub struct ExitGuard {
    hooks: Arc<dyn ExitHookRegistry>,
}

impl ExitGuard {
    pub fn new(hooks: Arc<dyn ExitHookRegistry>) -> Self {
        Self { hooks }
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.hooks.fire(ExitReason::Normal);
    }
}
