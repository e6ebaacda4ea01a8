//! Handle to a PID file created by this process.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pidguard_core::{ExitHookRegistry, ExitReason};
use tracing::debug;

use crate::pidfile::remove;

/// A PID file this process created.
///
/// The handle only references the path; it does not hold the file open and
/// does not remove it on drop. Removing the file behind the handle's back is
/// fine: [`PidHandle::remove`] then just returns `false`.
#[derive(Clone)]
pub struct PidHandle {
    path: PathBuf,
    hooks: Arc<dyn ExitHookRegistry>,
}

impl PidHandle {
    pub(crate) fn new(path: PathBuf, hooks: Arc<dyn ExitHookRegistry>) -> Self {
        Self { path, hooks }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the PID file. Never fails; `false` if it was not removed.
    pub fn remove(&self) -> bool {
        remove(&self.path)
    }

    /// Remove the PID file when the process exits, normally or on a
    /// termination signal.
    ///
    /// Safe to call more than once: later removals find nothing and return
    /// `false`.
    ///
    /// With the global registry, the first registration installs the
    /// process's only `ctrlc` handler. It catches SIGINT, SIGTERM and SIGHUP
    /// alike and exits with status 143 after cleanup, whichever signal
    /// arrived. A host that calls `ctrlc::set_handler` itself afterwards gets
    /// `MultipleHandlers`; such hosts should create handles with a detached
    /// [`ProcessExitHooks`](crate::ProcessExitHooks) and fire it from their
    /// own handler.
    pub fn remove_on_exit(&self) {
        let path = self.path.clone();
        self.hooks.register(Box::new(move |reason: ExitReason| {
            let removed = remove(&path);
            debug!(path = %path.display(), ?reason, removed, "Exit cleanup of PID file");
        }));
    }
}

impl fmt::Debug for PidHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PidHandle")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
