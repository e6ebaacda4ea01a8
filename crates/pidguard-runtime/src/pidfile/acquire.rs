//! Single-instance acquisition with stale PID file recovery.

use std::sync::Arc;

use pidguard_core::{ExitHookRegistry, PidFileError, PidFileSettings, validate_settings};
use tracing::{debug, warn};

use super::io::{create_with_hooks, read_pid};
use super::verify::is_running;
use crate::handle::PidHandle;

/// Create the PID file described by `settings`.
///
/// # Strategy
/// 1. Create with `settings.force` (exclusive create unless forced)
/// 2. On `AlreadyExists` with `reclaim_stale` set:
///    - Recorded process alive: fail with `AlreadyRunning`
///    - Recorded process dead, or content unparseable: re-create with force
///    - File vanished in between: retry exclusive create once
/// 3. Register removal at exit if `remove_on_exit` is set
///
/// The read-then-overwrite in step 2 is not atomic. Two processes reclaiming
/// the same stale file at once can both succeed.
pub fn acquire(
    settings: &PidFileSettings,
    hooks: Arc<dyn ExitHookRegistry>,
) -> Result<PidHandle, PidFileError> {
    validate_settings(settings)?;
    let path = settings.path.as_path();

    let handle = match create_with_hooks(path, settings.force, hooks.clone()) {
        Ok(handle) => handle,
        Err(PidFileError::AlreadyExists(_)) if settings.reclaim_stale => {
            match read_pid(path) {
                Ok(pid) if is_running(pid) => {
                    return Err(PidFileError::AlreadyRunning {
                        path: path.to_path_buf(),
                        pid,
                    });
                }
                Ok(pid) => {
                    warn!(path = %path.display(), %pid, "Reclaiming stale PID file");
                    create_with_hooks(path, true, hooks)?
                }
                Err(PidFileError::InvalidPid(content)) => {
                    warn!(path = %path.display(), ?content, "Reclaiming unreadable PID file");
                    create_with_hooks(path, true, hooks)?
                }
                Err(PidFileError::NotFound(_)) => {
                    debug!(path = %path.display(), "PID file vanished, retrying create");
                    create_with_hooks(path, false, hooks)?
                }
                Err(e) => return Err(e),
            }
        }
        Err(e) => return Err(e),
    };

    if settings.remove_on_exit {
        handle.remove_on_exit();
    }

    Ok(handle)
}
