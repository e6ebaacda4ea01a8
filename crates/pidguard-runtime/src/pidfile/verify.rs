//! Liveness and existence checks.
//!
//! Both checks fold every failure into a boolean. Only "no such process" is
//! a confirmed negative for liveness; other unclassified errors also answer
//! `false`, so a `false` is not proof the process is gone.

use std::fs;
use std::io;
use std::path::Path;

use pidguard_core::{IntoPid, PidFileError};
use tracing::debug;

use super::io::read_pid;

/// Check whether `pid` names a live process.
///
/// Sends the null signal (signal 0), which checks existence without
/// affecting the target.
///
/// # Returns
/// - `true` if the probe succeeds
/// - `true` if the probe fails with `EPERM` (process exists, owned by
///   another user)
/// - `false` otherwise, including text that does not parse as a PID
pub fn is_running(pid: impl IntoPid) -> bool {
    let pid = match pid.into_pid() {
        Ok(pid) => pid,
        Err(e) => {
            debug!(error = %e, "Not probing invalid PID");
            return false;
        }
    };

    #[cfg(unix)]
    {
        match super::signal::send_signal(pid, None) {
            Ok(()) | Err(PidFileError::PermissionDenied(_)) => true,
            Err(e) => {
                debug!(%pid, error = %e, "Liveness probe failed");
                false
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        false // Not implemented on non-Unix
    }
}

/// Check whether the PID file at `path` records a live process.
///
/// # Decision table
/// | stat / read outcome                   | result          |
/// |---------------------------------------|-----------------|
/// | stat: not found                       | `false`         |
/// | stat: any other failure               | `true`          |
/// | not a regular file (dir, socket, ...) | `false`         |
/// | read: not found (removed after stat)  | `false`         |
/// | read: any other failure               | `true`          |
/// | content is not a PID                  | `false`         |
/// | content is a PID                      | `is_running`    |
///
/// A failed stat answers `true` because absence could not be confirmed. The
/// "not a regular file" row answering `false` is asymmetric with that and is
/// kept as-is; do not put anything but a regular file at a PID file path.
pub fn exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return false,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Cannot stat PID file, assuming present");
            return true;
        }
    };

    if !metadata.is_file() {
        debug!(path = %path.display(), "PID file path is not a regular file");
        return false;
    }

    match read_pid(path) {
        Ok(pid) => is_running(pid),
        Err(PidFileError::NotFound(_)) => false,
        Err(e @ PidFileError::InvalidPid(_)) => {
            debug!(path = %path.display(), error = %e, "PID file content is not a PID");
            false
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Cannot read PID file, assuming present");
            true
        }
    }
}
