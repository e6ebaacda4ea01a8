//! Error types for PID file operations.
//!
//! Every store operation classifies its failure into one of these kinds.
//! Propagating operations (`create`, `terminate`) return them directly;
//! swallowing operations (`exists`, `remove`, `is_running`) fold them into
//! a boolean.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::pid::ProcessId;
use crate::settings::SettingsError;

/// Errors that can occur while creating, reading or signalling a PID file.
#[derive(Debug, Error)]
pub enum PidFileError {
    /// The PID file (or a parent directory) does not exist.
    #[error("PID file {0} not found")]
    NotFound(PathBuf),

    /// Exclusive create collided with an existing file.
    #[error("PID file {0} already exists")]
    AlreadyExists(PathBuf),

    /// The OS refused a stat, read, write or signal.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The signal target does not exist.
    #[error("No such process: {pid}")]
    ProcessNotFound { pid: ProcessId },

    /// The PID file records a process that is still alive.
    #[error("PID file {path} belongs to running process {pid}")]
    AlreadyRunning { path: PathBuf, pid: ProcessId },

    /// Text that should hold a PID does not parse as one.
    #[error("Invalid PID: {0:?}")]
    InvalidPid(String),

    /// The signal is not known to the OS.
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    /// Signal delivery is not available on this platform.
    #[error("Signal delivery is not supported on this platform")]
    Unsupported,

    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),

    /// Any other OS failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl PidFileError {
    /// Classify an I/O error that occurred while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(format!("{}: {err}", path.display()))
            }
            _ => Self::Io {
                context: path.display().to_string(),
                source: err,
            },
        }
    }

    /// Returns true when the error means "the file is not there".
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_io_error_kinds() {
        let path = Path::new("/run/app.pid");

        let err = PidFileError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, PidFileError::NotFound(ref p) if p == path));
        assert!(err.is_not_found());

        let err = PidFileError::from_io(path, io::Error::from(io::ErrorKind::AlreadyExists));
        assert!(matches!(err, PidFileError::AlreadyExists(_)));

        let err = PidFileError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        match err {
            PidFileError::PermissionDenied(msg) => assert!(msg.contains("/run/app.pid")),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = PidFileError::from_io(path, io::Error::other("disk on fire"));
        assert!(matches!(err, PidFileError::Io { .. }));
        assert!(err.to_string().contains("disk on fire"));
    }
}
