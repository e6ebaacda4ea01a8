//! Default PID file location.
//!
//! Resolution order:
//! 1. The per-user runtime directory (`$XDG_RUNTIME_DIR` on Linux)
//! 2. The system temp directory

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving a PID file path.
#[derive(Debug, Error)]
pub enum PathError {
    /// An empty application name was provided.
    #[error("Application name cannot be empty")]
    EmptyName,

    /// The application name would escape the runtime directory.
    #[error("Application name {0:?} must not contain path separators")]
    InvalidName(String),
}

/// Returns `<runtime dir>/<app_name>.pid`.
///
/// Falls back to the temp directory on platforms without a runtime dir
/// (macOS, Windows, or Linux sessions without `XDG_RUNTIME_DIR`).
pub fn default_pidfile_path(app_name: &str) -> Result<PathBuf, PathError> {
    let name = app_name.trim();
    if name.is_empty() {
        return Err(PathError::EmptyName);
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(PathError::InvalidName(app_name.to_string()));
    }

    let dir = dirs::runtime_dir().unwrap_or_else(|| {
        debug!("No runtime directory available, using temp directory for PID files");
        std::env::temp_dir()
    });

    Ok(dir.join(format!("{name}.pid")))
}
