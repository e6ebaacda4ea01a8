//! PID file settings and validation.
//!
//! These are pure configuration types with no filesystem side effects beyond
//! the metadata lookup done during validation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::paths::{PathError, default_pidfile_path};

/// How a PID file should be acquired.
///
/// `Default` is the most conservative configuration: exclusive create, no
/// stale recovery, no exit-time cleanup. Use [`PidFileSettings::with_defaults`]
/// for the usual single-instance daemon behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PidFileSettings {
    /// Location of the PID file.
    pub path: PathBuf,

    /// Create or truncate unconditionally instead of exclusive create.
    pub force: bool,

    /// On collision, take over the file if its recorded process is dead.
    pub reclaim_stale: bool,

    /// Register removal of the file at process exit.
    pub remove_on_exit: bool,
}

impl PidFileSettings {
    /// Settings for `path` with stale recovery and exit cleanup enabled.
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            force: false,
            reclaim_stale: true,
            remove_on_exit: true,
        }
    }

    /// Settings for the default PID file location of `app_name`.
    pub fn for_app(app_name: &str) -> Result<Self, PathError> {
        Ok(Self::with_defaults(default_pidfile_path(app_name)?))
    }

    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[must_use]
    pub const fn with_reclaim_stale(mut self, reclaim: bool) -> Self {
        self.reclaim_stale = reclaim;
        self
    }

    #[must_use]
    pub const fn with_remove_on_exit(mut self, remove: bool) -> Self {
        self.remove_on_exit = remove;
        self
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("PID file path cannot be empty")]
    EmptyPath,

    #[error("PID file path {0} is a directory")]
    IsDirectory(PathBuf),
}

/// Validate settings before acquiring a PID file.
pub fn validate_settings(settings: &PidFileSettings) -> Result<(), SettingsError> {
    if settings.path.as_os_str().is_empty() {
        return Err(SettingsError::EmptyPath);
    }

    if settings.path.is_dir() {
        return Err(SettingsError::IsDirectory(settings.path.clone()));
    }

    Ok(())
}
