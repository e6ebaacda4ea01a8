//! Signal delivery to recorded processes.

use std::path::Path;

use pidguard_core::{PidFileError, ProcessId, SignalSpec};
use tracing::info;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

use super::io::read_pid;

/// Send `signal` to the process recorded in the PID file at `path`.
///
/// The PID is read as-is: no staleness filtering, no existence pre-check.
/// The file can change between the read and the signal.
///
/// # Errors
/// - `NotFound` / `PermissionDenied` / `Io` if the file cannot be read
/// - `InvalidPid` if the file does not hold a PID
/// - `InvalidSignal` if the signal is unknown
/// - `ProcessNotFound` if the recorded process no longer exists
/// - `PermissionDenied` if the OS refuses the signal
pub fn terminate(
    path: impl AsRef<Path>,
    signal: impl Into<SignalSpec>,
) -> Result<(), PidFileError> {
    let path = path.as_ref();
    let spec = signal.into();

    let pid = read_pid(path)?;
    deliver(pid, &spec)?;

    info!(path = %path.display(), %pid, signal = %spec, "Signalled process from PID file");
    Ok(())
}

#[cfg(unix)]
fn deliver(pid: ProcessId, spec: &SignalSpec) -> Result<(), PidFileError> {
    let signal = resolve_signal(spec)?;
    send_signal(pid, signal)
}

#[cfg(not(unix))]
fn deliver(_pid: ProcessId, _spec: &SignalSpec) -> Result<(), PidFileError> {
    Err(PidFileError::Unsupported)
}

/// Map a spec onto the platform signal table. `0` maps to `None`, the null
/// signal used for probing.
#[cfg(unix)]
pub(crate) fn resolve_signal(spec: &SignalSpec) -> Result<Option<Signal>, PidFileError> {
    match spec {
        SignalSpec::Number(0) => Ok(None),
        SignalSpec::Number(n) => Signal::try_from(*n)
            .map(Some)
            .map_err(|_| PidFileError::InvalidSignal(n.to_string())),
        SignalSpec::Name(name) => spec
            .canonical_name()
            .and_then(|canonical| canonical.parse::<Signal>().ok())
            .map(Some)
            .ok_or_else(|| PidFileError::InvalidSignal(name.clone())),
    }
}

/// Send `signal` (or the null signal) to `pid`, classifying the errno.
#[cfg(unix)]
pub(crate) fn send_signal(pid: ProcessId, signal: Option<Signal>) -> Result<(), PidFileError> {
    signal::kill(Pid::from_raw(pid.as_raw()), signal).map_err(|errno| match errno {
        Errno::ESRCH => PidFileError::ProcessNotFound { pid },
        Errno::EPERM => {
            PidFileError::PermissionDenied(format!("not permitted to signal process {pid}"))
        }
        Errno::EINVAL => PidFileError::InvalidSignal(format!("{signal:?}")),
        other => PidFileError::Io {
            context: format!("signal to process {pid}"),
            source: other.into(),
        },
    })
}
