//! PID file creation, reading and removal.
//!
//! Format: single-line text file
//! ```text
//! <pid>
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use pidguard_core::{ExitHookRegistry, PidFileError, ProcessId};
use tracing::{debug, info, warn};

use crate::exit_hooks::ProcessExitHooks;
use crate::handle::PidHandle;

/// Create a PID file recording the current process.
///
/// The returned handle registers exit cleanup with the process-wide registry
/// ([`ProcessExitHooks::global`]).
///
/// # Modes
/// - `force == false`: exclusive create. Fails with `AlreadyExists` if the
///   path exists, even when the recorded process is dead.
/// - `force == true`: create or truncate, discarding prior content.
pub fn create(path: impl AsRef<Path>, force: bool) -> Result<PidHandle, PidFileError> {
    create_with_hooks(path, force, ProcessExitHooks::global())
}

/// Like [`create`], binding the handle to an explicit exit-hook registry.
pub fn create_with_hooks(
    path: impl AsRef<Path>,
    force: bool,
    hooks: Arc<dyn ExitHookRegistry>,
) -> Result<PidHandle, PidFileError> {
    let path = path.as_ref();

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        // O_CREAT | O_EXCL: the existence check and creation are one atomic step
        options.create_new(true);
    }

    let mut file = options
        .open(path)
        .map_err(|e| PidFileError::from_io(path, e))?;

    let pid = ProcessId::current();
    let line = format!("{pid}\n");
    let written = write_fully(&mut file, line.as_bytes()).and_then(|()| file.sync_all());
    drop(file);
    discard_on_error(path, force, written)?;

    info!(path = %path.display(), %pid, force, "Created PID file");

    Ok(PidHandle::new(path.to_path_buf(), hooks))
}

/// Read the PID recorded at `path`.
///
/// No liveness check is done; the recorded process may be long gone.
pub fn read_pid(path: impl AsRef<Path>) -> Result<ProcessId, PidFileError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| PidFileError::from_io(path, e))?;
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| PidFileError::InvalidPid(String::from_utf8_lossy(&bytes).into_owned()))?;
    content.parse()
}

/// Delete the PID file.
///
/// Returns `false` on any failure, including when the file is already gone.
pub fn remove(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match try_remove(path) {
        Ok(()) => true,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "PID file not removed");
            false
        }
    }
}

pub(crate) fn try_remove(path: &Path) -> Result<(), PidFileError> {
    fs::remove_file(path).map_err(|e| PidFileError::from_io(path, e))?;
    debug!(path = %path.display(), "Removed PID file");
    Ok(())
}

/// Map a failed write to an error, deleting a file this call created
/// exclusively so the path is not left blocked by an empty PID file.
fn discard_on_error(path: &Path, force: bool, written: io::Result<()>) -> Result<(), PidFileError> {
    let Err(e) = written else {
        return Ok(());
    };

    if !force {
        if let Err(cleanup) = try_remove(path) {
            warn!(path = %path.display(), error = %cleanup, "Could not remove partial PID file");
        }
    }

    Err(PidFileError::from_io(path, e))
}

/// Write every byte of `buf`, looping over short writes.
///
/// A write that reports zero bytes fails with `WriteZero` instead of spinning.
fn write_fully<W: Write>(writer: &mut W, buf: &[u8]) -> io::Result<()> {
    let mut offset = 0;

    while offset < buf.len() {
        match writer.write(&buf[offset..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("wrote {offset} of {} PID file bytes", buf.len()),
                ));
            }
            Ok(n) => offset += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidguard_core::NoopExitHooks;

    fn noop() -> Arc<dyn ExitHookRegistry> {
        Arc::new(NoopExitHooks)
    }

    /// Accepts at most `chunk` bytes per call.
    struct ShortWriter {
        data: Vec<u8>,
        chunk: usize,
        interrupt_first: bool,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.interrupt_first {
                self.interrupt_first = false;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = buf.len().min(self.chunk);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_fully_loops_over_short_writes() {
        let mut writer = ShortWriter {
            data: Vec::new(),
            chunk: 1,
            interrupt_first: true,
        };
        write_fully(&mut writer, b"123456\n").expect("write failed");
        assert_eq!(writer.data, b"123456\n");
    }

    #[test]
    fn write_fully_fails_on_zero_write() {
        let err = write_fully(&mut FullDisk, b"1\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn create_writes_pid_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");

        let handle = create_with_hooks(&path, false, noop()).expect("create failed");
        assert_eq!(handle.path(), path);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\n", std::process::id()));
    }

    #[test]
    fn exclusive_create_collides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");

        create_with_hooks(&path, false, noop()).expect("first create failed");
        let err = create_with_hooks(&path, false, noop()).unwrap_err();
        assert!(matches!(err, PidFileError::AlreadyExists(ref p) if *p == path));
    }

    #[test]
    fn exclusive_create_collides_with_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, format!("{}\n", i32::MAX)).unwrap();

        let err = create_with_hooks(&path, false, noop()).unwrap_err();
        assert!(matches!(err, PidFileError::AlreadyExists(_)));
    }

    #[test]
    fn forced_create_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, "99999999\nleftover garbage that is longer\n").unwrap();

        create_with_hooks(&path, true, noop()).expect("forced create failed");

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\n", std::process::id()));
    }

    #[test]
    fn create_in_missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.pid");

        let err = create_with_hooks(&path, false, noop()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn read_pid_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        create_with_hooks(&path, false, noop()).unwrap();

        assert_eq!(read_pid(&path).unwrap(), ProcessId::current());
    }

    #[test]
    fn read_pid_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, "hello\n").unwrap();

        assert!(matches!(read_pid(&path), Err(PidFileError::InvalidPid(_))));
    }

    #[test]
    fn read_pid_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        assert!(matches!(read_pid(&path), Err(PidFileError::InvalidPid(_))));
    }

    #[test]
    fn failed_exclusive_write_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, "").unwrap();

        let err = discard_on_error(&path, false, Err(io::Error::from(io::ErrorKind::WriteZero)))
            .unwrap_err();
        assert!(matches!(err, PidFileError::Io { .. }));
        assert!(!path.exists());

        // The path is free again for exclusive create
        create_with_hooks(&path, false, noop()).expect("create after cleanup failed");
    }

    #[test]
    fn failed_forced_write_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        fs::write(&path, "").unwrap();

        assert!(discard_on_error(&path, true, Err(io::Error::other("disk full"))).is_err());
        assert!(path.exists());
        assert!(discard_on_error(&path, true, Ok(())).is_ok());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.pid");
        create_with_hooks(&path, false, noop()).unwrap();

        assert!(remove(&path));
        assert!(!path.exists());
        assert!(!remove(&path));
    }

    #[test]
    fn remove_missing_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove(dir.path().join("never-created.pid")));
    }
}
