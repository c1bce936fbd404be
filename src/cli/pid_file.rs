//! Single-instance enforcement for daemon mode via a PID file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use nix::sys::signal::kill;
use nix::unistd::Pid;

const DEFAULT_PID_PATH: &str = "/tmp/lingo-clip.pid";

/// Guards the daemon PID file.
///
/// Only the instance that actually wrote the file removes it again. A
/// `PidFile` that lost the acquire race must not unlink the file that
/// belongs to the running daemon, so removal is gated on `owned`.
pub struct PidFile {
    path: PathBuf,
    owned: bool,
}

impl PidFile {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_PID_PATH)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID of a live daemon recorded in the file, if any.
    ///
    /// Stale files (unparsable contents or a dead PID) are removed on
    /// sight so a crashed daemon does not block the next start.
    pub fn live_pid(&self) -> Option<u32> {
        let pid = match read_pid(&self.path) {
            Some(pid) => pid,
            None => {
                if self.path.exists() {
                    let _ = fs::remove_file(&self.path);
                }
                return None;
            }
        };

        // Signal 0 probes existence without delivering anything
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(()) => Some(pid),
            Err(nix::errno::Errno::ESRCH) => {
                let _ = fs::remove_file(&self.path);
                None
            }
            Err(_) => None,
        }
    }

    /// Claim the PID file for this process.
    ///
    /// Fails with `AlreadyRunning` when the file names a live daemon.
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.live_pid() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        fs::write(&self.path, process::id().to_string())
            .map_err(|e| PidFileError::WriteFailed(e.to_string()))?;
        self.owned = true;
        Ok(())
    }

    /// Remove the PID file, but only if this instance wrote it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if !self.owned {
            return Ok(());
        }
        self.owned = false;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PidFileError::RemoveFailed(e.to_string())),
        }
    }
}

fn read_pid(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another daemon is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}
