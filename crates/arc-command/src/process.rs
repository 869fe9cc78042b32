//! Process handle trait and exit status types

use std::io::Write;

use crate::error::{Error, Result};

/// A handle to control a single spawned child process
///
/// One handle corresponds to exactly one OS-level child and must not be
/// reused after that child terminates.
pub trait ProcessHandle {
    /// Get the process ID, if the child is still running
    fn pid(&self) -> Option<u32>;

    /// Block until the child terminates and return its exit status
    fn wait(&mut self) -> Result<ExitStatus>;

    /// Take the child's stdin writer, if the process is still running
    ///
    /// Returns `None` once the process has terminated or the writer was
    /// already taken. The caller owns closing the returned writer on every
    /// exit path; nothing drains or closes it automatically.
    fn take_stdin(&mut self) -> Option<Box<dyn Write + Send>>;
}

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    /// Exit code if the process exited normally
    pub code: Option<i32>,
    /// Signal that terminated the process (Unix only)
    #[cfg(unix)]
    pub signal: Option<i32>,
}

impl ExitStatus {
    /// Returns true if the process exited successfully (code 0)
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns true if the process was terminated by a signal
    pub fn terminated_by_signal(&self) -> bool {
        #[cfg(unix)]
        {
            self.signal.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

/// Outcome of running a command to completion
///
/// Keeps failures of the spawn/wait machinery distinct from the child's own
/// termination status, so a host can react differently to each.
#[derive(Debug)]
pub enum ExecStatus {
    /// The child ran and terminated
    Exited(ExitStatus),
    /// The process could not be created
    SpawnFailed(Error),
    /// The child was spawned but waiting on it failed
    WaitFailed(Error),
}

impl ExecStatus {
    /// Reserved out-of-band code returned by [`code`](Self::code) for
    /// spawn/wait failures
    ///
    /// Negative, so it cannot collide with any status in the 0–255 range a
    /// child could exit with.
    pub const FAILURE_CODE: i32 = -1;

    /// Collapse the outcome to a single integer in exit-code style
    ///
    /// Normal termination maps to the child's exit code, signal termination
    /// to the conventional `128 + signal`, and spawn/wait failures to
    /// [`FAILURE_CODE`](Self::FAILURE_CODE).
    pub fn code(&self) -> i32 {
        match self {
            ExecStatus::Exited(status) => match status.code {
                Some(code) => code,
                #[cfg(unix)]
                None => status
                    .signal
                    .map(|signal| 128 + signal)
                    .unwrap_or(Self::FAILURE_CODE),
                #[cfg(not(unix))]
                None => Self::FAILURE_CODE,
            },
            ExecStatus::SpawnFailed(_) | ExecStatus::WaitFailed(_) => Self::FAILURE_CODE,
        }
    }

    /// Returns true only for a normal exit with code 0
    pub fn success(&self) -> bool {
        matches!(self, ExecStatus::Exited(status) if status.success())
    }
}
