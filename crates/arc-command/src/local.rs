//! Local process spawning via the operating system

use std::io::Write;
use std::process::{Child, ChildStdin, Stdio};

use tracing::debug;

use crate::command::CommandSpec;
use crate::error::{Error, Result};
use crate::process::{ExitStatus, ProcessHandle};
use crate::spawner::Spawner;

/// Spawner that creates child processes on the local machine
///
/// stdin is piped so the handle can expose it; stdout and stderr are
/// inherited, since this crate never interprets the child's output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSpawner;

/// A handle to control a local child process
pub struct LocalProcessHandle {
    child: Child,
    stdin: Option<ChildStdin>,
    finished: bool,
}

impl Spawner for LocalSpawner {
    type Handle = LocalProcessHandle;

    fn spawn(&self, spec: &CommandSpec) -> Result<Self::Handle> {
        let mut cmd = std::process::Command::new(spec.program());
        cmd.args(spec.args());
        if let Some(dir) = spec.working_dir() {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::piped());

        debug!("Spawning {:?}", spec.tokens());
        let mut child = cmd.spawn().map_err(|e| {
            Error::spawn_failed(format!("failed to spawn `{}`: {}", spec.program(), e))
        })?;
        let stdin = child.stdin.take();

        Ok(LocalProcessHandle {
            child,
            stdin,
            finished: false,
        })
    }
}

impl ProcessHandle for LocalProcessHandle {
    fn pid(&self) -> Option<u32> {
        if self.finished {
            None
        } else {
            Some(self.child.id())
        }
    }

    fn wait(&mut self) -> Result<ExitStatus> {
        // Drop the un-taken stdin pipe so a child reading stdin sees EOF
        // instead of blocking forever. A writer the caller already took is
        // the caller's to close.
        self.stdin.take();

        let status = self.child.wait()?;
        self.finished = true;

        Ok(ExitStatus {
            code: status.code(),
            #[cfg(unix)]
            signal: {
                use std::os::unix::process::ExitStatusExt;
                status.signal()
            },
        })
    }

    fn take_stdin(&mut self) -> Option<Box<dyn Write + Send>> {
        if self.finished {
            return None;
        }
        // The child may have terminated on its own since the spawn.
        if let Ok(Some(_)) = self.child.try_wait() {
            self.stdin.take();
            return None;
        }
        self.stdin
            .take()
            .map(|stdin| Box::new(stdin) as Box<dyn Write + Send>)
    }
}
