//! Single-use execution handle for a finalized command

use std::io::Write;

use crate::command::CommandSpec;
use crate::error::Result;
use crate::local::LocalSpawner;
use crate::process::{ExecStatus, ProcessHandle};
use crate::spawner::Spawner;

/// A single-use handle that runs one finalized command as a child process
///
/// Carries the [`CommandSpec`], the spawner used to create the child, and
/// (once started) the handle to the running process. One `Command` runs one
/// OS process; create a fresh one per invocation.
pub struct Command<S: Spawner = LocalSpawner> {
    spec: CommandSpec,
    spawner: S,
    handle: Option<S::Handle>,
}

impl Command<LocalSpawner> {
    /// Create a handle that spawns via the local OS
    pub fn local(spec: CommandSpec) -> Self {
        Self::with_spawner(spec, LocalSpawner)
    }
}

impl<S: Spawner> Command<S> {
    /// Create a handle with an explicit spawner
    pub fn with_spawner(spec: CommandSpec, spawner: S) -> Self {
        Self {
            spec,
            spawner,
            handle: None,
        }
    }

    /// The finalized command line this handle will run
    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Spawn the child process without waiting for it
    pub fn start(&mut self) -> Result<()> {
        let handle = self.spawner.spawn(&self.spec)?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Take the running child's stdin writer
    ///
    /// `None` if the process was never started, has already terminated, or
    /// the writer was taken before. The caller owns closing the writer on
    /// every exit path, including when a write fails partway through.
    pub fn stdin(&mut self) -> Option<Box<dyn Write + Send>> {
        self.handle.as_mut().and_then(|handle| handle.take_stdin())
    }

    /// Run the command to completion, blocking until it terminates
    ///
    /// Spawns the child first if [`start`](Self::start) was not called.
    /// Failures of the spawn/wait machinery fold into the returned
    /// [`ExecStatus`] rather than surfacing as an `Err`; the host decides
    /// whether they are fatal.
    pub fn exec(&mut self) -> ExecStatus {
        let handle = match &mut self.handle {
            Some(handle) => handle,
            None => match self.spawner.spawn(&self.spec) {
                Ok(handle) => self.handle.insert(handle),
                Err(e) => return ExecStatus::SpawnFailed(e),
            },
        };
        match handle.wait() {
            Ok(status) => ExecStatus::Exited(status),
            Err(e) => ExecStatus::WaitFailed(e),
        }
    }
}
