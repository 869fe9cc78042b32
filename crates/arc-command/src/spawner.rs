//! Spawner trait for creating processes in different contexts

use crate::command::CommandSpec;
use crate::error::Result;
use crate::process::ProcessHandle;

/// A facility that can spawn a finalized command as an OS process
///
/// Implementations decide how the child is actually created, which lets
/// tests substitute a recording fake and assert the exact argv and working
/// directory without touching the real OS.
pub trait Spawner {
    /// The process handle type this spawner produces
    type Handle: ProcessHandle;

    /// Spawn the command, returning a handle to the running process
    fn spawn(&self, spec: &CommandSpec) -> Result<Self::Handle>;
}
