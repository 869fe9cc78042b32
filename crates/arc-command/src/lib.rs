//! Command construction and execution for the Phabricator build bridge
//!
//! This crate assembles command lines for the external review-tool
//! executable (Arcanist) and runs them as child processes. The
//! [`CommandBuilder`] validates each token as it is added and finalizes
//! into an immutable [`CommandSpec`]; the [`Command`] handle spawns the
//! process through a [`Spawner`] and blocks until it terminates.

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod executor;
pub mod local;
pub mod process;
pub mod spawner;

pub use command::{CommandBuilder, CommandSpec, KeyValue};
pub use error::{Error, Result};
pub use executor::Command;
pub use local::{LocalProcessHandle, LocalSpawner};
pub use process::{ExecStatus, ExitStatus, ProcessHandle};
pub use spawner::Spawner;
