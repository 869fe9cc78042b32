//! Tests that substitute a fake spawner to observe exactly what would be
//! handed to the operating system

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use arc_command::{
    Command, CommandBuilder, CommandSpec, Error, ExecStatus, ExitStatus, ProcessHandle, Result,
    Spawner,
};

/// Spawner that records every spec it is asked to spawn and returns a
/// scripted exit code
#[derive(Clone, Default)]
struct RecordingSpawner {
    seen: Arc<Mutex<Vec<CommandSpec>>>,
    exit_code: i32,
}

struct ScriptedHandle {
    exit_code: i32,
    finished: bool,
}

impl Spawner for RecordingSpawner {
    type Handle = ScriptedHandle;

    fn spawn(&self, spec: &CommandSpec) -> Result<Self::Handle> {
        self.seen.lock().unwrap().push(spec.clone());
        Ok(ScriptedHandle {
            exit_code: self.exit_code,
            finished: false,
        })
    }
}

impl ProcessHandle for ScriptedHandle {
    fn pid(&self) -> Option<u32> {
        if self.finished { None } else { Some(4242) }
    }

    fn wait(&mut self) -> Result<ExitStatus> {
        self.finished = true;
        Ok(ExitStatus {
            code: Some(self.exit_code),
            #[cfg(unix)]
            signal: None,
        })
    }

    fn take_stdin(&mut self) -> Option<Box<dyn Write + Send>> {
        None
    }
}

/// Spawner that always fails, standing in for an unusable executable
struct FailingSpawner;

impl Spawner for FailingSpawner {
    type Handle = ScriptedHandle;

    fn spawn(&self, spec: &CommandSpec) -> Result<Self::Handle> {
        Err(Error::spawn_failed(format!(
            "failed to spawn `{}`",
            spec.program()
        )))
    }
}

#[test]
fn test_exact_argv_and_working_dir_reach_the_spawner() {
    let spawner = RecordingSpawner::default();
    let seen = spawner.seen.clone();

    let spec = CommandBuilder::new()
        .command("arc")
        .unwrap()
        .action("diff")
        .unwrap()
        .flag_with_value_equals(("conduit-token", "tok123"))
        .unwrap()
        .working_dir("/work/checkout")
        .unwrap()
        .build()
        .unwrap();

    let mut command = Command::with_spawner(spec, spawner);
    let status = command.exec();
    assert!(status.success());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].program(), "arc");
    assert_eq!(seen[0].args(), ["diff", "--conduit-token=tok123"]);
    assert_eq!(seen[0].working_dir(), Some(Path::new("/work/checkout")));
}

#[test]
fn test_scripted_exit_code_propagates() {
    let spawner = RecordingSpawner {
        exit_code: 3,
        ..RecordingSpawner::default()
    };

    let spec = CommandSpec::new(["arc", "which"]).unwrap();
    let mut command = Command::with_spawner(spec, spawner);

    match command.exec() {
        ExecStatus::Exited(status) => assert_eq!(status.code, Some(3)),
        other => panic!("expected Exited, got {other:?}"),
    }
}

#[test]
fn test_spawn_failure_folds_into_status() {
    let spec = CommandSpec::new(["arc"]).unwrap();
    let mut command = Command::with_spawner(spec, FailingSpawner);

    let status = command.exec();
    assert!(matches!(status, ExecStatus::SpawnFailed(_)));
    assert_eq!(status.code(), ExecStatus::FAILURE_CODE);
}

#[test]
fn test_start_then_exec_spawns_once() {
    let spawner = RecordingSpawner::default();
    let seen = spawner.seen.clone();

    let spec = CommandSpec::new(["arc"]).unwrap();
    let mut command = Command::with_spawner(spec, spawner);

    command.start().unwrap();
    let status = command.exec();
    assert!(status.success());
    assert_eq!(seen.lock().unwrap().len(), 1);
}
