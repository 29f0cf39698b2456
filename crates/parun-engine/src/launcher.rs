//! Process launch: pipe allocation, stdio redirection, spawn.

use std::os::fd::OwnedFd;
use std::process::Stdio;

use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::error::{EngineError, EngineResult};
use crate::monitor::ChildEventLatch;

/// How a child left the process table.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WaitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl WaitOutcome {
    fn from_status(status: std::process::ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;
        match status.code() {
            Some(code) => WaitOutcome::Exited(code),
            // No exit code means a signal death; a missing signal number
            // should not happen on Unix, 0 marks it as abnormal anyway.
            None => WaitOutcome::Signaled(status.signal().unwrap_or(0)),
        }
    }

    pub(crate) fn is_failure(&self) -> bool {
        !matches!(self, WaitOutcome::Exited(0))
    }
}

/// A successfully launched child: its pid plus the task that reaps it.
pub(crate) struct Launched {
    pub(crate) pid: u32,
    pub(crate) waiter: JoinHandle<(usize, WaitOutcome)>,
}

/// Result of a launch attempt.
pub(crate) enum Spawned {
    Launched(Launched),
    /// The program image could not be started at all. Recorded as a tagged
    /// outcome; the run-level exit-code contract treats it like a signal
    /// death of the job.
    ExecFailed,
}

/// Allocate one job's stdout pipe. Returns (read end, write end); each is
/// an `OwnedFd`, so each endpoint is closed exactly once when its final
/// owner drops it.
pub(crate) fn allocate_pipe() -> EngineResult<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe().map_err(EngineError::Pipe)
}

/// Spawn one job.
///
/// The child's stdout is the job's pipe write end and its stderr is
/// discarded. When `chained_stdin` is given (pipeline mode, index > 0) the
/// child reads the previous stage's pipe; otherwise it shares the engine's
/// own stdin. Both descriptors are moved into the spawned command, which
/// closes the parent's copies as soon as the child exists, so a chained
/// reader sees EOF the moment its upstream writer exits. All other
/// descriptors are close-on-exec and never leak into the child.
///
/// The waiter task reaps the child and notifies `latch` on termination;
/// nothing else runs on that path.
pub(crate) fn spawn_job(
    index: usize,
    command: &[String],
    stdout_pipe: OwnedFd,
    chained_stdin: Option<OwnedFd>,
    latch: ChildEventLatch,
) -> Spawned {
    let mut cmd = Command::new(&command[0]);
    cmd.args(&command[1..])
        .stdout(Stdio::from(stdout_pipe))
        .stderr(Stdio::null());
    match chained_stdin {
        Some(fd) => {
            cmd.stdin(Stdio::from(fd));
        }
        None => {
            cmd.stdin(Stdio::inherit());
        }
    }

    match cmd.spawn() {
        Ok(mut child) => {
            // id() is Some until the child is reaped, which only the waiter
            // task below does; 0 marks an already-gone child as unkillable.
            let pid = child.id().unwrap_or(0);
            let waiter = tokio::spawn(async move {
                let outcome = match child.wait().await {
                    Ok(status) => WaitOutcome::from_status(status),
                    // Losing the wait channel counts as an abnormal death.
                    Err(_) => WaitOutcome::Signaled(0),
                };
                latch.notify(outcome.is_failure());
                (index, outcome)
            });
            Spawned::Launched(Launched { pid, waiter })
        }
        Err(err) => {
            tracing::debug!(index, program = %command[0], %err, "exec failed");
            latch.notify(true);
            Spawned::ExecFailed
        }
    }
}
