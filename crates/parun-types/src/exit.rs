//! Process exit codes reported by parun.
//!
//! These are part of the observable contract and must not change.

use crate::job::JobStatus;

/// Everything ran and the last job exited zero.
pub const SUCCESS: u8 = 0;
/// The command line could not be parsed.
pub const USAGE: u8 = 18;
/// The argument file could not be opened for reading.
pub const BAD_ARGS_FILE: u8 = 5;
/// The last job died from a signal or never executed.
pub const LAST_RUN_FAILED: u8 = 70;
/// The abort sequence terminated the run.
pub const ABORTED: u8 = 70;
/// No job ran at all.
pub const EMPTY_RUN: u8 = 92;
/// The operator interrupted the run.
pub const INTERRUPTED: u8 = 16;

/// Map the last job's terminal status to the engine's exit code.
///
/// `None` means no job ever ran. A normal exit passes the child's own code
/// through unchanged; any signal death (including the exec-failure case)
/// collapses to [`LAST_RUN_FAILED`].
pub fn code_for_last(status: Option<&JobStatus>) -> u8 {
    match status {
        None => EMPTY_RUN,
        Some(JobStatus::Completed(code)) => *code as u8,
        Some(JobStatus::Signaled(_)) | Some(JobStatus::ExecFailed) => LAST_RUN_FAILED,
        // A non-terminal status here means the run was cut short; report
        // it the same way as an abnormal termination.
        Some(JobStatus::Pending) | Some(JobStatus::Running) => LAST_RUN_FAILED,
    }
}
