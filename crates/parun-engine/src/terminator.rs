//! Two-phase termination of in-flight jobs.

use std::time::Duration;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::time::timeout;

use parun_types::JobStatus;

use crate::engine::InFlight;
use crate::error::EngineResult;
use crate::launcher::WaitOutcome;
use crate::queue::Job;

/// Grace window between the stop request and the forced kill.
pub(crate) const GRACE: Duration = Duration::from_secs(1);

/// Terminate every job still in flight: send SIGTERM, wait up to [`GRACE`]
/// for the child to be reaped, SIGKILL survivors and reap them.
///
/// Confirmation of termination is a deadline on the job's own waiter task,
/// so a child that exits inside the grace window is observed exactly once
/// and never force-killed. Each job's terminal status is recorded before
/// the function returns.
pub(crate) async fn abort_run(jobs: &mut [Job], inflight: Vec<InFlight>) -> EngineResult<()> {
    for mut flight in inflight {
        if flight.pid != 0 {
            let _ = signal::kill(Pid::from_raw(flight.pid as i32), Signal::SIGTERM);
        }
        let (index, outcome) = match timeout(GRACE, &mut flight.waiter).await {
            Ok(joined) => joined?,
            Err(_elapsed) => {
                tracing::debug!(pid = flight.pid, "grace window elapsed, killing");
                if flight.pid != 0 {
                    let _ = signal::kill(Pid::from_raw(flight.pid as i32), Signal::SIGKILL);
                }
                flight.waiter.await?
            }
        };
        jobs[index].status = match outcome {
            WaitOutcome::Exited(code) => JobStatus::Completed(code),
            WaitOutcome::Signaled(sig) => JobStatus::Signaled(sig),
        };
        tracing::debug!(index, status = %jobs[index].status, "job terminated");
    }
    Ok(())
}
