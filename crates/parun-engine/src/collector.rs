//! Ordered draining of captured job output.
//!
//! Draining only happens after the relevant jobs are resolved, so output
//! order across jobs equals index order even though execution was
//! concurrent.

use std::os::fd::OwnedFd;

use parun_types::JobStatus;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::EngineResult;
use crate::queue::Job;

/// Copy everything left in a pipe's read end to `out`, then close it.
async fn drain_pipe<W>(fd: OwnedFd, out: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut pipe = tokio::fs::File::from_std(std::fs::File::from(fd));
    tokio::io::copy(&mut pipe, out).await?;
    Ok(())
}

/// Append every job's captured stdout to `out`, in index order.
pub(crate) async fn drain_all<W>(jobs: &mut [Job], out: &mut W) -> EngineResult<()>
where
    W: AsyncWrite + Unpin,
{
    for job in jobs.iter_mut() {
        if let Some(fd) = job.output.take() {
            drain_pipe(fd, out).await?;
        }
    }
    out.flush().await?;
    Ok(())
}

/// Pipeline mode: only the final stage's output is externally visible;
/// intermediate pipes exist solely to connect stages.
pub(crate) async fn drain_last<W>(jobs: &mut [Job], out: &mut W) -> EngineResult<()>
where
    W: AsyncWrite + Unpin,
{
    if let Some(job) = jobs.last_mut() {
        if let Some(fd) = job.output.take() {
            drain_pipe(fd, out).await?;
        }
    }
    out.flush().await?;
    Ok(())
}

/// Abort path: emit output for the leading run of jobs that exited
/// normally before the abort, stopping at the first one that did not.
pub(crate) async fn drain_completed_prefix<W>(jobs: &mut [Job], out: &mut W) -> EngineResult<()>
where
    W: AsyncWrite + Unpin,
{
    for job in jobs.iter_mut() {
        if !matches!(job.status, JobStatus::Completed(_)) {
            break;
        }
        if let Some(fd) = job.output.take() {
            drain_pipe(fd, out).await?;
        }
    }
    out.flush().await?;
    Ok(())
}
