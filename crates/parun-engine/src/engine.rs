//! The run engine: slot scheduling, the final wait/abort phase, output
//! collection and exit-status mapping.

use std::os::fd::OwnedFd;

use futures::future::select_all;
use tokio::io::AsyncWrite;
use tokio::task::JoinHandle;

use parun_types::{exit, EngineConfig, JobStatus, MAX_JOB_LIMIT, MIN_JOB_LIMIT};

use crate::collector;
use crate::error::{EngineError, EngineResult};
use crate::launcher::{self, Spawned, WaitOutcome};
use crate::monitor::ChildEventLatch;
use crate::queue::Job;
use crate::terminator;

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The engine's own process exit code.
    pub exit_code: u8,
    /// True when the abort sequence terminated in-flight jobs.
    pub aborted: bool,
    /// Final status of every job, in index order.
    pub statuses: Vec<JobStatus>,
}

/// Bookkeeping for one launched, not-yet-reaped child.
pub(crate) struct InFlight {
    pub(crate) pid: u32,
    pub(crate) waiter: JoinHandle<(usize, WaitOutcome)>,
}

/// Executes one configured run. Single use: [`Engine::run`] consumes it.
pub struct Engine {
    config: EngineConfig,
    jobs: Vec<Job>,
}

impl Engine {
    /// Build an engine, validating the configuration.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        if !(MIN_JOB_LIMIT..=MAX_JOB_LIMIT).contains(&config.job_limit) {
            return Err(EngineError::InvalidJobLimit(config.job_limit));
        }
        for (index, command) in config.commands.iter().enumerate() {
            if command.is_empty() {
                return Err(EngineError::EmptyCommand(index));
            }
        }
        let jobs = config
            .commands
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, command)| Job::new(index, command))
            .collect();
        Ok(Self { config, jobs })
    }

    /// Run every job to resolution, writing collected output to `out`.
    ///
    /// Jobs launch in index order under the concurrency cap; when the cap
    /// is reached the engine blocks for *any* completion before launching
    /// more (a sliding window, not batches of N). After the launch phase,
    /// either the abort sequence or the normal reap path resolves the
    /// rest, output is drained in index order, and the last job's status
    /// determines the exit code.
    #[tracing::instrument(
        level = "debug",
        skip(self, out),
        fields(jobs = self.jobs.len(), limit = self.config.job_limit, pipeline = self.config.pipeline)
    )]
    pub async fn run<W>(mut self, out: &mut W) -> EngineResult<RunReport>
    where
        W: AsyncWrite + Unpin,
    {
        if self.jobs.is_empty() {
            return Ok(RunReport {
                exit_code: exit::EMPTY_RUN,
                aborted: false,
                statuses: Vec::new(),
            });
        }

        let latch = ChildEventLatch::new(
            self.config.pipeline || self.config.halt_on_failure,
            self.config.abort_on,
        );
        let mut inflight: Vec<InFlight> = Vec::new();
        // In pipeline mode, the read end of the previous stage's pipe,
        // waiting to become the next stage's stdin.
        let mut chain: Option<OwnedFd> = None;

        for index in 0..self.jobs.len() {
            let (read_end, write_end) = launcher::allocate_pipe()?;
            let stdin = if self.config.pipeline { chain.take() } else { None };

            match launcher::spawn_job(
                index,
                &self.jobs[index].command,
                write_end,
                stdin,
                latch.clone(),
            ) {
                Spawned::Launched(launched) => {
                    self.jobs[index].pid = Some(launched.pid);
                    self.jobs[index].status = JobStatus::Running;
                    tracing::debug!(index, pid = launched.pid, "launched job");
                    inflight.push(InFlight {
                        pid: launched.pid,
                        waiter: launched.waiter,
                    });
                }
                Spawned::ExecFailed => {
                    self.jobs[index].status = JobStatus::ExecFailed;
                    if !self.config.halt_on_failure {
                        report_exec_failure(self.jobs[index].program());
                    }
                }
            }

            if self.config.pipeline {
                chain = Some(read_end);
            } else {
                self.jobs[index].output = Some(read_end);
            }

            while inflight.len() >= self.config.job_limit {
                inflight = self.reap_any(inflight).await?;
            }
        }

        // The last stage's read end is the pipeline's visible output.
        if let Some(fd) = chain {
            if let Some(last) = self.jobs.last_mut() {
                last.output = Some(fd);
            }
        }

        let aborted = if latch.triggered() {
            tracing::debug!("child event observed, starting abort sequence");
            terminator::abort_run(&mut self.jobs, inflight).await?;
            collector::drain_completed_prefix(&mut self.jobs, out).await?;
            eprintln!("parun: aborting because of execution failure");
            true
        } else {
            for flight in inflight {
                let (index, outcome) = flight.waiter.await?;
                self.record(index, outcome);
            }
            if self.config.pipeline {
                collector::drain_last(&mut self.jobs, out).await?;
            } else {
                collector::drain_all(&mut self.jobs, out).await?;
            }
            false
        };

        let exit_code = if aborted {
            exit::ABORTED
        } else {
            exit::code_for_last(self.jobs.last().map(|job| &job.status))
        };
        Ok(RunReport {
            exit_code,
            aborted,
            statuses: self.jobs.iter().map(|job| job.status).collect(),
        })
    }

    /// Block for any running job's completion and record it, freeing one
    /// slot. The choice of which job resolves is first-to-complete.
    async fn reap_any(&mut self, mut inflight: Vec<InFlight>) -> EngineResult<Vec<InFlight>> {
        debug_assert!(!inflight.is_empty());
        let waiters: Vec<_> = inflight.iter_mut().map(|f| &mut f.waiter).collect();
        let (joined, which, _) = select_all(waiters).await;
        let (index, outcome) = joined?;
        inflight.swap_remove(which);
        self.record(index, outcome);
        Ok(inflight)
    }

    fn record(&mut self, index: usize, outcome: WaitOutcome) {
        let status = match outcome {
            WaitOutcome::Exited(code) => JobStatus::Completed(code),
            WaitOutcome::Signaled(sig) => JobStatus::Signaled(sig),
        };
        tracing::debug!(index, %status, "job resolved");
        self.jobs[index].status = status;
    }
}

fn report_exec_failure(program: &str) {
    eprintln!("parun: \"{program}\" not able to be executed");
}
